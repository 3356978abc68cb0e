use std::collections::HashMap;

use client_core::view::artist_count_label;
use client_core::{EmptyState, GenreFilter, SortKey, ViewQuery};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use serde::{Deserialize, Serialize};
use shared::domain::Artist;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::UiEvent,
    orchestration::dispatch_backend_command,
    reducer::{DashboardModel, Dialog, ImageSlot},
};

use super::cards::{artist_card, CardAction, CardImage};
use super::dialogs::{artist_form_modal, delete_modal, DialogOutcome, ADD_LABELS, EDIT_LABELS};
use super::theme::{lighten_color, ACCENT, ACCENT_SOFT, MUTED_TEXT};

pub const SETTINGS_STORAGE_KEY: &str = "artist_dashboard.settings";

/// View preferences remembered between sessions. Search text is not kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedDashboardSettings {
    pub sort: SortKey,
    pub genre: GenreFilter,
}

impl PersistedDashboardSettings {
    pub fn from_query(query: &ViewQuery) -> Self {
        Self {
            sort: query.sort,
            genre: query.genre.clone(),
        }
    }

    pub fn into_query(self) -> ViewQuery {
        ViewQuery {
            search: String::new(),
            genre: self.genre,
            sort: self.sort,
        }
    }
}

pub struct DashboardApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    model: DashboardModel,
    search_input: String,
    textures: HashMap<String, egui::TextureHandle>,
}

impl DashboardApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        persisted: Option<PersistedDashboardSettings>,
    ) -> Self {
        let query = persisted.unwrap_or_default().into_query();
        let mut app = Self {
            cmd_tx,
            ui_rx,
            model: DashboardModel::new(query),
            search_input: String::new(),
            textures: HashMap::new(),
        };
        app.dispatch(BackendCommand::Refresh);
        app
    }

    fn dispatch(&mut self, cmd: BackendCommand) {
        if let Err(failure) = dispatch_backend_command(&self.cmd_tx, cmd) {
            self.model.dispatch_failed(failure);
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.model.apply(event);
        }
    }

    fn show_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("🎵").size(28.0));
            ui.vertical(|ui| {
                ui.heading("Artist Dashboard");
                ui.label(egui::RichText::new("Manage your music collection").color(MUTED_TEXT));
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let add = egui::Button::new(
                    egui::RichText::new("➕ Add Artist").color(egui::Color32::WHITE),
                )
                .fill(ACCENT);
                if ui
                    .add_enabled(!self.model.is_submitting(), add)
                    .clicked()
                {
                    self.model.open_add();
                }
                ui.label(
                    egui::RichText::new(format!(" {} ", artist_count_label(self.model.view.total())))
                        .color(ACCENT)
                        .background_color(ACCENT_SOFT),
                );
                if ui
                    .add_enabled(self.model.is_backend_ready(), egui::Button::new("⟳"))
                    .on_hover_text("Reload artists")
                    .clicked()
                {
                    self.dispatch(BackendCommand::Refresh);
                }
            });
        });
    }

    fn show_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            let search = ui.add(
                egui::TextEdit::singleline(&mut self.search_input)
                    .hint_text("Search artists or genres...")
                    .desired_width(280.0),
            );
            if search.changed() {
                self.model.view.set_search(self.search_input.clone());
            }

            let query = self.model.view.query().clone();
            let mut genre = query.genre.clone();
            let mut genres = self.model.view.genres();
            // A remembered genre stays selectable even after its last artist is gone.
            if let GenreFilter::Only(selected) = &query.genre {
                if !genres.contains(selected) {
                    genres.push(selected.clone());
                }
            }
            egui::ComboBox::from_id_salt("genre_filter")
                .selected_text(genre.label().to_string())
                .width(160.0)
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut genre, GenreFilter::All, "All Genres");
                    for name in &genres {
                        ui.selectable_value(&mut genre, GenreFilter::Only(name.clone()), name.as_str());
                    }
                });
            if genre != query.genre {
                self.model.view.set_genre(genre);
            }

            let mut sort = query.sort;
            egui::ComboBox::from_id_salt("sort_order")
                .selected_text(sort.label())
                .width(140.0)
                .show_ui(ui, |ui| {
                    for key in SortKey::ALL {
                        ui.selectable_value(&mut sort, key, key.label());
                    }
                });
            if sort != query.sort {
                self.model.view.set_sort(sort);
            }
        });
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        let Some(message) = self.model.status.clone() else {
            return;
        };
        egui::Frame::NONE
            .fill(egui::Color32::from_rgb(111, 53, 53))
            .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Dismiss").clicked() {
                            self.model.status = None;
                        }
                    });
                });
            });
        ui.add_space(8.0);
    }

    fn show_artists(&mut self, ui: &mut egui::Ui) {
        if self.model.view.is_loading() {
            ui.vertical_centered(|ui| {
                ui.add_space(80.0);
                ui.add(egui::Spinner::new().size(32.0));
                ui.label(egui::RichText::new("Loading your artists...").color(MUTED_TEXT));
            });
            return;
        }

        if let Some(empty) = self.model.view.empty_state() {
            self.show_empty_state(ui, empty);
            return;
        }

        let artists: Vec<Artist> = self.model.view.visible().cloned().collect();
        let ctx = ui.ctx().clone();
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.spacing_mut().item_spacing = egui::vec2(16.0, 16.0);
                    for artist in &artists {
                        let image = self.resolve_image(&ctx, artist);
                        match artist_card(ui, artist, image) {
                            Some(CardAction::Edit) => self.model.open_edit(artist),
                            Some(CardAction::Delete) => self.model.open_delete(artist),
                            None => {}
                        }
                    }
                });
            });
    }

    fn show_empty_state(&mut self, ui: &mut egui::Ui, empty: EmptyState) {
        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            egui::Frame::NONE
                .fill(lighten_color(ui.visuals().panel_fill, 0.04))
                .corner_radius(14.0)
                .inner_margin(egui::Margin::symmetric(28, 24))
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.label(egui::RichText::new("🎵").size(40.0).color(ACCENT));
                        ui.heading(empty.title());
                        ui.label(egui::RichText::new(empty.hint()).color(MUTED_TEXT));
                        if empty == EmptyState::NoArtistsYet {
                            ui.add_space(8.0);
                            if ui.button("➕ Add Your First Artist").clicked() {
                                self.model.open_add();
                            }
                        }
                    });
                });
        });
    }

    fn resolve_image(&mut self, ctx: &egui::Context, artist: &Artist) -> CardImage {
        let Some(url) = artist.image_url() else {
            return CardImage::Placeholder;
        };
        if let Some(texture) = self.textures.get(url) {
            return CardImage::Texture(texture.clone());
        }
        if let Some(image) = self.model.take_ready_image(url) {
            let color_image = egui::ColorImage::from_rgba_unmultiplied(image.size, &image.rgba);
            let texture = ctx.load_texture(
                format!("artist-image:{url}"),
                color_image,
                egui::TextureOptions::LINEAR,
            );
            self.textures.insert(url.to_string(), texture.clone());
            return CardImage::Texture(texture);
        }
        match self.model.image_slot(url) {
            None => {
                let Some(cmd) = self.model.request_image(url) else {
                    return CardImage::Loading;
                };
                match dispatch_backend_command(&self.cmd_tx, cmd) {
                    Ok(()) => CardImage::Loading,
                    Err(failure) => {
                        self.model.image_dispatch_failed(url, failure);
                        CardImage::Placeholder
                    }
                }
            }
            Some(ImageSlot::Loading | ImageSlot::Ready(_)) => CardImage::Loading,
            Some(ImageSlot::Uploaded | ImageSlot::Failed) => CardImage::Placeholder,
        }
    }

    fn show_dialogs(&mut self, ctx: &egui::Context) {
        let submitting = self.model.is_submitting();
        let outcome = match self.model.dialog.clone() {
            Dialog::Closed => return,
            Dialog::Add => artist_form_modal(ctx, &ADD_LABELS, &mut self.model.add_form, submitting),
            Dialog::Edit { .. } => {
                artist_form_modal(ctx, &EDIT_LABELS, &mut self.model.edit_form, submitting)
            }
            Dialog::Delete { name, .. } => delete_modal(ctx, &name, submitting),
        };

        match outcome {
            DialogOutcome::Pending => {}
            DialogOutcome::Cancel => self.model.close_dialog(),
            DialogOutcome::Submit => {
                if let Some(cmd) = self.model.submit() {
                    self.dispatch(cmd);
                }
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::top("dashboard_header")
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(16, 12)))
            .show(ctx, |ui| self.show_header(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_status_banner(ui);
            self.show_controls(ui);
            ui.add_space(12.0);
            self.show_artists(ui);
        });

        self.show_dialogs(ctx);

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = PersistedDashboardSettings::from_query(self.model.view.query());
        if let Ok(serialized) = serde_json::to_string(&settings) {
            storage.set_string(SETTINGS_STORAGE_KEY, serialized);
        }
    }
}
