//! Artist card rendering.

use chrono::Local;
use eframe::egui;
use shared::domain::Artist;

use super::theme::{lighten_color, ACCENT, ACCENT_SOFT, DANGER, MUTED_TEXT};

pub const CARD_WIDTH: f32 = 200.0;
const IMAGE_HEIGHT: f32 = 200.0;

/// What the card shows in its image slot.
pub enum CardImage {
    Texture(egui::TextureHandle),
    Loading,
    Placeholder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    Edit,
    Delete,
}

pub fn artist_card(ui: &mut egui::Ui, artist: &Artist, image: CardImage) -> Option<CardAction> {
    let mut action = None;
    let fill = lighten_color(ui.visuals().panel_fill, 0.04);

    egui::Frame::NONE
        .fill(fill)
        .corner_radius(12.0)
        .stroke(egui::Stroke::new(
            1.0,
            ui.visuals().widgets.noninteractive.bg_stroke.color,
        ))
        .inner_margin(egui::Margin::same(10))
        .show(ui, |ui| {
            ui.set_width(CARD_WIDTH);
            ui.vertical(|ui| {
                let size = egui::vec2(CARD_WIDTH, IMAGE_HEIGHT);
                match image {
                    CardImage::Texture(texture) => {
                        ui.add(egui::Image::new(&texture).fit_to_exact_size(size));
                    }
                    CardImage::Loading => {
                        let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
                        paint_placeholder(ui, rect);
                        ui.put(rect, egui::Spinner::new());
                    }
                    CardImage::Placeholder => {
                        let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
                        paint_placeholder(ui, rect);
                    }
                }

                ui.add_space(6.0);
                ui.add(
                    egui::Label::new(egui::RichText::new(artist.name.as_str()).strong().size(16.0))
                        .truncate(),
                )
                .on_hover_text(artist.name.as_str());
                ui.label(
                    egui::RichText::new(format!(" {} ", artist.genre))
                        .color(ACCENT)
                        .background_color(ACCENT_SOFT),
                );
                if let Some(created_at) = artist.created_at {
                    ui.label(
                        egui::RichText::new(format!(
                            "Added {}",
                            created_at.with_timezone(&Local).format("%b %-d, %Y")
                        ))
                        .small()
                        .color(MUTED_TEXT),
                    );
                }

                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    if ui.button("✏ Edit").clicked() {
                        action = Some(CardAction::Edit);
                    }
                    if ui
                        .button(egui::RichText::new("🗑 Delete").color(DANGER))
                        .clicked()
                    {
                        action = Some(CardAction::Delete);
                    }
                });
            });
        });

    action
}

fn paint_placeholder(ui: &egui::Ui, rect: egui::Rect) {
    let painter = ui.painter();
    painter.rect_filled(rect, 8.0, ACCENT_SOFT);
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        "🎵",
        egui::FontId::proportional(48.0),
        ACCENT,
    );
}
