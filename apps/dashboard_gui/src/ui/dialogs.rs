//! Modal dialogs for adding, editing and deleting artists.

use eframe::egui;

use crate::controller::reducer::ArtistForm;

use super::theme::{DANGER, MUTED_TEXT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    Pending,
    Submit,
    Cancel,
}

pub struct FormLabels {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub submit: &'static str,
    pub busy: &'static str,
}

pub const ADD_LABELS: FormLabels = FormLabels {
    id: "add_artist_modal",
    title: "Add New Artist",
    description: "Add a new artist to your collection.",
    submit: "Add Artist",
    busy: "Adding...",
};

pub const EDIT_LABELS: FormLabels = FormLabels {
    id: "edit_artist_modal",
    title: "Edit Artist",
    description: "Update the artist's information.",
    submit: "Update Artist",
    busy: "Updating...",
};

pub fn artist_form_modal(
    ctx: &egui::Context,
    labels: &FormLabels,
    form: &mut ArtistForm,
    submitting: bool,
) -> DialogOutcome {
    let modal = egui::Modal::new(egui::Id::new(labels.id)).show(ctx, |ui| {
        ui.set_width(360.0);
        ui.heading(labels.title);
        ui.label(egui::RichText::new(labels.description).color(MUTED_TEXT));
        ui.add_space(8.0);

        let mut enter_pressed = false;
        ui.add_enabled_ui(!submitting, |ui| {
            egui::Grid::new((labels.id, "fields"))
                .num_columns(2)
                .spacing([8.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Name *");
                    let name = ui.add(
                        egui::TextEdit::singleline(&mut form.name)
                            .hint_text("Enter artist name")
                            .desired_width(240.0),
                    );
                    ui.end_row();

                    ui.label("Genre *");
                    let genre = ui.add(
                        egui::TextEdit::singleline(&mut form.genre)
                            .hint_text("Enter genre")
                            .desired_width(240.0),
                    );
                    ui.end_row();

                    ui.label("Image URL");
                    let image = ui.add(
                        egui::TextEdit::singleline(&mut form.image)
                            .hint_text("https://example.com/artist-image.jpg")
                            .desired_width(240.0),
                    );
                    ui.end_row();

                    enter_pressed = [name, genre, image].iter().any(|field| {
                        field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
                    });
                });
        });

        ui.add_space(12.0);
        let can_submit = form.can_submit() && !submitting;
        let mut outcome = DialogOutcome::Pending;
        ui.horizontal(|ui| {
            let submit_text = if submitting { labels.busy } else { labels.submit };
            if ui
                .add_enabled(can_submit, egui::Button::new(submit_text))
                .clicked()
                || (can_submit && enter_pressed)
            {
                outcome = DialogOutcome::Submit;
            }
            if ui
                .add_enabled(!submitting, egui::Button::new("Cancel"))
                .clicked()
            {
                outcome = DialogOutcome::Cancel;
            }
        });
        outcome
    });

    if modal.inner == DialogOutcome::Pending && modal.should_close() && !submitting {
        DialogOutcome::Cancel
    } else {
        modal.inner
    }
}

pub fn delete_modal(ctx: &egui::Context, name: &str, submitting: bool) -> DialogOutcome {
    let modal = egui::Modal::new(egui::Id::new("delete_artist_modal")).show(ctx, |ui| {
        ui.set_width(360.0);
        ui.heading("Are you sure?");
        ui.label(format!(
            "This will permanently delete {name} from your collection. This action cannot be undone."
        ));
        ui.add_space(12.0);

        let mut outcome = DialogOutcome::Pending;
        ui.horizontal(|ui| {
            let label = if submitting { "Deleting..." } else { "Delete" };
            if ui
                .add_enabled(
                    !submitting,
                    egui::Button::new(egui::RichText::new(label).color(egui::Color32::WHITE))
                        .fill(DANGER),
                )
                .clicked()
            {
                outcome = DialogOutcome::Submit;
            }
            if ui
                .add_enabled(!submitting, egui::Button::new("Cancel"))
                .clicked()
            {
                outcome = DialogOutcome::Cancel;
            }
        });
        outcome
    });

    if modal.inner == DialogOutcome::Pending && modal.should_close() && !submitting {
        DialogOutcome::Cancel
    } else {
        modal.inner
    }
}
