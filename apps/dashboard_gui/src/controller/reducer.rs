//! Dashboard state and its transitions, kept free of egui so it can be tested directly.

use std::collections::HashMap;

use client_core::{StoreOperation, ViewQuery, ViewState};
use shared::domain::{Artist, ArtistDraft, ArtistId};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{PreviewImage, UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::DispatchFailure;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistForm {
    pub name: String,
    pub genre: String,
    pub image: String,
}

impl ArtistForm {
    pub fn from_artist(artist: &Artist) -> Self {
        let draft = artist.to_draft();
        Self {
            name: draft.name,
            genre: draft.genre,
            image: draft.image,
        }
    }

    pub fn draft(&self) -> ArtistDraft {
        ArtistDraft::new(&self.name, &self.genre, &self.image)
    }

    pub fn can_submit(&self) -> bool {
        self.draft().is_valid()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    Closed,
    Add,
    Edit { id: ArtistId },
    Delete { id: ArtistId, name: String },
}

#[derive(Debug)]
pub enum ImageSlot {
    Loading,
    Ready(PreviewImage),
    Uploaded,
    Failed,
}

#[derive(Debug)]
pub struct DashboardModel {
    pub view: ViewState,
    pub dialog: Dialog,
    pub add_form: ArtistForm,
    pub edit_form: ArtistForm,
    pub status: Option<String>,
    submitting: bool,
    backend_ready: bool,
    images: HashMap<String, ImageSlot>,
}

impl DashboardModel {
    pub fn new(query: ViewQuery) -> Self {
        Self {
            view: ViewState::new(query),
            dialog: Dialog::Closed,
            add_form: ArtistForm::default(),
            edit_form: ArtistForm::default(),
            status: None,
            submitting: false,
            backend_ready: false,
            images: HashMap::new(),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_backend_ready(&self) -> bool {
        self.backend_ready
    }

    pub fn open_add(&mut self) {
        if !self.submitting {
            self.dialog = Dialog::Add;
        }
    }

    pub fn open_edit(&mut self, artist: &Artist) {
        if !self.submitting {
            self.edit_form = ArtistForm::from_artist(artist);
            self.dialog = Dialog::Edit {
                id: artist.id.clone(),
            };
        }
    }

    pub fn open_delete(&mut self, artist: &Artist) {
        if !self.submitting {
            self.dialog = Dialog::Delete {
                id: artist.id.clone(),
                name: artist.name.clone(),
            };
        }
    }

    /// Cancel is ignored while a request from the dialog is in flight.
    pub fn close_dialog(&mut self) {
        if !self.submitting {
            self.dialog = Dialog::Closed;
        }
    }

    pub fn can_submit(&self) -> bool {
        if self.submitting {
            return false;
        }
        match &self.dialog {
            Dialog::Closed => false,
            Dialog::Add => self.add_form.can_submit(),
            Dialog::Edit { .. } => self.edit_form.can_submit(),
            Dialog::Delete { .. } => true,
        }
    }

    /// Command for the open dialog, or `None` when nothing may be submitted.
    pub fn submit(&mut self) -> Option<BackendCommand> {
        if !self.can_submit() {
            return None;
        }
        let command = match &self.dialog {
            Dialog::Closed => return None,
            Dialog::Add => BackendCommand::AddArtist {
                draft: self.add_form.draft(),
            },
            Dialog::Edit { id } => BackendCommand::UpdateArtist {
                id: id.clone(),
                draft: self.edit_form.draft(),
            },
            Dialog::Delete { id, .. } => BackendCommand::DeleteArtist { id: id.clone() },
        };
        self.submitting = true;
        self.status = None;
        Some(command)
    }

    /// Marks `url` as requested; returns the fetch command the first time only.
    pub fn request_image(&mut self, url: &str) -> Option<BackendCommand> {
        if self.images.contains_key(url) {
            return None;
        }
        self.images.insert(url.to_string(), ImageSlot::Loading);
        Some(BackendCommand::FetchImage {
            url: url.to_string(),
        })
    }

    pub fn image_slot(&self, url: &str) -> Option<&ImageSlot> {
        self.images.get(url)
    }

    /// Hands decoded pixels to the renderer once; the slot then reads `Uploaded`.
    pub fn take_ready_image(&mut self, url: &str) -> Option<PreviewImage> {
        let slot = self.images.get_mut(url)?;
        match std::mem::replace(slot, ImageSlot::Uploaded) {
            ImageSlot::Ready(image) => Some(image),
            other => {
                *slot = other;
                None
            }
        }
    }

    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::BackendReady => {
                self.backend_ready = true;
            }
            UiEvent::ArtistsLoaded(artists) => {
                self.view.replace_artists(artists);
            }
            UiEvent::LoadFailed(error) => {
                self.view.mark_loaded();
                self.status = Some(error.summary());
            }
            UiEvent::MutationApplied {
                operation,
                refreshed,
            } => {
                self.submitting = false;
                self.dialog = Dialog::Closed;
                if operation == StoreOperation::Insert {
                    self.add_form = ArtistForm::default();
                }
                if let Some(artists) = refreshed {
                    self.view.replace_artists(artists);
                }
            }
            UiEvent::MutationFailed { error, .. } => {
                self.submitting = false;
                self.status = Some(error.summary());
            }
            UiEvent::ImageLoaded { url, image } => {
                self.images.insert(url, ImageSlot::Ready(image));
            }
            UiEvent::ImageFailed { url, reason } => {
                tracing::debug!(%url, %reason, "artist image unavailable; using placeholder");
                self.images.insert(url, ImageSlot::Failed);
            }
            UiEvent::Error(error) => {
                if error.context() == UiErrorContext::BackendStartup {
                    self.view.mark_loaded();
                }
                self.status = Some(error.summary());
            }
        }
    }

    /// A command could not be queued: release the dialog and explain why.
    pub fn dispatch_failed(&mut self, failure: DispatchFailure) {
        self.submitting = false;
        self.view.mark_loaded();
        self.status = Some(
            UiError::from_message(UiErrorContext::General, failure.status_text()).summary(),
        );
    }

    /// An image fetch could not be queued. A full queue forgets the request so
    /// a later frame asks again; a dead worker leaves the placeholder.
    pub fn image_dispatch_failed(&mut self, url: &str, failure: DispatchFailure) {
        match failure {
            DispatchFailure::QueueFull => {
                self.images.remove(url);
            }
            DispatchFailure::Disconnected => {
                self.images.insert(url.to_string(), ImageSlot::Failed);
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/reducer_tests.rs"]
mod tests;
