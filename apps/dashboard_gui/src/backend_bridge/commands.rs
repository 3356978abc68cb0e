//! Backend commands queued from UI to backend worker.

use shared::domain::{ArtistDraft, ArtistId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    Refresh,
    AddArtist { draft: ArtistDraft },
    UpdateArtist { id: ArtistId, draft: ArtistDraft },
    DeleteArtist { id: ArtistId },
    FetchImage { url: String },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Refresh => "refresh",
            Self::AddArtist { .. } => "add_artist",
            Self::UpdateArtist { .. } => "update_artist",
            Self::DeleteArtist { .. } => "delete_artist",
            Self::FetchImage { .. } => "fetch_image",
        }
    }
}
