//! Backend-to-UI events and error modeling for the dashboard controller.

use client_core::{StoreError, StoreOperation};
use shared::domain::Artist;

/// Decoded RGBA pixels ready to upload as a texture.
#[derive(Clone)]
pub struct PreviewImage {
    pub size: [usize; 2],
    pub rgba: Vec<u8>,
}

impl std::fmt::Debug for PreviewImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewImage")
            .field("size", &self.size)
            .field("bytes", &self.rgba.len())
            .finish()
    }
}

#[derive(Debug)]
pub enum UiEvent {
    BackendReady,
    ArtistsLoaded(Vec<Artist>),
    LoadFailed(UiError),
    MutationApplied {
        operation: StoreOperation,
        refreshed: Option<Vec<Artist>>,
    },
    MutationFailed {
        operation: StoreOperation,
        error: UiError,
    },
    ImageLoaded {
        url: String,
        image: PreviewImage,
    },
    ImageFailed {
        url: String,
        reason: String,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Auth,
    Transport,
    Store,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Load,
    Mutation(StoreOperation),
    General,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("http 401")
            || message_lower.contains("http 403")
            || message_lower.contains("invalid api key")
            || message_lower.contains("jwt")
            || message_lower.contains("access key")
        {
            UiErrorCategory::Auth
        } else if message_lower.contains("invalid artist")
            || message_lower.contains("must not be empty")
            || message_lower.contains("not a valid")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("request failed")
            || message_lower.contains("connection")
            || message_lower.contains("timed out")
            || message_lower.contains("dns")
            || message_lower.contains("disconnected")
        {
            UiErrorCategory::Transport
        } else if message_lower.contains("http ") || message_lower.contains("malformed response")
        {
            UiErrorCategory::Store
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_store(err: &StoreError) -> Self {
        let context = match err.operation {
            StoreOperation::FetchAll => UiErrorContext::Load,
            operation => UiErrorContext::Mutation(operation),
        };
        Self::from_message(context, err.to_string())
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// One-line banner text.
    pub fn summary(&self) -> String {
        let action = match self.context {
            UiErrorContext::BackendStartup => "Could not start",
            UiErrorContext::Load => "Error fetching artists",
            UiErrorContext::Mutation(StoreOperation::Insert) => "Error adding artist",
            UiErrorContext::Mutation(StoreOperation::Update) => "Error updating artist",
            UiErrorContext::Mutation(StoreOperation::Delete) => "Error deleting artist",
            UiErrorContext::Mutation(StoreOperation::FetchAll) | UiErrorContext::General => {
                "Error"
            }
        };
        format!("{action} ({}): {}", err_label(self.category), self.message)
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Auth => "Authentication",
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Store => "Store",
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Unknown => "Unexpected",
    }
}
