//! Client side of the artist dashboard: settings, the hosted-store gateway
//! and the view-state controller shared by the GUI and CLI front ends.

pub mod config;
pub mod error;
pub mod gateway;
mod memory_store;
pub mod store;
pub mod view;

pub use config::{load_settings, Settings, SettingsError};
pub use error::{StoreError, StoreOperation};
pub use gateway::{ArtistGateway, MutationReceipt};
pub use memory_store::MemoryArtistStore;
pub use store::{ArtistStore, RestArtistStore};
pub use view::{EmptyState, GenreFilter, SortKey, ViewQuery, ViewState};
