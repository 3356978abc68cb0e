//! UI layer for the dashboard: app shell, artist cards, modal forms and theme.

pub mod app;
pub mod cards;
pub mod dialogs;
pub mod theme;

pub use app::{DashboardApp, PersistedDashboardSettings, SETTINGS_STORAGE_KEY};
