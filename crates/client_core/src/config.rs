use std::{
    collections::HashMap,
    fmt, fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;
use shared::protocol::{ARTISTS_TABLE, REST_PATH_PREFIX};
use thiserror::Error;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "dashboard.toml";
const CONFIG_DIR_NAME: &str = "artist_dashboard";

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub store_url: String,
    pub anon_key: String,
    pub table: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_url: "http://127.0.0.1:54321".into(),
            anon_key: String::new(),
            table: ARTISTS_TABLE.into(),
        }
    }
}

// The anon key ends up in request headers; keep it out of logs.
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("store_url", &self.store_url)
            .field("anon_key", &redact(&self.anon_key))
            .field("table", &self.table)
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("store access key is not configured (set SUPABASE_ANON_KEY or anon_key)")]
    MissingAnonKey,
    #[error("store url '{0}' is not a valid http(s) url")]
    InvalidStoreUrl(String),
    #[error("table name must not be empty")]
    EmptyTable,
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.anon_key.trim().is_empty() {
            return Err(SettingsError::MissingAnonKey);
        }
        if self.table.trim().is_empty() {
            return Err(SettingsError::EmptyTable);
        }
        self.rest_endpoint().map(|_| ())
    }

    /// `{store_url}/rest/v1/{table}`, tolerant of a trailing slash on the base.
    pub fn rest_endpoint(&self) -> Result<Url, SettingsError> {
        let invalid = || SettingsError::InvalidStoreUrl(self.store_url.clone());
        let mut url = Url::parse(self.store_url.trim()).map_err(|_| invalid())?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid());
        }
        {
            let mut segments = url.path_segments_mut().map_err(|_| invalid())?;
            segments.pop_if_empty();
            segments.extend(REST_PATH_PREFIX.split('/'));
            segments.push(self.table.trim());
        }
        Ok(url)
    }
}

/// Defaults, then the config file, then environment overrides.
///
/// An explicit `config_path` must exist; the implicit lookup
/// (`./dashboard.toml`, then the per-user config dir) is best effort.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let raw = match config_path {
        Some(path) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("failed to read config file '{}'", path.display()))?,
        ),
        None => default_config_paths()
            .into_iter()
            .find_map(|path| fs::read_to_string(path).ok()),
    };

    if let Some(raw) = raw {
        apply_file_overrides(&mut settings, &raw)?;
    }
    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());

    Ok(settings)
}

pub fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(DEFAULT_CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join(CONFIG_DIR_NAME).join(DEFAULT_CONFIG_FILE));
    }
    paths
}

pub(crate) fn apply_file_overrides(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg = toml::from_str::<HashMap<String, String>>(raw)
        .context("config file must be a flat table of string values")?;

    if let Some(v) = file_cfg.get("store_url") {
        settings.store_url = v.clone();
    }
    if let Some(v) = file_cfg.get("anon_key") {
        settings.anon_key = v.clone();
    }
    if let Some(v) = file_cfg.get("table") {
        settings.table = v.clone();
    }
    Ok(())
}

pub(crate) fn apply_env_overrides(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
) {
    let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    if let Some(v) = read("SUPABASE_URL") {
        settings.store_url = v;
    }
    if let Some(v) = read("APP__STORE_URL") {
        settings.store_url = v;
    }

    if let Some(v) = read("SUPABASE_ANON_KEY") {
        settings.anon_key = v;
    }
    if let Some(v) = read("APP__ANON_KEY") {
        settings.anon_key = v;
    }

    if let Some(v) = read("APP__TABLE") {
        settings.table = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
