use super::*;

use std::{
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

fn configured() -> Settings {
    Settings {
        store_url: "https://abc.supabase.co".into(),
        anon_key: "anon".into(),
        table: "artists".into(),
    }
}

#[test]
fn builds_rest_endpoint_from_base_url() {
    let url = configured().rest_endpoint().expect("endpoint");
    assert_eq!(url.as_str(), "https://abc.supabase.co/rest/v1/artists");
}

#[test]
fn rest_endpoint_tolerates_trailing_slash() {
    let settings = Settings {
        store_url: "http://127.0.0.1:54321/".into(),
        ..configured()
    };
    assert_eq!(
        settings.rest_endpoint().expect("endpoint").as_str(),
        "http://127.0.0.1:54321/rest/v1/artists"
    );
}

#[test]
fn rejects_non_http_store_url() {
    let settings = Settings {
        store_url: "ftp://example.com".into(),
        ..configured()
    };
    assert_eq!(
        settings.validate(),
        Err(SettingsError::InvalidStoreUrl("ftp://example.com".into()))
    );
}

#[test]
fn rejects_missing_anon_key() {
    let settings = Settings {
        anon_key: "  ".into(),
        ..configured()
    };
    assert_eq!(settings.validate(), Err(SettingsError::MissingAnonKey));
}

#[test]
fn debug_output_redacts_anon_key() {
    let rendered = format!("{:?}", configured());
    assert!(rendered.contains("<redacted>"));
    assert!(!rendered.contains("\"anon\""));
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file_overrides(
        &mut settings,
        "store_url = \"https://file.example\"\nanon_key = \"from-file\"\n",
    )
    .expect("parse");
    assert_eq!(settings.store_url, "https://file.example");
    assert_eq!(settings.anon_key, "from-file");
    assert_eq!(settings.table, "artists");
}

#[test]
fn malformed_file_is_reported() {
    let mut settings = Settings::default();
    assert!(apply_file_overrides(&mut settings, "store_url = [1, 2]").is_err());
}

#[test]
fn app_prefixed_env_wins_over_supabase_names() {
    let mut settings = Settings::default();
    apply_env_overrides(
        &mut settings,
        env_from(&[
            ("SUPABASE_URL", "https://supabase.example"),
            ("APP__STORE_URL", "https://app.example"),
            ("SUPABASE_ANON_KEY", "supabase-key"),
            ("APP__TABLE", "artists_staging"),
        ]),
    );
    assert_eq!(settings.store_url, "https://app.example");
    assert_eq!(settings.anon_key, "supabase-key");
    assert_eq!(settings.table, "artists_staging");
}

#[test]
fn blank_env_values_are_ignored() {
    let mut settings = configured();
    apply_env_overrides(&mut settings, env_from(&[("SUPABASE_ANON_KEY", "")]));
    assert_eq!(settings.anon_key, "anon");
}

#[test]
fn explicit_config_path_must_exist() {
    let missing = env::temp_dir().join("artist_dashboard_missing_config.toml");
    assert!(load_settings(Some(&missing)).is_err());
}

#[test]
fn loads_explicit_config_file() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("artist_dashboard_config_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("dashboard.toml");
    fs::write(&path, "table = \"artists_from_file\"\n").expect("write config");

    let settings = load_settings(Some(&path)).expect("load");
    if env::var("APP__TABLE").is_err() {
        assert_eq!(settings.table, "artists_from_file");
    }

    fs::remove_dir_all(temp_root).expect("cleanup");
}
