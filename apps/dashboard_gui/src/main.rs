use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use backend_bridge::{commands::BackendCommand, runtime};
use controller::events::{UiError, UiErrorContext, UiEvent};
use ui::{DashboardApp, PersistedDashboardSettings, SETTINGS_STORAGE_KEY};

#[derive(Parser, Debug)]
#[command(name = "dashboard_gui", about = "Desktop dashboard for the hosted artists table")]
struct Args {
    /// TOML file with store_url / anon_key / table; env vars still override it.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);

    match client_core::load_settings(args.config.as_deref()) {
        Ok(settings) => runtime::launch(settings, cmd_rx, ui_tx),
        Err(err) => {
            drop(cmd_rx);
            tracing::error!("failed to load settings: {err:#}");
            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                format!("failed to load settings: {err:#}"),
            )));
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Artist Dashboard")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([520.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Artist Dashboard",
        options,
        Box::new(|cc| {
            let persisted = cc.storage.and_then(|storage| {
                storage.get_string(SETTINGS_STORAGE_KEY).and_then(|text| {
                    serde_json::from_str::<PersistedDashboardSettings>(&text).ok()
                })
            });
            Ok(Box::new(DashboardApp::new(cmd_tx, ui_rx, persisted)))
        }),
    )
    .map_err(|err| anyhow::anyhow!("dashboard window failed: {err}"))
}
