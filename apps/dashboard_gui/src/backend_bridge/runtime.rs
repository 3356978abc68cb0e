//! Runtime bridge between UI command queue and backend event intake.
//!
//! The worker owns a tokio runtime on its own thread. Each queued command runs
//! as its own task, so a slow request never stalls the ones behind it.

use std::{sync::Arc, thread};

use client_core::{ArtistGateway, RestArtistStore, Settings};
use crossbeam_channel::{Receiver, Sender};
use reqwest::Client as HttpClient;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{PreviewImage, UiError, UiErrorContext, UiEvent};

#[derive(Clone)]
pub struct BackendContext {
    pub gateway: ArtistGateway,
    pub http: HttpClient,
}

pub fn launch(settings: Settings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let http = HttpClient::new();
        let store = match RestArtistStore::with_client(http.clone(), &settings) {
            Ok(store) => store,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    err.to_string(),
                )));
                tracing::error!(settings = ?settings, "store is not configured: {err}");
                return;
            }
        };
        tracing::info!(endpoint = %store.endpoint(), "backend worker ready");

        let context = BackendContext {
            gateway: ArtistGateway::new(Arc::new(store)),
            http,
        };
        let _ = ui_tx.try_send(UiEvent::BackendReady);

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                let context = context.clone();
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let event = handle_command(&context, cmd).await;
                    if ui_tx.send(event).is_err() {
                        tracing::debug!("ui closed before backend event was delivered");
                    }
                });
            }
            tracing::info!("ui command queue closed; backend worker exiting");
        });
    });
}

pub async fn handle_command(context: &BackendContext, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::Refresh => match context.gateway.fetch_all().await {
            Ok(artists) => UiEvent::ArtistsLoaded(artists),
            Err(err) => UiEvent::LoadFailed(UiError::from_store(&err)),
        },
        BackendCommand::AddArtist { draft } => {
            mutation_event(context.gateway.insert(&draft).await)
        }
        BackendCommand::UpdateArtist { id, draft } => {
            mutation_event(context.gateway.update(&id, &draft).await)
        }
        BackendCommand::DeleteArtist { id } => mutation_event(context.gateway.delete(&id).await),
        BackendCommand::FetchImage { url } => match fetch_preview_image(&context.http, &url).await
        {
            Ok(image) => UiEvent::ImageLoaded { url, image },
            Err(reason) => UiEvent::ImageFailed { url, reason },
        },
    }
}

fn mutation_event(
    result: Result<client_core::MutationReceipt, client_core::StoreError>,
) -> UiEvent {
    match result {
        Ok(receipt) => UiEvent::MutationApplied {
            operation: receipt.operation,
            refreshed: receipt.refreshed,
        },
        Err(err) => UiEvent::MutationFailed {
            operation: err.operation,
            error: UiError::from_store(&err),
        },
    }
}

async fn fetch_preview_image(http: &HttpClient, url: &str) -> Result<PreviewImage, String> {
    let bytes = http
        .get(url)
        .send()
        .await
        .map_err(|err| format!("failed to download image: {err}"))?
        .error_for_status()
        .map_err(|err| format!("image host returned error: {err}"))?
        .bytes()
        .await
        .map_err(|err| format!("failed to read image body: {err}"))?;
    decode_preview_image(&bytes)
}

pub fn decode_preview_image(bytes: &[u8]) -> Result<PreviewImage, String> {
    let decoded =
        image::load_from_memory(bytes).map_err(|err| format!("unsupported image data: {err}"))?;
    let rgba = decoded.to_rgba8();
    Ok(PreviewImage {
        size: [rgba.width() as usize, rgba.height() as usize],
        rgba: rgba.into_raw(),
    })
}

#[cfg(test)]
#[path = "../tests/runtime_tests.rs"]
mod tests;
