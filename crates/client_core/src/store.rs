//! Storage backends for the artists table.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use shared::{
    domain::{Artist, ArtistDraft, ArtistId},
    protocol::{fetch_all_query, id_filter},
};
use tracing::debug;
use url::Url;

use crate::{
    config::{Settings, SettingsError},
    error::{StoreError, StoreOperation},
};

#[async_trait]
pub trait ArtistStore: Send + Sync {
    /// Every row, newest `created_at` first.
    async fn fetch_all(&self) -> Result<Vec<Artist>, StoreError>;
    async fn insert(&self, draft: &ArtistDraft) -> Result<(), StoreError>;
    /// Full replacement of `name`, `genre` and `image` on the row matching `id`.
    async fn update(&self, id: &ArtistId, draft: &ArtistDraft) -> Result<(), StoreError>;
    async fn delete(&self, id: &ArtistId) -> Result<(), StoreError>;
}

/// PostgREST client for a hosted `artists` table.
pub struct RestArtistStore {
    http: Client,
    endpoint: Url,
    anon_key: String,
}

impl RestArtistStore {
    pub fn new(settings: &Settings) -> Result<Self, SettingsError> {
        Self::with_client(Client::new(), settings)
    }

    pub fn with_client(http: Client, settings: &Settings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            http,
            endpoint: settings.rest_endpoint()?,
            anon_key: settings.anon_key.trim().to_string(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.http
            .request(method, self.endpoint.clone())
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    async fn send(
        &self,
        operation: StoreOperation,
        request: RequestBuilder,
    ) -> Result<Response, StoreError> {
        let response = request
            .send()
            .await
            .map_err(|err| StoreError::transport(operation, err))?;

        let status = response.status();
        debug!(operation = %operation, status = status.as_u16(), "store responded");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(StoreError::status(operation, status.as_u16(), &body))
    }
}

#[async_trait]
impl ArtistStore for RestArtistStore {
    async fn fetch_all(&self) -> Result<Vec<Artist>, StoreError> {
        let operation = StoreOperation::FetchAll;
        let response = self
            .send(operation, self.request(Method::GET).query(&fetch_all_query()))
            .await?;
        response
            .json::<Vec<Artist>>()
            .await
            .map_err(|err| StoreError::decode(operation, err))
    }

    async fn insert(&self, draft: &ArtistDraft) -> Result<(), StoreError> {
        let request = self
            .request(Method::POST)
            .header("Prefer", "return=minimal")
            .json(&[draft]);
        self.send(StoreOperation::Insert, request).await?;
        Ok(())
    }

    async fn update(&self, id: &ArtistId, draft: &ArtistDraft) -> Result<(), StoreError> {
        let request = self
            .request(Method::PATCH)
            .query(&[id_filter(id)])
            .header("Prefer", "return=minimal")
            .json(draft);
        self.send(StoreOperation::Update, request).await?;
        Ok(())
    }

    async fn delete(&self, id: &ArtistId) -> Result<(), StoreError> {
        let request = self.request(Method::DELETE).query(&[id_filter(id)]);
        self.send(StoreOperation::Delete, request).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
