//! Mutation/resync contract on top of an [`ArtistStore`].
//!
//! Every successful mutation is followed by a full re-fetch instead of a
//! local patch, so the caller always ends up holding what the store holds.
//! Failures are logged here and handed back; the caller leaves its state alone.

use std::sync::Arc;

use shared::domain::{Artist, ArtistDraft, ArtistId};
use tracing::{error, info, warn};

use crate::{
    error::{StoreError, StoreOperation},
    store::ArtistStore,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationReceipt {
    pub operation: StoreOperation,
    /// Collection fetched after the mutation; `None` when that fetch failed,
    /// in which case the caller keeps its previous list.
    pub refreshed: Option<Vec<Artist>>,
}

#[derive(Clone)]
pub struct ArtistGateway {
    store: Arc<dyn ArtistStore>,
}

impl ArtistGateway {
    pub fn new(store: Arc<dyn ArtistStore>) -> Self {
        Self { store }
    }

    pub async fn fetch_all(&self) -> Result<Vec<Artist>, StoreError> {
        match self.store.fetch_all().await {
            Ok(artists) => {
                info!(count = artists.len(), "fetched artists");
                Ok(artists)
            }
            Err(err) => {
                error!(operation = %err.operation, error = %err, "error fetching artists");
                Err(err)
            }
        }
    }

    pub async fn insert(&self, draft: &ArtistDraft) -> Result<MutationReceipt, StoreError> {
        let operation = StoreOperation::Insert;
        self.check_draft(operation, draft)?;
        let result = self.store.insert(draft).await;
        self.finish(operation, None, result).await
    }

    pub async fn update(
        &self,
        id: &ArtistId,
        draft: &ArtistDraft,
    ) -> Result<MutationReceipt, StoreError> {
        let operation = StoreOperation::Update;
        self.check_draft(operation, draft)?;
        let result = self.store.update(id, draft).await;
        self.finish(operation, Some(id), result).await
    }

    pub async fn delete(&self, id: &ArtistId) -> Result<MutationReceipt, StoreError> {
        let result = self.store.delete(id).await;
        self.finish(StoreOperation::Delete, Some(id), result).await
    }

    fn check_draft(&self, operation: StoreOperation, draft: &ArtistDraft) -> Result<(), StoreError> {
        draft.validate().map_err(|reason| {
            let err = StoreError::rejected(operation, reason);
            warn!(operation = %operation, error = %err, "refusing to submit artist");
            err
        })
    }

    async fn finish(
        &self,
        operation: StoreOperation,
        id: Option<&ArtistId>,
        result: Result<(), StoreError>,
    ) -> Result<MutationReceipt, StoreError> {
        let artist_id = id.map(ArtistId::as_str).unwrap_or("-");
        if let Err(err) = result {
            error!(operation = %operation, artist_id, error = %err, "artist mutation failed");
            return Err(err);
        }

        info!(operation = %operation, artist_id, "artist mutation applied; resyncing");
        let refreshed = self.fetch_all().await.ok();
        Ok(MutationReceipt {
            operation,
            refreshed,
        })
    }
}

#[cfg(test)]
#[path = "tests/gateway_tests.rs"]
mod tests;
