use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use shared::domain::{Artist, ArtistDraft, ArtistId};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    error::{StoreError, StoreOperation},
    store::ArtistStore,
};

/// In-process store with the hosted table's observable behavior: fresh uuid
/// ids, monotonically increasing `created_at`, newest-first listing.
#[derive(Default)]
pub struct MemoryArtistStore {
    inner: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    rows: Vec<Artist>,
    last_created_at: Option<DateTime<Utc>>,
    failing: HashSet<StoreOperation>,
}

impl MemoryArtistStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_artists(rows: Vec<Artist>) -> Self {
        let last_created_at = rows.iter().filter_map(|row| row.created_at).max();
        Self {
            inner: Mutex::new(MemoryState {
                rows,
                last_created_at,
                failing: HashSet::new(),
            }),
        }
    }

    /// Makes every later call of `operation` fail until [`Self::recover`].
    pub async fn fail_on(&self, operation: StoreOperation) {
        self.inner.lock().await.failing.insert(operation);
    }

    pub async fn recover(&self, operation: StoreOperation) {
        self.inner.lock().await.failing.remove(&operation);
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl MemoryState {
    fn check(&self, operation: StoreOperation) -> Result<(), StoreError> {
        if self.failing.contains(&operation) {
            return Err(StoreError::new(operation, "store unavailable"));
        }
        Ok(())
    }

    fn next_created_at(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let created_at = match self.last_created_at {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_created_at = Some(created_at);
        created_at
    }
}

#[async_trait]
impl ArtistStore for MemoryArtistStore {
    async fn fetch_all(&self) -> Result<Vec<Artist>, StoreError> {
        let guard = self.inner.lock().await;
        guard.check(StoreOperation::FetchAll)?;
        let mut rows = guard.rows.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn insert(&self, draft: &ArtistDraft) -> Result<(), StoreError> {
        let mut guard = self.inner.lock().await;
        guard.check(StoreOperation::Insert)?;
        let created_at = guard.next_created_at();
        guard.rows.push(Artist {
            id: ArtistId::new(Uuid::new_v4().to_string()),
            name: draft.name.clone(),
            genre: draft.genre.clone(),
            image: Some(draft.image.clone()),
            created_at: Some(created_at),
        });
        Ok(())
    }

    async fn update(&self, id: &ArtistId, draft: &ArtistDraft) -> Result<(), StoreError> {
        let mut guard = self.inner.lock().await;
        guard.check(StoreOperation::Update)?;
        // Matching zero rows is not an error, same as an equality-filtered PATCH.
        if let Some(row) = guard.rows.iter_mut().find(|row| &row.id == id) {
            row.name = draft.name.clone();
            row.genre = draft.genre.clone();
            row.image = Some(draft.image.clone());
        }
        Ok(())
    }

    async fn delete(&self, id: &ArtistId) -> Result<(), StoreError> {
        let mut guard = self.inner.lock().await;
        guard.check(StoreOperation::Delete)?;
        guard.rows.retain(|row| &row.id != id);
        Ok(())
    }
}
