use super::*;

use crate::memory_store::MemoryArtistStore;

fn gateway_with(store: Arc<MemoryArtistStore>) -> ArtistGateway {
    ArtistGateway::new(store)
}

#[tokio::test]
async fn insert_resyncs_the_whole_collection() {
    let store = Arc::new(MemoryArtistStore::new());
    let gateway = gateway_with(Arc::clone(&store));

    let first = gateway
        .insert(&ArtistDraft::new("First", "Rock", ""))
        .await
        .expect("insert");
    assert_eq!(first.operation, StoreOperation::Insert);
    assert_eq!(first.refreshed.as_ref().map(Vec::len), Some(1));

    let second = gateway
        .insert(&ArtistDraft::new("Second", "Jazz", "https://img.example/2.png"))
        .await
        .expect("insert");
    let refreshed = second.refreshed.expect("resync");
    assert_eq!(
        refreshed.iter().map(|a| a.name.as_str()).collect::<Vec<_>>(),
        vec!["Second", "First"]
    );
    assert_ne!(refreshed[0].id, refreshed[1].id);
}

#[tokio::test]
async fn update_replaces_every_mutable_field() {
    let store = Arc::new(MemoryArtistStore::new());
    let gateway = gateway_with(Arc::clone(&store));
    let inserted = gateway
        .insert(&ArtistDraft::new("Old", "Blues", "https://img.example/old.png"))
        .await
        .expect("insert")
        .refreshed
        .expect("resync");
    let id = inserted[0].id.clone();

    let receipt = gateway
        .update(&id, &ArtistDraft::new("New", "Jazz", ""))
        .await
        .expect("update");
    let refreshed = receipt.refreshed.expect("resync");
    assert_eq!(refreshed.len(), 1);
    assert_eq!(refreshed[0].id, id);
    assert_eq!(refreshed[0].name, "New");
    assert_eq!(refreshed[0].genre, "Jazz");
    assert_eq!(refreshed[0].image_url(), None);
}

#[tokio::test]
async fn delete_removes_the_row_from_the_resynced_list() {
    let store = Arc::new(MemoryArtistStore::new());
    let gateway = gateway_with(Arc::clone(&store));
    gateway
        .insert(&ArtistDraft::new("Keep", "Rock", ""))
        .await
        .expect("insert");
    let rows = gateway
        .insert(&ArtistDraft::new("Drop", "Rock", ""))
        .await
        .expect("insert")
        .refreshed
        .expect("resync");
    let drop_id = rows
        .iter()
        .find(|a| a.name == "Drop")
        .map(|a| a.id.clone())
        .expect("drop row");

    let receipt = gateway.delete(&drop_id).await.expect("delete");
    let refreshed = receipt.refreshed.expect("resync");
    assert!(refreshed.iter().all(|a| a.id != drop_id));
    assert_eq!(refreshed.len(), 1);
}

#[tokio::test]
async fn failed_mutation_reports_error_and_skips_resync() {
    let store = Arc::new(MemoryArtistStore::new());
    let gateway = gateway_with(Arc::clone(&store));
    store.fail_on(StoreOperation::Insert).await;

    let err = gateway
        .insert(&ArtistDraft::new("Test", "Rock", ""))
        .await
        .expect_err("insert should fail");
    assert_eq!(err.operation, StoreOperation::Insert);
    assert!(store.is_empty().await);

    store.recover(StoreOperation::Insert).await;
    gateway
        .insert(&ArtistDraft::new("Test", "Rock", ""))
        .await
        .expect("insert after recovery");
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn mutation_succeeds_even_when_resync_fails() {
    let store = Arc::new(MemoryArtistStore::new());
    let gateway = gateway_with(Arc::clone(&store));
    store.fail_on(StoreOperation::FetchAll).await;

    let receipt = gateway
        .insert(&ArtistDraft::new("Test", "Rock", ""))
        .await
        .expect("insert itself succeeds");
    assert_eq!(receipt.refreshed, None);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn invalid_drafts_never_reach_the_store() {
    let store = Arc::new(MemoryArtistStore::new());
    let gateway = gateway_with(Arc::clone(&store));

    let err = gateway
        .insert(&ArtistDraft::new("  ", "Rock", ""))
        .await
        .expect_err("blank name");
    assert!(err.reason.contains("name"), "{}", err.reason);

    let err = gateway
        .update(&ArtistId::new("1"), &ArtistDraft::new("Name", "", ""))
        .await
        .expect_err("blank genre");
    assert_eq!(err.operation, StoreOperation::Update);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn fetch_failure_is_returned_to_the_caller() {
    let store = Arc::new(MemoryArtistStore::new());
    store.fail_on(StoreOperation::FetchAll).await;
    let err = gateway_with(store).fetch_all().await.expect_err("fetch");
    assert_eq!(err.operation, StoreOperation::FetchAll);
}
