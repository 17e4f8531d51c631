use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{json, Value};
use studywise_core::{
    ensure_user_document, get_cards, list_set_names, save_set, Card, CoreError, DocumentStore,
    EnsureOutcome, MemoryStore, WriteOp, FLASHCARD_SETS, USERS,
};

/// Delegates to a `MemoryStore` while counting overwrite writes.
#[derive(Default)]
struct CountingStore {
    inner: MemoryStore,
    writes: AtomicUsize,
}

#[async_trait]
impl DocumentStore for CountingStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, CoreError> {
        self.inner.get(collection, id).await
    }

    async fn set(&self, collection: &str, id: &str, doc: Value) -> Result<(), CoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set(collection, id, doc).await
    }

    async fn commit(&self, batch: Vec<WriteOp>) -> Result<(), CoreError> {
        self.writes.fetch_add(batch.len(), Ordering::SeqCst);
        self.inner.commit(batch).await
    }
}

#[tokio::test]
async fn ensure_creates_empty_index_once() {
    let store = MemoryStore::new();

    let first = ensure_user_document(&store, "u1").await.unwrap();
    assert_eq!(first, EnsureOutcome::Created);

    let doc = store.get(USERS, "u1").await.unwrap().unwrap();
    assert_eq!(doc, json!({ "flashcardSets": [] }));

    let second = ensure_user_document(&store, "u1").await.unwrap();
    assert_eq!(second, EnsureOutcome::AlreadyExists);

    let doc = store.get(USERS, "u1").await.unwrap().unwrap();
    assert_eq!(doc, json!({ "flashcardSets": [] }));
}

#[tokio::test]
async fn ensure_second_call_performs_no_write() {
    let store = CountingStore::default();

    ensure_user_document(&store, "u1").await.unwrap();
    let writes_after_first = store.writes.load(Ordering::SeqCst);
    assert_eq!(writes_after_first, 1);

    ensure_user_document(&store, "u1").await.unwrap();
    assert_eq!(store.writes.load(Ordering::SeqCst), writes_after_first);
}

#[tokio::test]
async fn save_then_read_roundtrip() {
    let store = MemoryStore::new();
    let cards = vec![Card::new("France", "Paris")];

    save_set(&store, "u1", "Capitals", &cards).await.unwrap();

    assert_eq!(list_set_names(&store, "u1").await.unwrap(), vec!["Capitals"]);
    assert_eq!(get_cards(&store, "Capitals").await.unwrap(), cards);
}

#[tokio::test]
async fn saved_set_records_its_owner() {
    let store = MemoryStore::new();
    save_set(&store, "u1", "Biology101", &[Card::new("a", "b")])
        .await
        .unwrap();

    let doc = store.get(FLASHCARD_SETS, "Biology101").await.unwrap().unwrap();
    assert_eq!(doc["userId"], "u1");
    assert_eq!(doc["flashcards"], json!([{ "front": "a", "back": "b" }]));
}

#[tokio::test]
async fn saving_an_existing_name_overwrites_content_and_owner() {
    let store = MemoryStore::new();
    save_set(&store, "u1", "Shared", &[Card::new("old", "old")])
        .await
        .unwrap();
    save_set(&store, "u1", "Other", &[Card::new("keep", "keep")])
        .await
        .unwrap();

    save_set(&store, "u2", "Shared", &[Card::new("new", "new")])
        .await
        .unwrap();

    // Name is the key: the document now belongs to u2, with no warning.
    let doc = store.get(FLASHCARD_SETS, "Shared").await.unwrap().unwrap();
    assert_eq!(doc["userId"], "u2");
    assert_eq!(get_cards(&store, "Shared").await.unwrap(), vec![Card::new("new", "new")]);

    // Differently-named sets are untouched, and u1's index still lists the name.
    assert_eq!(get_cards(&store, "Other").await.unwrap(), vec![Card::new("keep", "keep")]);
    assert!(list_set_names(&store, "u1")
        .await
        .unwrap()
        .contains(&"Shared".to_string()));
    assert_eq!(list_set_names(&store, "u2").await.unwrap(), vec!["Shared"]);
}

#[tokio::test]
async fn repeated_saves_duplicate_the_index_entry() {
    let store = MemoryStore::new();
    save_set(&store, "u1", "Twice", &[Card::new("a", "b")])
        .await
        .unwrap();
    save_set(&store, "u1", "Twice", &[Card::new("a", "b")])
        .await
        .unwrap();

    assert_eq!(
        list_set_names(&store, "u1").await.unwrap(),
        vec!["Twice", "Twice"]
    );
}

#[tokio::test]
async fn index_keeps_stored_order() {
    let store = MemoryStore::new();
    for name in ["Alpha", "Beta", "Gamma"] {
        save_set(&store, "u1", name, &[Card::new("f", "b")])
            .await
            .unwrap();
    }
    assert_eq!(
        list_set_names(&store, "u1").await.unwrap(),
        vec!["Alpha", "Beta", "Gamma"]
    );
}

#[tokio::test]
async fn empty_set_name_is_rejected() {
    let store = MemoryStore::new();
    let err = save_set(&store, "u1", "  ", &[Card::new("a", "b")])
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Invalid(_)));
    assert!(store.get(USERS, "u1").await.unwrap().is_none());
}

#[tokio::test]
async fn reading_an_unknown_set_returns_empty() {
    let store = MemoryStore::new();
    assert!(get_cards(&store, "nope").await.unwrap().is_empty());
}

#[tokio::test]
async fn listing_an_unknown_user_returns_empty() {
    let store = MemoryStore::new();
    assert!(list_set_names(&store, "nobody").await.unwrap().is_empty());
}

#[tokio::test]
async fn non_sequence_flashcards_field_degrades_to_empty() {
    let store = MemoryStore::new();
    store
        .set(
            FLASHCARD_SETS,
            "Broken",
            json!({ "flashcards": "oops", "userId": "u1" }),
        )
        .await
        .unwrap();

    assert!(get_cards(&store, "Broken").await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_flashcards_field_degrades_to_empty() {
    let store = MemoryStore::new();
    store
        .set(FLASHCARD_SETS, "Bare", json!({ "userId": "u1" }))
        .await
        .unwrap();

    assert!(get_cards(&store, "Bare").await.unwrap().is_empty());
}
