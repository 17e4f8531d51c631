use async_trait::async_trait;
use serde_json::Value;

use crate::CoreError;

pub mod memory;

pub use memory::MemoryStore;

pub const USERS: &str = "users";
pub const FLASHCARD_SETS: &str = "flashcardSets";

/// One write in an atomic batch. Every write is a plain overwrite of the
/// whole document.
#[derive(Clone, Debug)]
pub struct WriteOp {
    pub collection: String,
    pub id: String,
    pub doc: Value,
}

impl WriteOp {
    pub fn set(collection: impl Into<String>, id: impl Into<String>, doc: Value) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
            doc,
        }
    }
}

/// Key-document store addressed by `(collection, id)`.
///
/// The store has no referential-integrity guarantees; callers that keep
/// documents consistent with each other must do so at write time, using
/// `commit` where the writes have to land together.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, CoreError>;

    /// Unconditional overwrite of the document at `(collection, id)`.
    async fn set(&self, collection: &str, id: &str, doc: Value) -> Result<(), CoreError>;

    /// Apply every write in the batch, or none of them.
    async fn commit(&self, batch: Vec<WriteOp>) -> Result<(), CoreError>;
}
