use crate::{CoreError, DocumentStore, UserDocument, USERS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnsureOutcome {
    Created,
    AlreadyExists,
}

/// Idempotent "create if absent" for a user's set index.
///
/// The read and the write are not guarded by a transaction, so two
/// concurrent first visits can both observe "absent" and both create. The
/// second overwrite is harmless only because the initial value is always
/// the same empty index.
pub async fn ensure_user_document(
    store: &dyn DocumentStore,
    user_id: &str,
) -> Result<EnsureOutcome, CoreError> {
    if store.get(USERS, user_id).await?.is_some() {
        return Ok(EnsureOutcome::AlreadyExists);
    }
    let empty = serde_json::to_value(UserDocument::default())?;
    store.set(USERS, user_id, empty).await?;
    Ok(EnsureOutcome::Created)
}
