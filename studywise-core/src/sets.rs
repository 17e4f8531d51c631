use crate::{
    ensure_user_document, Card, CoreError, DocumentStore, SetDocument, SetRef, UserDocument,
    WriteOp, FLASHCARD_SETS, USERS,
};

/// Persist a named flashcard set and append it to the owner's index.
///
/// The write is an unconditional overwrite: saving under a name that already
/// exists replaces the prior document, including its owner attribution,
/// because the set namespace is keyed by name alone. The set document and
/// the index update are committed as a single atomic batch, so either both
/// reflect the new set or neither does.
///
/// The index append is a read-modify-write with no lock around it; two
/// concurrent saves by the same owner can each append, leaving a duplicated
/// index entry. Last write wins at the document level.
pub async fn save_set(
    store: &dyn DocumentStore,
    owner_id: &str,
    set_name: &str,
    cards: &[Card],
) -> Result<(), CoreError> {
    if set_name.trim().is_empty() {
        return Err(CoreError::Invalid("set name must not be empty"));
    }

    ensure_user_document(store, owner_id).await?;

    let set_doc = serde_json::to_value(SetDocument {
        flashcards: cards.to_vec(),
        user_id: owner_id.to_owned(),
    })?;

    let mut user = read_user(store, owner_id).await?;
    user.flashcard_sets.push(SetRef {
        name: set_name.to_owned(),
    });

    store
        .commit(vec![
            WriteOp::set(FLASHCARD_SETS, set_name, set_doc),
            WriteOp::set(USERS, owner_id, serde_json::to_value(user)?),
        ])
        .await
}

/// Set names from the owner's index, in stored order. Duplicates are
/// preserved; a missing or malformed index degrades to an empty list.
pub async fn list_set_names(
    store: &dyn DocumentStore,
    user_id: &str,
) -> Result<Vec<String>, CoreError> {
    let user = read_user(store, user_id).await?;
    Ok(user.flashcard_sets.into_iter().map(|s| s.name).collect())
}

/// The card sequence of a set. A missing document, or a `flashcards` field
/// that is absent or not a sequence, degrades to an empty sequence rather
/// than an error.
pub async fn get_cards(store: &dyn DocumentStore, set_name: &str) -> Result<Vec<Card>, CoreError> {
    let Some(doc) = store.get(FLASHCARD_SETS, set_name).await? else {
        return Ok(Vec::new());
    };
    Ok(doc
        .get("flashcards")
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_default())
}

async fn read_user(store: &dyn DocumentStore, user_id: &str) -> Result<UserDocument, CoreError> {
    Ok(match store.get(USERS, user_id).await? {
        Some(v) => serde_json::from_value(v).unwrap_or_default(),
        None => UserDocument::default(),
    })
}
