use serde::{Deserialize, Serialize};

/// One flashcard. A card has no identity beyond its position in the owning
/// set's sequence. Both sides default to the empty string so that entries the
/// model returns without a `front` or `back` pass through unchanged instead
/// of failing the whole parse.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Card {
    #[serde(default)]
    pub front: String,
    #[serde(default)]
    pub back: String,
}

impl Card {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }
}

/// Document stored at `flashcardSets/{name}`. Written once at save time via
/// a single overwrite, read-only thereafter. The name is the document key,
/// so the set namespace is global rather than scoped per owner.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SetDocument {
    pub flashcards: Vec<Card>,
    #[serde(rename = "userId")]
    pub user_id: String,
}

/// Entry in a user's set index.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SetRef {
    #[serde(default)]
    pub name: String,
}

/// Document stored at `users/{userId}`. Created empty on first visit,
/// appended to on every successful save, never pruned.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(rename = "flashcardSets", default)]
    pub flashcard_sets: Vec<SetRef>,
}
