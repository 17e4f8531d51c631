use serde::{Deserialize, Serialize};
use studywise_core::Card;

#[derive(Deserialize)]
pub struct GenerateIn {
    #[serde(default)]
    pub text: String,
    #[serde(rename = "numFlashcards")]
    pub num_flashcards: u32,
}

#[derive(Deserialize)]
pub struct EnsureIn {
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
}

#[derive(Deserialize)]
pub struct SaveIn {
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub flashcards: Vec<Card>,
}

#[derive(Deserialize)]
pub struct SetsQuery {
    pub user: Option<String>,
}

#[derive(Serialize)]
pub struct MessageOut {
    pub message: &'static str,
}
