use async_trait::async_trait;
use serde::Deserialize;

use crate::{Card, CoreError};

/// A chat-completion endpoint: takes a system prompt plus user text and
/// returns a single JSON-shaped string.
///
/// Implementations report transport and API failures as
/// [`CoreError::Model`]; decoding the returned string is the caller's job.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_text: &str) -> Result<String, CoreError>;
}

#[derive(Debug, Deserialize)]
struct GeneratedSet {
    flashcards: Vec<Card>,
}

/// Build the instruction that pins the card count and the output shape.
pub fn system_prompt(count: u32) -> String {
    format!(
        r#"You are a flashcard creator. Take in text and create exactly {count} flashcards.
Each flashcard should have a front and back, with one sentence each.
Format your response as JSON:
{{
  "flashcards": [
    {{
      "front": "Front of the card",
      "back": "Back of the card"
    }}
  ]
}}"#
    )
}

/// Ask the model for `count` cards covering `source_text`.
///
/// The model declining to honor the exact count is not an error: the
/// returned sequence may be shorter or longer than requested. A response
/// that does not decode as `{"flashcards": [...]}` is a
/// [`CoreError::MalformedOutput`]. No retry, no backoff.
pub async fn generate(
    model: &dyn ChatModel,
    source_text: &str,
    count: u32,
) -> Result<Vec<Card>, CoreError> {
    if source_text.trim().is_empty() {
        return Err(CoreError::Invalid("source text must not be empty"));
    }
    if count == 0 {
        return Err(CoreError::Invalid("card count must be positive"));
    }

    let raw = model.complete(&system_prompt(count), source_text).await?;
    let parsed: GeneratedSet = serde_json::from_str(&raw)?;
    Ok(parsed.flashcards)
}
