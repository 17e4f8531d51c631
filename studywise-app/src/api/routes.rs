use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::error;

use studywise_core::{
    ensure_user_document, generate, get_cards, list_set_names, save_set, Card, CoreError,
    EnsureOutcome,
};

use crate::api::dto::{EnsureIn, GenerateIn, MessageOut, SaveIn, SetsQuery};
use crate::api::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn studywise_core::DocumentStore>,
    pub model: Arc<dyn studywise_core::ChatModel>,
}

pub async fn post_generate(
    State(st): State<Arc<AppState>>,
    Json(body): Json<GenerateIn>,
) -> Result<Json<Vec<Card>>, ApiError> {
    if body.text.trim().is_empty() {
        return Err(ApiError::BadRequest("Text is required"));
    }
    if body.num_flashcards == 0 {
        return Err(ApiError::BadRequest("numFlashcards must be positive"));
    }

    let cards = generate(&*st.model, &body.text, body.num_flashcards)
        .await
        .map_err(|e| {
            error!("error generating flashcards: {e}");
            ApiError::Generation
        })?;
    Ok(Json(cards))
}

pub async fn create_user_document(
    State(st): State<Arc<AppState>>,
    Json(body): Json<EnsureIn>,
) -> Result<Json<MessageOut>, ApiError> {
    let user_id = body.user_id.unwrap_or_default();
    if user_id.trim().is_empty() {
        return Err(ApiError::BadRequest("User ID is required"));
    }

    match ensure_user_document(&*st.store, &user_id).await {
        Ok(EnsureOutcome::Created) => Ok(Json(MessageOut {
            message: "User document created",
        })),
        Ok(EnsureOutcome::AlreadyExists) => Ok(Json(MessageOut {
            message: "User document already exists",
        })),
        Err(e) => {
            error!("error creating user document: {e}");
            Err(ApiError::Internal)
        }
    }
}

pub async fn post_set(
    State(st): State<Arc<AppState>>,
    Json(body): Json<SaveIn>,
) -> Result<(StatusCode, Json<MessageOut>), ApiError> {
    let user_id = body.user_id.unwrap_or_default();
    if user_id.trim().is_empty() {
        return Err(ApiError::BadRequest("User ID is required"));
    }
    let name = body.name.unwrap_or_default();
    if name.trim().is_empty() {
        return Err(ApiError::BadRequest("Set name is required"));
    }

    save_set(&*st.store, &user_id, &name, &body.flashcards)
        .await
        .map_err(|e| {
            error!("error saving flashcard set: {e}");
            ApiError::Internal
        })?;
    Ok((
        StatusCode::CREATED,
        Json(MessageOut {
            message: "Flashcard set saved",
        }),
    ))
}

pub async fn list_sets(
    State(st): State<Arc<AppState>>,
    Query(q): Query<SetsQuery>,
) -> Result<Json<Vec<String>>, ApiError> {
    let user = q.user.unwrap_or_default();
    if user.trim().is_empty() {
        return Err(ApiError::BadRequest("User ID is required"));
    }

    let names = list_set_names(&*st.store, &user).await.map_err(internal)?;
    Ok(Json(names))
}

pub async fn set_cards(
    State(st): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Vec<Card>>, ApiError> {
    let cards = get_cards(&*st.store, &name).await.map_err(internal)?;
    Ok(Json(cards))
}

fn internal(e: CoreError) -> ApiError {
    error!("store error: {e}");
    ApiError::Internal
}
