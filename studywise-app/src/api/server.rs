use axum::{
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::api::routes::{
    create_user_document, list_sets, post_generate, post_set, set_cards, AppState,
};
use studywise_core::{ChatModel, DocumentStore};

pub async fn run(
    store: Arc<dyn DocumentStore>,
    model: Arc<dyn ChatModel>,
    addr: SocketAddr,
) -> anyhow::Result<()> {
    let state = Arc::new(AppState { store, model });

    let app = Router::new()
        .route("/api/generate", post(post_generate))
        .route("/api/createUserDocument", post(create_user_document))
        .route("/api/sets", post(post_set).get(list_sets))
        .route("/api/sets/:name/cards", get(set_cards))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
