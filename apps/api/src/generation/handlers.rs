//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};

use crate::errors::{AppError, AppJson};
use crate::generation::generator::{generate_post, GenerateRequest, GeneratedPost};
use crate::state::AppState;

/// GET /api/v1/topics
///
/// Topics known to the example corpus, for populating a topic picker.
pub async fn handle_topics(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.corpus.get_tags())
}

/// POST /api/v1/posts/generate
///
/// Builds the prompt, calls the model, stores the post and returns it.
pub async fn handle_generate(
    State(state): State<AppState>,
    AppJson(request): AppJson<GenerateRequest>,
) -> Result<Json<GeneratedPost>, AppError> {
    let post = generate_post(
        &state.db,
        &state.corpus,
        state.generator.as_ref(),
        &request,
    )
    .await?;
    Ok(Json(post))
}
