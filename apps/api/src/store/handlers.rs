//! Axum route handlers for the post, template and preference library.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppJson};
use crate::models::post::PostRow;
use crate::models::preferences::UserPreferences;
use crate::models::template::{TemplateCategory, TemplateRow};
use crate::state::AppState;
use crate::store::posts::{self, DEFAULT_PAGE_SIZE};
use crate::store::preferences::{resolve_user_preferences, save_user_preferences};
use crate::store::templates::{get_templates, save_template};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct EngagementUpdate {
    pub engagement_score: i64,
}

#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTemplateRequest {
    pub name: String,
    pub content: String,
    pub category: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/posts
pub async fn handle_list_posts(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<PostRow>>, AppError> {
    let posts = posts::get_all_posts(
        &state.db,
        page.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        page.offset.unwrap_or(0),
    )
    .await?;
    Ok(Json(posts))
}

/// DELETE /api/v1/posts/:id
///
/// Always 204, whether or not the post existed.
pub async fn handle_delete_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    posts::delete_post(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/posts/:id/engagement
pub async fn handle_update_engagement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    AppJson(req): AppJson<EngagementUpdate>,
) -> Result<StatusCode, AppError> {
    posts::update_post_engagement(&state.db, id, req.engagement_score).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/templates?category=Story
pub async fn handle_list_templates(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
) -> Result<Json<Vec<TemplateRow>>, AppError> {
    let category = query
        .category
        .as_deref()
        .map(str::parse::<TemplateCategory>)
        .transpose()?;

    let templates = get_templates(&state.db)
        .await?
        .into_iter()
        .filter(|t| category.map_or(true, |c| t.category == c))
        .collect();
    Ok(Json(templates))
}

/// GET /api/v1/templates/categories
pub async fn handle_template_categories() -> Json<Vec<TemplateCategory>> {
    Json(TemplateCategory::selectable().to_vec())
}

/// POST /api/v1/templates
pub async fn handle_create_template(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateTemplateRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let category: TemplateCategory = req.category.parse()?;
    if req.name.trim().is_empty() {
        return Err(AppError::invalid("template name cannot be empty"));
    }
    if req.content.trim().is_empty() {
        return Err(AppError::invalid("template content cannot be empty"));
    }

    let id = save_template(&state.db, &req.name, &req.content, category).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// GET /api/v1/preferences
pub async fn handle_get_preferences(
    State(state): State<AppState>,
) -> Result<Json<UserPreferences>, AppError> {
    Ok(Json(resolve_user_preferences(&state.db).await?))
}

/// PUT /api/v1/preferences
///
/// Appends a new preferences row; the previous rows stay in place.
pub async fn handle_put_preferences(
    State(state): State<AppState>,
    AppJson(prefs): AppJson<UserPreferences>,
) -> Result<Json<UserPreferences>, AppError> {
    save_user_preferences(&state.db, &prefs).await?;
    Ok(Json(prefs))
}
