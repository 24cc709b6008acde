//! Axum route handlers for session interactions.
//!
//! Every request carries the client's `SessionState`; every response returns
//! the updated one.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppJson};
use crate::generation::generator::{GenerateRequest, GeneratedPost};
use crate::models::post::PostRow;
use crate::models::template::TemplateRow;
use crate::session::{self, SessionState};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SessionOnly {
    #[serde(default)]
    pub session: SessionState,
}

#[derive(Debug, Deserialize)]
pub struct SessionGenerate {
    #[serde(default)]
    pub session: SessionState,
    #[serde(flatten)]
    pub request: GenerateRequest,
}

#[derive(Debug, Deserialize)]
pub struct SessionUseTemplate {
    #[serde(default)]
    pub session: SessionState,
    pub template_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct SessionEditPost {
    #[serde(default)]
    pub session: SessionState,
    pub post: PostRow,
}

#[derive(Debug, Deserialize)]
pub struct SessionSavePostEdit {
    #[serde(default)]
    pub session: SessionState,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct SessionEditTemplate {
    #[serde(default)]
    pub session: SessionState,
    pub template: TemplateRow,
}

#[derive(Debug, Default, Serialize)]
pub struct SessionResponse {
    pub session: SessionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<GeneratedPost>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl SessionResponse {
    fn new(session: SessionState) -> Self {
        Self {
            session,
            ..Default::default()
        }
    }

    fn notice(mut self, notice: &str) -> Self {
        self.notice = Some(notice.to_string());
        self
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/session/generate
pub async fn handle_generate(
    State(state): State<AppState>,
    AppJson(req): AppJson<SessionGenerate>,
) -> Result<Json<SessionResponse>, AppError> {
    let (session, post) = session::generate(
        &state.db,
        &state.corpus,
        state.generator.as_ref(),
        req.session,
        req.request,
    )
    .await?;
    Ok(Json(SessionResponse {
        post: Some(post),
        ..SessionResponse::new(session)
    }))
}

/// POST /api/v1/session/regenerate
pub async fn handle_regenerate(
    State(state): State<AppState>,
    AppJson(req): AppJson<SessionOnly>,
) -> Result<Json<SessionResponse>, AppError> {
    let (session, post) = session::regenerate(
        &state.db,
        &state.corpus,
        state.generator.as_ref(),
        req.session,
    )
    .await?;
    Ok(Json(SessionResponse {
        post: Some(post),
        ..SessionResponse::new(session)
    }))
}

/// POST /api/v1/session/use-template
pub async fn handle_use_template(
    State(state): State<AppState>,
    AppJson(req): AppJson<SessionUseTemplate>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = session::use_template(&state.db, req.session, req.template_id).await?;
    Ok(Json(SessionResponse::new(session)))
}

/// POST /api/v1/session/edit-post
pub async fn handle_edit_post(
    AppJson(req): AppJson<SessionEditPost>,
) -> Json<SessionResponse> {
    Json(SessionResponse::new(session::begin_post_edit(
        req.session,
        req.post,
    )))
}

/// POST /api/v1/session/save-post-edit
pub async fn handle_save_post_edit(
    AppJson(req): AppJson<SessionSavePostEdit>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = session::save_post_edit(req.session, req.content)?;
    Ok(Json(SessionResponse::new(session).notice("Post updated!")))
}

/// POST /api/v1/session/edit-template
pub async fn handle_edit_template(
    AppJson(req): AppJson<SessionEditTemplate>,
) -> Json<SessionResponse> {
    Json(SessionResponse::new(session::begin_template_edit(
        req.session,
        req.template,
    )))
}

/// POST /api/v1/session/save-template-edit
pub async fn handle_save_template_edit(
    AppJson(req): AppJson<SessionOnly>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = session::save_template_edit(req.session)?;
    Ok(Json(SessionResponse::new(session).notice("Template updated!")))
}

/// POST /api/v1/session/cancel-edit
pub async fn handle_cancel_edit(AppJson(req): AppJson<SessionOnly>) -> Json<SessionResponse> {
    Json(SessionResponse::new(session::cancel_edit(req.session)))
}

/// POST /api/v1/session/save-as-template
pub async fn handle_save_as_template(
    State(state): State<AppState>,
    AppJson(req): AppJson<SessionOnly>,
) -> Result<Json<SessionResponse>, AppError> {
    let now = chrono::Local::now().naive_local();
    let (session, template_id) =
        session::save_current_as_template(&state.db, req.session, now).await?;
    Ok(Json(SessionResponse {
        template_id: Some(template_id),
        ..SessionResponse::new(session).notice("Saved as template!")
    }))
}
