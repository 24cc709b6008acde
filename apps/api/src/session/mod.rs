//! Session state for an interactive front end.
//!
//! The whole state of a user's session lives in `SessionState`, which the
//! client sends with every interaction and gets back updated. Handlers are
//! plain functions from (state, input) to new state, so no server-side
//! session storage exists and every transition is testable in isolation.
//!
//! Post and template edits are acknowledged here but never written to the
//! store: the store has no update operation for post content or templates.

pub mod handlers;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::corpus::ExampleCorpus;
use crate::errors::AppError;
use crate::generation::generator::{generate_post, GenerateRequest, GeneratedPost};
use crate::llm_client::TextGenerator;
use crate::models::post::PostRow;
use crate::models::template::TemplateRow;
use crate::store::templates::{get_templates, save_post_as_template};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Editing {
    #[default]
    Nothing,
    Post {
        post: PostRow,
    },
    Template {
        template: TemplateRow,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Text shown as "the current post": generated, taken from a template, or edited.
    #[serde(default)]
    pub current_post: Option<String>,
    /// Store id of the current post, when it came straight from generation.
    #[serde(default)]
    pub current_post_id: Option<i64>,
    /// Parameters of the last generation, replayed by regenerate.
    #[serde(default)]
    pub last_request: Option<GenerateRequest>,
    #[serde(default)]
    pub editing: Editing,
}

impl SessionState {
    fn with_current(mut self, content: String, post_id: Option<i64>) -> Self {
        self.current_post = Some(content);
        self.current_post_id = post_id;
        self
    }
}

pub async fn generate(
    pool: &SqlitePool,
    corpus: &ExampleCorpus,
    generator: &dyn TextGenerator,
    session: SessionState,
    request: GenerateRequest,
) -> Result<(SessionState, GeneratedPost), AppError> {
    let post = generate_post(pool, corpus, generator, &request).await?;
    let mut session = session.with_current(post.content.clone(), Some(post.post_id));
    session.last_request = Some(request);
    Ok((session, post))
}

/// Generates again with the previous parameters. Requires a current post.
pub async fn regenerate(
    pool: &SqlitePool,
    corpus: &ExampleCorpus,
    generator: &dyn TextGenerator,
    session: SessionState,
) -> Result<(SessionState, GeneratedPost), AppError> {
    let request = match (&session.current_post, &session.last_request) {
        (Some(_), Some(request)) => request.clone(),
        _ => return Err(AppError::invalid("nothing to regenerate yet")),
    };
    generate(pool, corpus, generator, session, request).await
}

/// Makes a stored template's content the current post.
pub async fn use_template(
    pool: &SqlitePool,
    session: SessionState,
    template_id: i64,
) -> Result<SessionState, AppError> {
    let template = get_templates(pool)
        .await?
        .into_iter()
        .find(|t| t.id == template_id)
        .ok_or_else(|| AppError::invalid(format!("unknown template {template_id}")))?;
    Ok(session.with_current(template.content, None))
}

pub fn begin_post_edit(mut session: SessionState, post: PostRow) -> SessionState {
    session.editing = Editing::Post { post };
    session
}

/// Replaces the current post with the edited text. The stored post is unchanged.
pub fn save_post_edit(session: SessionState, edited: String) -> Result<SessionState, AppError> {
    if !matches!(session.editing, Editing::Post { .. }) {
        return Err(AppError::invalid("no post is being edited"));
    }
    let mut session = session.with_current(edited, None);
    session.editing = Editing::Nothing;
    Ok(session)
}

pub fn begin_template_edit(mut session: SessionState, template: TemplateRow) -> SessionState {
    session.editing = Editing::Template { template };
    session
}

/// Closes the template editor. The stored template is unchanged.
pub fn save_template_edit(mut session: SessionState) -> Result<SessionState, AppError> {
    if !matches!(session.editing, Editing::Template { .. }) {
        return Err(AppError::invalid("no template is being edited"));
    }
    session.editing = Editing::Nothing;
    Ok(session)
}

pub fn cancel_edit(mut session: SessionState) -> SessionState {
    session.editing = Editing::Nothing;
    session
}

/// Stores the current post as a `Custom` template and returns its id.
pub async fn save_current_as_template(
    pool: &SqlitePool,
    session: SessionState,
    now: NaiveDateTime,
) -> Result<(SessionState, i64), AppError> {
    let content = session
        .current_post
        .as_deref()
        .ok_or_else(|| AppError::invalid("there is no current post to save"))?;
    let id = save_post_as_template(pool, content, now).await?;
    Ok((session, id))
}
