//! Post generation pipeline.
//!
//! Flow: resolve preferences → build_prompt → TextGenerator::generate →
//!       save_post → GeneratedPost (with char count and hashtag suggestions).

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::info;

use crate::corpus::ExampleCorpus;
use crate::errors::AppError;
use crate::generation::hashtags::{char_count, suggest_hashtags, LINKEDIN_CHAR_LIMIT};
use crate::generation::prompt_builder::{build_prompt, PromptParams};
use crate::llm_client::TextGenerator;
use crate::models::post::{Language, PostLength};
use crate::store::posts::{save_post, NewPost};
use crate::store::preferences::resolve_user_preferences;

/// Request body for post generation. Omitted flags fall back to the saved preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub topic: String,
    pub length: PostLength,
    pub language: Language,
    #[serde(default)]
    pub use_emojis: Option<bool>,
    #[serde(default)]
    pub show_hashtags: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedPost {
    pub post_id: i64,
    pub content: String,
    pub topic: String,
    pub length: PostLength,
    pub language: Language,
    pub char_count: usize,
    pub over_limit: bool,
    /// Empty when hashtag suggestions are turned off.
    pub hashtags: Vec<String>,
}

/// Generates a post, stores it and returns it with display metadata.
///
/// Nothing is stored when the prompt is invalid or generation fails.
pub async fn generate_post(
    pool: &SqlitePool,
    corpus: &ExampleCorpus,
    generator: &dyn TextGenerator,
    request: &GenerateRequest,
) -> Result<GeneratedPost, AppError> {
    let prefs = resolve_user_preferences(pool).await?;

    let params = PromptParams {
        topic: request.topic.trim().to_string(),
        length: request.length,
        language: request.language,
        use_emojis: request.use_emojis.unwrap_or(prefs.use_emojis),
    };
    let prompt = build_prompt(&params, corpus)?;

    info!(
        "Generating {} {} post on '{}'",
        params.length, params.language, params.topic
    );
    let content = generator.generate(&prompt).await?;

    let post_id = save_post(
        pool,
        NewPost {
            content: &content,
            topic: &params.topic,
            length: params.length,
            language: params.language,
            is_template: false,
        },
    )
    .await?;

    let show_hashtags = request.show_hashtags.unwrap_or(prefs.show_hashtags);
    let chars = char_count(&content);

    Ok(GeneratedPost {
        post_id,
        hashtags: if show_hashtags {
            suggest_hashtags(&params.topic)
        } else {
            Vec::new()
        },
        char_count: chars,
        over_limit: chars > LINKEDIN_CHAR_LIMIT,
        content,
        topic: params.topic,
        length: params.length,
        language: params.language,
    })
}
