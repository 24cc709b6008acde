use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::post::{Language, PostLength};

/// One row of the append-only preferences log. Only the newest row counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct UserPreferencesRow {
    pub id: i64,
    pub use_emojis: bool,
    pub show_hashtags: bool,
    pub default_length: PostLength,
    pub default_language: Language,
    pub created_at: NaiveDateTime,
}

/// Effective settings, either from the newest row or the built-in defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub use_emojis: bool,
    pub show_hashtags: bool,
    pub default_length: PostLength,
    pub default_language: Language,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            use_emojis: true,
            show_hashtags: true,
            default_length: PostLength::Medium,
            default_language: Language::English,
        }
    }
}

impl From<UserPreferencesRow> for UserPreferences {
    fn from(row: UserPreferencesRow) -> Self {
        Self {
            use_emojis: row.use_emojis,
            show_hashtags: row.show_hashtags,
            default_length: row.default_length,
            default_language: row.default_language,
        }
    }
}
