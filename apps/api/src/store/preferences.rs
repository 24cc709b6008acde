use sqlx::SqlitePool;
use tracing::info;

use crate::errors::AppError;
use crate::models::preferences::{UserPreferences, UserPreferencesRow};

/// Appends a preferences row. Earlier rows are kept; the newest one wins on read.
pub async fn save_user_preferences(
    pool: &SqlitePool,
    prefs: &UserPreferences,
) -> Result<i64, AppError> {
    let id = sqlx::query(
        r#"
        INSERT INTO user_preferences (use_emojis, show_hashtags, default_length, default_language)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(prefs.use_emojis)
    .bind(prefs.show_hashtags)
    .bind(prefs.default_length)
    .bind(prefs.default_language)
    .execute(pool)
    .await?
    .last_insert_rowid();

    info!("Saved user preferences row {id}");
    Ok(id)
}

/// Returns the newest preferences row, or `None` on an empty table.
pub async fn get_user_preferences(
    pool: &SqlitePool,
) -> Result<Option<UserPreferencesRow>, AppError> {
    Ok(sqlx::query_as::<_, UserPreferencesRow>(
        "SELECT * FROM user_preferences ORDER BY created_at DESC, id DESC LIMIT 1",
    )
    .fetch_optional(pool)
    .await?)
}

/// Newest preferences, falling back to the defaults.
pub async fn resolve_user_preferences(pool: &SqlitePool) -> Result<UserPreferences, AppError> {
    Ok(get_user_preferences(pool)
        .await?
        .map(UserPreferences::from)
        .unwrap_or_default())
}
