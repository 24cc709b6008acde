use chrono::NaiveDateTime;
use sqlx::SqlitePool;
use tracing::info;

use crate::errors::AppError;
use crate::models::template::{TemplateCategory, TemplateRow};

/// Returns every template. Category filtering is left to the caller.
pub async fn get_templates(pool: &SqlitePool) -> Result<Vec<TemplateRow>, AppError> {
    Ok(
        sqlx::query_as::<_, TemplateRow>("SELECT * FROM templates ORDER BY id")
            .fetch_all(pool)
            .await?,
    )
}

/// Inserts a template and returns its id. Names are not required to be unique.
pub async fn save_template(
    pool: &SqlitePool,
    name: &str,
    content: &str,
    category: TemplateCategory,
) -> Result<i64, AppError> {
    let id = sqlx::query("INSERT INTO templates (name, content, category) VALUES (?, ?, ?)")
        .bind(name)
        .bind(content)
        .bind(category)
        .execute(pool)
        .await?
        .last_insert_rowid();

    info!("Saved template {id} '{name}' ({category})");
    Ok(id)
}

/// Name given to templates derived from a post, e.g. `Template_20240131_174502`.
pub fn auto_template_name(now: NaiveDateTime) -> String {
    format!("Template_{}", now.format("%Y%m%d_%H%M%S"))
}

/// Stores post content as a `Custom` template under an auto-generated name.
pub async fn save_post_as_template(
    pool: &SqlitePool,
    content: &str,
    now: NaiveDateTime,
) -> Result<i64, AppError> {
    save_template(pool, &auto_template_name(now), content, TemplateCategory::Custom).await
}
