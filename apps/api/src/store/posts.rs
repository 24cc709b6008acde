use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::post::{Language, PostLength, PostRow};

pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Fields of a post supplied by the caller. Id and timestamp are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewPost<'a> {
    pub content: &'a str,
    pub topic: &'a str,
    pub length: PostLength,
    pub language: Language,
    pub is_template: bool,
}

/// Inserts a post and returns its new id.
pub async fn save_post(pool: &SqlitePool, post: NewPost<'_>) -> Result<i64, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO posts (content, topic, length, language, is_template)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(post.content)
    .bind(post.topic)
    .bind(post.length)
    .bind(post.language)
    .bind(post.is_template)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    info!("Saved post {id} (topic={}, length={})", post.topic, post.length);
    Ok(id)
}

/// Returns non-template posts, newest first.
pub async fn get_all_posts(
    pool: &SqlitePool,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostRow>, AppError> {
    if limit < 0 || offset < 0 {
        return Err(AppError::invalid("limit and offset must be non-negative"));
    }

    Ok(sqlx::query_as::<_, PostRow>(
        r#"
        SELECT * FROM posts
        WHERE is_template = 0
        ORDER BY created_at DESC, id DESC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?)
}

/// Deletes a post. Unknown ids are a no-op.
pub async fn delete_post(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM posts WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    debug!("delete_post({id}) affected {} rows", result.rows_affected());
    Ok(())
}

/// Sets the engagement score of a post. Unknown ids are a no-op.
pub async fn update_post_engagement(
    pool: &SqlitePool,
    id: i64,
    engagement_score: i64,
) -> Result<(), AppError> {
    let result = sqlx::query("UPDATE posts SET engagement_score = ? WHERE id = ?")
        .bind(engagement_score)
        .bind(id)
        .execute(pool)
        .await?;

    debug!(
        "update_post_engagement({id}) affected {} rows",
        result.rows_affected()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::temp_pool;

    fn post<'a>(content: &'a str, topic: &'a str) -> NewPost<'a> {
        NewPost {
            content,
            topic,
            length: PostLength::Medium,
            language: Language::English,
            is_template: false,
        }
    }

    #[tokio::test]
    async fn test_saved_post_comes_back_first() {
        let (pool, _dir) = temp_pool().await;
        save_post(&pool, post("older", "Career")).await.unwrap();
        let id = save_post(&pool, post("newest", "Mental Health")).await.unwrap();

        let posts = get_all_posts(&pool, 1, 0).await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, id);
        assert_eq!(posts[0].content, "newest");
        assert_eq!(posts[0].topic, "Mental Health");
        assert_eq!(posts[0].length, PostLength::Medium);
        assert_eq!(posts[0].language, Language::English);
        assert_eq!(posts[0].engagement_score, 0);
        assert!(!posts[0].is_template);
    }

    #[tokio::test]
    async fn test_template_rows_are_never_listed() {
        let (pool, _dir) = temp_pool().await;
        save_post(&pool, post("real", "Career")).await.unwrap();
        save_post(
            &pool,
            NewPost {
                is_template: true,
                ..post("pattern", "Career")
            },
        )
        .await
        .unwrap();

        let posts = get_all_posts(&pool, DEFAULT_PAGE_SIZE, 0).await.unwrap();
        assert_eq!(posts.len(), 1);
        assert!(posts.iter().all(|p| !p.is_template));
    }

    #[tokio::test]
    async fn test_pagination() {
        let (pool, _dir) = temp_pool().await;
        for i in 0..5 {
            save_post(&pool, post(&format!("post {i}"), "Career"))
                .await
                .unwrap();
        }

        let page = get_all_posts(&pool, 2, 2).await.unwrap();
        let contents: Vec<_> = page.iter().map(|p| p.content.as_str()).collect();
        assert_eq!(contents, vec!["post 2", "post 1"]);

        assert!(get_all_posts(&pool, 10, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        let (pool, _dir) = temp_pool().await;
        assert!(get_all_posts(&pool, 10, 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_negative_paging_is_rejected() {
        let (pool, _dir) = temp_pool().await;
        assert!(matches!(
            get_all_posts(&pool, -1, 0).await,
            Err(AppError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_noop() {
        let (pool, _dir) = temp_pool().await;
        save_post(&pool, post("keep me", "Career")).await.unwrap();

        delete_post(&pool, 9999).await.unwrap();

        let posts = get_all_posts(&pool, 10, 0).await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].content, "keep me");
    }

    #[tokio::test]
    async fn test_delete_removes_post() {
        let (pool, _dir) = temp_pool().await;
        let id = save_post(&pool, post("bye", "Career")).await.unwrap();
        delete_post(&pool, id).await.unwrap();
        assert!(get_all_posts(&pool, 10, 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_engagement() {
        let (pool, _dir) = temp_pool().await;
        let id = save_post(&pool, post("hello", "Career")).await.unwrap();

        update_post_engagement(&pool, id, 42).await.unwrap();
        update_post_engagement(&pool, id, 7).await.unwrap();
        let posts = get_all_posts(&pool, 10, 0).await.unwrap();
        assert_eq!(posts[0].engagement_score, 7);
        assert_eq!(posts[0].content, "hello");
    }

    #[tokio::test]
    async fn test_update_engagement_missing_id_is_noop() {
        let (pool, _dir) = temp_pool().await;
        let id = save_post(&pool, post("hello", "Career")).await.unwrap();

        update_post_engagement(&pool, id + 100, 5).await.unwrap();
        let posts = get_all_posts(&pool, 10, 0).await.unwrap();
        assert_eq!(posts[0].engagement_score, 0);
    }
}
