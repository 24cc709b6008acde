pub mod health;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::session::handlers as session;
use crate::state::AppState;
use crate::store::handlers as store;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Generation
        .route("/api/v1/topics", get(generation::handle_topics))
        .route("/api/v1/posts/generate", post(generation::handle_generate))
        // Library
        .route("/api/v1/posts", get(store::handle_list_posts))
        .route("/api/v1/posts/:id", delete(store::handle_delete_post))
        .route(
            "/api/v1/posts/:id/engagement",
            patch(store::handle_update_engagement),
        )
        .route(
            "/api/v1/templates",
            get(store::handle_list_templates).post(store::handle_create_template),
        )
        .route(
            "/api/v1/templates/categories",
            get(store::handle_template_categories),
        )
        .route(
            "/api/v1/preferences",
            get(store::handle_get_preferences).put(store::handle_put_preferences),
        )
        // Session interactions
        .route("/api/v1/session/generate", post(session::handle_generate))
        .route("/api/v1/session/regenerate", post(session::handle_regenerate))
        .route(
            "/api/v1/session/use-template",
            post(session::handle_use_template),
        )
        .route("/api/v1/session/edit-post", post(session::handle_edit_post))
        .route(
            "/api/v1/session/save-post-edit",
            post(session::handle_save_post_edit),
        )
        .route(
            "/api/v1/session/edit-template",
            post(session::handle_edit_template),
        )
        .route(
            "/api/v1/session/save-template-edit",
            post(session::handle_save_template_edit),
        )
        .route(
            "/api/v1/session/cancel-edit",
            post(session::handle_cancel_edit),
        )
        .route(
            "/api/v1/session/save-as-template",
            post(session::handle_save_as_template),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;
    use crate::corpus::ExampleCorpus;
    use crate::db::test_support::temp_pool;
    use crate::llm_client::test_support::StubGenerator;

    async fn app(reply: &str) -> (Router, TempDir) {
        let (db, dir) = temp_pool().await;
        let state = AppState {
            db,
            corpus: Arc::new(ExampleCorpus::bundled().unwrap()),
            generator: Arc::new(StubGenerator::always(reply)),
        };
        (build_router(state), dir)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _dir) = app("unused").await;
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_topics_come_from_corpus() {
        let (app, _dir) = app("unused").await;
        let (status, body) = send(&app, Method::GET, "/api/v1/topics", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0], "Mental Health");
    }

    #[tokio::test]
    async fn test_generate_then_list() {
        let (app, _dir) = app("Take the walk. 🚶").await;
        let (status, generated) = send(
            &app,
            Method::POST,
            "/api/v1/posts/generate",
            Some(json!({"topic": "Mental Health", "length": "Medium", "language": "English"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(generated["content"], "Take the walk. 🚶");
        assert_eq!(generated["hashtags"][0], "#MentalHealth");

        let (status, posts) = send(&app, Method::GET, "/api/v1/posts?limit=1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(posts[0]["id"], generated["post_id"]);
        assert_eq!(posts[0]["length"], "Medium");
        assert_eq!(posts[0]["is_template"], false);
    }

    #[tokio::test]
    async fn test_unknown_length_is_bad_request() {
        let (app, _dir) = app("unused").await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/posts/generate",
            Some(json!({"topic": "Mental Health", "length": "Epic", "language": "English"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_ARGUMENT");
    }

    #[tokio::test]
    async fn test_delete_and_engagement_on_missing_id_are_no_content() {
        let (app, _dir) = app("unused").await;
        let (status, _) = send(&app, Method::DELETE, "/api/v1/posts/404", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(
            &app,
            Method::PATCH,
            "/api/v1/posts/404/engagement",
            Some(json!({"engagement_score": 3})),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_template_create_and_filter() {
        let (app, _dir) = app("unused").await;
        let (status, created) = send(
            &app,
            Method::POST,
            "/api/v1/templates",
            Some(json!({"name": "T1", "content": "Once upon a time", "category": "Story"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(created["id"].is_i64());

        let (_, stories) = send(&app, Method::GET, "/api/v1/templates?category=Story", None).await;
        assert_eq!(stories.as_array().unwrap().len(), 1);
        assert_eq!(stories[0]["name"], "T1");
        assert_eq!(stories[0]["category"], "Story");

        let (_, tips) = send(&app, Method::GET, "/api/v1/templates?category=Tip", None).await;
        assert!(tips.as_array().unwrap().is_empty());

        let (status, _) = send(&app, Method::GET, "/api/v1/templates?category=Rant", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_template_with_unknown_category_is_rejected() {
        let (app, _dir) = app("unused").await;
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/templates",
            Some(json!({"name": "T1", "content": "x", "category": "Rant"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_preferences_default_then_latest_wins() {
        let (app, _dir) = app("unused").await;
        let (_, prefs) = send(&app, Method::GET, "/api/v1/preferences", None).await;
        assert_eq!(
            prefs,
            json!({"use_emojis": true, "show_hashtags": true, "default_length": "Medium", "default_language": "English"})
        );

        for lang in ["Hinglish", "English"] {
            let (status, _) = send(
                &app,
                Method::PUT,
                "/api/v1/preferences",
                Some(json!({"use_emojis": false, "show_hashtags": false, "default_length": "Long", "default_language": lang})),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (_, prefs) = send(&app, Method::GET, "/api/v1/preferences", None).await;
        assert_eq!(prefs["use_emojis"], false);
        assert_eq!(prefs["default_length"], "Long");
        assert_eq!(prefs["default_language"], "English");
    }

    #[tokio::test]
    async fn test_session_generate_edit_and_save_as_template() {
        let (app, _dir) = app("Draft from the model").await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/session/generate",
            Some(json!({"topic": "Leadership", "length": "Short", "language": "Hinglish", "use_emojis": false})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["session"]["current_post"], "Draft from the model");
        assert_eq!(body["post"]["language"], "Hinglish");

        let (_, posts) = send(&app, Method::GET, "/api/v1/posts", None).await;
        let (_, body) = send(
            &app,
            Method::POST,
            "/api/v1/session/edit-post",
            Some(json!({"session": body["session"], "post": posts[0]})),
        )
        .await;
        assert_eq!(body["session"]["editing"]["kind"], "post");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/session/save-post-edit",
            Some(json!({"session": body["session"], "content": "Polished draft"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["notice"], "Post updated!");
        assert_eq!(body["session"]["current_post"], "Polished draft");
        assert_eq!(body["session"]["editing"]["kind"], "nothing");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/session/save-as-template",
            Some(json!({"session": body["session"]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["template_id"].is_i64());

        let (_, customs) =
            send(&app, Method::GET, "/api/v1/templates?category=Custom", None).await;
        assert_eq!(customs[0]["content"], "Polished draft");
    }

    #[tokio::test]
    async fn test_session_regenerate_needs_history() {
        let (app, _dir) = app("unused").await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/session/regenerate",
            Some(json!({"session": {}})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_ARGUMENT");
    }
}
