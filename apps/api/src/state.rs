use std::sync::Arc;

use sqlx::SqlitePool;

use crate::corpus::ExampleCorpus;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    /// Read-only few-shot examples, loaded once at startup.
    pub corpus: Arc<ExampleCorpus>,
    /// Pluggable generator. `Retrying<LlmClient>` in production, a stub in tests.
    pub generator: Arc<dyn TextGenerator>,
}
