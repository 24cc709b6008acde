//! Retry decorator for any `TextGenerator`.

use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use super::{GenerationError, TextGenerator};

const BASE_DELAY: Duration = Duration::from_millis(1000);

/// Wraps a generator and retries retryable failures with exponential backoff (1s, 2s, 4s, ...).
pub struct Retrying<G> {
    inner: G,
    max_retries: u32,
    base_delay: Duration,
}

impl<G: TextGenerator> Retrying<G> {
    pub fn new(inner: G, max_retries: u32) -> Self {
        Self {
            inner,
            max_retries,
            base_delay: BASE_DELAY,
        }
    }

    #[cfg(test)]
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }
}

#[async_trait]
impl<G: TextGenerator> TextGenerator for Retrying<G> {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let mut attempt = 0;
        loop {
            match self.inner.generate(prompt).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    let delay = self.base_delay * (1 << attempt);
                    attempt += 1;
                    warn!(
                        "Generation attempt {attempt} failed ({e}), retrying after {}ms...",
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
