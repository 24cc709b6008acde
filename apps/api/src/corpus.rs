//! Example Corpus — read-only few-shot posts bundled with the service.
//!
//! Loaded once at startup, either from the embedded JSON or from a file
//! supplied via `EXAMPLES_PATH`. Each entry's length bucket is derived from
//! its text, so the data file only carries text, language, tags and engagement.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::post::{Language, PostLength};

const BUNDLED_EXAMPLES: &str = include_str!("../data/example_posts.json");

/// Posts with fewer non-blank lines than this are Short.
const SHORT_MAX_EXCLUSIVE: usize = 5;
/// Posts with more non-blank lines than this are Long.
const MEDIUM_MAX_INCLUSIVE: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExampleEntry {
    pub text: String,
    #[serde(default)]
    pub engagement: u32,
    pub language: Language,
    pub tags: Vec<String>,
}

impl ExampleEntry {
    pub fn line_count(&self) -> usize {
        self.text.lines().filter(|l| !l.trim().is_empty()).count()
    }

    pub fn length(&self) -> PostLength {
        classify_length(self.line_count())
    }
}

pub fn classify_length(line_count: usize) -> PostLength {
    if line_count < SHORT_MAX_EXCLUSIVE {
        PostLength::Short
    } else if line_count <= MEDIUM_MAX_INCLUSIVE {
        PostLength::Medium
    } else {
        PostLength::Long
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExampleCorpus {
    entries: Vec<ExampleEntry>,
}

impl ExampleCorpus {
    pub fn new(entries: Vec<ExampleEntry>) -> Self {
        Self { entries }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<ExampleEntry> =
            serde_json::from_str(json).context("example corpus is not valid JSON")?;
        Ok(Self::new(entries))
    }

    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_EXAMPLES)
    }

    /// Loads the corpus from `path` if given, the embedded data otherwise.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let corpus = match path {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read example corpus at '{path}'"))?;
                Self::from_json(&json)?
            }
            None => Self::bundled()?,
        };
        info!(
            "Example corpus loaded: {} posts, {} topics",
            corpus.entries.len(),
            corpus.get_tags().len()
        );
        Ok(corpus)
    }

    /// Distinct topics in first-seen order.
    pub fn get_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        for tag in self.entries.iter().flat_map(|e| e.tags.iter()) {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }
        tags
    }

    /// Entries whose length bucket, language and tag all match, in corpus order.
    pub fn get_filtered_posts(
        &self,
        length: PostLength,
        language: Language,
        tag: &str,
    ) -> Vec<&ExampleEntry> {
        self.entries
            .iter()
            .filter(|e| e.length() == length)
            .filter(|e| e.language == language)
            .filter(|e| e.tags.iter().any(|t| t == tag))
            .collect()
    }
}
