//! Prompt Builder — turns generation parameters plus a few matching example
//! posts into one instruction string. Pure: no I/O, same input, same output.

use serde::{Deserialize, Serialize};

use crate::corpus::{ExampleCorpus, ExampleEntry};
use crate::errors::AppError;
use crate::generation::prompts::{
    EMOJI_OFF, EMOJI_ON, EXAMPLES_HEADER, HINGLISH_RULE, INTRO, STRUCTURE, STYLE,
};
use crate::models::post::{Language, PostLength};

/// Few-shot examples included in a prompt, at most.
pub const MAX_EXAMPLES: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptParams {
    pub topic: String,
    pub length: PostLength,
    pub language: Language,
    pub use_emojis: bool,
}

pub fn length_range(length: PostLength) -> &'static str {
    match length {
        PostLength::Short => "1 to 5 lines",
        PostLength::Medium => "6 to 10 lines",
        PostLength::Long => "11 to 15 lines",
    }
}

/// Looks up matching examples in the corpus and renders the prompt.
pub fn build_prompt(params: &PromptParams, corpus: &ExampleCorpus) -> Result<String, AppError> {
    if params.topic.trim().is_empty() {
        return Err(AppError::invalid("topic cannot be empty"));
    }

    let examples = corpus.get_filtered_posts(params.length, params.language, &params.topic);
    Ok(render_prompt(params, &examples))
}

/// Renders the prompt from an already-selected example set. Only the first
/// `MAX_EXAMPLES` examples are used; no section is emitted for an empty set.
pub fn render_prompt(params: &PromptParams, examples: &[&ExampleEntry]) -> String {
    let emoji = if params.use_emojis { EMOJI_ON } else { EMOJI_OFF };

    let mut prompt = format!(
        "{INTRO}\n\n\
         1) Topic: {topic}\n\
         2) Length: {length}\n\
         3) Language: {language}\n\
         4) Style: {STYLE}\n\
         5) {emoji}\n",
        topic = params.topic.trim(),
        length = length_range(params.length),
        language = params.language,
    );

    if params.language == Language::Hinglish {
        prompt.push('\n');
        prompt.push_str(HINGLISH_RULE);
        prompt.push('\n');
    }

    prompt.push('\n');
    prompt.push_str(STRUCTURE);

    if !examples.is_empty() {
        prompt.push_str("\n\n");
        prompt.push_str(EXAMPLES_HEADER);
        for (i, example) in examples.iter().take(MAX_EXAMPLES).enumerate() {
            prompt.push_str(&format!("\n\nExample {}:\n\n{}", i + 1, example.text));
        }
    }

    prompt
}
