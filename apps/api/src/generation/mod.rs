// Post generation: prompt assembly, the generate-and-save pipeline and its HTTP handlers.
// All model calls go through llm_client::TextGenerator.

pub mod generator;
pub mod handlers;
pub mod hashtags;
pub mod prompt_builder;
pub mod prompts;
