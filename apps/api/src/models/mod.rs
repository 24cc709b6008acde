pub mod post;
pub mod preferences;
pub mod template;
