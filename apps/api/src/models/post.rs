use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::errors::AppError;

/// Target size of a generated post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
pub enum PostLength {
    Short,
    Medium,
    Long,
}

impl PostLength {
    pub const ALL: [PostLength; 3] = [PostLength::Short, PostLength::Medium, PostLength::Long];

    pub fn as_str(&self) -> &'static str {
        match self {
            PostLength::Short => "Short",
            PostLength::Medium => "Medium",
            PostLength::Long => "Long",
        }
    }
}

impl fmt::Display for PostLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostLength {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PostLength::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| AppError::invalid(format!("unknown length '{s}'")))
    }
}

/// Output language. Hinglish is Hindi/English mixed, written in Latin script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
pub enum Language {
    English,
    Hinglish,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Hinglish];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hinglish => "Hinglish",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| AppError::invalid(format!("unknown language '{s}'")))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PostRow {
    pub id: i64,
    pub content: String,
    pub topic: String,
    pub length: PostLength,
    pub language: Language,
    pub created_at: NaiveDateTime,
    pub is_template: bool,
    pub engagement_score: i64,
}
