use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::errors::AppError;

/// Template category. `Custom` is reserved for templates derived from a saved post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
pub enum TemplateCategory {
    Announcement,
    Achievement,
    Story,
    Question,
    Tip,
    Custom,
}

impl TemplateCategory {
    pub const ALL: [TemplateCategory; 6] = [
        TemplateCategory::Announcement,
        TemplateCategory::Achievement,
        TemplateCategory::Story,
        TemplateCategory::Question,
        TemplateCategory::Tip,
        TemplateCategory::Custom,
    ];

    /// Categories offered to users when creating a template by hand.
    pub fn selectable() -> &'static [TemplateCategory] {
        &Self::ALL[..5]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateCategory::Announcement => "Announcement",
            TemplateCategory::Achievement => "Achievement",
            TemplateCategory::Story => "Story",
            TemplateCategory::Question => "Question",
            TemplateCategory::Tip => "Tip",
            TemplateCategory::Custom => "Custom",
        }
    }
}

impl fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| AppError::invalid(format!("unknown template category '{s}'")))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TemplateRow {
    pub id: i64,
    pub name: String,
    pub content: String,
    pub category: TemplateCategory,
    pub created_at: NaiveDateTime,
}
