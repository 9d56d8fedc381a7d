use super::{require_text, Entity};
use crate::errors::AppResult;
use crate::utils::time::{double_option, non_null};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub content: String,
    pub mood: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewJournalEntry {
    pub content: String,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl NewJournalEntry {
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            mood: None,
            tags: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JournalEntryPatch {
    #[serde(default, deserialize_with = "non_null")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub mood: Option<Option<String>>,
    #[serde(default, deserialize_with = "non_null")]
    pub tags: Option<Vec<String>>,
}

impl Entity for JournalEntry {
    type Draft = NewJournalEntry;
    type Patch = JournalEntryPatch;

    const KIND: &'static str = "Journal entry";

    fn from_draft(id: String, draft: NewJournalEntry, now: DateTime<Utc>) -> Self {
        Self {
            id,
            content: draft.content,
            mood: draft.mood,
            tags: draft.tags.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, patch: JournalEntryPatch) {
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(mood) = patch.mood {
            self.mood = mood;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
    }

    fn validate(&self) -> AppResult<()> {
        require_text("content", &self.content)
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}
