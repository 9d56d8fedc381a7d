use super::{require_text, Entity};
use crate::errors::{AppError, AppResult};
use crate::utils::time::{double_option, non_null, optional_datetime, patch_datetime};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_GOAL_STATUS: &str = "active";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub target_date: Option<DateTime<Utc>>,
    pub progress: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewGoal {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "optional_datetime")]
    pub target_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
}

impl NewGoal {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            target_date: None,
            progress: None,
            status: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GoalPatch {
    #[serde(default, deserialize_with = "non_null")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch_datetime")]
    pub target_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "non_null")]
    pub progress: Option<f64>,
    #[serde(default, deserialize_with = "non_null")]
    pub status: Option<String>,
}

impl Entity for Goal {
    type Draft = NewGoal;
    type Patch = GoalPatch;

    const KIND: &'static str = "Goal";

    fn from_draft(id: String, draft: NewGoal, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            target_date: draft.target_date,
            progress: draft.progress.unwrap_or(0.0),
            status: draft
                .status
                .unwrap_or_else(|| DEFAULT_GOAL_STATUS.to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, patch: GoalPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(target_date) = patch.target_date {
            self.target_date = target_date;
        }
        if let Some(progress) = patch.progress {
            self.progress = progress;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }

    fn validate(&self) -> AppResult<()> {
        require_text("title", &self.title)?;
        require_text("status", &self.status)?;
        if !(0.0..=1.0).contains(&self.progress) {
            return Err(AppError::validation(format!(
                "progress must be between 0 and 1, got {}",
                self.progress
            )));
        }
        Ok(())
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::time::now;

    #[test]
    fn defaults_to_active_with_zero_progress() {
        let goal = Goal::from_draft("g-1".to_string(), NewGoal::titled("Run a marathon"), now());
        assert_eq!(goal.status, DEFAULT_GOAL_STATUS);
        assert_eq!(goal.progress, 0.0);
        assert!(goal.validate().is_ok());
    }

    #[test]
    fn progress_outside_unit_range_is_rejected() {
        let mut goal = Goal::from_draft("g-1".to_string(), NewGoal::titled("Read"), now());
        goal.apply(GoalPatch {
            progress: Some(1.5),
            ..Default::default()
        });
        assert!(goal.validate().is_err());

        goal.apply(GoalPatch {
            progress: Some(f64::NAN),
            ..Default::default()
        });
        assert!(goal.validate().is_err());

        goal.apply(GoalPatch {
            progress: Some(1.0),
            ..Default::default()
        });
        assert!(goal.validate().is_ok());
    }

    #[test]
    fn target_date_accepts_naive_iso() {
        let draft: NewGoal =
            serde_json::from_str(r#"{"title": "Ship", "target_date": "2026-01-15T09:00:00"}"#)
                .unwrap();
        let goal = Goal::from_draft("g-2".to_string(), draft, now());
        assert!(goal.target_date.is_some());
    }

    #[test]
    fn patch_null_clears_description_but_not_status() {
        let cleared: GoalPatch = serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert_eq!(cleared.description, Some(None));

        assert!(serde_json::from_str::<GoalPatch>(r#"{"status": null}"#).is_err());
        assert!(serde_json::from_str::<GoalPatch>(r#"{"title": null}"#).is_err());
        assert!(serde_json::from_str::<GoalPatch>(r#"{"progress": null}"#).is_err());
    }
}
