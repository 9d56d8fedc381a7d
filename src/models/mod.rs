pub mod goal;
pub mod journal;
pub mod settings;
pub mod todo;

pub use goal::*;
pub use journal::*;
pub use settings::*;
pub use todo::*;

use crate::errors::AppResult;
use chrono::{DateTime, Utc};

/// A stored record kind: server-stamped identity and timestamps, a create body
/// (`Draft`) and a partial-update body (`Patch`).
pub trait Entity: Clone + Send + Sync + 'static {
    type Draft: Send + 'static;
    type Patch: Send + 'static;

    /// Human-readable kind, used in not-found messages.
    const KIND: &'static str;

    fn from_draft(id: String, draft: Self::Draft, now: DateTime<Utc>) -> Self;

    /// Copy every field present in `patch` onto `self`. Absent fields are left untouched.
    fn apply(&mut self, patch: Self::Patch);

    fn validate(&self) -> AppResult<()>;

    fn id(&self) -> &str;
    fn updated_at(&self) -> DateTime<Utc>;
    fn touch(&mut self, at: DateTime<Utc>);
}

pub(crate) fn require_text(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(crate::errors::AppError::validation(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}
