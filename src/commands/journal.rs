use crate::errors::{AppError, AppResult};
use crate::models::{JournalEntry, NewJournalEntry};
use crate::services::assistant::{resolve_object, UseCase};
use crate::services::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Serialize)]
pub struct JournalEntryResponse {
    #[serde(flatten)]
    pub entry: JournalEntry,
    pub ai_analysis: Value,
}

pub async fn create_journal_entry(
    State(state): State<AppState>,
    body: Result<Json<NewJournalEntry>, JsonRejection>,
) -> AppResult<Json<JournalEntryResponse>> {
    let Json(draft) = body?;

    let enabled = state.settings.features.journal_analysis;
    let content = draft.content.clone();
    let analysis = async {
        if !enabled {
            return Ok::<_, AppError>(json!({}));
        }
        let result = state.assistant.journal_analysis(&content).await;
        Ok(resolve_object(UseCase::JournalAnalysis, result))
    };

    let (entry, ai_analysis) =
        tokio::try_join!(state.store.create::<JournalEntry>(draft), analysis)?;

    Ok(Json(JournalEntryResponse { entry, ai_analysis }))
}
