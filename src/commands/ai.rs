use crate::errors::AppResult;
use crate::models::{require_text, Goal, JournalEntry, Todo};
use crate::services::assistant::{resolve_object, resolve_suggestions, UseCase};
use crate::services::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

/// How many of each kind are sampled into the insights prompt.
const INSIGHTS_SAMPLE_SIZE: u32 = 50;

#[derive(Debug, Deserialize)]
pub struct SuggestionRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    pub content: String,
}

pub async fn todo_suggestions(
    State(state): State<AppState>,
    body: Result<Json<SuggestionRequest>, JsonRejection>,
) -> AppResult<Json<Vec<String>>> {
    let Json(req) = body?;
    require_text("title", &req.title)?;

    let result = state
        .assistant
        .todo_suggestions(&req.title, req.description.as_deref())
        .await;
    Ok(Json(resolve_suggestions(result)))
}

pub async fn journal_analysis(
    State(state): State<AppState>,
    body: Result<Json<AnalysisRequest>, JsonRejection>,
) -> AppResult<Json<Value>> {
    let Json(req) = body?;
    require_text("content", &req.content)?;

    let result = state.assistant.journal_analysis(&req.content).await;
    Ok(Json(resolve_object(UseCase::JournalAnalysis, result)))
}

pub async fn goal_improvements(
    State(state): State<AppState>,
    body: Result<Json<SuggestionRequest>, JsonRejection>,
) -> AppResult<Json<Value>> {
    let Json(req) = body?;
    require_text("title", &req.title)?;

    let result = state
        .assistant
        .goal_improvements(&req.title, req.description.as_deref())
        .await;
    Ok(Json(resolve_object(UseCase::GoalImprovements, result)))
}

pub async fn productivity_insights(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let (todos, journal_entries, goals) = tokio::try_join!(
        state.store.list::<Todo>(0, INSIGHTS_SAMPLE_SIZE),
        state.store.list::<JournalEntry>(0, INSIGHTS_SAMPLE_SIZE),
        state.store.list::<Goal>(0, INSIGHTS_SAMPLE_SIZE),
    )?;

    let result = state
        .assistant
        .productivity_insights(&todos, &journal_entries, &goals)
        .await;
    Ok(Json(resolve_object(UseCase::ProductivityInsights, result)))
}
