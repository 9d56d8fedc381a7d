pub mod ai;
pub mod goals;
pub mod health;
pub mod journal;
pub mod todos;

use crate::database::Table;
use crate::errors::{AppError, AppResult};
use crate::models::{Entity, Goal, JournalEntry, Todo};
use crate::services::store::DEFAULT_LIST_LIMIT;
use crate::services::AppState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        // Todos
        .route("/todos", post(todos::create_todo).get(list::<Todo>))
        .route("/todos/", post(todos::create_todo).get(list::<Todo>))
        .route(
            "/todos/:id",
            get(fetch::<Todo>).put(update::<Todo>).delete(remove::<Todo>),
        )
        // Journal
        .route("/journal", post(journal::create_journal_entry).get(list::<JournalEntry>))
        .route("/journal/", post(journal::create_journal_entry).get(list::<JournalEntry>))
        .route(
            "/journal/:id",
            get(fetch::<JournalEntry>)
                .put(update::<JournalEntry>)
                .delete(remove::<JournalEntry>),
        )
        // Goals
        .route("/goals", post(goals::create_goal).get(list::<Goal>))
        .route("/goals/", post(goals::create_goal).get(list::<Goal>))
        .route(
            "/goals/:id",
            get(fetch::<Goal>).put(update::<Goal>).delete(remove::<Goal>),
        )
        // AI
        .route("/ai/todo-suggestions", post(ai::todo_suggestions))
        .route("/ai/journal-analysis", post(ai::journal_analysis))
        .route("/ai/goal-improvements", post(ai::goal_improvements))
        .route("/ai/productivity-insights", get(ai::productivity_insights))
        .with_state(state)
}

fn default_limit() -> u32 {
    DEFAULT_LIST_LIMIT
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

async fn list<E>(
    State(state): State<AppState>,
    query: Result<Query<Pagination>, QueryRejection>,
) -> AppResult<Json<Vec<E>>>
where
    E: Entity + Table + Serialize,
{
    let Query(page) = query?;
    let items = state.store.list::<E>(page.skip, page.limit).await?;
    Ok(Json(items))
}

async fn fetch<E>(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Json<E>>
where
    E: Entity + Table + Serialize,
{
    state
        .store
        .get::<E>(&id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound(E::KIND))
}

async fn update<E>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<E::Patch>, JsonRejection>,
) -> AppResult<Json<E>>
where
    E: Entity + Table + Serialize,
    E::Patch: DeserializeOwned,
{
    let Json(patch) = body?;
    state
        .store
        .update::<E>(&id, patch)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound(E::KIND))
}

async fn remove<E>(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Json<Value>>
where
    E: Entity + Table,
{
    if state.store.delete::<E>(&id).await? {
        Ok(Json(json!({ "status": "success" })))
    } else {
        Err(AppError::NotFound(E::KIND))
    }
}
