use crate::errors::{AppError, AppResult};
use crate::models::{NewTodo, Todo};
use crate::services::assistant::resolve_suggestions;
use crate::services::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct TodoResponse {
    #[serde(flatten)]
    pub todo: Todo,
    pub ai_suggestions: Vec<String>,
}

pub async fn create_todo(
    State(state): State<AppState>,
    body: Result<Json<NewTodo>, JsonRejection>,
) -> AppResult<Json<TodoResponse>> {
    let Json(draft) = body?;

    let enabled = state.settings.features.todo_suggestions;
    let title = draft.title.clone();
    let description = draft.description.clone();
    let suggestions = async {
        if !enabled {
            return Ok::<_, AppError>(Vec::new());
        }
        let result = state
            .assistant
            .todo_suggestions(&title, description.as_deref())
            .await;
        Ok(resolve_suggestions(result))
    };

    // The AI call is dropped if the write fails; it can never fail the write.
    let (todo, ai_suggestions) = tokio::try_join!(state.store.create::<Todo>(draft), suggestions)?;

    Ok(Json(TodoResponse {
        todo,
        ai_suggestions,
    }))
}
