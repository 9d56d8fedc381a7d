use crate::errors::{AppError, AppResult};
use crate::models::{Goal, NewGoal};
use crate::services::assistant::{resolve_object, UseCase};
use crate::services::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Serialize)]
pub struct GoalResponse {
    #[serde(flatten)]
    pub goal: Goal,
    pub ai_suggestions: Value,
}

pub async fn create_goal(
    State(state): State<AppState>,
    body: Result<Json<NewGoal>, JsonRejection>,
) -> AppResult<Json<GoalResponse>> {
    let Json(draft) = body?;

    let enabled = state.settings.features.goal_tracking;
    let title = draft.title.clone();
    let description = draft.description.clone();
    let improvements = async {
        if !enabled {
            return Ok::<_, AppError>(json!({}));
        }
        let result = state
            .assistant
            .goal_improvements(&title, description.as_deref())
            .await;
        Ok(resolve_object(UseCase::GoalImprovements, result))
    };

    let (goal, ai_suggestions) =
        tokio::try_join!(state.store.create::<Goal>(draft), improvements)?;

    Ok(Json(GoalResponse {
        goal,
        ai_suggestions,
    }))
}
