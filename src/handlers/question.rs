use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Serialize;

use crate::db::question as repo;
use crate::error::AppError;
use crate::models::{NewQuestion, Question, QuestionPatch};
use crate::AppState;

/// Body returned by a successful delete
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// 获取所有问题
pub async fn list_questions(
    State(state): State<AppState>,
) -> Result<Json<Vec<Question>>, AppError> {
    let questions = repo::list_questions(&state.pool).await?;
    Ok(Json(questions))
}

/// 创建问题
pub async fn create_question(
    State(state): State<AppState>,
    payload: Result<Json<NewQuestion>, JsonRejection>,
) -> Result<Json<Question>, AppError> {
    let Json(new) = payload?;
    let question = repo::create_question(&state.pool, &new).await?;
    Ok(Json(question))
}

pub async fn get_question(
    Path(question_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Question>, AppError> {
    let question = repo::get_question(&state.pool, question_id).await?;
    Ok(Json(question))
}

/// 更新问题
pub async fn update_question(
    Path(question_id): Path<i64>,
    State(state): State<AppState>,
    payload: Result<Json<QuestionPatch>, JsonRejection>,
) -> Result<Json<Question>, AppError> {
    let Json(patch) = payload?;
    let question = repo::update_question(&state.pool, question_id, &patch).await?;
    Ok(Json(question))
}

pub async fn delete_question(
    Path(question_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<DeleteResponse>, AppError> {
    repo::delete_question(&state.pool, question_id).await?;
    Ok(Json(DeleteResponse {
        message: "Question deleted successfully".to_string(),
    }))
}
