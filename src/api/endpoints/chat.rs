//! Chat assistant endpoint.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::assistant;
use crate::db;
use crate::models::enums::Role;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub patient_id: Uuid,
    pub role: Role,
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub answer: String,
}

/// `POST /api/chat` — answer a question about one patient's record.
pub async fn send(
    State(ctx): State<ApiContext>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    if request.question.trim().is_empty() {
        return Err(ApiError::BadRequest("question must not be empty".into()));
    }

    // Take the lock only for the fetch; generation must not hold it.
    let record = {
        let conn = ctx.db.lock().map_err(|_| ApiError::Internal("db lock poisoned".into()))?;
        db::fetch_patient_record(&conn, &request.patient_id)?
            .ok_or_else(|| ApiError::NotFound(format!("patient {}", request.patient_id)))?
    };

    let answer = assistant::answer_question(
        &ctx.assistant,
        &ctx.settings,
        &record,
        request.role,
        &request.question,
    )
    .await?;

    Ok(Json(ChatResponse { answer }))
}
