//! Flashcard endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::extract::ApiJson;
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// POST /api/flashcards
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    ApiJson(payload): ApiJson<CreateFlashcardRequest>,
) -> Result<(StatusCode, Json<Flashcard>)> {
    if payload.question.trim().is_empty() {
        return Err(ApiError::Validation("question is required".to_string()));
    }
    if payload.answer.trim().is_empty() {
        return Err(ApiError::Validation("answer is required".to_string()));
    }

    let card = state.db.create_flashcard(auth.user_id, &payload).await?;
    tracing::debug!(flashcard_id = %card.id, "created flashcard");

    Ok((StatusCode::CREATED, Json(card.to_api_flashcard())))
}

/// GET /api/flashcards
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<FlashcardListResponse>> {
    let cards = state.db.get_flashcards_by_user(auth.user_id).await?;
    Ok(Json(FlashcardListResponse {
        flashcards: cards.iter().map(DbFlashcard::to_api_flashcard).collect(),
    }))
}

/// DELETE /api/flashcards/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(flashcard_id): Path<Uuid>,
) -> Result<StatusCode> {
    if state.db.delete_flashcard(auth.user_id, flashcard_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Flashcard not found".to_string()))
    }
}
