//! Review endpoints

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::{DateTime, TimeDelta, Utc};
use review_core::{compute_study_stats, dates, select_due, sort_by_due};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::extract::ApiJson;
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::services::review::{due_message, review_message, submit_review};
use crate::AppState;

/// POST /api/reviews/:flashcard_id
pub async fn submit(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(flashcard_id): Path<Uuid>,
    ApiJson(payload): ApiJson<SubmitReviewRequest>,
) -> Result<Json<SubmitReviewResponse>> {
    let now = Utc::now();
    let today = dates::today(state.config.daily_reset_hour);

    let submission = submit_review(
        &state.db,
        auth.user_id,
        flashcard_id,
        payload.quality,
        payload.time_spent,
        now,
        today,
    )
    .await?;

    tracing::info!(
        %flashcard_id,
        quality = payload.quality,
        passed = submission.outcome.passed,
        interval_days = submission.outcome.interval_days,
        "review recorded"
    );

    Ok(Json(SubmitReviewResponse {
        flashcard: submission.flashcard.to_api_flashcard(),
        review: submission.review.to_api_review()?,
        message: review_message(&submission.outcome),
    }))
}

/// GET /api/reviews/due
pub async fn due(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<DueFlashcardsResponse>> {
    let today = dates::today(state.config.daily_reset_hour);
    let cards: Vec<Flashcard> = state
        .db
        .get_flashcards_by_user(auth.user_id)
        .await?
        .iter()
        .map(DbFlashcard::to_api_flashcard)
        .collect();

    let mut due: Vec<Flashcard> = select_due(&cards, today).cloned().collect();
    sort_by_due(&mut due);
    let stats = compute_study_stats(&cards, today);

    tracing::debug!(user_id = %auth.user_id, due = due.len(), total = stats.total, "due queue");

    Ok(Json(DueFlashcardsResponse {
        message: due_message(due.len()),
        flashcards: due,
        stats,
    }))
}

/// GET /api/reviews/stats
pub async fn stats(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<StudyStatsResponse>> {
    let today = dates::today(state.config.daily_reset_hour);
    let since = review_window_start(Utc::now(), state.config.recent_review_days)?;

    let user_stats = state.db.get_user_study_stats(auth.user_id).await?;
    let cards: Vec<Flashcard> = state
        .db
        .get_flashcards_by_user(auth.user_id)
        .await?
        .iter()
        .map(DbFlashcard::to_api_flashcard)
        .collect();
    let recent_reviews = state
        .db
        .get_reviews_since(auth.user_id, since)
        .await?
        .iter()
        .map(DbReview::to_api_review)
        .collect::<Result<Vec<_>>>()?;

    Ok(Json(StudyStatsResponse {
        user_stats,
        card_stats: compute_study_stats(&cards, today),
        recent_reviews,
    }))
}

/// Start of the recent-reviews window, `days` before `now`.
fn review_window_start(now: DateTime<Utc>, days: i64) -> Result<DateTime<Utc>> {
    TimeDelta::try_days(days)
        .and_then(|window| now.checked_sub_signed(window))
        .ok_or_else(|| ApiError::Internal(format!("review window of {days} days is out of range")))
}
