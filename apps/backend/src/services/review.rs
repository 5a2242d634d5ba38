//! Review submission: the atomic read-modify-write around the scheduler.

use chrono::{DateTime, NaiveDate, Utc};
use review_core::{Quality, ReviewOutcome, Sm2};
use uuid::Uuid;

use crate::db::Database;
use crate::error::{ApiError, Result};
use crate::models::{DbFlashcard, DbReview, DbUserStudyStats};

/// Everything a review submission produced.
#[derive(Debug, Clone)]
pub struct ReviewSubmission {
    pub flashcard: DbFlashcard,
    pub review: DbReview,
    pub outcome: ReviewOutcome,
}

/// Schedule and persist one review of a flashcard.
///
/// Runs in a single transaction holding the flashcard row lock, so two
/// reviews of the same card serialize instead of losing an update.
pub async fn submit_review(
    db: &Database,
    user_id: Uuid,
    flashcard_id: Uuid,
    quality: i32,
    time_spent: Option<i32>,
    now: DateTime<Utc>,
    today: NaiveDate,
) -> Result<ReviewSubmission> {
    let mut tx = db.pool().begin().await?;

    let card = Database::lock_flashcard(&mut *tx, user_id, flashcard_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Flashcard not found".to_string()))?;

    let quality = Quality::new(quality)?;
    let time_spent_secs = match time_spent {
        Some(secs) if secs < 0 => {
            return Err(ApiError::Validation(format!(
                "time spent must not be negative, got {secs}"
            )))
        }
        Some(secs) => Some(secs as u32),
        None => None,
    };

    let previous = card.to_core_state();
    let outcome = Sm2::default().schedule(quality, &previous, today);

    let mut next = previous.clone();
    next.apply(&outcome, now);
    let flashcard = Database::update_review_state(&mut *tx, flashcard_id, &next).await?;

    let event = outcome.to_event(&previous, now, time_spent_secs);
    let review = DbReview::from_event(flashcard_id, user_id, &event);
    Database::insert_review(&mut *tx, &review).await?;

    let mut stats = Database::lock_user_study_stats(&mut *tx, user_id)
        .await?
        .to_core_stats();
    stats.record_review(&outcome, previous.repetition, today);
    Database::update_user_study_stats(&mut *tx, &DbUserStudyStats::from_core_stats(user_id, &stats))
        .await?;

    tx.commit().await?;

    Ok(ReviewSubmission {
        flashcard,
        review,
        outcome,
    })
}

/// Human-readable summary of a review outcome.
pub fn review_message(outcome: &ReviewOutcome) -> String {
    let days = match outcome.interval_days {
        1 => "1 day".to_string(),
        n => format!("{n} days"),
    };
    if outcome.passed {
        format!("Review recorded. Next review in {days}.")
    } else {
        format!("Review recorded. Card reset, next review in {days}.")
    }
}

/// Summary line for the due queue.
pub fn due_message(due: usize) -> String {
    match due {
        0 => "No flashcards due for review".to_string(),
        1 => "1 flashcard due for review".to_string(),
        n => format!("{n} flashcards due for review"),
    }
}
