//! Database models and API types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::{ApiError, Result};

// Re-export shared types from review-core
pub use review_core::{
    HasReviewState, Quality, ReviewEvent, ReviewState, StudyStats, UserStudyStats,
};

/// Clamp a stored counter into the core's unsigned domain.
fn to_u32(value: i32) -> u32 {
    value.max(0) as u32
}

/// Clamp a core counter into a Postgres INT column.
pub(crate) fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

// === Database Entity Types ===

/// Registered user with bearer token
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub token: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

/// Flashcard row with its inline review state
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbFlashcard {
    pub id: Uuid,
    pub user_id: Uuid,
    pub document_id: Option<Uuid>,
    pub question: String,
    pub answer: String,
    pub repetition: i32,
    pub easiness_factor: f64,
    pub interval_days: i32,
    pub next_review_date: Option<NaiveDate>,
    pub times_reviewed: i32,
    pub last_reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbFlashcard {
    /// Convert to review-core ReviewState
    pub fn to_core_state(&self) -> ReviewState {
        ReviewState {
            repetition: to_u32(self.repetition),
            easiness_factor: self.easiness_factor,
            interval_days: to_u32(self.interval_days).max(1),
            next_review_date: self.next_review_date,
            times_reviewed: to_u32(self.times_reviewed),
            last_reviewed_at: self.last_reviewed_at,
        }
    }

    /// Convert to API flashcard type
    pub fn to_api_flashcard(&self) -> Flashcard {
        Flashcard {
            id: self.id,
            document_id: self.document_id,
            question: self.question.clone(),
            answer: self.answer.clone(),
            state: self.to_core_state(),
            created_at: self.created_at,
        }
    }
}

/// Review event row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbReview {
    pub id: Uuid,
    pub flashcard_id: Uuid,
    pub user_id: Uuid,
    pub quality: i32,
    pub passed: bool,
    pub time_spent_secs: Option<i32>,
    pub previous_interval: i32,
    pub new_interval: i32,
    pub previous_easiness: f64,
    pub new_easiness: f64,
    pub reviewed_at: DateTime<Utc>,
}

impl DbReview {
    /// Build a row from a review-core event
    pub fn from_event(flashcard_id: Uuid, user_id: Uuid, event: &ReviewEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            flashcard_id,
            user_id,
            quality: event.quality.into(),
            passed: event.passed,
            time_spent_secs: event.time_spent_secs.map(to_i32),
            previous_interval: to_i32(event.previous_interval),
            new_interval: to_i32(event.new_interval),
            previous_easiness: event.previous_easiness,
            new_easiness: event.new_easiness,
            reviewed_at: event.reviewed_at,
        }
    }

    /// Convert to API review record
    pub fn to_api_review(&self) -> Result<ReviewRecord> {
        let quality = Quality::new(self.quality).map_err(|e| {
            ApiError::Internal(format!("stored review {} is corrupt: {}", self.id, e))
        })?;

        Ok(ReviewRecord {
            id: self.id,
            flashcard_id: self.flashcard_id,
            event: ReviewEvent {
                quality,
                passed: self.passed,
                reviewed_at: self.reviewed_at,
                time_spent_secs: self.time_spent_secs.map(to_u32),
                previous_interval: to_u32(self.previous_interval),
                new_interval: to_u32(self.new_interval),
                previous_easiness: self.previous_easiness,
                new_easiness: self.new_easiness,
            },
        })
    }
}

/// Per-user study totals row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUserStudyStats {
    pub user_id: Uuid,
    pub total_reviews: i32,
    pub cards_mastered: i32,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_review_date: Option<NaiveDate>,
}

impl DbUserStudyStats {
    /// Convert to review-core UserStudyStats
    pub fn to_core_stats(&self) -> UserStudyStats {
        UserStudyStats {
            total_reviews: to_u32(self.total_reviews),
            cards_mastered: to_u32(self.cards_mastered),
            current_streak: to_u32(self.current_streak),
            longest_streak: to_u32(self.longest_streak),
            last_review_date: self.last_review_date,
        }
    }

    /// Create from review-core UserStudyStats
    pub fn from_core_stats(user_id: Uuid, stats: &UserStudyStats) -> Self {
        Self {
            user_id,
            total_reviews: to_i32(stats.total_reviews),
            cards_mastered: to_i32(stats.cards_mastered),
            current_streak: to_i32(stats.current_streak),
            longest_streak: to_i32(stats.longest_streak),
            last_review_date: stats.last_review_date,
        }
    }
}

// === API Types ===

/// Flashcard as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_id: Option<Uuid>,
    pub question: String,
    pub answer: String,
    #[serde(flatten)]
    pub state: ReviewState,
    pub created_at: DateTime<Utc>,
}

impl HasReviewState for Flashcard {
    fn review_state(&self) -> &ReviewState {
        &self.state
    }
}

/// ReviewEvent with its row and flashcard ids
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub id: Uuid,
    pub flashcard_id: Uuid,
    #[serde(flatten)]
    pub event: ReviewEvent,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserStatusResponse {
    pub user_id: Uuid,
    pub name: Option<String>,
    pub last_seen_at: DateTime<Utc>,
}

// Flashcard types
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateFlashcardRequest {
    pub question: String,
    pub answer: String,
    pub document_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FlashcardListResponse {
    pub flashcards: Vec<Flashcard>,
}

// Review types
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitReviewRequest {
    pub quality: i32,
    /// Seconds spent on the card
    #[serde(default, alias = "timeSpent")]
    pub time_spent: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitReviewResponse {
    pub flashcard: Flashcard,
    pub review: ReviewRecord,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DueFlashcardsResponse {
    pub flashcards: Vec<Flashcard>,
    pub stats: StudyStats,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StudyStatsResponse {
    pub user_stats: UserStudyStats,
    pub card_stats: StudyStats,
    pub recent_reviews: Vec<ReviewRecord>,
}
