//! Core types for the review scheduler.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Default easiness factor for a card that has never been reviewed.
pub const DEFAULT_EASINESS_FACTOR: f64 = 2.5;

/// Hard floor for the easiness factor.
pub const MIN_EASINESS_FACTOR: f64 = 1.3;

/// Self-assessed recall quality, 0 (blackout) to 5 (perfect).
///
/// Only constructible from a value in range, so the scheduler never sees an
/// invalid rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Quality(u8);

impl Quality {
    pub const MAX: u8 = 5;

    /// Lowest rating that counts as a successful recall.
    pub const PASSING: u8 = 3;

    /// Validate a raw rating.
    pub fn new(value: i32) -> Result<Self> {
        if (0..=Self::MAX as i32).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(CoreError::InvalidQuality(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_passing(self) -> bool {
        self.0 >= Self::PASSING
    }
}

impl TryFrom<i32> for Quality {
    type Error = CoreError;

    fn try_from(value: i32) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Quality> for i32 {
    fn from(quality: Quality) -> Self {
        quality.0 as i32
    }
}

/// Scheduling-relevant subset of a flashcard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewState {
    /// Consecutive successful reviews since the last lapse.
    pub repetition: u32,
    pub easiness_factor: f64,
    pub interval_days: u32,
    /// `None` means the card is new and due immediately.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_review_date: Option<NaiveDate>,
    pub times_reviewed: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed_at: Option<DateTime<Utc>>,
}

impl Default for ReviewState {
    fn default() -> Self {
        Self {
            repetition: 0,
            easiness_factor: DEFAULT_EASINESS_FACTOR,
            interval_days: 1,
            next_review_date: None,
            times_reviewed: 0,
            last_reviewed_at: None,
        }
    }
}

/// Anything that carries a review state (bare states, stored flashcards).
pub trait HasReviewState {
    fn review_state(&self) -> &ReviewState;
}

impl HasReviewState for ReviewState {
    fn review_state(&self) -> &ReviewState {
        self
    }
}

impl<T: HasReviewState> HasReviewState for &T {
    fn review_state(&self) -> &ReviewState {
        (**self).review_state()
    }
}

/// Analytics record of one review submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewEvent {
    pub quality: Quality,
    pub passed: bool,
    pub reviewed_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_spent_secs: Option<u32>,
    pub previous_interval: u32,
    pub new_interval: u32,
    pub previous_easiness: f64,
    pub new_easiness: f64,
}

/// Snapshot of a card collection bucketed by mastery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyStats {
    pub total: usize,
    pub due: usize,
    pub new: usize,
    pub learning: usize,
    pub mastered: usize,
    pub due_percentage: u32,
    pub mastered_percentage: u32,
}

/// Per-user running totals, updated once per review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStudyStats {
    pub total_reviews: u32,
    pub cards_mastered: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_review_date: Option<NaiveDate>,
}
