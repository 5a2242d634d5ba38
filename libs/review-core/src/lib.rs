//! Review scheduling core shared by the backend.
//!
//! Provides:
//! - SM-2 review scheduling with a validated quality rating
//! - Due-card selection
//! - Mastery bucketing and study statistics
//! - Daily streak tracking
//!
//! Everything here is pure: no I/O, no clocks except the explicit `dates::today`.

pub mod algorithm;
pub mod dates;
pub mod due;
pub mod error;
pub mod stats;
pub mod streak;
pub mod types;

pub use algorithm::{round_half_up, schedule_next_review, ReviewOutcome, Sm2, MAX_INTERVAL_DAYS};
pub use dates::{parse_review_date, study_day};
pub use due::{is_due, select_due, sort_by_due};
pub use error::{CoreError, Result};
pub use stats::{compute_study_stats, MasteryLevel, MASTERED_REPETITIONS};
pub use streak::update_streak;
pub use types::{
    HasReviewState, Quality, ReviewEvent, ReviewState, StudyStats, UserStudyStats,
    DEFAULT_EASINESS_FACTOR, MIN_EASINESS_FACTOR,
};
