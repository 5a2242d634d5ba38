//! Mastery classification and study statistics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::algorithm::round_half_up;
use crate::due::is_due;
use crate::types::{HasReviewState, StudyStats};

/// Consecutive passes after which a card counts as mastered.
pub const MASTERED_REPETITIONS: u32 = 3;

/// Mastery bucket, derived from the repetition count alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MasteryLevel {
    New,
    Learning,
    Mastered,
}

impl MasteryLevel {
    pub fn of(repetition: u32) -> Self {
        match repetition {
            0 => Self::New,
            r if r < MASTERED_REPETITIONS => Self::Learning,
            _ => Self::Mastered,
        }
    }
}

/// Bucket `cards` and count the ones due on `as_of`.
pub fn compute_study_stats<'a, C, I>(cards: I, as_of: NaiveDate) -> StudyStats
where
    C: HasReviewState + 'a,
    I: IntoIterator<Item = &'a C>,
{
    let mut stats = StudyStats::default();

    for card in cards {
        let state = card.review_state();
        stats.total += 1;
        if is_due(state, as_of) {
            stats.due += 1;
        }
        match MasteryLevel::of(state.repetition) {
            MasteryLevel::New => stats.new += 1,
            MasteryLevel::Learning => stats.learning += 1,
            MasteryLevel::Mastered => stats.mastered += 1,
        }
    }

    stats.due_percentage = percentage(stats.due, stats.total);
    stats.mastered_percentage = percentage(stats.mastered, stats.total);
    stats
}

fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    round_half_up(part as f64 / total as f64 * 100.0)
}
