//! Spaced repetition scheduling.

pub mod sm2;

pub use sm2::{schedule_next_review, Sm2, MAX_INTERVAL_DAYS};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Quality, ReviewEvent, ReviewState};

/// Result of scheduling a card after review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewOutcome {
    pub quality: Quality,
    pub repetition: u32,
    pub easiness_factor: f64,
    pub interval_days: u32,
    pub next_review_date: NaiveDate,
    pub passed: bool,
}

impl ReviewOutcome {
    /// Build the analytics record for this review.
    pub fn to_event(
        &self,
        previous: &ReviewState,
        reviewed_at: DateTime<Utc>,
        time_spent_secs: Option<u32>,
    ) -> ReviewEvent {
        ReviewEvent {
            quality: self.quality,
            passed: self.passed,
            reviewed_at,
            time_spent_secs,
            previous_interval: previous.interval_days,
            new_interval: self.interval_days,
            previous_easiness: previous.easiness_factor,
            new_easiness: self.easiness_factor,
        }
    }
}

impl ReviewState {
    /// Write a scheduling outcome back into the state.
    pub fn apply(&mut self, outcome: &ReviewOutcome, reviewed_at: DateTime<Utc>) {
        self.repetition = outcome.repetition;
        self.easiness_factor = outcome.easiness_factor;
        self.interval_days = outcome.interval_days;
        self.next_review_date = Some(outcome.next_review_date);
        self.times_reviewed = self.times_reviewed.saturating_add(1);
        self.last_reviewed_at = Some(reviewed_at);
    }
}

/// Round to the nearest whole day, halves going up.
///
/// Pinned explicitly so intervals match across platforms.
pub fn round_half_up(value: f64) -> u32 {
    (value + 0.5).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn outcome() -> ReviewOutcome {
        ReviewOutcome {
            quality: Quality::new(4).unwrap(),
            repetition: 2,
            easiness_factor: 2.5,
            interval_days: 6,
            next_review_date: NaiveDate::from_ymd_opt(2024, 3, 7).unwrap(),
            passed: true,
        }
    }

    #[test]
    fn round_half_up_pins_halves() {
        assert_eq!(round_half_up(4.5), 5);
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(4.49), 4);
        assert_eq!(round_half_up(15.0), 15);
    }

    #[test]
    fn apply_updates_counters() {
        let reviewed_at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let mut state = ReviewState {
            repetition: 1,
            times_reviewed: 1,
            ..Default::default()
        };
        state.apply(&outcome(), reviewed_at);

        assert_eq!(
            state,
            ReviewState {
                repetition: 2,
                easiness_factor: 2.5,
                interval_days: 6,
                next_review_date: NaiveDate::from_ymd_opt(2024, 3, 7),
                times_reviewed: 2,
                last_reviewed_at: Some(reviewed_at),
            }
        );
    }

    #[test]
    fn event_captures_before_and_after() {
        let reviewed_at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let previous = ReviewState {
            repetition: 1,
            easiness_factor: 2.6,
            interval_days: 1,
            ..Default::default()
        };
        let event = outcome().to_event(&previous, reviewed_at, Some(12));

        assert_eq!(event.previous_interval, 1);
        assert_eq!(event.new_interval, 6);
        assert_eq!(event.previous_easiness, 2.6);
        assert_eq!(event.new_easiness, 2.5);
        assert_eq!(event.time_spent_secs, Some(12));
        assert!(event.passed);
    }
}
