//! SM-2 spaced repetition algorithm.
//!
//! Based on SuperMemo 2: the easiness factor moves with every rating, a fail
//! resets the repetition count, and passing intervals grow 1 day, 6 days,
//! then by the easiness factor.

use chrono::{Days, NaiveDate};

use super::{round_half_up, ReviewOutcome};
use crate::types::{Quality, ReviewState, DEFAULT_EASINESS_FACTOR, MIN_EASINESS_FACTOR};

/// Longest interval ever scheduled, roughly a century.
pub const MAX_INTERVAL_DAYS: u32 = 36_500;

/// SM-2 algorithm parameters.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub initial_ease: f64,
    pub minimum_ease: f64,
    pub first_interval: u32,
    pub second_interval: u32,
    pub maximum_interval: u32,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            initial_ease: DEFAULT_EASINESS_FACTOR,
            minimum_ease: MIN_EASINESS_FACTOR,
            first_interval: 1,
            second_interval: 6,
            maximum_interval: MAX_INTERVAL_DAYS,
        }
    }
}

impl Sm2 {
    /// State of a freshly created card.
    pub fn initial_state(&self) -> ReviewState {
        ReviewState {
            easiness_factor: self.initial_ease,
            ..Default::default()
        }
    }

    /// Calculate the next review state after a review on `today`.
    pub fn schedule(&self, quality: Quality, state: &ReviewState, today: NaiveDate) -> ReviewOutcome {
        let passed = quality.is_passing();
        let easiness_factor = self.next_ease(state.easiness_factor, quality);

        let (repetition, interval_days) = if passed {
            let repetition = state.repetition.saturating_add(1);
            let interval = match repetition {
                1 => self.first_interval,
                2 => self.second_interval,
                _ => round_half_up(state.interval_days as f64 * easiness_factor),
            };
            (repetition, interval.clamp(1, self.maximum_interval.max(1)))
        } else {
            (0, self.first_interval.clamp(1, self.maximum_interval.max(1)))
        };

        let next_review_date = today
            .checked_add_days(Days::new(interval_days as u64))
            .unwrap_or(NaiveDate::MAX);

        ReviewOutcome {
            quality,
            repetition,
            easiness_factor,
            interval_days,
            next_review_date,
            passed,
        }
    }

    fn next_ease(&self, ease: f64, quality: Quality) -> f64 {
        let miss = (Quality::MAX - quality.value()) as f64;
        let adjusted = ease + (0.1 - miss * (0.08 + miss * 0.02));
        adjusted.max(self.minimum_ease)
    }
}

/// Schedule a review with the standard SM-2 parameters.
pub fn schedule_next_review(
    quality: Quality,
    repetition: u32,
    easiness_factor: f64,
    interval_days: u32,
    today: NaiveDate,
) -> ReviewOutcome {
    let state = ReviewState {
        repetition,
        easiness_factor,
        interval_days,
        ..Default::default()
    };
    Sm2::default().schedule(quality, &state, today)
}
