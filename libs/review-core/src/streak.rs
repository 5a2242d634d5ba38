//! Daily study streaks and per-user running totals.

use chrono::NaiveDate;

use crate::algorithm::ReviewOutcome;
use crate::stats::MasteryLevel;
use crate::types::UserStudyStats;

/// Next streak length for a review made on `today`.
///
/// Compares calendar days only: a second review on the same day keeps the
/// streak, a review the day after extends it, anything else restarts at 1.
pub fn update_streak(last_review_date: Option<NaiveDate>, current_streak: u32, today: NaiveDate) -> u32 {
    match last_review_date {
        Some(last) if last == today => current_streak,
        Some(last) if today.pred_opt() == Some(last) => current_streak.saturating_add(1),
        _ => 1,
    }
}

impl UserStudyStats {
    /// Fold one review into the running totals.
    ///
    /// `previous_repetition` is the card's repetition count before the review,
    /// used to detect the review that crosses into mastery.
    pub fn record_review(&mut self, outcome: &ReviewOutcome, previous_repetition: u32, today: NaiveDate) {
        self.total_reviews = self.total_reviews.saturating_add(1);

        if outcome.passed
            && MasteryLevel::of(previous_repetition) != MasteryLevel::Mastered
            && MasteryLevel::of(outcome.repetition) == MasteryLevel::Mastered
        {
            self.cards_mastered = self.cards_mastered.saturating_add(1);
        }

        self.current_streak = update_streak(self.last_review_date, self.current_streak, today);
        self.longest_streak = self.longest_streak.max(self.current_streak);
        self.last_review_date = Some(today);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::schedule_next_review;
    use crate::types::Quality;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn days_ago(n: u64) -> NaiveDate {
        today().checked_sub_days(chrono::Days::new(n)).unwrap()
    }

    #[test]
    fn same_day_does_not_increment() {
        assert_eq!(update_streak(Some(today()), 4, today()), 4);
    }

    #[test]
    fn consecutive_day_extends() {
        // crosses a month boundary
        assert_eq!(update_streak(Some(days_ago(1)), 4, today()), 5);
    }

    #[test]
    fn gap_restarts() {
        assert_eq!(update_streak(Some(days_ago(2)), 4, today()), 1);
        assert_eq!(update_streak(Some(days_ago(30)), 9, today()), 1);
    }

    #[test]
    fn first_ever_review_starts_streak() {
        assert_eq!(update_streak(None, 0, today()), 1);
    }

    #[test]
    fn record_review_tracks_totals_and_streaks() {
        let mut stats = UserStudyStats {
            total_reviews: 10,
            cards_mastered: 1,
            current_streak: 2,
            longest_streak: 2,
            last_review_date: Some(days_ago(1)),
        };
        let outcome = schedule_next_review(Quality::new(4).unwrap(), 2, 2.5, 6, today());

        stats.record_review(&outcome, 2, today());
        assert_eq!(
            stats,
            UserStudyStats {
                total_reviews: 11,
                cards_mastered: 2,
                current_streak: 3,
                longest_streak: 3,
                last_review_date: Some(today()),
            }
        );

        // second review the same day: no streak change, already mastered
        let outcome = schedule_next_review(Quality::new(5).unwrap(), 3, 2.5, 15, today());
        stats.record_review(&outcome, 3, today());
        assert_eq!(stats.total_reviews, 12);
        assert_eq!(stats.cards_mastered, 2);
        assert_eq!(stats.current_streak, 3);
    }

    #[test]
    fn longest_streak_survives_restart() {
        let mut stats = UserStudyStats {
            current_streak: 7,
            longest_streak: 7,
            last_review_date: Some(days_ago(5)),
            ..Default::default()
        };
        let outcome = schedule_next_review(Quality::new(1).unwrap(), 0, 2.5, 1, today());
        stats.record_review(&outcome, 0, today());
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.longest_streak, 7);
        assert_eq!(stats.cards_mastered, 0);
    }
}
