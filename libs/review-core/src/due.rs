//! Due-card selection.

use chrono::NaiveDate;

use crate::types::{HasReviewState, ReviewState};

/// A card is due when it has never been scheduled or its date has arrived.
pub fn is_due(state: &ReviewState, as_of: NaiveDate) -> bool {
    match state.next_review_date {
        None => true,
        Some(date) => date <= as_of,
    }
}

/// Lazily filter `cards` down to the ones due on `as_of`.
///
/// Input order is preserved; callers impose their own ordering.
pub fn select_due<'a, C, I>(cards: I, as_of: NaiveDate) -> impl Iterator<Item = &'a C> + 'a
where
    C: HasReviewState + 'a,
    I: IntoIterator<Item = &'a C>,
    I::IntoIter: 'a,
{
    cards
        .into_iter()
        .filter(move |card| is_due(card.review_state(), as_of))
}

/// Order cards soonest-due first; never-scheduled cards lead.
pub fn sort_by_due<C: HasReviewState>(cards: &mut [C]) {
    cards.sort_by_key(|card| card.review_state().next_review_date);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn scheduled(day: Option<u32>) -> ReviewState {
        ReviewState {
            next_review_date: day.map(date),
            ..Default::default()
        }
    }

    #[test]
    fn new_card_is_due() {
        assert!(is_due(&scheduled(None), date(1)));
    }

    #[test]
    fn due_on_the_day_itself() {
        assert!(is_due(&scheduled(Some(10)), date(10)));
        assert!(is_due(&scheduled(Some(9)), date(10)));
        assert!(!is_due(&scheduled(Some(11)), date(10)));
    }

    #[test]
    fn select_due_filters_and_keeps_order() {
        let cards = vec![
            scheduled(Some(12)),
            scheduled(Some(3)),
            scheduled(None),
            scheduled(Some(10)),
        ];
        let due: Vec<_> = select_due(&cards, date(10)).cloned().collect();
        assert_eq!(due, vec![scheduled(Some(3)), scheduled(None), scheduled(Some(10))]);
    }

    #[test]
    fn select_due_is_repeatable() {
        let cards = vec![scheduled(Some(5)), scheduled(Some(20)), scheduled(None)];
        let first: Vec<_> = select_due(&cards, date(10)).collect();
        let second: Vec<_> = select_due(&cards, date(10)).collect();
        assert_eq!(first, second);

        let later: Vec<_> = select_due(&cards, date(25)).collect();
        assert_eq!(later.len(), 3);
    }

    #[test]
    fn select_due_empty() {
        let cards: Vec<ReviewState> = Vec::new();
        assert_eq!(select_due(&cards, date(1)).count(), 0);
    }

    #[test]
    fn sort_puts_unscheduled_first() {
        let mut cards = vec![scheduled(Some(8)), scheduled(None), scheduled(Some(2))];
        sort_by_due(&mut cards);
        assert_eq!(
            cards,
            vec![scheduled(None), scheduled(Some(2)), scheduled(Some(8))]
        );
    }
}
