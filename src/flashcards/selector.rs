//! Due-card selection and random picks

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use super::models::{Card, Category};

/// Post-filters applied on top of a selection
#[derive(Debug, Clone, Default)]
pub struct CardFilter {
    pub category: Option<Category>,
    /// Keep cards whose source contains any of these substrings
    pub sources: Vec<String>,
}

impl CardFilter {
    pub fn category(category: Category) -> Self {
        Self {
            category: Some(category),
            sources: Vec::new(),
        }
    }

    fn matches_category(&self, card: &Card) -> bool {
        self.category.map_or(true, |c| card.category == c)
    }

    fn matches_source(&self, card: &Card) -> bool {
        match &card.source {
            Some(source) => self.sources.iter().any(|s| source.contains(s.as_str())),
            None => false,
        }
    }
}

/// What to do when a source filter matches nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFallback {
    /// Use the set as it was before the source filter
    Unfiltered,
    /// Return nothing
    Empty,
}

/// Apply a filter, keeping collection order
pub fn filter_cards<'a>(
    cards: impl IntoIterator<Item = &'a Card>,
    filter: &CardFilter,
    fallback: SourceFallback,
) -> Vec<&'a Card> {
    let by_category: Vec<&Card> = cards
        .into_iter()
        .filter(|c| filter.matches_category(c))
        .collect();

    if filter.sources.is_empty() {
        return by_category;
    }

    let by_source: Vec<&Card> = by_category
        .iter()
        .copied()
        .filter(|c| filter.matches_source(c))
        .collect();

    if by_source.is_empty() && fallback == SourceFallback::Unfiltered {
        log::debug!("Source filter matched no cards, falling back to {} cards", by_category.len());
        by_category
    } else {
        by_source
    }
}

/// Cards with `next_review <= now`, most overdue first
///
/// Ties keep their collection order.
pub fn due_cards(cards: &[Card], now: DateTime<Utc>, limit: Option<usize>) -> Vec<&Card> {
    due_cards_filtered(cards, now, limit, &CardFilter::default())
}

/// Like [`due_cards`], with category/source post-filters. Never falls back.
pub fn due_cards_filtered<'a>(
    cards: &'a [Card],
    now: DateTime<Utc>,
    limit: Option<usize>,
    filter: &CardFilter,
) -> Vec<&'a Card> {
    let mut due = filter_cards(
        cards.iter().filter(|c| c.is_due(now)),
        filter,
        SourceFallback::Empty,
    );

    // stable sort
    due.sort_by_key(|c| c.next_review);

    if let Some(limit) = limit {
        due.truncate(limit);
    }

    due
}

/// Pick a random card from the filtered collection
pub fn random_card<'a, R: Rng + ?Sized>(
    cards: &'a [Card],
    filter: &CardFilter,
    fallback: SourceFallback,
    rng: &mut R,
) -> Option<&'a Card> {
    filter_cards(cards, filter, fallback).choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::models::NewCard;
    use chrono::{Duration, TimeZone};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
    }

    fn card_due(question: &str, next_review: DateTime<Utc>) -> Card {
        let mut card = Card::new(NewCard::new(question, "A"), next_review - Duration::days(30));
        card.next_review = next_review;
        card
    }

    fn card_with(question: &str, category: Category, source: Option<&str>) -> Card {
        let mut draft = NewCard::new(question, "A");
        draft.category = category;
        draft.source = source.map(String::from);
        Card::new(draft, now() - Duration::days(1))
    }

    #[test]
    fn test_due_cards_ordering() {
        let t = now();
        let cards = vec![
            card_due("later", t + Duration::days(1)),
            card_due("yesterday", t - Duration::days(1)),
            card_due("two days ago", t - Duration::days(2)),
        ];

        let due = due_cards(&cards, t, None);
        let questions: Vec<&str> = due.iter().map(|c| c.question.as_str()).collect();
        assert_eq!(questions, vec!["two days ago", "yesterday"]);
    }

    #[test]
    fn test_due_cards_boundary() {
        let t = now();
        let cards = vec![
            card_due("exactly now", t),
            card_due("one second out", t + Duration::seconds(1)),
        ];

        let due = due_cards(&cards, t, None);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].question, "exactly now");
    }

    #[test]
    fn test_due_cards_ties_keep_order_and_limit() {
        let t = now() - Duration::hours(1);
        let cards = vec![card_due("a", t), card_due("b", t), card_due("c", t)];

        let due = due_cards(&cards, now(), Some(2));
        let questions: Vec<&str> = due.iter().map(|c| c.question.as_str()).collect();
        assert_eq!(questions, vec!["a", "b"]);
    }

    #[test]
    fn test_due_cards_empty() {
        assert!(due_cards(&[], now(), Some(5)).is_empty());
    }

    #[test]
    fn test_due_filter_source_no_fallback() {
        let cards = vec![
            card_with("a", Category::Dev, Some("src/main.rs")),
            card_with("b", Category::Dev, None),
        ];

        let filter = CardFilter {
            category: None,
            sources: vec!["README".to_string()],
        };
        assert!(due_cards_filtered(&cards, now(), None, &filter).is_empty());

        let filter = CardFilter {
            category: None,
            sources: vec!["main.rs".to_string()],
        };
        let due = due_cards_filtered(&cards, now(), None, &filter);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].question, "a");
    }

    #[test]
    fn test_filter_category() {
        let cards = vec![
            card_with("a", Category::Dev, None),
            card_with("b", Category::Tool, None),
        ];

        let due = due_cards_filtered(&cards, now(), None, &CardFilter::category(Category::Tool));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].question, "b");
    }

    #[test]
    fn test_random_card_fallback() {
        let cards = vec![
            card_with("a", Category::Dev, Some("src/lib.rs")),
            card_with("b", Category::Dev, None),
        ];
        let filter = CardFilter {
            category: None,
            sources: vec!["nowhere.py".to_string()],
        };
        let mut rng = StdRng::seed_from_u64(7);

        assert!(random_card(&cards, &filter, SourceFallback::Empty, &mut rng).is_none());
        assert!(random_card(&cards, &filter, SourceFallback::Unfiltered, &mut rng).is_some());
    }

    #[test]
    fn test_random_card_source_match() {
        let cards = vec![
            card_with("a", Category::Dev, Some("src/lib.rs")),
            card_with("b", Category::Dev, Some("docs/guide.md")),
        ];
        let filter = CardFilter {
            category: None,
            sources: vec!["lib.rs".to_string()],
        };
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..10 {
            let card = random_card(&cards, &filter, SourceFallback::Unfiltered, &mut rng).unwrap();
            assert_eq!(card.question, "a");
        }
    }

    #[test]
    fn test_random_card_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(random_card(&[], &CardFilter::default(), SourceFallback::Unfiltered, &mut rng).is_none());
    }
}
