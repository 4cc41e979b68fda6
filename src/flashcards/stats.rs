//! Read-only statistics over a collection

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use super::models::{Category, Collection};

/// Cards with an interval of at least three weeks count as mastered
pub const MASTERY_INTERVAL_DAYS: u32 = 21;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

/// Statistics for the whole collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewStats {
    pub total_cards: usize,
    pub due_today: usize,
    pub mastered: usize,
    pub learning: usize,
    pub new: usize,
    pub total_reviews: u64,
    pub streak_days: u32,
    /// One entry per category, in canonical order, including empty ones.
    /// Serialized as a `{ "dev": 2, ... }` map in the same order.
    #[serde(serialize_with = "serialize_category_counts")]
    pub by_category: Vec<CategoryCount>,
}

fn serialize_category_counts<S: Serializer>(
    counts: &[CategoryCount],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_map(counts.iter().map(|c| (c.category.as_str(), c.count)))
}

/// Short summary for start-up banners
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Digest {
    pub due: usize,
    pub streak: u32,
    pub total: usize,
}

pub fn compute_stats(collection: &Collection, now: DateTime<Utc>) -> ReviewStats {
    let cards = &collection.cards;

    let mut mastered = 0;
    let mut learning = 0;
    let mut new = 0;
    for card in cards {
        match card.interval {
            0 => new += 1,
            i if i >= MASTERY_INTERVAL_DAYS => mastered += 1,
            _ => learning += 1,
        }
    }

    let by_category = Category::ALL
        .into_iter()
        .map(|category| CategoryCount {
            category,
            count: cards.iter().filter(|c| c.category == category).count(),
        })
        .collect();

    ReviewStats {
        total_cards: cards.len(),
        due_today: cards.iter().filter(|c| c.is_due(now)).count(),
        mastered,
        learning,
        new,
        total_reviews: collection.stats.total_reviews,
        streak_days: collection.stats.streak_days,
        by_category,
    }
}

impl From<&ReviewStats> for Digest {
    fn from(stats: &ReviewStats) -> Self {
        Self {
            due: stats.due_today,
            streak: stats.streak_days,
            total: stats.total_cards,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::models::{Card, CollectionStats, NewCard};
    use chrono::Duration;

    fn card(interval: u32, category: Category, due_in_days: i64, now: DateTime<Utc>) -> Card {
        let mut draft = NewCard::new("Q", "A");
        draft.category = category;
        let mut card = Card::new(draft, now - Duration::days(60));
        card.interval = interval;
        card.next_review = now + Duration::days(due_in_days);
        card
    }

    #[test]
    fn test_empty_collection() {
        let stats = compute_stats(&Collection::default(), Utc::now());

        assert_eq!(stats.total_cards, 0);
        assert_eq!(stats.due_today, 0);
        assert_eq!(stats.by_category.len(), Category::ALL.len());
        assert!(stats.by_category.iter().all(|c| c.count == 0));
    }

    #[test]
    fn test_mastery_buckets() {
        let now = Utc::now();
        let collection = Collection {
            cards: vec![
                card(0, Category::Dev, 0, now),
                card(1, Category::Dev, 1, now),
                card(20, Category::Tool, 20, now),
                card(21, Category::Tool, -1, now),
                card(90, Category::General, 30, now),
            ],
            stats: CollectionStats {
                total_reviews: 12,
                streak_days: 3,
                last_review_date: None,
            },
        };

        let stats = compute_stats(&collection, now);

        assert_eq!(stats.new, 1);
        assert_eq!(stats.learning, 2);
        assert_eq!(stats.mastered, 2);
        assert_eq!(stats.new + stats.learning + stats.mastered, stats.total_cards);
        assert_eq!(stats.due_today, 2);
        assert_eq!(stats.total_reviews, 12);
        assert_eq!(stats.streak_days, 3);

        let counts: Vec<(Category, usize)> =
            stats.by_category.iter().map(|c| (c.category, c.count)).collect();
        assert_eq!(
            counts,
            vec![
                (Category::Dev, 2),
                (Category::Concept, 0),
                (Category::Tool, 2),
                (Category::Workflow, 0),
                (Category::Debug, 0),
                (Category::General, 1),
            ]
        );

        let digest = Digest::from(&stats);
        assert_eq!(digest, Digest { due: 2, streak: 3, total: 5 });
    }

    #[test]
    fn test_by_category_serializes_as_ordered_map() {
        let now = Utc::now();
        let collection = Collection {
            cards: vec![
                card(0, Category::Dev, 0, now),
                card(0, Category::Dev, 0, now),
                card(0, Category::General, 0, now),
            ],
            stats: CollectionStats::default(),
        };

        let json = serde_json::to_string(&compute_stats(&collection, now)).unwrap();
        assert!(json.contains(
            r#""by_category":{"dev":2,"concept":0,"tool":0,"workflow":0,"debug":0,"general":1}"#
        ));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["by_category"]["dev"], 2);
    }
}
