//! Data models for the flashcard collection

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::FlashcardError;

/// Starting ease factor for a new card
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Ease factor never drops below this
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Category a card is filed under.
///
/// The declaration order is the canonical order used for validation messages,
/// per-category stats and markdown export sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Dev,
    Concept,
    Tool,
    Workflow,
    Debug,
    General,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Dev,
        Category::Concept,
        Category::Tool,
        Category::Workflow,
        Category::Debug,
        Category::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Dev => "dev",
            Category::Concept => "concept",
            Category::Tool => "tool",
            Category::Workflow => "workflow",
            Category::Debug => "debug",
            Category::General => "general",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::General
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = FlashcardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| FlashcardError::InvalidCategory(s.to_string()))
    }
}

/// Content for a card that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCard {
    pub question: String,
    pub answer: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub source: Option<String>,
}

impl NewCard {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            category: Category::default(),
            tags: Vec::new(),
            source: None,
        }
    }
}

/// A single question/answer card with its SM-2 scheduling state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Card {
    pub id: String,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub tags: Vec<String>,
    /// File path or URL the card relates to
    #[serde(default)]
    pub source: Option<String>,
    #[serde(with = "timestamp")]
    pub created: DateTime<Utc>,
    #[serde(default, with = "timestamp::option")]
    pub last_review: Option<DateTime<Utc>>,
    #[serde(with = "timestamp")]
    pub next_review: DateTime<Utc>,
    #[serde(default = "default_ease_factor")]
    pub ease_factor: f64,
    /// Days until the next review
    #[serde(default)]
    pub interval: u32,
    /// Consecutive successful reviews since the last failure
    #[serde(default)]
    pub repetitions: u32,
    #[serde(default)]
    pub total_reviews: u32,
}

fn default_ease_factor() -> f64 {
    DEFAULT_EASE_FACTOR
}

impl Card {
    /// Build a card that is due immediately
    pub fn new(draft: NewCard, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            question: draft.question,
            answer: draft.answer,
            category: draft.category,
            tags: draft.tags,
            source: draft.source,
            created: now,
            last_review: None,
            next_review: now,
            ease_factor: DEFAULT_EASE_FACTOR,
            interval: 0,
            repetitions: 0,
            total_reviews: 0,
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review <= now
    }
}

/// Aggregate review counters stored alongside the cards
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectionStats {
    #[serde(default)]
    pub total_reviews: u64,
    #[serde(default)]
    pub streak_days: u32,
    /// Calendar date of the most recent review
    #[serde(default)]
    pub last_review_date: Option<NaiveDate>,
}

/// The whole persisted document: every card plus the aggregate stats
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Collection {
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub stats: CollectionStats,
}

impl Collection {
    pub fn find(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.id == id)
    }

    /// Check the invariants serde cannot express
    pub fn validate(&self) -> Result<(), FlashcardError> {
        let mut seen = HashSet::with_capacity(self.cards.len());
        for card in &self.cards {
            if !seen.insert(card.id.as_str()) {
                return Err(FlashcardError::Corrupt(format!("duplicate card id {}", card.id)));
            }
            if !card.ease_factor.is_finite() || card.ease_factor < MIN_EASE_FACTOR {
                return Err(FlashcardError::Corrupt(format!(
                    "card {} has ease factor {} below {}",
                    card.id, card.ease_factor, MIN_EASE_FACTOR
                )));
            }
        }
        Ok(())
    }
}

/// RFC 3339 timestamps on write; naive ISO-8601 (local time) also accepted on read
mod timestamp {
    use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&dt.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp '{}'", raw)))
    }

    pub(super) fn parse(s: &str) -> Option<DateTime<Utc>> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc));
        }
        let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
            .ok()?;
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            dt: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match dt {
                Some(dt) => serializer.serialize_str(&dt.to_rfc3339()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) => super::parse(&raw)
                    .map(Some)
                    .ok_or_else(|| de::Error::custom(format!("invalid timestamp '{}'", raw))),
                None => Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!("dev".parse::<Category>().unwrap(), Category::Dev);
        assert_eq!(" Workflow ".parse::<Category>().unwrap(), Category::Workflow);
        assert!(matches!(
            "recipes".parse::<Category>(),
            Err(FlashcardError::InvalidCategory(c)) if c == "recipes"
        ));
    }

    #[test]
    fn test_new_card_defaults() {
        let now = Utc::now();
        let card = Card::new(NewCard::new("Q", "A"), now);

        assert_eq!(card.category, Category::General);
        assert_eq!(card.ease_factor, 2.5);
        assert_eq!(card.interval, 0);
        assert_eq!(card.repetitions, 0);
        assert_eq!(card.next_review, card.created);
        assert!(card.last_review.is_none());
        assert!(card.is_due(now));
    }

    #[test]
    fn test_card_json_layout() {
        let card = Card::new(NewCard::new("Q", "A"), Utc::now());
        let value = serde_json::to_value(&card).unwrap();

        assert_eq!(value["category"], "general");
        assert!(value["source"].is_null());
        assert!(value["last_review"].is_null());
        assert_eq!(value["interval"], 0);
    }

    #[test]
    fn test_accepts_naive_timestamps() {
        let json = r#"{
            "cards": [{
                "id": "20250101120000123",
                "question": "Q", "answer": "A", "category": "tool",
                "tags": [], "source": null,
                "created": "2025-01-01T12:00:00.123456",
                "last_review": null,
                "next_review": "2025-01-01T12:00:00.123456",
                "ease_factor": 2.5, "interval": 0, "repetitions": 0, "total_reviews": 0
            }],
            "stats": {"total_reviews": 0, "streak_days": 0, "last_review_date": null}
        }"#;

        let collection: Collection = serde_json::from_str(json).unwrap();
        assert_eq!(collection.cards.len(), 1);
        assert_eq!(collection.cards[0].category, Category::Tool);
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let json = r#"{"cards": [], "stats": {"total_reviews": 0, "streak_days": 0, "last_review_date": null, "bogus": 1}}"#;
        assert!(serde_json::from_str::<Collection>(json).is_err());
    }

    #[test]
    fn test_validate_duplicate_ids() {
        let now = Utc::now();
        let card = Card::new(NewCard::new("Q", "A"), now);
        let collection = Collection {
            cards: vec![card.clone(), card],
            stats: CollectionStats::default(),
        };

        assert!(matches!(collection.validate(), Err(FlashcardError::Corrupt(_))));
    }

    #[test]
    fn test_validate_ease_floor() {
        let mut card = Card::new(NewCard::new("Q", "A"), Utc::now());
        card.ease_factor = 1.1;
        let collection = Collection {
            cards: vec![card],
            stats: CollectionStats::default(),
        };

        assert!(matches!(collection.validate(), Err(FlashcardError::Corrupt(_))));
    }
}
