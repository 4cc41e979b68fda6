//! SM-2 Spaced Repetition Algorithm
//!
//! Implementation of the SuperMemo 2 algorithm for calculating
//! optimal review intervals based on user performance.
//!
//! Quality ratings (0-5):
//! - 0: Complete blackout, no recall
//! - 1: Incorrect, but upon seeing answer, remembered
//! - 2: Incorrect, but answer seemed easy to recall
//! - 3: Correct response with serious difficulty
//! - 4: Correct response after hesitation
//! - 5: Perfect response with no hesitation

use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::error::{FlashcardError, Result};
use super::models::{Card, CollectionStats, MIN_EASE_FACTOR};

/// Longest interval a card can be given (100 years)
pub const MAX_INTERVAL_DAYS: u32 = 36_500;

/// A validated recall-quality rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quality(u8);

impl Quality {
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> Result<Self> {
        if (0..=Self::MAX as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(FlashcardError::InvalidRating(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Ratings of 3 and above count as successful recall
    pub fn is_pass(self) -> bool {
        self.0 >= 3
    }
}

impl TryFrom<i64> for Quality {
    type Error = FlashcardError;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

/// Result of calculating the next review
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewResult {
    pub interval: u32,
    pub ease_factor: f64,
    pub repetitions: u32,
}

/// Calculate the next interval, ease factor and repetition count for a card
pub fn calculate_next_review(card: &Card, quality: Quality) -> ReviewResult {
    let (interval, repetitions) = if quality.is_pass() {
        let interval = match card.repetitions {
            0 => 1,
            1 => 6,
            _ => (card.interval as f64 * card.ease_factor)
                .round_ties_even()
                .min(MAX_INTERVAL_DAYS as f64) as u32,
        };
        (interval, card.repetitions.saturating_add(1))
    } else {
        // Failed: start over
        (1, 0)
    };

    ReviewResult {
        interval,
        ease_factor: next_ease_factor(card.ease_factor, quality),
        repetitions,
    }
}

/// EF' = max(1.3, EF + (0.1 - (5-q) * (0.08 + (5-q) * 0.02)))
pub fn next_ease_factor(ease_factor: f64, quality: Quality) -> f64 {
    let miss = (Quality::MAX - quality.value()) as f64;
    (ease_factor + (0.1 - miss * (0.08 + miss * 0.02))).max(MIN_EASE_FACTOR)
}

/// Apply a review to a card in place
///
/// The card is left untouched if the next review date cannot be represented.
pub fn apply_review(card: &mut Card, quality: Quality, now: DateTime<Utc>) -> Result<()> {
    let ReviewResult {
        interval,
        ease_factor,
        repetitions,
    } = calculate_next_review(card, quality);

    let next_review = now
        .checked_add_signed(Duration::days(interval as i64))
        .ok_or_else(|| {
            FlashcardError::Corrupt(format!("next review of card {} is out of range", card.id))
        })?;

    card.interval = interval;
    card.ease_factor = ease_factor;
    card.repetitions = repetitions;
    card.last_review = Some(now);
    card.next_review = next_review;
    card.total_reviews = card.total_reviews.saturating_add(1);
    Ok(())
}

/// Count a review event against the collection stats
pub fn record_review(stats: &mut CollectionStats, today: NaiveDate) {
    stats.total_reviews = stats.total_reviews.saturating_add(1);
    update_streak(stats, today);
}

/// Extend, keep, or restart the day streak for a review made on `today`
pub fn update_streak(stats: &mut CollectionStats, today: NaiveDate) {
    match stats.last_review_date {
        Some(last) if last == today => {}
        Some(last) if Some(last) == today.pred_opt() => {
            stats.streak_days = stats.streak_days.saturating_add(1)
        }
        _ => stats.streak_days = 1,
    }
    stats.last_review_date = Some(today);
}

/// The interval each quality rating (0 through 5) would produce
pub fn preview_intervals(card: &Card) -> [u32; 6] {
    let mut intervals = [0; 6];
    for (q, slot) in intervals.iter_mut().enumerate() {
        *slot = calculate_next_review(card, Quality(q as u8)).interval;
    }
    intervals
}

/// Format an interval in days to a human-readable string
pub fn format_interval(days: u32) -> String {
    if days == 0 {
        "now".to_string()
    } else if days < 7 {
        format!("{}d", days)
    } else if days < 30 {
        format!("{}w", days / 7)
    } else if days < 365 {
        format!("{}mo", days / 30)
    } else {
        format!("{}y", days / 365)
    }
}
