//! Storage operations for flashcards
//!
//! The whole collection lives in a single JSON document:
//! ```text
//! {
//!   "cards": [ { "id": ..., "question": ..., ... } ],
//!   "stats": { "total_reviews": 0, "streak_days": 0, "last_review_date": null }
//! }
//! ```
//! Every mutation loads the document, changes it, and replaces it wholesale.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDate, Utc};

use super::algorithm::{apply_review, record_review, Quality};
use super::error::{FlashcardError, Result};
use super::models::*;
use super::selector::{self, CardFilter, SourceFallback};
use super::stats::{compute_stats, ReviewStats};

/// File-backed card store
pub struct FlashcardStorage {
    data_file: PathBuf,
}

impl FlashcardStorage {
    pub fn new(data_file: PathBuf) -> Self {
        Self { data_file }
    }

    pub fn path(&self) -> &Path {
        &self.data_file
    }

    fn tmp_path(&self) -> PathBuf {
        self.data_file.with_extension("json.tmp")
    }

    // ==================== Collection Operations ====================

    /// Load the collection; a missing file is an empty collection
    pub fn load(&self) -> Result<Collection> {
        if !self.data_file.exists() {
            log::debug!("No collection at {:?}, starting empty", self.data_file);
            return Ok(Collection::default());
        }

        let content = fs::read_to_string(&self.data_file)?;
        let collection: Collection = serde_json::from_str(&content)?;
        collection.validate()?;

        log::debug!("Loaded {} cards from {:?}", collection.cards.len(), self.data_file);
        Ok(collection)
    }

    /// Replace the stored collection (write to .tmp then rename)
    pub fn save(&self, collection: &Collection) -> Result<()> {
        if let Some(parent) = self.data_file.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.tmp_path();
        let json = serde_json::to_string_pretty(collection)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.data_file)?;

        log::debug!("Saved {} cards to {:?}", collection.cards.len(), self.data_file);
        Ok(())
    }

    // ==================== Card Operations ====================

    /// Create a new card; `category` defaults to general
    pub fn add_card(
        &self,
        question: String,
        answer: String,
        category: Option<&str>,
        tags: Vec<String>,
        source: Option<String>,
    ) -> Result<Card> {
        let category = match category {
            Some(name) => name.parse::<Category>()?,
            None => Category::default(),
        };

        let draft = NewCard {
            question,
            answer,
            category,
            tags,
            source,
        };

        let mut created = self.add_cards(vec![draft])?;
        created
            .pop()
            .ok_or_else(|| FlashcardError::Corrupt("card was not created".to_string()))
    }

    /// Create several cards with a single write
    pub fn add_cards(&self, drafts: Vec<NewCard>) -> Result<Vec<Card>> {
        self.add_cards_at(drafts, Utc::now())
    }

    pub fn add_cards_at(&self, drafts: Vec<NewCard>, now: DateTime<Utc>) -> Result<Vec<Card>> {
        if drafts.is_empty() {
            return Ok(Vec::new());
        }

        let mut collection = self.load()?;

        let created: Vec<Card> = drafts
            .into_iter()
            .map(|mut draft| {
                draft.question = draft.question.trim().to_string();
                draft.answer = draft.answer.trim().to_string();
                draft.tags = clean_tags(&draft.tags);
                draft.source = draft
                    .source
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty());
                Card::new(draft, now)
            })
            .collect();

        collection.cards.extend(created.iter().cloned());
        self.save(&collection)?;

        for card in &created {
            log::info!("Added card {} ({})", card.id, card.category);
        }
        Ok(created)
    }

    /// Get a specific card
    pub fn get_card(&self, id: &str) -> Result<Card> {
        self.load()?
            .find(id)
            .cloned()
            .ok_or_else(|| FlashcardError::NotFound(id.to_string()))
    }

    /// List cards in collection order, optionally for one category
    pub fn list_cards(&self, category: Option<Category>) -> Result<Vec<Card>> {
        let collection = self.load()?;
        Ok(collection
            .cards
            .into_iter()
            .filter(|c| category.map_or(true, |cat| c.category == cat))
            .collect())
    }

    /// Delete a card; returns whether anything was removed
    pub fn delete_card(&self, id: &str) -> Result<bool> {
        let mut collection = self.load()?;
        let len_before = collection.cards.len();
        collection.cards.retain(|c| c.id != id);

        if collection.cards.len() == len_before {
            log::debug!("Delete requested for unknown card {}", id);
            return Ok(false);
        }

        self.save(&collection)?;
        log::info!("Deleted card {}", id);
        Ok(true)
    }

    // ==================== Review Operations ====================

    /// Submit a review for a card
    pub fn review_card(&self, id: &str, quality: i64) -> Result<Card> {
        self.review_card_at(id, quality, Utc::now())
    }

    pub fn review_card_at(&self, id: &str, quality: i64, now: DateTime<Utc>) -> Result<Card> {
        let quality = Quality::try_from(quality)?;

        let mut collection = self.load()?;
        let card = collection
            .find_mut(id)
            .ok_or_else(|| FlashcardError::NotFound(id.to_string()))?;

        apply_review(card, quality, now)?;
        let updated = card.clone();

        record_review(&mut collection.stats, local_date(now));
        self.save(&collection)?;

        log::info!(
            "Reviewed card {} with quality {}: interval {}d, ease {:.2}",
            updated.id,
            quality.value(),
            updated.interval,
            updated.ease_factor
        );
        Ok(updated)
    }

    /// Cards due now, most overdue first
    pub fn due_cards(&self, limit: Option<usize>, filter: &CardFilter) -> Result<Vec<Card>> {
        self.due_cards_at(Utc::now(), limit, filter)
    }

    pub fn due_cards_at(
        &self,
        now: DateTime<Utc>,
        limit: Option<usize>,
        filter: &CardFilter,
    ) -> Result<Vec<Card>> {
        let collection = self.load()?;
        let due: Vec<Card> = selector::due_cards_filtered(&collection.cards, now, limit, filter)
            .into_iter()
            .cloned()
            .collect();

        log::debug!("{} cards due", due.len());
        Ok(due)
    }

    /// Pick a random card
    pub fn random_card(&self, filter: &CardFilter, fallback: SourceFallback) -> Result<Option<Card>> {
        let collection = self.load()?;
        let mut rng = rand::thread_rng();
        Ok(selector::random_card(&collection.cards, filter, fallback, &mut rng).cloned())
    }

    /// Get review statistics
    pub fn stats(&self) -> Result<ReviewStats> {
        self.stats_at(Utc::now())
    }

    pub fn stats_at(&self, now: DateTime<Utc>) -> Result<ReviewStats> {
        Ok(compute_stats(&self.load()?, now))
    }
}

/// Calendar day of a timestamp in the learner's timezone
pub fn local_date(now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&Local).date_naive()
}

/// Tags are comma separated in markdown, so a comma splits a tag
fn clean_tags(tags: &[String]) -> Vec<String> {
    tags.iter()
        .flat_map(|t| t.split(','))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}
