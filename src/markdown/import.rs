use std::fs;
use std::path::Path;

use regex::Regex;

use crate::flashcards::{Card, Category, FlashcardError, FlashcardStorage, NewCard, Result};

/// Line patterns of the export format
struct Patterns {
    category: Regex,
    question: Regex,
    answer: Regex,
    tags: Regex,
    source: Regex,
}

impl Patterns {
    fn new() -> Self {
        Self {
            category: Regex::new(r"^##\s+(.+?)\s*$").unwrap(),
            question: Regex::new(r"^###\s*Q\s*:\s*(.*)$").unwrap(),
            answer: Regex::new(r"^\*\*A\s*:\*\*\s*(.*)$").unwrap(),
            // one closing `*`; anything before it belongs to the value
            tags: Regex::new(r"^\*Tags:\s*(.*?)\*?$").unwrap(),
            source: Regex::new(r"^\*Source:\s*(.*?)\*?$").unwrap(),
        }
    }
}

/// A card being assembled while scanning lines
#[derive(Default)]
struct PendingCard {
    question: Option<String>,
    answer: Option<String>,
    tags: Vec<String>,
    source: Option<String>,
}

impl PendingCard {
    fn finish(self, category: Category, drafts: &mut Vec<NewCard>) {
        match (self.question, self.answer) {
            (Some(question), Some(answer)) if !question.is_empty() && !answer.is_empty() => {
                drafts.push(NewCard {
                    question,
                    answer,
                    category,
                    tags: self.tags,
                    source: self.source,
                });
            }
            (None, None) => {}
            (question, answer) => {
                log::warn!(
                    "Skipping card with a missing question or answer (Q: {:?}, A: {:?})",
                    question.unwrap_or_default(),
                    answer.unwrap_or_default()
                );
            }
        }
    }
}

/// Parse markdown in the export format into card drafts
///
/// `## <category>` headings switch the category for the cards that follow;
/// unknown headings leave the current category unchanged. Cards start out as
/// `general` until a known heading is seen.
pub fn parse_markdown_cards(markdown: &str) -> Vec<NewCard> {
    let patterns = Patterns::new();
    let mut drafts = Vec::new();
    let mut category = Category::General;
    let mut pending = PendingCard::default();
    // category of the card being built, fixed when its question line is read
    let mut pending_category = category;

    for line in markdown.lines() {
        let line = line.trim();

        if let Some(caps) = patterns.question.captures(line) {
            std::mem::take(&mut pending).finish(pending_category, &mut drafts);
            pending.question = Some(caps[1].trim().to_string());
            pending_category = category;
        } else if let Some(caps) = patterns.category.captures(line) {
            if let Ok(parsed) = caps[1].parse::<Category>() {
                category = parsed;
            }
        } else if let Some(caps) = patterns.answer.captures(line) {
            pending.answer = Some(caps[1].trim().to_string());
        } else if let Some(caps) = patterns.tags.captures(line) {
            pending.tags = caps[1]
                .split(',')
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect();
        } else if let Some(caps) = patterns.source.captures(line) {
            let source = caps[1].trim();
            if !source.is_empty() {
                pending.source = Some(source.to_string());
            }
        }
    }

    pending.finish(pending_category, &mut drafts);
    drafts
}

/// Import cards from a markdown file through the normal add path
///
/// Imported cards get fresh ids and are due immediately. Nothing is written
/// unless the file exists and parses.
pub fn import_markdown_file(storage: &FlashcardStorage, path: &Path) -> Result<Vec<Card>> {
    if !path.is_file() {
        return Err(FlashcardError::MissingFile(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    let drafts = parse_markdown_cards(&content);
    let cards = storage.add_cards(drafts)?;

    log::info!("Imported {} cards from {:?}", cards.len(), path);
    Ok(cards)
}
