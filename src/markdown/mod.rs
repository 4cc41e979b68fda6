//! Markdown export/import of flashcards

pub mod export;
pub mod import;

pub use export::export_cards_to_markdown;
pub use import::{import_markdown_file, parse_markdown_cards};
