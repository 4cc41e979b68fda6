pub mod config;
pub mod flashcards;
pub mod markdown;

pub use config::{ConfigError, RecallConfig};
pub use flashcards::{FlashcardError, FlashcardStorage};
