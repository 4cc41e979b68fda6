//! Flashcard and spaced repetition engine
//!
//! This module provides:
//! - The card collection model and its JSON store
//! - SM-2 spaced repetition algorithm
//! - Due-card selection and random picks
//! - Mastery and streak statistics

pub mod algorithm;
pub mod error;
pub mod models;
pub mod selector;
pub mod stats;
pub mod storage;

pub use error::{FlashcardError, Result};
pub use models::*;
pub use selector::{CardFilter, SourceFallback};
pub use stats::{Digest, ReviewStats};
pub use storage::FlashcardStorage;
