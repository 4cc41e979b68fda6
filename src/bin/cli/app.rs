use std::path::Path;

use anyhow::{Context, Result};

use recall_lib::config::RecallConfig;
use recall_lib::flashcards::{CardFilter, Category, FlashcardStorage, SourceFallback};

/// Shared application state for CLI commands
pub struct App {
    pub config: RecallConfig,
    pub storage: FlashcardStorage,
}

impl App {
    /// Load the config and open the collection file
    pub fn new(config_path: Option<&Path>, data_file: Option<&Path>) -> Result<Self> {
        let config = RecallConfig::load(config_path).context("Failed to load config")?;
        let data_file = config
            .resolve_data_file(data_file)
            .context("Failed to resolve collection file")?;

        log::debug!("Using collection at {:?}", data_file);
        Ok(Self::from_parts(config, FlashcardStorage::new(data_file)))
    }

    pub fn from_parts(config: RecallConfig, storage: FlashcardStorage) -> Self {
        Self { config, storage }
    }

    /// Parse an optional category name from the command line
    pub fn parse_category(name: Option<&str>) -> Result<Option<Category>> {
        name.map(|n| n.parse::<Category>())
            .transpose()
            .context("Unknown category")
    }

    /// Build a selector filter from command-line options
    pub fn card_filter(category: Option<&str>, sources: Vec<String>) -> Result<CardFilter> {
        let mut filter = Self::parse_category(category)?
            .map(CardFilter::category)
            .unwrap_or_default();
        filter.sources = sources;
        Ok(filter)
    }

    /// Fallback behavior for `random`, honoring config and `--no-fallback`
    pub fn random_fallback(&self, no_fallback: bool) -> SourceFallback {
        if no_fallback || !self.config.random_source_fallback {
            SourceFallback::Empty
        } else {
            SourceFallback::Unfiltered
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_filter_from_options() {
        let filter = App::card_filter(Some("Tool"), vec!["notes".to_string()]).unwrap();
        assert_eq!(filter.category, Some(Category::Tool));
        assert_eq!(filter.sources, vec!["notes".to_string()]);

        let filter = App::card_filter(None, Vec::new()).unwrap();
        assert_eq!(filter.category, None);
        assert!(filter.sources.is_empty());

        assert!(App::card_filter(Some("bogus"), Vec::new()).is_err());
    }
}
