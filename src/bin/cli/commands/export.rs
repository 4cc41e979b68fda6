use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;

use recall_lib::markdown::export_cards_to_markdown;

use crate::app::App;

pub fn run(app: &App, output: Option<&Path>) -> Result<()> {
    let cards = app.storage.list_cards(None).context("Failed to load cards")?;
    let markdown = export_cards_to_markdown(&cards, Local::now());

    match output {
        Some(path) => {
            fs::write(path, &markdown)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Exported {} cards to {}", cards.len(), path.display());
        }
        None => println!("{}", markdown),
    }

    Ok(())
}
