use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run(
    app: &App,
    question: String,
    answer: String,
    category: Option<&str>,
    tags: Option<&str>,
    source: Option<String>,
    format: &OutputFormat,
) -> Result<()> {
    let tags: Vec<String> = tags
        .map(|t| t.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    let card = app.storage.add_card(question, answer, category, tags, source)
        .context("Failed to add card")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&card)?);
        }
        OutputFormat::Plain => {
            println!("Added card [{}]", card.id);
            println!("  Q: {}", card.question);
            println!("  A: {}", card.answer);
            println!("  Category: {}", card.category);
            if !card.tags.is_empty() {
                println!("  Tags: {}", card.tags.join(", "));
            }
        }
    }

    Ok(())
}
