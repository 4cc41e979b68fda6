use anyhow::{Context, Result};
use chrono::Local;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, id: &str, quality: i64, format: &OutputFormat) -> Result<()> {
    let card = app.storage.review_card(id, quality)
        .with_context(|| format!("Failed to review card {}", id))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&card)?);
        }
        OutputFormat::Plain => {
            println!("Reviewed card {}", card.id);
            println!("  Next review: {}", card.next_review.with_timezone(&Local).format("%Y-%m-%d"));
            println!("  Interval: {} days", card.interval);
        }
    }

    Ok(())
}
