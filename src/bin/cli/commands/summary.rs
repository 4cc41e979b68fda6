use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

/// Shown when no subcommand is given
pub fn run(app: &App, format: &OutputFormat) -> Result<()> {
    let stats = app.storage.stats().context("Failed to compute stats")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Plain => {
            println!("\nFlashcards: {} total, {} due", stats.total_cards, stats.due_today);
            println!("   Streak: {} days", stats.streak_days);
            if stats.due_today > 0 {
                println!("\n   Run 'recall quiz' to review due cards");
            }
        }
    }

    Ok(())
}
