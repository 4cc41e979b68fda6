use anyhow::{Context, Result};

use crate::app::App;
use crate::render::terminal::rule;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat) -> Result<()> {
    let stats = app.storage.stats().context("Failed to compute stats")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        OutputFormat::Plain => {
            println!("\n{}", rule(40));
            println!("  FLASHCARD STATISTICS");
            println!("{}", rule(40));
            println!("  Total cards:    {}", stats.total_cards);
            println!("  Due today:      {}", stats.due_today);
            println!("  Mastered:       {}", stats.mastered);
            println!("  Learning:       {}", stats.learning);
            println!("  New:            {}", stats.new);
            println!("{}", rule(40));
            println!("  Total reviews:  {}", stats.total_reviews);
            println!("  Streak:         {} days", stats.streak_days);
            println!("{}", rule(40));
            println!("\n  By Category:");
            for entry in stats.by_category.iter().filter(|c| c.count > 0) {
                println!("    {}: {}", entry.category, entry.count);
            }
            println!();
        }
    }

    Ok(())
}
