use anyhow::{Context, Result};

use recall_lib::flashcards::Digest;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat) -> Result<()> {
    let stats = app.storage.stats().context("Failed to compute stats")?;
    let digest = Digest::from(&stats);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&digest)?),
        OutputFormat::Plain => {
            println!("{} cards due | Streak: {} days", digest.due, digest.streak);
        }
    }

    Ok(())
}
