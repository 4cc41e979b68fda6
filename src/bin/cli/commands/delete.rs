use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, id: &str, format: &OutputFormat) -> Result<()> {
    let deleted = app.storage.delete_card(id).context("Failed to delete card")?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "id": id, "deleted": deleted });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if deleted {
                println!("Deleted card {}", id);
            } else {
                println!("Card not found: {}", id);
            }
        }
    }

    Ok(())
}
