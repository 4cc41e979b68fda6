use std::path::Path;

use anyhow::{Context, Result};

use recall_lib::markdown::import_markdown_file;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, file: &Path, format: &OutputFormat) -> Result<()> {
    let cards = import_markdown_file(&app.storage, file)
        .with_context(|| format!("Failed to import {}", file.display()))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&cards)?);
        }
        OutputFormat::Plain => {
            println!("Imported {} cards from {}", cards.len(), file.display());
        }
    }

    Ok(())
}
