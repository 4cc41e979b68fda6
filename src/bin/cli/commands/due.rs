use anyhow::{Context, Result};

use crate::app::App;
use crate::render::terminal::print_cards;
use crate::OutputFormat;

pub fn run(
    app: &App,
    limit: usize,
    category: Option<&str>,
    show_answers: bool,
    show_ids: bool,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let filter = App::card_filter(category, Vec::new())?;
    let due = app.storage.due_cards(Some(limit), &filter)
        .context("Failed to select due cards")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&due)?);
        }
        OutputFormat::Plain => {
            if due.is_empty() {
                println!("No cards due for review today!");
                return Ok(());
            }
            let title = format!("{} card(s) due for review:", due.len());
            print_cards(&title, &due, show_answers, show_ids, use_color);
        }
    }

    Ok(())
}
