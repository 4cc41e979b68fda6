use anyhow::{Context, Result};

use crate::app::App;
use crate::render::terminal::print_cards;
use crate::OutputFormat;

pub fn run(
    app: &App,
    category: Option<&str>,
    show_answers: bool,
    show_ids: bool,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let category = App::parse_category(category)?;
    let cards = app.storage.list_cards(category).context("Failed to list cards")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&cards)?);
        }
        OutputFormat::Plain => {
            if cards.is_empty() {
                println!("No cards found.");
                return Ok(());
            }
            let title = format!("{} card(s):", cards.len());
            print_cards(&title, &cards, show_answers, show_ids, use_color);
        }
    }

    Ok(())
}
