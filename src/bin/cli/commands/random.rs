use anyhow::{Context, Result};

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

pub fn run(
    app: &App,
    category: Option<&str>,
    from_files: Vec<String>,
    no_fallback: bool,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let filter = App::card_filter(category, from_files)?;
    let card = app.storage.random_card(&filter, app.random_fallback(no_fallback))
        .context("Failed to pick a card")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&card)?);
        }
        OutputFormat::Plain => match card {
            Some(card) => {
                println!("\n{}", paint(&card.category.as_str().to_uppercase(), Color::CYAN, use_color));
                println!("\nQ: {}\n", card.question);
                println!("[Press Enter to reveal answer]");
            }
            None => println!("No cards available."),
        },
    }

    Ok(())
}
