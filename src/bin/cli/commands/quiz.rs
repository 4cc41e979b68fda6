use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use chrono::Local;

use recall_lib::flashcards::algorithm::{format_interval, preview_intervals, Quality};
use recall_lib::flashcards::Card;

use crate::app::App;
use crate::render::terminal::{paint, Color};

const RATING_HELP: [&str; 6] = [
    "Complete blackout",
    "Wrong, but recognized answer",
    "Wrong, answer seemed familiar",
    "Correct with difficulty",
    "Correct with hesitation",
    "Perfect recall",
];

pub fn run(app: &App, category: Option<&str>, limit: Option<usize>, use_color: bool) -> Result<()> {
    let filter = App::card_filter(category, Vec::new())?;
    let due = app.storage.due_cards(limit, &filter).context("Failed to select due cards")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let completed = run_session(app, &due, &mut stdin.lock(), &mut stdout.lock(), use_color)?;

    if completed == due.len() && !due.is_empty() {
        let stats = app.storage.stats().context("Failed to compute stats")?;
        println!("Quiz complete!");
        println!("Streak: {} days | Total reviews: {}", stats.streak_days, stats.total_reviews);
    }

    Ok(())
}

/// Ask each card in turn; returns how many reviews were applied.
///
/// End of input stops the session. Reviews already applied stay saved.
pub fn run_session<R: BufRead, W: Write>(
    app: &App,
    cards: &[Card],
    input: &mut R,
    out: &mut W,
    use_color: bool,
) -> Result<usize> {
    if cards.is_empty() {
        writeln!(out, "No cards due for review!")?;
        return Ok(0);
    }

    let banner = "=".repeat(50);
    writeln!(out, "\n{}\n  QUIZ TIME - {} cards to review\n{}\n", banner, cards.len(), banner)?;

    for (i, card) in cards.iter().enumerate() {
        writeln!(out, "[{}/{}] ({})", i + 1, cards.len(), card.category)?;
        writeln!(out, "\n{} {}\n", paint("Q:", Color::BOLD, use_color), card.question)?;

        write!(out, "Press Enter to reveal answer...")?;
        out.flush()?;
        if read_line(input)?.is_none() {
            writeln!(out, "\n\nQuiz interrupted.")?;
            return Ok(i);
        }

        writeln!(out, "\n{} {}\n", paint("A:", Color::GREEN, use_color), card.answer)?;
        writeln!(out, "Rate your recall (0-5):")?;
        let preview = preview_intervals(card);
        for (q, help) in RATING_HELP.iter().enumerate() {
            let next = paint(&format!("next in {}", format_interval(preview[q])), Color::GRAY, use_color);
            writeln!(out, "  {}: {} ({})", q, help, next)?;
        }

        let quality = loop {
            write!(out, "\nRating: ")?;
            out.flush()?;
            let Some(line) = read_line(input)? else {
                writeln!(out, "\n\nQuiz interrupted.")?;
                return Ok(i);
            };
            match line.trim().parse::<i64>().ok().map(Quality::try_from) {
                Some(Ok(quality)) => break quality,
                _ => writeln!(out, "{}", paint("Please enter a number 0-5", Color::YELLOW, use_color))?,
            }
        };

        let updated = app.storage.review_card(&card.id, quality.value() as i64)
            .with_context(|| format!("Failed to review card {}", card.id))?;
        writeln!(
            out,
            "\nNext review: {}",
            updated.next_review.with_timezone(&Local).format("%Y-%m-%d")
        )?;
        writeln!(out, "\n{}\n", "-".repeat(50))?;
    }

    Ok(cards.len())
}

/// `None` at end of input
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
