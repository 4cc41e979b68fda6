use chrono::Local;

use recall_lib::flashcards::algorithm::format_interval;
use recall_lib::flashcards::Card;

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Wrap `text` in a color when enabled
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Render a card for listing
pub fn render_card(card: &Card, show_answer: bool, show_id: bool, use_color: bool) -> String {
    let mut lines = Vec::new();

    let category = paint(&format!("({})", card.category), Color::CYAN, use_color);
    if show_id {
        lines.push(format!("{} {}", paint(&format!("[{}]", card.id), Color::GRAY, use_color), category));
    } else {
        lines.push(category);
    }

    lines.push(format!("{} {}", paint("Q:", Color::BOLD, use_color), card.question));

    if show_answer {
        lines.push(format!("{} {}", paint("A:", Color::GREEN, use_color), card.answer));
    }

    if !card.tags.is_empty() {
        lines.push(format!("   Tags: {}", card.tags.join(", ")));
    }

    if let Some(last) = card.last_review {
        let info = format!(
            "   Last: {} | Interval: {} | Ease: {:.2}",
            last.with_timezone(&Local).format("%Y-%m-%d"),
            format_interval(card.interval),
            card.ease_factor
        );
        lines.push(paint(&info, Color::DIM, use_color));
    }

    lines.join("\n")
}

/// Print a titled list of cards
pub fn print_cards(title: &str, cards: &[Card], show_answers: bool, show_ids: bool, use_color: bool) {
    println!("\n{}\n", paint(title, Color::BOLD, use_color));
    for card in cards {
        println!("{}", render_card(card, show_answers, show_ids, use_color));
        println!();
    }
}

/// Horizontal rule used by panels
pub fn rule(width: usize) -> String {
    "=".repeat(width)
}
