use chrono::{DateTime, Local};

use crate::flashcards::{Card, Category};

/// Export cards to Markdown, one `##` section per non-empty category
pub fn export_cards_to_markdown(cards: &[Card], exported_at: DateTime<Local>) -> String {
    let mut lines = vec![
        "# Flashcard Export".to_string(),
        String::new(),
        format!("*Exported: {}*", exported_at.format("%Y-%m-%d %H:%M")),
        String::new(),
    ];

    for category in Category::ALL {
        let section: Vec<&Card> = cards.iter().filter(|c| c.category == category).collect();
        if section.is_empty() {
            continue;
        }

        lines.push(format!("## {}", category.as_str().to_uppercase()));
        lines.push(String::new());

        for card in section {
            lines.extend(convert_card(card));
            lines.push(String::new());
        }
    }

    lines.join("\n")
}

fn convert_card(card: &Card) -> Vec<String> {
    let mut lines = vec![
        format!("### Q: {}", single_line(&card.question)),
        format!("**A:** {}", single_line(&card.answer)),
    ];

    if !card.tags.is_empty() {
        lines.push(format!("*Tags: {}*", card.tags.join(", ")));
    }

    if let Some(source) = card.source.as_deref().filter(|s| !s.is_empty()) {
        lines.push(format!("*Source: {}*", source));
    }

    lines
}

/// The format is line based, so embedded newlines become spaces
fn single_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::NewCard;
    use chrono::{TimeZone, Utc};

    fn create_test_card(question: &str, category: Category, tags: &[&str], source: Option<&str>) -> Card {
        let mut draft = NewCard::new(question, format!("answer to {}", question));
        draft.category = category;
        draft.tags = tags.iter().map(|t| t.to_string()).collect();
        draft.source = source.map(String::from);
        Card::new(draft, Utc::now())
    }

    fn exported_at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 2, 3, 14, 5, 0).unwrap()
    }

    #[test]
    fn test_export_empty() {
        let md = export_cards_to_markdown(&[], exported_at());
        assert_eq!(md, "# Flashcard Export\n\n*Exported: 2025-02-03 14:05*\n");
    }

    #[test]
    fn test_export_card_lines() {
        let cards = vec![create_test_card("What is RAII?", Category::Concept, &["rust", "memory"], Some("notes/raii.md"))];
        let md = export_cards_to_markdown(&cards, exported_at());

        assert!(md.contains("## CONCEPT\n\n### Q: What is RAII?\n**A:** answer to What is RAII?\n*Tags: rust, memory*\n*Source: notes/raii.md*\n"));
    }

    #[test]
    fn test_export_section_order_and_omission() {
        let cards = vec![
            create_test_card("g", Category::General, &[], None),
            create_test_card("d", Category::Dev, &[], None),
        ];
        let md = export_cards_to_markdown(&cards, exported_at());

        let dev = md.find("## DEV").unwrap();
        let general = md.find("## GENERAL").unwrap();
        assert!(dev < general);
        assert!(!md.contains("## TOOL"));
        assert!(!md.contains("*Tags:"));
        assert!(!md.contains("*Source:"));
    }

    #[test]
    fn test_multiline_answer_flattened() {
        let mut card = create_test_card("q", Category::Dev, &[], None);
        card.answer = "first\n  second\n".to_string();

        let md = export_cards_to_markdown(&[card], exported_at());
        assert!(md.contains("**A:** first second\n"));
    }
}
