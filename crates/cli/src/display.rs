//! Terminal rendering for movie cards.
//!
//! Cards are laid out in rows of five: a caption line, a score line, then
//! one poster URL per card. Missing posters show the fallback image.

use colored::Colorize;
use server::MovieCard;
use title_resolver::TitleMatch;

/// Cards per grid row
pub const GRID_COLUMNS: usize = 5;

const CELL_WIDTH: usize = 26;

/// Cut `text` to at most `width` characters, marking the cut with "..."
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(3);
    let mut cut: String = text.chars().take(keep).collect();
    cut.push_str("...");
    cut
}

/// Plain-text grid, one block per row of `GRID_COLUMNS` cards
pub fn render_grid(cards: &[MovieCard], fallback_poster: &str) -> String {
    let mut out = String::new();

    for row in cards.chunks(GRID_COLUMNS) {
        let captions: Vec<String> = row
            .iter()
            .map(|card| format!("{:<width$}", truncate(&card.title, CELL_WIDTH), width = CELL_WIDTH))
            .collect();
        out.push_str(captions.join(" ").trim_end());
        out.push('\n');

        let scores: Vec<String> = row
            .iter()
            .map(|card| {
                let score = card.score.map(|s| format!("{s:.2}")).unwrap_or_default();
                format!("{:<width$}", score, width = CELL_WIDTH)
            })
            .collect();
        let scores = scores.join(" ");
        if !scores.trim().is_empty() {
            out.push_str(scores.trim_end());
            out.push('\n');
        }

        for card in row {
            let poster = card.poster.as_deref().unwrap_or(fallback_poster);
            out.push_str(&format!("  {}: {}\n", truncate(&card.title, CELL_WIDTH), poster));
        }
        out.push('\n');
    }

    out
}

pub fn print_grid(heading: &str, cards: &[MovieCard], fallback_poster: &str) {
    println!("{}", heading.bold().blue());
    print!("{}", render_grid(cards, fallback_poster));
}

/// The movie the user picked, with its poster
pub fn print_selected(card: &MovieCard, fallback_poster: &str) {
    println!("{} {}", "Selected:".bold(), card.title.green());
    println!("  Poster: {}", card.poster.as_deref().unwrap_or(fallback_poster));
    println!();
}

/// Numbered fuzzy-match candidates
pub fn print_choices(choices: &[TitleMatch]) {
    for (i, choice) in choices.iter().enumerate() {
        println!(
            "  {}. {} {}",
            (i + 1).to_string().green(),
            choice.title,
            format!("({:.0})", choice.score).dimmed()
        );
    }
}

pub fn print_no_match() {
    println!("{}", "No similar movie found.".yellow());
}
