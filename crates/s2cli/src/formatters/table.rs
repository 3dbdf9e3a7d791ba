//! Table output formatting.
//!
//! Plain columns without borders: header plus one line per record, widths
//! computed from content, long text truncated so rows stay within a fixed
//! terminal width.

use comfy_table::{ContentArrangement, Table, presets::NOTHING};
use unicode_width::UnicodeWidthChar;

use crate::models::{Author, Paper};

/// Widest a title cell may get before truncation.
const TITLE_MAX: usize = 60;

/// Widest a venue cell may get before truncation.
const VENUE_MAX: usize = 24;

/// Render papers as a fixed-column table (Title, Year, Citations, Venue).
#[must_use]
pub fn paper_table(papers: &[Paper]) -> String {
    let mut table = base_table();
    table.set_header(vec!["Title", "Year", "Citations", "Venue"]);

    for paper in papers {
        table.add_row(vec![
            truncate_with_ellipsis(paper.title_or_default(), TITLE_MAX),
            paper.year.map_or_else(|| "-".to_string(), |y| y.to_string()),
            paper.citations().to_string(),
            paper
                .venue
                .as_deref()
                .filter(|v| !v.is_empty())
                .map_or_else(|| "-".to_string(), |v| truncate_with_ellipsis(v, VENUE_MAX)),
        ]);
    }

    table.to_string()
}

/// Render authors as a fixed-column table (Name, Papers, Citations, h-index).
#[must_use]
pub fn author_table(authors: &[Author]) -> String {
    let mut table = base_table();
    table.set_header(vec!["Name", "Papers", "Citations", "h-index"]);

    for author in authors {
        table.add_row(vec![
            truncate_with_ellipsis(author.name_or_default(), TITLE_MAX),
            author.papers().to_string(),
            author.citations().to_string(),
            author.h_index_value().to_string(),
        ]);
    }

    table.to_string()
}

/// Borderless table: one output line per row, widths from content.
fn base_table() -> Table {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    table.set_content_arrangement(ContentArrangement::Disabled);
    table
}

/// Truncate to a display width, appending an ellipsis when anything was cut.
///
/// Width-aware so CJK titles do not blow past the column budget.
fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    let total: usize = text.chars().map(|c| c.width().unwrap_or(1)).sum();
    if total <= max_width {
        return text.to_string();
    }

    let budget = max_width.saturating_sub(1); // room for the marker
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(1);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}
