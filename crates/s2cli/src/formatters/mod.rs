//! Output rendering: json, table, and BibTeX.
//!
//! Rendering is a pure function of the parsed response, the requested
//! format, and an explicit interactivity flag (TTY-ness is sampled once at
//! startup, never queried here).

mod bibtex;
mod json;
mod table;

pub use bibtex::format_bibtex;
pub use json::format_json;
pub use table::{author_table, paper_table};

use crate::error::ClientResult;
use crate::models::{Author, Paper};

/// Requested output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Raw response JSON (pretty on a terminal, compact when piped).
    Json,
    /// Human-readable columns.
    Table,
    /// BibTeX entries.
    Bibtex,
}

impl OutputFormat {
    /// Resolve the effective format.
    ///
    /// An explicit choice (flag, or a bibtex-forcing subcommand folded in by
    /// the caller) always wins; otherwise interactive output gets a table
    /// and piped output gets json.
    #[must_use]
    pub fn resolve(explicit: Option<Self>, interactive: bool) -> Self {
        explicit.unwrap_or(if interactive { Self::Table } else { Self::Json })
    }
}

/// What kind of records a table should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Paper,
    Author,
}

/// Render a parsed response in the given format.
pub fn render(
    value: &serde_json::Value,
    format: OutputFormat,
    interactive: bool,
    kind: EntityKind,
) -> ClientResult<String> {
    match format {
        OutputFormat::Json => format_json(value, interactive),
        OutputFormat::Table => match kind {
            EntityKind::Paper => Ok(paper_table(&collect_papers(value)?)),
            EntityKind::Author => Ok(author_table(&collect_authors(value)?)),
        },
        OutputFormat::Bibtex => Ok(format_bibtex(&collect_papers(value)?)),
    }
}

/// Extract papers from any of the API's response shapes.
///
/// Handles bare arrays (batch), `{data: [...]}` (search, author papers),
/// `{data: [{citingPaper|citedPaper: ...}]}` (citation lists),
/// `{recommendedPapers: [...]}`, and single paper objects. Null entries
/// (batch misses) are skipped.
pub fn collect_papers(value: &serde_json::Value) -> ClientResult<Vec<Paper>> {
    let items: Vec<&serde_json::Value> = if let Some(arr) = value.as_array() {
        arr.iter().collect()
    } else if let Some(arr) = value.get("recommendedPapers").and_then(|v| v.as_array()) {
        arr.iter().collect()
    } else if let Some(arr) = value.get("data").and_then(|v| v.as_array()) {
        arr.iter()
            .map(|item| item.get("citingPaper").or_else(|| item.get("citedPaper")).unwrap_or(item))
            .collect()
    } else {
        vec![value]
    };

    items
        .into_iter()
        .filter(|item| !item.is_null())
        .map(|item| serde_json::from_value(item.clone()).map_err(Into::into))
        .collect()
}

/// Extract authors from `{data: [...]}` lists or single author objects.
pub fn collect_authors(value: &serde_json::Value) -> ClientResult<Vec<Author>> {
    let items: Vec<&serde_json::Value> = if let Some(arr) = value.as_array() {
        arr.iter().collect()
    } else if let Some(arr) = value.get("data").and_then(|v| v.as_array()) {
        arr.iter().collect()
    } else {
        vec![value]
    };

    items
        .into_iter()
        .filter(|item| !item.is_null())
        .map(|item| serde_json::from_value(item.clone()).map_err(Into::into))
        .collect()
}
