//! BibTeX output formatting.
//!
//! One entry per paper. Cite keys follow the common surname-year-word
//! scheme: ASCII-folded lowercase surname of the first author, publication
//! year, and the first significant title word
//! (`vaswani2017attention`-style), with placeholder segments when a piece
//! is missing.

use unicode_normalization::UnicodeNormalization;

use crate::models::Paper;

/// Words skipped when picking the title segment of a cite key.
const STOPWORDS: &[&str] = &[
    "a", "an", "the", "on", "of", "for", "and", "or", "in", "to", "with", "is", "at", "by",
    "from",
];

/// Format a list of papers as BibTeX entries separated by blank lines.
#[must_use]
pub fn format_bibtex(papers: &[Paper]) -> String {
    papers.iter().map(to_bibtex).collect::<Vec<_>>().join("\n")
}

/// Format a single paper as a BibTeX entry.
#[must_use]
pub fn to_bibtex(paper: &Paper) -> String {
    let entry_type = entry_type(paper);
    let mut out = format!("@{}{{{},\n", entry_type, cite_key(paper));

    out.push_str(&format!("  title = {{{}}},\n", escape_bibtex(paper.title_or_default())));

    if !paper.authors.is_empty() {
        out.push_str(&format!(
            "  author = {{{}}},\n",
            escape_bibtex(&paper.author_names_bibtex())
        ));
    }

    if let Some(year) = paper.year {
        out.push_str(&format!("  year = {{{year}}},\n"));
    }

    if let Some(venue) = paper.venue.as_deref().filter(|v| !v.is_empty()) {
        let field = if entry_type == "inproceedings" { "booktitle" } else { "journal" };
        out.push_str(&format!("  {} = {{{}}},\n", field, escape_bibtex(venue)));
    }

    if let Some(doi) = paper.doi() {
        out.push_str(&format!("  doi = {{{doi}}},\n"));
    }

    if let Some(arxiv) = paper.arxiv_id() {
        out.push_str(&format!("  eprint = {{{arxiv}}},\n"));
        out.push_str("  archiveprefix = {arXiv},\n");
    }

    if let Some(url) = paper.pdf_url() {
        out.push_str(&format!("  url = {{{url}}},\n"));
    }

    out.push_str("}\n");
    out
}

/// Generate the cite key for a paper.
///
/// Without author data the paper ID is the key; placeholder segments kick
/// in only when the ID is missing too.
fn cite_key(paper: &Paper) -> String {
    let surname = paper
        .first_author()
        .and_then(|name| name.split_whitespace().next_back())
        .map(fold_for_key)
        .filter(|s| !s.is_empty());

    if surname.is_none() && !paper.paper_id.is_empty() {
        return paper.paper_id.clone();
    }

    let surname = surname.unwrap_or_else(|| "unknown".to_string());
    let year = paper.year.map_or_else(|| "nodate".to_string(), |y| y.to_string());
    let title_word = paper
        .title
        .as_deref()
        .and_then(first_significant_word)
        .unwrap_or_else(|| "paper".to_string());

    format!("{surname}{year}{title_word}")
}

/// First title word that is not a stopword, folded for key use.
fn first_significant_word(title: &str) -> Option<String> {
    title
        .split_whitespace()
        .map(fold_for_key)
        .find(|word| !word.is_empty() && !STOPWORDS.contains(&word.as_str()))
}

/// Fold to lowercase ASCII alphanumerics (NFKD strips diacritics).
fn fold_for_key(text: &str) -> String {
    text.nfkd()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Choose the BibTeX entry type from venue information.
fn entry_type(paper: &Paper) -> &'static str {
    match paper.venue_type() {
        Some("conference") => return "inproceedings",
        Some("journal") => return "article",
        _ => {}
    }

    if let Some(venue) = &paper.venue {
        let venue = venue.to_lowercase();
        if ["conference", "workshop", "symposium", "proceedings"]
            .iter()
            .any(|kw| venue.contains(kw))
        {
            return "inproceedings";
        }
    }

    "article"
}

/// Escape BibTeX special characters.
fn escape_bibtex(s: &str) -> String {
    s.replace('\\', "\\textbackslash{}")
        .replace('{', "\\{")
        .replace('}', "\\}")
        .replace('&', "\\&")
        .replace('%', "\\%")
        .replace('$', "\\$")
        .replace('#', "\\#")
        .replace('_', "\\_")
        .replace('^', "\\textasciicircum{}")
        .replace('~', "\\textasciitilde{}")
}
