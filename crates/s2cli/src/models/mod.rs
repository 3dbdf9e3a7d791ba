//! Data models for Semantic Scholar API entities.
//!
//! All models use `#[serde(default)]` for optional fields and camelCase
//! renames to match API naming. The client hands responses around as raw
//! `serde_json::Value`; these types are decoded only where rendering needs
//! structure (tables, BibTeX).

mod author;
mod paper;

pub use author::{Author, AuthorRef};
pub use paper::{ExternalIds, OpenAccessPdf, Paper, PublicationVenue};
