//! Paper data model matching the Semantic Scholar API schema.

use serde::{Deserialize, Serialize};

use super::AuthorRef;

/// A research paper from Semantic Scholar.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    /// Unique Semantic Scholar paper ID.
    #[serde(default)]
    pub paper_id: String,

    /// Paper title.
    #[serde(default)]
    pub title: Option<String>,

    /// Paper abstract.
    #[serde(default)]
    pub r#abstract: Option<String>,

    /// Publication year.
    #[serde(default)]
    pub year: Option<i32>,

    /// Number of citations this paper has received.
    #[serde(default)]
    pub citation_count: Option<i64>,

    /// List of authors.
    #[serde(default)]
    pub authors: Vec<AuthorRef>,

    /// Publication venue name (journal or conference).
    #[serde(default)]
    pub venue: Option<String>,

    /// Structured publication venue.
    #[serde(default)]
    pub publication_venue: Option<PublicationVenue>,

    /// Open access PDF information.
    #[serde(default)]
    pub open_access_pdf: Option<OpenAccessPdf>,

    /// External identifiers (DOI, ArXiv, PubMed, etc.).
    #[serde(default)]
    pub external_ids: Option<ExternalIds>,
}

impl Paper {
    /// Get the paper title, falling back to "Untitled" if not available.
    #[must_use]
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }

    /// Get the DOI if available.
    #[must_use]
    pub fn doi(&self) -> Option<&str> {
        self.external_ids.as_ref()?.doi.as_deref()
    }

    /// Get the ArXiv ID if available.
    #[must_use]
    pub fn arxiv_id(&self) -> Option<&str> {
        self.external_ids.as_ref()?.arxiv.as_deref()
    }

    /// Get the open access PDF URL if available.
    #[must_use]
    pub fn pdf_url(&self) -> Option<&str> {
        self.open_access_pdf.as_ref()?.url.as_deref()
    }

    /// Get citation count or 0 if not available.
    #[must_use]
    pub fn citations(&self) -> i64 {
        self.citation_count.unwrap_or(0)
    }

    /// Get the first author's name if available.
    #[must_use]
    pub fn first_author(&self) -> Option<&str> {
        self.authors.first()?.name.as_deref()
    }

    /// Get author names joined with " and " (BibTeX convention).
    #[must_use]
    pub fn author_names_bibtex(&self) -> String {
        self.authors
            .iter()
            .filter_map(|a| a.name.as_deref())
            .collect::<Vec<_>>()
            .join(" and ")
    }

    /// Get the structured venue type ("journal", "conference", ...) if known.
    #[must_use]
    pub fn venue_type(&self) -> Option<&str> {
        self.publication_venue.as_ref()?.venue_type.as_deref()
    }
}

/// Structured publication venue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicationVenue {
    /// Venue name.
    #[serde(default)]
    pub name: Option<String>,

    /// Venue type: "journal" or "conference".
    #[serde(default, rename = "type")]
    pub venue_type: Option<String>,
}

/// Open access PDF information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAccessPdf {
    /// Direct URL to the PDF.
    pub url: Option<String>,

    /// Status of open access.
    #[serde(default)]
    pub status: Option<String>,
}

/// External identifiers for a paper.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalIds {
    /// Digital Object Identifier.
    #[serde(rename = "DOI")]
    pub doi: Option<String>,

    /// ArXiv preprint ID.
    #[serde(rename = "ArXiv")]
    pub arxiv: Option<String>,

    /// PubMed ID.
    #[serde(rename = "PubMed")]
    pub pubmed: Option<String>,

    /// Semantic Scholar Corpus ID.
    #[serde(rename = "CorpusId")]
    pub corpus_id: Option<i64>,
}
