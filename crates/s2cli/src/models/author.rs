//! Author data model matching the Semantic Scholar API schema.

use serde::{Deserialize, Serialize};

/// An author with profile metrics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Unique Semantic Scholar author ID.
    #[serde(default)]
    pub author_id: String,

    /// Author name.
    #[serde(default)]
    pub name: Option<String>,

    /// Affiliations.
    #[serde(default)]
    pub affiliations: Vec<String>,

    /// Total paper count.
    #[serde(default)]
    pub paper_count: Option<i64>,

    /// Total citation count.
    #[serde(default)]
    pub citation_count: Option<i64>,

    /// h-index.
    #[serde(default)]
    pub h_index: Option<i64>,
}

impl Author {
    /// Get the author name, falling back to "Unknown" if not available.
    #[must_use]
    pub fn name_or_default(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }

    /// Paper count or 0.
    #[must_use]
    pub fn papers(&self) -> i64 {
        self.paper_count.unwrap_or(0)
    }

    /// Citation count or 0.
    #[must_use]
    pub fn citations(&self) -> i64 {
        self.citation_count.unwrap_or(0)
    }

    /// h-index or 0.
    #[must_use]
    pub fn h_index_value(&self) -> i64 {
        self.h_index.unwrap_or(0)
    }
}

/// Minimal author reference embedded in paper records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRef {
    /// Author ID.
    #[serde(default)]
    pub author_id: Option<String>,

    /// Author name.
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_deserialize() {
        let json = r#"{
            "authorId": "1741101",
            "name": "Geoffrey Hinton",
            "paperCount": 500,
            "citationCount": 400000,
            "hIndex": 160
        }"#;
        let author: Author = serde_json::from_str(json).unwrap();
        assert_eq!(author.name_or_default(), "Geoffrey Hinton");
        assert_eq!(author.papers(), 500);
        assert_eq!(author.h_index_value(), 160);
    }

    #[test]
    fn test_author_defaults() {
        let author: Author = serde_json::from_str("{}").unwrap();
        assert_eq!(author.name_or_default(), "Unknown");
        assert_eq!(author.citations(), 0);
    }
}
