//! Paper identifier tagging and normalization.
//!
//! The Graph API accepts several identifier namespaces, each behind a
//! canonical prefix (`DOI:`, `ARXIV:`, `CorpusId:`, `PMID:`) or as a bare
//! Semantic Scholar hash. Users spell these loosely (`doi:`, `arXiv:`, bare
//! DOIs, paper-page URLs); this module maps each input to exactly one tag
//! and renders the server-expected form. Anything unrecognized passes
//! through unmodified so the server stays the authority on validity.

use crate::error::{ClientError, ClientResult};

/// A tagged paper identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaperIdentifier {
    /// Native Semantic Scholar ID (40-char hex hash).
    S2(String),
    /// Digital Object Identifier.
    Doi(String),
    /// arXiv preprint ID.
    ArXiv(String),
    /// Semantic Scholar corpus ID (numeric).
    CorpusId(String),
    /// PubMed ID.
    PubMed(String),
    /// Unrecognized form, passed through verbatim.
    Other(String),
}

impl PaperIdentifier {
    /// Tag a user-supplied identifier.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIdentifier` only for input that cannot be placed in a
    /// URL path at all (empty or whitespace-only).
    pub fn parse(input: &str) -> ClientResult<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ClientError::invalid_identifier(input));
        }

        if let Some(rest) = strip_prefix_ci(input, "doi:") {
            return Ok(Self::Doi(rest.to_string()));
        }
        if let Some(rest) = strip_prefix_ci(input, "arxiv:") {
            return Ok(Self::ArXiv(rest.to_string()));
        }
        if let Some(rest) = strip_prefix_ci(input, "corpusid:") {
            return Ok(Self::CorpusId(rest.to_string()));
        }
        if let Some(rest) = strip_prefix_ci(input, "pmid:") {
            return Ok(Self::PubMed(rest.to_string()));
        }

        // Paper-page URLs end in the S2 hash.
        if input.contains("semanticscholar.org/paper/") {
            if let Some(hash) = input.rsplit('/').find(|seg| is_s2_hash(seg)) {
                return Ok(Self::S2(hash.to_string()));
            }
            return Ok(Self::Other(input.to_string()));
        }

        if is_s2_hash(input) {
            return Ok(Self::S2(input.to_string()));
        }

        // Bare DOIs start with the "10." registrant prefix.
        if input.starts_with("10.") && input.contains('/') {
            return Ok(Self::Doi(input.to_string()));
        }

        if is_bare_arxiv(input) {
            return Ok(Self::ArXiv(input.to_string()));
        }

        Ok(Self::Other(input.to_string()))
    }

    /// Render the API's canonical form of this identifier.
    #[must_use]
    pub fn normalized(&self) -> String {
        match self {
            Self::S2(id) | Self::Other(id) => id.clone(),
            Self::Doi(id) => format!("DOI:{id}"),
            Self::ArXiv(id) => format!("ARXIV:{id}"),
            Self::CorpusId(id) => format!("CorpusId:{id}"),
            Self::PubMed(id) => format!("PMID:{id}"),
        }
    }

    /// Parse and normalize in one step.
    pub fn normalize(input: &str) -> ClientResult<String> {
        Ok(Self::parse(input)?.normalized())
    }
}

/// Case-insensitive prefix strip.
///
/// `get` keeps this safe on inputs where the prefix length lands inside a
/// multibyte character.
fn strip_prefix_ci<'a>(input: &'a str, prefix: &str) -> Option<&'a str> {
    let head = input.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) { Some(&input[prefix.len()..]) } else { None }
}

/// Native S2 IDs are 40 hex characters.
fn is_s2_hash(s: &str) -> bool {
    s.len() == 40 && s.chars().all(|c| c.is_ascii_hexdigit())
}

/// Modern bare arXiv IDs look like `2106.15928` or `2106.15928v2`.
fn is_bare_arxiv(s: &str) -> bool {
    let body = s.split_once('v').map_or(s, |(head, tail)| {
        if tail.chars().all(|c| c.is_ascii_digit()) && !tail.is_empty() { head } else { s }
    });
    let Some((yymm, number)) = body.split_once('.') else {
        return false;
    };
    yymm.len() == 4
        && yymm.chars().all(|c| c.is_ascii_digit())
        && (4..=5).contains(&number.len())
        && number.chars().all(|c| c.is_ascii_digit())
}
