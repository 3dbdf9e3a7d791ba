//! Request construction.
//!
//! Maps a subcommand plus its arguments to a fully formed request
//! descriptor: method, URL, encoded query parameters, and an optional JSON
//! body for batch lookups. Paper identifiers are normalized here, filters
//! that are absent are omitted entirely, and per-endpoint result caps are
//! applied before anything reaches the wire.

use serde_json::json;

use crate::config::{Config, api};
use crate::error::ClientResult;
use crate::ident::PaperIdentifier;

/// HTTP method of an API request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A fully formed API request descriptor.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub params: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    fn get(url: String, params: Vec<(String, String)>) -> Self {
        Self { method: Method::Get, url, params, body: None }
    }

    fn post(url: String, params: Vec<(String, String)>, body: serde_json::Value) -> Self {
        Self { method: Method::Post, url, params, body: Some(body) }
    }
}

/// Optional search filters. Absent fields never appear in the query string.
#[derive(Debug, Clone, Default)]
pub struct QueryFilters {
    /// Publication year or range (`2023`, `2020-2023`).
    pub year: Option<String>,

    /// Publication venue.
    pub venue: Option<String>,

    /// Field of study (e.g. "Computer Science").
    pub fields_of_study: Option<String>,

    /// Minimum citation count.
    pub min_citations: Option<i64>,

    /// Only papers with a free PDF.
    pub open_access: bool,

    /// Publication types (e.g. "JournalArticle,Review").
    pub publication_types: Option<String>,
}

impl QueryFilters {
    fn push_params(&self, params: &mut Vec<(String, String)>) {
        if let Some(year) = &self.year {
            params.push(("year".to_string(), year.clone()));
        }
        if let Some(venue) = &self.venue {
            params.push(("venue".to_string(), venue.clone()));
        }
        if let Some(fos) = &self.fields_of_study {
            params.push(("fieldsOfStudy".to_string(), fos.clone()));
        }
        if let Some(min) = self.min_citations {
            params.push(("minCitationCount".to_string(), min.to_string()));
        }
        if self.open_access {
            // The API treats the bare parameter as a flag.
            params.push(("openAccessPdf".to_string(), String::new()));
        }
        if let Some(types) = &self.publication_types {
            params.push(("publicationTypes".to_string(), types.clone()));
        }
    }
}

/// Resolve the `fields` parameter: user override or the endpoint default.
fn field_param(user_fields: Option<&str>, default: &[&str]) -> (String, String) {
    let value = user_fields.map_or_else(|| default.join(","), ToString::to_string);
    ("fields".to_string(), value)
}

/// Percent-encode a normalized paper ID as a single path segment.
///
/// The namespace colon stays literal; everything else is encoded so DOIs
/// with slashes, `#`, or spaces survive URL construction.
fn encode_path_id(id: &str) -> String {
    id.split(':').map(|part| urlencoding::encode(part).into_owned()).collect::<Vec<_>>().join(":")
}

/// GET /paper/search
pub fn search_papers(
    config: &Config,
    query: &str,
    filters: &QueryFilters,
    limit: i64,
    offset: i64,
    user_fields: Option<&str>,
) -> ApiRequest {
    let mut params = vec![
        ("query".to_string(), query.to_string()),
        field_param(user_fields, crate::config::fields::PAPER),
        ("limit".to_string(), limit.min(api::SEARCH_LIMIT_CAP).to_string()),
        ("offset".to_string(), offset.to_string()),
    ];
    filters.push_params(&mut params);

    ApiRequest::get(format!("{}/paper/search", config.graph_api_url), params)
}

/// GET /paper/{id}
pub fn get_paper(
    config: &Config,
    paper_id: &str,
    user_fields: Option<&str>,
    default_fields: &[&str],
) -> ClientResult<ApiRequest> {
    let id = encode_path_id(&PaperIdentifier::normalize(paper_id)?);
    let params = vec![field_param(user_fields, default_fields)];
    Ok(ApiRequest::get(format!("{}/paper/{}", config.graph_api_url, id), params))
}

/// POST /paper/batch
pub fn get_papers_batch(
    config: &Config,
    paper_ids: &[String],
    user_fields: Option<&str>,
    default_fields: &[&str],
) -> ClientResult<ApiRequest> {
    let ids = paper_ids
        .iter()
        .take(api::BATCH_ID_CAP)
        .map(|id| PaperIdentifier::normalize(id))
        .collect::<ClientResult<Vec<_>>>()?;

    let params = vec![field_param(user_fields, default_fields)];
    Ok(ApiRequest::post(
        format!("{}/paper/batch", config.graph_api_url),
        params,
        json!({ "ids": ids }),
    ))
}

/// GET /paper/{id}/citations or /paper/{id}/references
pub fn get_citation_list(
    config: &Config,
    paper_id: &str,
    direction: CitationDirection,
    limit: i64,
    offset: i64,
    user_fields: Option<&str>,
) -> ClientResult<ApiRequest> {
    let id = encode_path_id(&PaperIdentifier::normalize(paper_id)?);
    let params = vec![
        field_param(user_fields, crate::config::fields::PAPER),
        ("limit".to_string(), limit.min(api::LIST_LIMIT_CAP).to_string()),
        ("offset".to_string(), offset.to_string()),
    ];
    let segment = match direction {
        CitationDirection::Citations => "citations",
        CitationDirection::References => "references",
    };
    Ok(ApiRequest::get(format!("{}/paper/{}/{}", config.graph_api_url, id, segment), params))
}

/// Which side of the citation graph to walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CitationDirection {
    Citations,
    References,
}

/// GET /papers/forpaper/{id} (Recommendations API)
pub fn get_recommendations(
    config: &Config,
    paper_id: &str,
    pool: &str,
    limit: i64,
    user_fields: Option<&str>,
) -> ClientResult<ApiRequest> {
    let id = encode_path_id(&PaperIdentifier::normalize(paper_id)?);
    let params = vec![
        field_param(user_fields, crate::config::fields::PAPER),
        ("limit".to_string(), limit.min(api::RECOMMEND_LIMIT_CAP).to_string()),
        ("from".to_string(), pool.to_string()),
    ];
    Ok(ApiRequest::get(
        format!("{}/papers/forpaper/{}", config.recommendations_api_url, id),
        params,
    ))
}

/// POST /papers/ (Recommendations API)
///
/// Recommendations from positive and negative example papers. The "from"
/// pool applies only to the single-seed endpoint.
pub fn get_recommendations_multi(
    config: &Config,
    positive_ids: &[String],
    negative_ids: &[String],
    limit: i64,
    user_fields: Option<&str>,
) -> ClientResult<ApiRequest> {
    let normalize_all = |ids: &[String]| {
        ids.iter().map(|id| PaperIdentifier::normalize(id)).collect::<ClientResult<Vec<_>>>()
    };

    let mut body = json!({ "positivePaperIds": normalize_all(positive_ids)? });
    let negative = normalize_all(negative_ids)?;
    if !negative.is_empty() {
        body["negativePaperIds"] = json!(negative);
    }

    let params = vec![
        field_param(user_fields, crate::config::fields::PAPER),
        ("limit".to_string(), limit.min(api::RECOMMEND_LIMIT_CAP).to_string()),
    ];
    Ok(ApiRequest::post(format!("{}/papers/", config.recommendations_api_url), params, body))
}

/// GET /author/search
pub fn search_authors(
    config: &Config,
    query: &str,
    limit: i64,
    offset: i64,
    user_fields: Option<&str>,
) -> ApiRequest {
    let params = vec![
        ("query".to_string(), query.to_string()),
        field_param(user_fields, crate::config::fields::AUTHOR),
        ("limit".to_string(), limit.min(api::LIST_LIMIT_CAP).to_string()),
        ("offset".to_string(), offset.to_string()),
    ];
    ApiRequest::get(format!("{}/author/search", config.graph_api_url), params)
}

/// GET /author/{id}
pub fn get_author(config: &Config, author_id: &str, user_fields: Option<&str>) -> ApiRequest {
    let params = vec![field_param(user_fields, crate::config::fields::AUTHOR)];
    ApiRequest::get(format!("{}/author/{}", config.graph_api_url, author_id), params)
}

/// GET /author/{id}/papers
pub fn get_author_papers(
    config: &Config,
    author_id: &str,
    limit: i64,
    offset: i64,
    user_fields: Option<&str>,
) -> ApiRequest {
    let params = vec![
        field_param(user_fields, crate::config::fields::PAPER),
        ("limit".to_string(), limit.min(api::LIST_LIMIT_CAP).to_string()),
        ("offset".to_string(), offset.to_string()),
    ];
    ApiRequest::get(format!("{}/author/{}/papers", config.graph_api_url, author_id), params)
}

/// GET /release/ (Datasets API)
pub fn list_releases(config: &Config) -> ApiRequest {
    ApiRequest::get(format!("{}/release/", config.datasets_api_url), vec![])
}

/// GET /release/{id}
pub fn get_release(config: &Config, release_id: &str) -> ApiRequest {
    ApiRequest::get(format!("{}/release/{}", config.datasets_api_url, release_id), vec![])
}

/// GET /release/{id}/dataset/{name}
pub fn get_dataset_links(config: &Config, release_id: &str, name: &str) -> ApiRequest {
    ApiRequest::get(
        format!("{}/release/{}/dataset/{}", config.datasets_api_url, release_id, name),
        vec![],
    )
}
