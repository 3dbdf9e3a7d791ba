//! Command-line surface and dispatch.

use clap::{Parser, Subcommand};

use crate::client::SemanticScholarClient;
use crate::error::ClientResult;
use crate::formatters::{self, EntityKind, OutputFormat};
use crate::request::QueryFilters;

/// Semantic Scholar CLI - search academic papers, get citations, export BibTeX.
#[derive(Parser, Debug)]
#[command(name = "s2cli", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Semantic Scholar API key (raises rate limits).
    #[arg(long, global = true, env = "S2_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Output format (default: table on a terminal, json when piped).
    #[arg(short = 'f', long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Comma-separated fields to request instead of the defaults.
    #[arg(long, global = true)]
    pub fields: Option<String>,

    /// Fail immediately on rate limiting instead of waiting and retrying.
    #[arg(long, global = true)]
    pub no_retry: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn", env = "RUST_LOG")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search for papers by keyword.
    Search {
        /// Search query.
        query: String,

        /// Number of results.
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: i64,

        /// Pagination offset.
        #[arg(long, default_value_t = 0)]
        offset: i64,

        /// Year or range (2023, 2020-2023).
        #[arg(long)]
        year: Option<String>,

        /// Filter by venue.
        #[arg(long)]
        venue: Option<String>,

        /// Field of study filter.
        #[arg(long = "field")]
        field_of_study: Option<String>,

        /// Minimum citation count.
        #[arg(long)]
        min_citations: Option<i64>,

        /// Only papers with free PDFs.
        #[arg(long)]
        open_access: bool,

        /// Publication types (e.g. "JournalArticle,Review").
        #[arg(long)]
        publication_types: Option<String>,
    },

    /// Get paper details by ID (S2 hash, DOI:, ARXIV:, CorpusId:, PMID:, or paper URL).
    Paper {
        /// Paper ID(s); more than one uses the batch endpoint.
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Get papers that cite a paper.
    Citations {
        /// Paper ID.
        id: String,

        /// Number of results.
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: i64,

        /// Pagination offset.
        #[arg(long, default_value_t = 0)]
        offset: i64,
    },

    /// Get papers cited by a paper.
    References {
        /// Paper ID.
        id: String,

        /// Number of results.
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: i64,

        /// Pagination offset.
        #[arg(long, default_value_t = 0)]
        offset: i64,
    },

    /// Get paper recommendations from one or more seed papers.
    Recommend {
        /// Seed paper ID(s); more than one switches to the multi-paper
        /// endpoint.
        #[arg(required = true)]
        ids: Vec<String>,

        /// Number of recommendations.
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: i64,

        /// Recommendation pool: "recent" or "all-cs" (single seed only).
        #[arg(long, default_value = "recent")]
        pool: String,

        /// Negative example paper ID (repeatable); forces the multi-paper
        /// endpoint.
        #[arg(long = "negative")]
        negative: Vec<String>,
    },

    /// Export BibTeX citations (shortcut for paper --format bibtex).
    Bibtex {
        /// Paper ID(s).
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Author-related commands.
    #[command(subcommand)]
    Author(AuthorCommand),

    /// List available dataset releases.
    Datasets,

    /// Get dataset info or download links for a release.
    Dataset {
        /// Release ID (e.g. "2024-01-01" or "latest").
        release_id: String,

        /// Dataset name; when set, shows download links for that dataset.
        #[arg(long)]
        name: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum AuthorCommand {
    /// Search for authors by name.
    Search {
        /// Author name.
        query: String,

        /// Number of results.
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: i64,

        /// Pagination offset.
        #[arg(long, default_value_t = 0)]
        offset: i64,
    },

    /// Get author details by ID.
    Get {
        /// Author ID.
        id: String,
    },

    /// Get papers by an author.
    Papers {
        /// Author ID.
        id: String,

        /// Number of results.
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: i64,

        /// Pagination offset.
        #[arg(long, default_value_t = 0)]
        offset: i64,
    },
}

impl Cli {
    /// Effective output format for this invocation.
    ///
    /// The explicit flag wins; the bibtex subcommand forces bibtex; dataset
    /// payloads have no tabular or BibTeX shape and stay json; otherwise
    /// interactivity decides.
    #[must_use]
    pub fn effective_format(&self, interactive: bool) -> OutputFormat {
        let forced = match self.command {
            Command::Bibtex { .. } => Some(OutputFormat::Bibtex),
            Command::Datasets | Command::Dataset { .. } => Some(OutputFormat::Json),
            _ => None,
        };
        OutputFormat::resolve(self.format.or(forced), interactive)
    }

    /// What kind of records this command yields for table rendering.
    #[must_use]
    pub fn entity_kind(&self) -> EntityKind {
        match self.command {
            Command::Author(AuthorCommand::Search { .. } | AuthorCommand::Get { .. }) => {
                EntityKind::Author
            }
            _ => EntityKind::Paper,
        }
    }
}

/// Execute the parsed command and render its output.
pub async fn run(
    cli: &Cli,
    client: &SemanticScholarClient,
    interactive: bool,
) -> ClientResult<String> {
    let format = cli.effective_format(interactive);
    let fields = cli.fields.as_deref();

    let value = match &cli.command {
        Command::Search {
            query,
            limit,
            offset,
            year,
            venue,
            field_of_study,
            min_citations,
            open_access,
            publication_types,
        } => {
            let filters = QueryFilters {
                year: year.clone(),
                venue: venue.clone(),
                fields_of_study: field_of_study.clone(),
                min_citations: *min_citations,
                open_access: *open_access,
                publication_types: publication_types.clone(),
            };
            client.search_papers(query, &filters, *limit, *offset, fields).await?
        }

        Command::Paper { ids } => fetch_papers(client, ids, fields, format).await?,

        Command::Citations { id, limit, offset } => {
            client.get_citations(id, *limit, *offset, fields).await?
        }

        Command::References { id, limit, offset } => {
            client.get_references(id, *limit, *offset, fields).await?
        }

        Command::Recommend { ids, limit, pool, negative } => match (ids.as_slice(), negative) {
            ([id], negative) if negative.is_empty() => {
                client.get_recommendations(id, pool, *limit, fields).await?
            }
            (ids, negative) => {
                client.get_recommendations_multi(ids, negative, *limit, fields).await?
            }
        },

        Command::Bibtex { ids } => fetch_papers(client, ids, fields, format).await?,

        Command::Author(AuthorCommand::Search { query, limit, offset }) => {
            client.search_authors(query, *limit, *offset, fields).await?
        }

        Command::Author(AuthorCommand::Get { id }) => client.get_author(id, fields).await?,

        Command::Author(AuthorCommand::Papers { id, limit, offset }) => {
            client.get_author_papers(id, *limit, *offset, fields).await?
        }

        Command::Datasets => client.list_releases().await?,

        Command::Dataset { release_id, name } => match name {
            Some(name) => client.get_dataset_links(release_id, name).await?,
            None => client.get_release(release_id).await?,
        },
    };

    formatters::render(&value, format, interactive, cli.entity_kind())
}

/// Single lookup or batch, with the BibTeX field set when that's the target.
async fn fetch_papers(
    client: &SemanticScholarClient,
    ids: &[String],
    fields: Option<&str>,
    format: OutputFormat,
) -> ClientResult<serde_json::Value> {
    let bibtex = format == OutputFormat::Bibtex && fields.is_none();
    match (ids, bibtex) {
        ([id], false) => client.get_paper(id, fields).await,
        ([id], true) => client.get_paper_for_bibtex(id).await,
        (ids, false) => client.get_papers_batch(ids, fields).await,
        (ids, true) => client.get_papers_batch_for_bibtex(ids).await,
    }
}
