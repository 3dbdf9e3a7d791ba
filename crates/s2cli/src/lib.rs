//! Semantic Scholar CLI
//!
//! A command-line client for the Semantic Scholar Graph, Recommendations and
//! Datasets APIs. Searches academic papers, fetches citation graphs, and
//! exports BibTeX.
//!
//! # Features
//!
//! - **Rate-limit aware**: 429 responses trigger a visible countdown on
//!   stderr before retrying, up to a bounded budget
//! - **Pipe-friendly**: data on stdout, diagnostics on stderr; JSON output is
//!   compact when piped and pretty-printed on a terminal
//! - **Three formats**: json, table, and BibTeX with generated cite keys
//!
//! # Example
//!
//! ```no_run
//! use s2cli::{client::SemanticScholarClient, config::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::new(None);
//!     let client = SemanticScholarClient::new(config)?;
//!     let result = client.get_paper("ARXIV:1706.03762", None).await?;
//!     println!("{result}");
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod ident;
pub mod models;
pub mod request;

pub use client::SemanticScholarClient;
pub use config::Config;
pub use error::ClientError;
pub use formatters::OutputFormat;
