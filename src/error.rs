//! Error type shared by every stage of a polling cycle.
//!
//! Each stage (configuration, fetch, parse, filter, history, notify) has its
//! own variant so the caller can tell which step failed.  Nothing in the
//! crate retries; the error travels up to `main`, which logs it and exits.

use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A required environment variable was unset or empty.
    #[error("missing required configuration: {0}")]
    MissingConfig(&'static str),

    /// An environment variable was set but could not be parsed.
    #[error("invalid value {value:?} for {key}: {source}")]
    InvalidConfig {
        key: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// The feed request failed in transport or returned a non-success status.
    #[error("failed to fetch feed from {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The feed body was not the expected listing shape.
    #[error("malformed feed response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid title filter {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to read history from {}: {source}", .path.display())]
    HistoryLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write history to {}: {source}", .path.display())]
    HistorySave {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Sending the webhook for a post failed in transport.
    #[error("failed to notify webhook for post {id}: {source}")]
    Notify {
        id: String,
        #[source]
        source: reqwest::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
