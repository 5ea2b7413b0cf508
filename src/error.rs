// src/error.rs
// =============================================================================
// Error types for the whole crate.
//
// Two families:
// - ConfigError: something is wrong before crawling starts. Fatal.
// - TaskError (and the collaborator errors it wraps): something went wrong
//   while crawling one URL. Logged, the task is dropped, the crawl goes on.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Problems with the configuration file or the seed list.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("{field} is empty")]
    Missing { field: &'static str },

    #[error("{field} must be at least {min}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: u64,
        value: u64,
    },

    #[error("{field} must be at most {max}, got {value}")]
    TooLarge {
        field: &'static str,
        max: u64,
        value: u64,
    },

    #[error("invalid target url pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("no seeds in {0}")]
    NoSeeds(PathBuf),
}

/// Failure of a single bounded fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("crawl timeout after {0:?}")]
    Timeout(std::time::Duration),

    #[error("status code {0} is not a success")]
    NonSuccessStatus(u16),

    #[error("transport failure: {0}")]
    TransportFailure(String),
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unsupported encoding {0:?}")]
    UnsupportedEncoding(String),
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("base url {url:?} is not absolute: {source}")]
    InvalidBase {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("url {0:?} does not escape to a usable file name")]
    UnusableName(String),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Everything that can end one crawl task early.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("cannot determine host: {0}")]
    NoHost(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Persist(#[from] PersistError),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}
