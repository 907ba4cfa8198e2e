// src/utils/error.rs
use std::path::PathBuf;
use thiserror::Error;

// Errors raised while talking to the EDGAR endpoints
#[derive(Error, Debug)]
pub enum EdgarError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("The server did not respond in time: {0}")]
    Timeout(String),

    #[error("HTTP error {status} for {url}")]
    Http { status: reqwest::StatusCode, url: String },

    #[error("SEC refused the request (403) - check the configured User-Agent")]
    Forbidden,

    #[error("Nothing found at {0}")]
    NotFound(String),

    #[error("There was no JSON response for url: {url} ({source})")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid request parameter: {0}")]
    InvalidParameter(String),
}

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("no results for identifier {0}")]
    IdentifierNotFound(String),

    #[error("no results for ticker {0}")]
    TickerNotFound(String),

    #[error("company tickers file not found at {0}, run `init` to download it")]
    TableMissing(PathBuf),

    #[error("company tickers file is malformed: {0}")]
    TableMalformed(#[from] serde_json::Error),

    #[error("I/O error reading company tickers: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration directory {path} could not be created: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration file {path} could not be written: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration file {path} could not be read: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No configuration found at {0}, run `init` first")]
    Missing(PathBuf),

    #[error("Configuration file is invalid: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Configuration could not be serialized: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("User-Agent must not be empty")]
    EmptyUserAgent,
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Document has no <body> element")]
    MissingBody,
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Usage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("EDGAR interaction failed: {0}")]
    Edgar(#[from] EdgarError),

    #[error("{0}")]
    Resolve(#[from] ResolveError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
