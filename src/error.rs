use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures at the I/O boundary. Parsing itself never fails.
#[derive(Debug, Error)]
pub enum Error {
    #[error("input file not found: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse configuration {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid base package `{0}`: expected dot-separated identifiers")]
    InvalidPackage(String),
}

pub type Result<T> = std::result::Result<T, Error>;
