//! Error types for cloudkey.
//!
//! `Error` is what every public operation returns. Configuration and
//! provider failures are grouped into their own enums so callers can match
//! on a category without caring about the exact cause.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    /// One or more required inputs were empty.
    #[error("invalid arguments: missing {}", .0.join(", "))]
    InvalidArguments(Vec<&'static str>),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Kms(#[from] KmsError),

    #[error("failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Configuration file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to write config {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Provider session and API errors.
#[derive(Error, Debug)]
pub enum KmsError {
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("failed to open {provider} session: {reason}")]
    Session {
        provider: &'static str,
        reason: String,
    },

    #[error("failed to read service account key {}: {source}", path.display())]
    KeyFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid service account key {}: {reason}", path.display())]
    KeyFileParse { path: PathBuf, reason: String },

    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("decryption failed: {0}")]
    Decryption(String),

    #[error("{0} support is not compiled into this build")]
    Unsupported(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
