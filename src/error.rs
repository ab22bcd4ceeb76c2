//! Error types for Site Locale
//!
//! This module defines all custom error types used throughout the crate.
//! Error types are organized by concern so each layer can contain its own
//! failures and log them without propagating faults to the page.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type encompassing all error categories
#[derive(Error, Debug)]
pub enum AppError {
    /// Translation catalog loading errors
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Locale application errors
    #[error(transparent)]
    Locale(#[from] LocaleError),

    /// Durable storage errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Page snapshot errors
    #[error(transparent)]
    Page(#[from] PageError),
}

/// Translation catalog loading errors
#[derive(Error, Debug)]
pub enum LoadError {
    /// The transport answered with a non-success status
    #[error("HTTP error! status: {status} ({location})")]
    Status { location: String, status: u16 },

    /// The transport could not complete the request
    #[error("Could not fetch translations from {location}: {reason}")]
    Transport { location: String, reason: String },

    /// The body is not a valid translation catalog
    #[error("Invalid translation catalog at {location}")]
    Parse {
        location: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Locale application errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocaleError {
    /// The requested locale has no table in the catalog
    #[error("No translations found for language: {0}")]
    UnknownLocale(String),
}

/// Durable key-value storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    /// Error reading the storage file
    #[error("Could not read storage: {path}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error writing the storage file
    #[error("Could not write storage: {path}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Storage file content is not a string map
    #[error("Invalid storage format: {path}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Storage directory could not be determined
    #[error("Could not access storage directory")]
    DirectoryError,
}

/// Configuration related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error loading configuration file
    #[error("Could not load configuration: {0}")]
    LoadError(String),

    /// Error parsing configuration
    #[error("Invalid configuration format: {0}")]
    ParseError(String),

    /// Invalid configuration value
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    /// Configuration directory error
    #[error("Could not access configuration directory")]
    DirectoryError,
}

/// Page snapshot errors
#[derive(Error, Debug)]
pub enum PageError {
    /// Error reading the page snapshot
    #[error("Could not read page: {path}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Page snapshot is not valid JSON
    #[error("Invalid page format: {path}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Error writing the rendered page
    #[error("Could not write page: {path}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for operations that can fail with AppError
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for catalog loading
pub type LoadResult<T> = Result<T, LoadError>;

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for page snapshot operations
pub type PageResult<T> = Result<T, PageError>;

impl LoadError {
    /// Location of the resource that failed to load
    pub fn location(&self) -> &str {
        match self {
            LoadError::Status { location, .. }
            | LoadError::Transport { location, .. }
            | LoadError::Parse { location, .. } => location,
        }
    }
}
