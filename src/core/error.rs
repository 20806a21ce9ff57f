//! Custom error types for the application.
//!
//! Provides structured error handling with meaningful error messages
//! and proper error categorization for each domain:
//!
//! - [`OverviewError`] - Vault, configuration and render pipeline errors
//! - [`FetchError`] - Network/fetch-related errors for HTTP requests
//!
//! Recoverable text-sync conditions (block not found, link-list markers
//! missing) are not errors; those paths return `None` and leave the
//! document unchanged.

use thiserror::Error;

/// Errors raised by the vault and the overview pipeline.
#[derive(Debug, Error)]
pub enum OverviewError {
    /// Document hosting an overview does not exist
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// Configured source folder does not resolve to a folder
    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    /// No vault entry at the path
    #[error("No such file or folder: {0}")]
    EntryNotFound(String),

    /// An entry already occupies the path
    #[error("Path already exists: {0}")]
    AlreadyExists(String),

    /// Path is empty, the root, or has a file where a folder is needed
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Plugin defaults failed to parse
    #[error("Settings parse error: {0}")]
    Settings(#[from] toml::de::Error),

    /// Configuration could not be serialized into a block
    #[error("Configuration serialize error: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

/// Network/fetch-related errors for HTTP requests.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Browser window not available
    #[error("Browser window not available")]
    NoWindow,
    /// Failed to create HTTP request
    #[error("Failed to create request")]
    RequestCreationFailed,
    /// Network request failed (timeout, CORS, etc.)
    #[error("Network error: {0}")]
    NetworkError(String),
    /// HTTP error response (non-2xx status)
    #[error("HTTP error: {0}")]
    HttpError(u16),
    /// Failed to read response body
    #[error("Failed to read response")]
    ResponseReadFailed,
    /// Invalid response content (not text)
    #[error("Invalid response content")]
    InvalidContent,
    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParseError(String),
    /// Request timed out
    #[error("Request timed out")]
    Timeout,
}
