//! Error types for the booking client library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all booking client operations.
#[derive(Error, Debug)]
pub enum BookingError {
    /// The request could not complete (connection refused, timeout, DNS)
    #[error("Network error: {message}")]
    Network { message: String },
    /// The server answered with a non-2xx status; `message` is the server's
    /// own explanation when it sent one
    #[error("{}", server_message(.status, .message))]
    Server {
        status: u16,
        message: Option<String>,
    },
    /// The server rejected the stored credential; the session was purged
    #[error("Session expired, please log in again")]
    Unauthorized,
    /// A client-side precondition failed before any request was made
    #[error("Invalid input for field '{field}': {reason}")]
    Validation { field: String, reason: String },
    /// Session database errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Coarse classification used by the workflow and view-models to decide how a
/// failure is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request never produced a response
    Network,
    /// The server produced an error response
    Server,
    /// A local precondition failed
    Validation,
    /// Local storage or configuration failed
    Local,
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> BookingError {
        BookingError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct ValidationBuilder {
    field: String,
}

impl ValidationBuilder {
    /// Create a new validation error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> BookingError {
        BookingError::Validation {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl BookingError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn validation(field: impl Into<String>) -> ValidationBuilder {
        ValidationBuilder::new(field)
    }

    /// Creates a network error from any displayable cause.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates a server error carrying the server-supplied message, if any.
    pub fn server(status: u16, message: Option<String>) -> Self {
        Self::Server { status, message }
    }

    /// Classifies the error into the network/server/validation taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network { .. } => ErrorKind::Network,
            Self::Server { .. } | Self::Unauthorized => ErrorKind::Server,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Database { .. }
            | Self::FileSystem { .. }
            | Self::XdgDirectory(_)
            | Self::Serialization { .. }
            | Self::Configuration { .. } => ErrorKind::Local,
        }
    }

    /// Returns the HTTP status of a server error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::Unauthorized => Some(401),
            _ => None,
        }
    }

    /// Message shown to the user: the server's own text for server errors,
    /// `fallback` for network failures, and the error's display otherwise.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Server {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            Self::Server { .. } | Self::Network { .. } => fallback.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for BookingError {
    fn from(error: reqwest::Error) -> Self {
        if let Some(status) = error.status() {
            Self::server(status.as_u16(), None)
        } else if error.is_decode() {
            Self::Configuration {
                message: format!("Unexpected response body: {error}"),
            }
        } else {
            Self::network(error.to_string())
        }
    }
}

fn server_message(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(message) => message.clone(),
        None => format!("Server error (HTTP {status})"),
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| BookingError::database(message).with_source(e))
    }
}

/// Result type alias for booking client operations
pub type Result<T> = std::result::Result<T, BookingError>;
