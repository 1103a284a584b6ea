//! Error types for teletype.
//!
//! Nothing in the chat engine is fatal: exchange failures are folded into the
//! reply text at the client boundary.  The variants here cover the internal
//! paths that do report errors: building the HTTP client, parsing the
//! endpoint, decoding the reply body, and guarded session transitions.

use std::error;
use std::fmt;
use std::sync::Arc;

use crate::types::SessionStatus;

/// The main error type for teletype.
#[derive(Clone, Debug)]
pub enum Error {
    /// The endpoint answered with a non-success HTTP status.
    Api {
        /// HTTP status code.
        status_code: u16,
        /// Human-readable error message.
        message: String,
    },

    /// Connection error.
    Connection {
        /// Human-readable error message.
        message: String,
        /// Underlying cause.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// Error during JSON serialization or deserialization.
    Serialization {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// HTTP client error.
    HttpClient {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// Error during validation of configuration.
    Validation {
        /// Human-readable error message.
        message: String,
        /// Parameter that failed validation.
        param: Option<String>,
    },

    /// A URL parsing error.
    Url {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<url::ParseError>,
    },

    /// A session status change that the state machine does not allow.
    InvalidTransition {
        /// Status before the attempted change.
        from: SessionStatus,
        /// Requested status.
        to: SessionStatus,
    },

    /// An attempt to mutate a transcript entry that is no longer in progress.
    EntryLocked {
        /// Index of the entry, if the transcript is non-empty.
        index: Option<usize>,
    },
}

impl Error {
    /// Creates a new API error.
    pub fn api(status_code: u16, message: impl Into<String>) -> Self {
        Error::Api {
            status_code,
            message: message.into(),
        }
    }

    /// Creates a new connection error.
    pub fn connection(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::Connection {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new serialization error.
    pub fn serialization(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::Serialization {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new HTTP client error.
    pub fn http_client(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::HttpClient {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new validation error.
    pub fn validation(message: impl Into<String>, param: Option<String>) -> Self {
        Error::Validation {
            message: message.into(),
            param,
        }
    }

    /// Creates a new URL error.
    pub fn url(message: impl Into<String>, source: Option<url::ParseError>) -> Self {
        Error::Url {
            message: message.into(),
            source,
        }
    }

    /// Creates a new invalid transition error.
    pub fn invalid_transition(from: SessionStatus, to: SessionStatus) -> Self {
        Error::InvalidTransition { from, to }
    }

    /// Creates a new locked entry error.
    pub fn entry_locked(index: Option<usize>) -> Self {
        Error::EntryLocked { index }
    }

    /// Returns the status code associated with this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Api { message, .. } => {
                write!(f, "{message}")
            }
            Error::Connection { message, .. } => {
                write!(f, "Connection error: {message}")
            }
            Error::Serialization { message, .. } => {
                write!(f, "Serialization error: {message}")
            }
            Error::HttpClient { message, .. } => {
                write!(f, "HTTP client error: {message}")
            }
            Error::Validation { message, param } => {
                if let Some(param) = param {
                    write!(f, "Validation error: {message} (parameter: {param})")
                } else {
                    write!(f, "Validation error: {message}")
                }
            }
            Error::Url { message, .. } => {
                write!(f, "URL error: {message}")
            }
            Error::InvalidTransition { from, to } => {
                write!(f, "Invalid status transition: {from} -> {to}")
            }
            Error::EntryLocked { index } => match index {
                Some(index) => write!(f, "Transcript entry {index} is locked"),
                None => write!(f, "Transcript is empty"),
            },
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Connection { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            Error::Serialization { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            Error::HttpClient { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            Error::Url { source, .. } => {
                source.as_ref().map(|e| e as &(dyn error::Error + 'static))
            }
            _ => None,
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::url(format!("URL parse error: {err}"), Some(err))
    }
}

/// A specialized Result type for teletype operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_displays_status_message_only() {
        let err = Error::api(500, "HTTP error! status: 500");
        assert_eq!(err.to_string(), "HTTP error! status: 500");
        assert_eq!(err.status_code(), Some(500));
    }

    #[test]
    fn session_guard_errors() {
        let err = Error::invalid_transition(SessionStatus::Idle, SessionStatus::Streaming);
        assert_eq!(
            err.to_string(),
            "Invalid status transition: idle -> streaming"
        );
        assert_eq!(err.status_code(), None);
        assert_eq!(
            Error::entry_locked(Some(2)).to_string(),
            "Transcript entry 2 is locked"
        );
        assert_eq!(Error::entry_locked(None).to_string(), "Transcript is empty");
    }

    #[test]
    fn url_errors_keep_source() {
        let err = Error::from(url::Url::parse("not a url").unwrap_err());
        assert!(error::Error::source(&err).is_some());
    }
}
