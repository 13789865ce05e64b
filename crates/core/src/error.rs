//! Error handling for the solrnav core library

use std::fmt;
use thiserror::Error;

/// Result type alias for solrnav operations
pub type Result<T> = std::result::Result<T, SolrError>;

/// Maximum number of body bytes echoed into an HTTP status error
const BODY_EXCERPT_LIMIT: usize = 512;

/// Main error type for solrnav operations
#[derive(Error, Debug)]
pub enum SolrError {
    /// IO-related errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Connection or IO failure while talking to Solr
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// Solr answered with a non-2xx status
    #[error("HTTP Status: {status}. Body: {body}")]
    HttpStatus { status: String, body: String },

    /// The response body was not the JSON envelope we expected
    #[error("Decode error: {message}{}", content_type_hint(.content_type))]
    Decode {
        message: String,
        content_type: Option<String>,
    },

    /// The request went through but Solr reported a failure
    #[error("Solr error (code {code}): {message}")]
    SolrReported { code: i64, message: String },

    /// A single-document lookup matched more than one document
    #[error("More than one document was found (q={q}, count={count})")]
    MultipleDocuments { q: String, count: usize },

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },
}

fn content_type_hint(content_type: &Option<String>) -> String {
    match content_type {
        Some(ct) => format!(". Solr's response Content-Type: {}", ct),
        None => String::new(),
    }
}

impl SolrError {
    /// Create a transport error
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create an HTTP status error, keeping only an excerpt of the body
    pub fn http_status<S: Into<String>>(status: S, body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body);
        let body = match text.char_indices().nth(BODY_EXCERPT_LIMIT) {
            Some((idx, _)) => format!("{}...", &text[..idx]),
            None => text.into_owned(),
        };
        Self::HttpStatus {
            status: status.into(),
            body,
        }
    }

    /// Create a decode error
    pub fn decode<S: Into<String>>(message: S, content_type: Option<String>) -> Self {
        Self::Decode {
            message: message.into(),
            content_type,
        }
    }

    /// Create a Solr-reported error
    pub fn solr_reported<S: Into<String>>(code: i64, message: S) -> Self {
        Self::SolrReported {
            code,
            message: message.into(),
        }
    }

    /// Create a multiple documents error
    pub fn multiple_documents<S: Into<String>>(q: S, count: usize) -> Self {
        Self::MultipleDocuments { q: q.into(), count }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Io(_) => ErrorCategory::FileSystem,
            Self::Transport { .. } => ErrorCategory::Transport,
            Self::HttpStatus { .. } => ErrorCategory::Http,
            Self::Json(_) | Self::Yaml(_) | Self::Decode { .. } => ErrorCategory::Serialization,
            Self::Config(_) => ErrorCategory::Configuration,
            Self::Url(_) => ErrorCategory::Url,
            Self::SolrReported { .. } => ErrorCategory::Solr,
            Self::MultipleDocuments { .. } => ErrorCategory::Query,
            Self::Validation { .. } => ErrorCategory::Validation,
        }
    }
}

/// Error categories for logging
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    FileSystem,
    Transport,
    Http,
    Serialization,
    Configuration,
    Url,
    Solr,
    Query,
    Validation,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileSystem => write!(f, "filesystem"),
            Self::Transport => write!(f, "transport"),
            Self::Http => write!(f, "http"),
            Self::Serialization => write!(f, "serialization"),
            Self::Configuration => write!(f, "configuration"),
            Self::Url => write!(f, "url"),
            Self::Solr => write!(f, "solr"),
            Self::Query => write!(f, "query"),
            Self::Validation => write!(f, "validation"),
        }
    }
}
