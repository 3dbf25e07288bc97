//! Application error types with rich context

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Terminal/TUI Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    #[error("Failed to initialize terminal: {0}")]
    TerminalInit(String),

    // ─────────────────────────────────────────────────────────────
    // Domain Errors
    // ─────────────────────────────────────────────────────────────
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Detection(#[from] DetectionError),

    #[error(transparent)]
    CatalogLoad(#[from] CatalogLoadError),

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid configuration: {message}")]
    ConfigInvalid { message: String },

    #[error("Image file not found: {path}")]
    ImageNotFound { path: PathBuf },

    // ─────────────────────────────────────────────────────────────
    // Channel/Communication Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Channel send error: {message}")]
    ChannelSend { message: String },

    #[error("Channel closed unexpectedly")]
    ChannelClosed,
}

/// Rejection of a candidate image by the file selector.
///
/// The staged file is left untouched whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Unsupported file type '{mime_type}'. Use JPG, JPEG, or PNG.")]
    UnsupportedType { mime_type: String },

    #[error("File is too large ({}). Maximum size is {}.", human(.size_bytes), human(.limit_bytes))]
    TooLarge { size_bytes: u64, limit_bytes: u64 },
}

/// Failure of a single detection request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetectionError {
    /// The server answered with a failure (non-2xx status or an `error` body).
    #[error("{message}")]
    Server { status: Option<u16>, message: String },

    /// The request never produced an HTTP response (DNS, connect, reset, ...).
    #[error("Network error: {message}")]
    Transport { message: String },

    /// No response within the configured deadline.
    #[error("Request timed out after {secs}s")]
    Timeout { secs: u64 },

    /// A 2xx response whose body is not a detection result.
    #[error("Invalid response from server: {message}")]
    InvalidResponse { message: String },
}

/// Failure to populate the wound info catalog. Logged only, never shown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogLoadError {
    #[error("Failed to fetch catalog from {source_name}: {message}")]
    Fetch {
        source_name: String,
        message: String,
    },

    #[error("Failed to parse catalog: {message}")]
    Parse { message: String },
}

fn human(bytes: &u64) -> String {
    crate::format_bytes(*bytes)
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            message: message.into(),
        }
    }

    pub fn image_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ImageNotFound { path: path.into() }
    }

    pub fn channel_send(message: impl Into<String>) -> Self {
        Self::ChannelSend {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Validation(_)
                | Error::Detection(_)
                | Error::CatalogLoad(_)
                | Error::ImageNotFound { .. }
                | Error::ChannelSend { .. }
        )
    }

    /// Check if this error should trigger application exit
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::TerminalInit(_) | Error::ConfigInvalid { .. } | Error::ChannelClosed
        )
    }
}

impl DetectionError {
    /// Generic message used when a failing response carries no `error` field
    pub const GENERIC_MESSAGE: &'static str = "Detection failed";

    pub fn server(status: Option<u16>, message: Option<String>) -> Self {
        Self::Server {
            status,
            message: message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| Self::GENERIC_MESSAGE.to_string()),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// True when the failure happened before any HTTP response arrived
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            DetectionError::Transport { .. } | DetectionError::Timeout { .. }
        )
    }
}

impl CatalogLoadError {
    pub fn fetch(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions (for use with color-eyre)
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::config("bad value");
        assert_eq!(err.to_string(), "Configuration error: bad value");

        let err = Error::image_not_found("/tmp/missing.png");
        assert!(err.to_string().contains("/tmp/missing.png"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_domain_errors_are_recoverable() {
        let err: Error = ValidationError::UnsupportedType {
            mime_type: "image/gif".to_string(),
        }
        .into();
        assert!(err.is_recoverable());
        assert!(!err.is_fatal());

        let err: Error = DetectionError::transport("connection refused").into();
        assert!(err.is_recoverable());

        let err: Error = CatalogLoadError::parse("eof").into();
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_error_is_fatal() {
        assert!(Error::TerminalInit("no tty".to_string()).is_fatal());
        assert!(Error::config_invalid("base_url").is_fatal());
        assert!(!Error::config("soft").is_fatal());
    }

    #[test]
    fn test_unsupported_type_message() {
        let err = ValidationError::UnsupportedType {
            mime_type: "image/gif".to_string(),
        };
        assert!(err.to_string().contains("image/gif"));
        assert!(err.to_string().contains("PNG"));
    }

    #[test]
    fn test_too_large_message_uses_human_sizes() {
        let err = ValidationError::TooLarge {
            size_bytes: 20 * 1024 * 1024,
            limit_bytes: 16 * 1024 * 1024,
        };
        let msg = err.to_string();
        assert!(msg.contains("20.0 MB"), "got: {msg}");
        assert!(msg.contains("16.0 MB"), "got: {msg}");
    }

    #[test]
    fn test_server_error_prefers_server_message() {
        let err = DetectionError::server(Some(400), Some("Invalid file format".to_string()));
        assert_eq!(err.to_string(), "Invalid file format");
    }

    #[test]
    fn test_server_error_falls_back_to_generic_message() {
        let err = DetectionError::server(Some(500), None);
        assert_eq!(err.to_string(), DetectionError::GENERIC_MESSAGE);

        let err = DetectionError::server(Some(500), Some("   ".to_string()));
        assert_eq!(err.to_string(), DetectionError::GENERIC_MESSAGE);
    }

    #[test]
    fn test_transport_is_distinct_from_server() {
        assert!(DetectionError::transport("reset").is_network());
        assert!(DetectionError::Timeout { secs: 5 }.is_network());
        assert!(!DetectionError::server(Some(500), None).is_network());
    }
}
