//! Scan failure taxonomy.
//!
//! Every failure is terminal for the whole scan: nothing is retried locally
//! and a failure on page N discards results accumulated from earlier pages.
//! Transient faults (throttling included) propagate so the caller decides
//! what to do with them.

use tablescan_model::RemoteErrorKind;

use crate::expression::BuildError;
use crate::record::DeserializationError;

/// Terminal failure of a scan.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The store could not be reached: session establishment, credential
    /// rejection, connect/timeout failure.
    #[error("failed to reach the store: {message}")]
    Connection {
        /// Human-readable description of the failure.
        message: String,
        /// The underlying transport or SDK error, when one exists.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The store rejected the request: malformed expression, unknown table,
    /// throttling or capacity shedding.
    #[error("the store rejected the request ({kind}): {message}")]
    Request {
        /// Classified store error code.
        kind: RemoteErrorKind,
        /// The store's own message.
        message: String,
    },

    /// A returned attribute map did not match the record shape.
    #[error(transparent)]
    Deserialization(#[from] DeserializationError),

    /// The filter or projection could not be rendered into wire form; no
    /// request was issued.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// The caller's deadline passed before the next page request.
    #[error("scan deadline exceeded before the next page request")]
    DeadlineExceeded,
}

impl ScanError {
    /// Connection-class failure with no underlying error to attach.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Request-class failure with the store's classified code and message.
    #[must_use]
    pub fn request(kind: RemoteErrorKind, message: impl Into<String>) -> Self {
        Self::Request {
            kind,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_render_request_error_with_kind() {
        let err = ScanError::request(RemoteErrorKind::Throttled, "slow down");
        assert_eq!(
            err.to_string(),
            "the store rejected the request (Throttled): slow down"
        );
    }

    #[test]
    fn test_should_wrap_deserialization_error_transparently() {
        let err: ScanError = DeserializationError::MissingAttribute {
            path: "title".to_owned(),
        }
        .into();
        assert_eq!(err.to_string(), r#"required attribute "title" is missing"#);
    }
}
