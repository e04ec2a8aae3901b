//! Classification of error codes returned by the store.
//!
//! The store reports failures as JSON errors whose `__type` field carries a
//! fully-qualified code like
//! `com.amazonaws.dynamodb.v20120810#ResourceNotFoundException`. A client
//! only needs the short code, and only to decide which failure class a
//! rejection belongs to.

use std::fmt;

/// Well-known store error codes, as seen from the client side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum RemoteErrorKind {
    /// The named table does not exist.
    ResourceNotFound,
    /// The request was malformed: bad expression, bad parameter, bad name.
    Validation,
    /// The store shed the request for capacity reasons.
    Throttled,
    /// The caller's credentials were rejected.
    AccessDenied,
    /// The store did not recognize the caller at all.
    UnrecognizedClient,
    /// The store failed internally.
    Internal,
    /// Any code this client does not know.
    Other,
}

impl RemoteErrorKind {
    /// Classify a short error code string from the store.
    ///
    /// Unknown codes map to [`RemoteErrorKind::Other`] rather than failing:
    /// the store may grow new codes faster than clients update.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        // Strip a smithy-style namespace prefix if one survived this far.
        let code = code.rsplit('#').next().unwrap_or(code);
        match code {
            "ResourceNotFoundException" => Self::ResourceNotFound,
            "ValidationException" | "SerializationException" | "MissingAction" => {
                Self::Validation
            }
            "ProvisionedThroughputExceededException"
            | "ThrottlingException"
            | "RequestLimitExceeded"
            | "LimitExceededException" => Self::Throttled,
            "AccessDeniedException"
            | "IncompleteSignatureException"
            | "InvalidSignatureException"
            | "MissingAuthenticationTokenException"
            | "ExpiredTokenException" => Self::AccessDenied,
            "UnrecognizedClientException" => Self::UnrecognizedClient,
            "InternalServerError" | "ServiceUnavailable" => Self::Internal,
            _ => Self::Other,
        }
    }

    /// Returns the short code string this kind is reported as.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ResourceNotFound => "ResourceNotFound",
            Self::Validation => "Validation",
            Self::Throttled => "Throttled",
            Self::AccessDenied => "AccessDenied",
            Self::UnrecognizedClient => "UnrecognizedClient",
            Self::Internal => "Internal",
            Self::Other => "Other",
        }
    }

    /// Whether this kind denotes a session/auth failure rather than a
    /// rejection of the request itself.
    #[must_use]
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::AccessDenied | Self::UnrecognizedClient)
    }
}

impl fmt::Display for RemoteErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
