/// Error categories used to classify every failure the provider can surface.
///
/// Each crate's error type maps onto one of these so the orchestrator-facing
/// layer can decide whether a condition is recoverable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Missing or unusable credential or endpoint. Raised before any network call.
    Configuration,
    /// DNS, TLS, timeout or connection failure.
    Transport,
    /// The remote API answered 404 for the repository.
    NotFound,
    /// Any other non-success status from the remote API.
    Remote,
    /// A composite identifier that cannot be split into service and name.
    MalformedIdentifier,
    /// A success status whose body could not be decoded.
    Serialization,
    /// The caller cancelled the operation while a request was in flight.
    Cancelled,
}

impl ErrorCategory {
    /// Whether re-running the same operation could plausibly succeed.
    ///
    /// Nothing in this workspace retries on its own; this only informs the caller.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport | Self::Cancelled)
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration => write!(f, "configuration"),
            Self::Transport => write!(f, "transport"),
            Self::NotFound => write!(f, "not_found"),
            Self::Remote => write!(f, "remote"),
            Self::MalformedIdentifier => write!(f, "malformed_identifier"),
            Self::Serialization => write!(f, "serialization"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}
