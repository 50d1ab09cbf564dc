//! Error types for holder score resolution.

use std::time::Duration;

/// Holder statistics errors.
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    /// No score entry exists for the holder.
    #[error("holder not found: {address}")]
    HolderNotFound { address: String },

    /// Holder enumeration failed.
    #[error("holder source error: {message}")]
    Source { message: String },

    /// External scoring provider failed.
    #[error("scorer error: {message}")]
    Scorer { message: String },

    /// Score store failed.
    #[error("store error: {message}")]
    Store { message: String },

    /// Network error.
    #[error("network error: {message}")]
    Network { message: String },

    /// Rate limit exceeded.
    #[error("rate limited: retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    /// Authentication failed or token invalid.
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    /// Invalid response from a provider.
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },

    /// Configuration error.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Holder enumeration returned a different number of holders than announced.
    #[error("holder count mismatch: expected {expected}, got {actual}")]
    CountMismatch { expected: usize, actual: usize },

    /// Resolution was cancelled between holders.
    #[error("resolution cancelled after {resolved} holders")]
    Cancelled { resolved: usize },

    /// Error tagged with the operation that produced it.
    #[error("{operation}: {source}")]
    Operation {
        operation: &'static str,
        #[source]
        source: Box<StatsError>,
    },
}

impl StatsError {
    /// Tag this error with the operation that produced it.
    pub fn during(self, operation: &'static str) -> Self {
        Self::Operation {
            operation,
            source: Box::new(self),
        }
    }

    /// Innermost error, with operation tags stripped.
    pub fn root(&self) -> &StatsError {
        match self {
            Self::Operation { source, .. } => source.root(),
            other => other,
        }
    }

    /// Whether the error is a store miss.
    pub fn is_not_found(&self) -> bool {
        matches!(self.root(), Self::HolderNotFound { .. })
    }

    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self.root() {
            Self::Config { .. } => 2,
            Self::Cancelled { .. } => 3,
            _ => 1,
        }
    }
}

impl From<rusqlite::Error> for StatsError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Store {
            message: err.to_string(),
        }
    }
}

/// Result type for holder statistics operations.
pub type StatsResult<T> = Result<T, StatsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_seen_through_operation_tags() {
        let err = StatsError::HolderNotFound {
            address: "0xabc".to_string(),
        }
        .during("store.get")
        .during("resolve_scores");

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "resolve_scores: store.get: holder not found: 0xabc");
    }

    #[test]
    fn test_exit_codes() {
        let config = StatsError::Config {
            message: "bad".to_string(),
        };
        assert_eq!(config.exit_code(), 2);

        let cancelled = StatsError::Cancelled { resolved: 3 }.during("resolve");
        assert_eq!(cancelled.exit_code(), 3);

        let store = StatsError::Store {
            message: "disk full".to_string(),
        };
        assert_eq!(store.exit_code(), 1);
    }
}
