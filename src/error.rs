//! Error taxonomy shared by the configuration, persistence, and form layers.
//!
//! Every variant carries a message that is safe to show in the status line,
//! so the UI never needs to inspect driver internals to explain a failure.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryError {
    /// One or more required environment variables were unset or blank.
    #[error("missing environment variables: {}", .missing.join(", "))]
    Configuration { missing: Vec<String> },

    /// A configuration value was present but unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The store could not be reached or rejected the credentials.
    #[error("could not connect to the library database: {0}")]
    Connection(String),

    /// A statement failed after a connection had been acquired.
    #[error("database query failed: {0}")]
    Query(String),

    /// User input rejected before it reached the store.
    #[error("{0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, LibraryError>;

impl LibraryError {
    /// Classify a driver error raised while a statement was running. Transport
    /// failures still count as connection problems even mid-query.
    pub(crate) fn from_statement(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => LibraryError::Connection(err.to_string()),
            other => LibraryError::Query(other.to_string()),
        }
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, LibraryError::Connection(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_error_names_every_missing_key() {
        let err = LibraryError::Configuration {
            missing: vec!["DB_HOST".to_string(), "DB_NAME".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "missing environment variables: DB_HOST, DB_NAME"
        );
    }

    #[test]
    fn validation_error_displays_bare_message() {
        let err = LibraryError::Validation("Please enter a title".to_string());
        assert_eq!(err.to_string(), "Please enter a title");
    }

    #[test]
    fn transport_failures_are_connection_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer");
        let err = LibraryError::from_statement(sqlx::Error::Io(io));
        assert!(err.is_connection());

        let err = LibraryError::from_statement(sqlx::Error::Protocol("bad packet".into()));
        assert!(err.is_connection());
    }

    #[test]
    fn other_driver_failures_are_query_errors() {
        let err = LibraryError::from_statement(sqlx::Error::RowNotFound);
        assert!(matches!(err, LibraryError::Query(_)));
        assert!(!err.is_connection());
    }
}
