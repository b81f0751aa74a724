//! Storage error types

use std::error::Error as StdError;
use thiserror::Error;

/// Boxed error for wrapping driver-specific errors
pub type BoxedError = Box<dyn StdError + Send + Sync>;

/// Network-level failure classes that are worth exactly one immediate retry.
///
/// This set is closed: anything not listed here is treated as permanent by
/// the executor. These are the Rust-side equivalents of the `ETIMEDOUT`,
/// `ECONNRESET` and `EAI_AGAIN` socket error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransientKind {
    /// Connection attempt timed out
    ConnectTimeout,
    /// Peer reset the connection
    ConnectionReset,
    /// Temporary DNS resolution failure
    DnsTemporary,
}

impl std::fmt::Display for TransientKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransientKind::ConnectTimeout => write!(f, "connect timeout"),
            TransientKind::ConnectionReset => write!(f, "connection reset"),
            TransientKind::DnsTemporary => write!(f, "temporary dns failure"),
        }
    }
}

/// Data-access layer errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Classified-transient network failure; eligible for one retry
    #[error("transient failure ({kind}): {message}")]
    Transient {
        kind: TransientKind,
        message: String,
        #[source]
        source: Option<BoxedError>,
    },

    /// Connection or pool failure
    #[error("connection failed: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<BoxedError>,
    },

    /// Query execution failure
    #[error("query failed: {message}")]
    Query {
        message: String,
        #[source]
        source: Option<BoxedError>,
    },

    /// Fragment/value arity mismatch handed to the query builder
    #[error("invalid query shape: {0} fragments for {1} values")]
    InvalidQueryShape(usize, usize),

    /// Invalid connection string
    #[error("invalid connection string: {0}")]
    InvalidConnectionString(String),

    /// Row decode failure (corruption or schema drift)
    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl StoreError {
    /// Create a connection error with source
    pub fn connection(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::Connection {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a query error with source
    pub fn query(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::Query {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether this failure is in the closed transient set
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }
}
