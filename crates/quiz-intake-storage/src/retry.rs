//! Single-retry execution for transient network failures
//!
//! The executor retries an identical operation exactly once when the
//! failure falls in the closed transient set; everything else propagates
//! immediately. No backoff: a caller's single logical call takes at most
//! two round trips.

use std::future::Future;

use crate::error::{StoreError, TransientKind};

/// Classify a driver error into the closed transient set, if it fits.
pub fn transient_kind(err: &sqlx::Error) -> Option<TransientKind> {
    let io = match err {
        sqlx::Error::Io(io) => io,
        _ => return None,
    };
    match io.kind() {
        std::io::ErrorKind::TimedOut => Some(TransientKind::ConnectTimeout),
        std::io::ErrorKind::ConnectionReset => Some(TransientKind::ConnectionReset),
        // getaddrinfo reports EAI_AGAIN as an uncategorized io error; the
        // message text is the only stable signal for it.
        _ if io.to_string().contains("name resolution") => Some(TransientKind::DnsTemporary),
        _ => None,
    }
}

/// Wrap a driver error, tagging it transient when it classifies as such.
///
/// Pool exhaustion past its acquire timeout is a connection error, not a
/// transient one: retrying immediately against a drained pool cannot help.
pub fn classify(message: &str, err: sqlx::Error) -> StoreError {
    match transient_kind(&err) {
        Some(kind) => StoreError::Transient {
            kind,
            message: message.to_string(),
            source: Some(Box::new(err)),
        },
        None => match err {
            sqlx::Error::PoolTimedOut => {
                StoreError::connection("connection pool exhausted", err)
            }
            _ => StoreError::query(message, err),
        },
    }
}

/// Run an operation, retrying it exactly once on a transient failure.
///
/// The retry reruns the identical operation synchronously from the caller's
/// perspective. A second failure of any kind propagates.
pub async fn with_single_retry<T, F, Fut>(op: F) -> Result<T, StoreError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, StoreError>>,
{
    match op().await {
        Err(err) if err.is_transient() => {
            tracing::debug!(error = %err, "transient store failure, retrying once");
            op().await
        }
        other => other,
    }
}
