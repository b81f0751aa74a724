//! Two-tier authorization for the query endpoint
//!
//! Same-origin callers (the dashboard's own server-rendered pages) are
//! trusted by host-header equality and need no credential; everyone else
//! must present the shared bearer secret.
//!
//! Host-header trust is spoofable by any client that sets its own
//! `Host`/`X-Forwarded-Host`, so this tier is only sound behind a reverse
//! proxy that overwrites those headers. Deployments without that guarantee
//! should rely on the bearer tier alone.

/// Outcome of the authorization decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthDecision {
    Allowed,
    Denied,
}

/// Decide whether a query-path request may proceed.
///
/// Decision order:
/// 1. The declared host (`X-Forwarded-Host`, else `Host`) matching the
///    configured public host case-insensitively allows unconditionally.
/// 2. Otherwise the bearer token from `Authorization` must equal the
///    configured secret byte-for-byte and be non-empty. A missing secret
///    denies every external caller.
pub fn authorize(
    public_host: &str,
    host: Option<&str>,
    forwarded_host: Option<&str>,
    authorization: Option<&str>,
    secret: Option<&str>,
) -> AuthDecision {
    let declared = forwarded_host.or(host);
    if let Some(declared) = declared {
        if declared.eq_ignore_ascii_case(public_host) {
            return AuthDecision::Allowed;
        }
    }

    let token = authorization.map(strip_bearer).unwrap_or("");
    match secret {
        Some(secret) if !token.is_empty() && token.as_bytes() == secret.as_bytes() => {
            AuthDecision::Allowed
        }
        _ => AuthDecision::Denied,
    }
}

/// Strip a case-insensitive `Bearer` prefix and the whitespace after it.
/// A header without the prefix is used as-is.
fn strip_bearer(header: &str) -> &str {
    if header.len() >= 6 && header[..6].eq_ignore_ascii_case("bearer") {
        header[6..].trim_start()
    } else {
        header
    }
}
