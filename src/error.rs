//! Typed errors for the portal query pipeline.
//!
//! `FetchError` covers a single page request; `ValidationError` covers
//! caller mistakes caught before any network traffic. The CLI boundary
//! wraps both in `anyhow` like every other command in this crate.

use thiserror::Error;

/// Failure of a single page request against the portal.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level failure: connect, timeout, TLS.
    #[error("connection failed: {0}")]
    Transport(String),

    /// The portal answered with a non-success status.
    #[error("server error: HTTP {0}")]
    Status(u16),

    /// The body was not the expected `{total, data}` JSON shape.
    #[error("malformed response: {message}")]
    Parse {
        message: String,
        /// Bounded excerpt of the raw body for diagnostics. Never the
        /// full payload.
        snippet: Option<String>,
    },
}

impl FetchError {
    /// Raw-body excerpt, when one was captured.
    pub fn snippet(&self) -> Option<&str> {
        match self {
            FetchError::Parse { snippet, .. } => snippet.as_deref(),
            _ => None,
        }
    }
}

/// Caller-side misuse detected before any request is issued.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Neither a south nor a north call sign was supplied.
    #[error("at least one call sign (south or north) is required")]
    NoCallSign,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_messages() {
        assert_eq!(
            FetchError::Transport("timed out".into()).to_string(),
            "connection failed: timed out"
        );
        assert_eq!(FetchError::Status(502).to_string(), "server error: HTTP 502");
        let parse = FetchError::Parse {
            message: "expected value at line 1".into(),
            snippet: Some("<html>".into()),
        };
        assert_eq!(
            parse.to_string(),
            "malformed response: expected value at line 1"
        );
        assert_eq!(parse.snippet(), Some("<html>"));
    }

    #[test]
    fn test_non_parse_errors_have_no_snippet() {
        assert!(FetchError::Status(500).snippet().is_none());
        assert!(FetchError::Transport("x".into()).snippet().is_none());
    }
}
