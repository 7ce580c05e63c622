use thiserror::Error;

use crate::config::ConfigError;

/// Top-level error type for the `hubctl-api` crate.
///
/// Covers every failure mode of a single API call: configuration,
/// transport, status classification, and response decoding.
/// The CLI maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Configuration ───────────────────────────────────────────────
    /// Missing or malformed configuration. Raised before any network
    /// activity takes place.
    #[error(transparent)]
    Config(#[from] ConfigError),

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, TLS,
    /// timeout, or a failed body read after a 2xx status).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The caller cancelled the request before a response arrived.
    #[error("Request cancelled before a response was received")]
    Cancelled,

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup error (unreadable or invalid CA certificate).
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Status ──────────────────────────────────────────────────────
    /// The hub answered with a non-2xx status. The error body is not parsed.
    #[error("Hub responded with HTTP {status} instead of 2xx")]
    UnexpectedStatus { status: u16 },

    // ── Data ────────────────────────────────────────────────────────
    /// Request body could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Decode { message: String, body: String },

    // ── OAuth ───────────────────────────────────────────────────────
    /// The `state` parameter of an OAuth callback did not match.
    #[error("OAuth callback state does not match the expected state")]
    OAuthStateMismatch,

    /// An OAuth callback carried no `code` parameter.
    #[error("OAuth callback carries no authorization code")]
    OAuthMissingCode,
}

impl Error {
    /// Returns `true` for transport-class failures, including cancellation.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Cancelled)
    }

    /// Returns `true` if the call was cancelled by the caller.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` if the hub rejected the credentials.
    pub fn is_auth_rejected(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// The HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
