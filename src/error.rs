//! Error taxonomy for the handshake, publish, and validation paths
//!
//! Every remote failure surfaces one level up as a named outcome and is
//! never retried; the caller retries by reissuing the command.

use thiserror::Error;

/// Failure of a handshake step (request token or verify credentials)
#[derive(Debug, Error)]
pub enum AuthError {
    /// The signed request never produced a response
    #[error("request could not be sent: {0}")]
    Transport(String),

    /// The response arrived but its body could not be read or decoded
    #[error("failed to read response: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("service rejected the request ({status}): {body}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// A token response was missing `oauth_token` or `oauth_token_secret`
    #[error("malformed token response: {0}")]
    MalformedResponse(String),
}

/// Failure to redeem an authorize code for an access token pair
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// The authorization window is gone, so the request token pair is stale
    #[error("no authorization window is open")]
    WindowClosed,

    /// The exchange call itself failed
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Failure of the media upload or the status post
#[derive(Debug, Error)]
pub enum PublishError {
    /// The signed request never produced a response
    #[error("request could not be sent: {0}")]
    Transport(String),

    /// The response arrived but its body could not be read or decoded
    #[error("failed to read response: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    ///
    /// `payload` is the remote body, passed through verbatim so an upload
    /// failure reaches the caller with the service's own error, not a
    /// synthesized one.
    #[error("service rejected the request ({status}): {payload}")]
    Remote {
        /// HTTP status code
        status: u16,
        /// Remote error payload (JSON when the service sent JSON)
        payload: serde_json::Value,
    },
}

/// Local image rejection; never reaches the network layer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Extension outside the accepted set
    #[error("unsupported image format {extension:?}")]
    UnsupportedFormat {
        /// The offending extension, with leading dot
        extension: String,
    },

    /// File too large for its format
    #[error("{extension} images must be less than {limit_mb}mb (got {size_mb:.1}mb)")]
    TooLarge {
        /// Extension with leading dot
        extension: String,
        /// Actual size in megabytes
        size_mb: f64,
        /// Ceiling for this format in megabytes
        limit_mb: f64,
    },
}
