//! Credential models for the OAuth 1.0a handshake

use serde::{Deserialize, Serialize};

/// Short-lived token pair issued by the request-token call
///
/// Only good for redeeming an [`AccessTokenPair`]; discarded after the
/// exchange or when the user cancels the handshake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestTokenPair {
    /// The `oauth_token` value
    pub token: String,
    /// The `oauth_token_secret` value
    pub secret: String,
}

/// Long-lived (for the session) token pair used to sign API requests
///
/// Owned by the caller after issuance; the session never stores it, so
/// every publish command supplies it again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenPair {
    /// The `oauth_token` value
    pub token: String,
    /// The `oauth_token_secret` value
    pub secret: String,
}

/// Opaque verifier the user copies out of the authorization page
///
/// Single-use: redeeming it consumes the request token pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizeCode(pub String);

impl AuthorizeCode {
    /// The raw verifier string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AuthorizeCode {
    fn from(code: &str) -> Self {
        Self(code.trim().to_string())
    }
}

/// Read-only profile snapshot from the verify-credentials call
///
/// Immutable after creation; the `profile_image_url_https` wire field is
/// mapped onto [`Self::profile_image_url`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCredentials {
    /// Display name
    pub name: String,
    /// Handle, without the leading `@`
    pub screen_name: String,
    /// Free-form location field
    #[serde(default)]
    pub location: Option<String>,
    /// Profile bio
    #[serde(default)]
    pub description: Option<String>,
    /// Offset from UTC in seconds
    #[serde(default)]
    pub utc_offset: Option<i64>,
    /// Named time zone
    #[serde(default)]
    pub time_zone: Option<String>,
    /// Whether the account attaches locations to posts
    #[serde(default)]
    pub geo_enabled: bool,
    /// Interface language
    #[serde(default)]
    pub lang: Option<String>,
    /// HTTPS avatar URL
    #[serde(rename = "profile_image_url_https")]
    pub profile_image_url: Option<String>,
}
