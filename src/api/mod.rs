//! Remote API surface: the OAuth handshake and the publish calls
//!
//! [`StatusApi`] is the seam the session host is written against; the real
//! implementation composes the [`oauth::CredentialGate`] and the
//! [`publish::Publisher`] over one signed HTTP client.

pub mod oauth;
pub mod publish;

use std::env::consts;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::HeaderMap;

use crate::config::Config;
use crate::error::{AuthError, ExchangeError, PublishError};
use crate::models::{
    AccessTokenPair, AuthorizeCode, ImageAttachment, MediaId, PostResult, RequestTokenPair,
    UserCredentials,
};

/// Application (consumer) key pair used to sign every request
#[derive(Debug, Clone)]
pub struct ConsumerKeys {
    /// Consumer key
    pub key: String,
    /// Consumer secret
    pub secret: String,
}

/// Everything the session host needs from the remote service
///
/// One trait rather than two so a single stub can stand in for the whole
/// network edge; the production implementation still splits the work
/// between the credential gate and the publisher.
#[async_trait]
pub trait StatusApi: Send + Sync {
    /// Acquire a short-lived request token pair (handshake step 1)
    async fn acquire_request_token(&self) -> Result<RequestTokenPair, AuthError>;

    /// URL the user must visit to authorize the request token
    fn authorize_url(&self, pair: &RequestTokenPair) -> String;

    /// Redeem the authorize code for an access token pair (step 2)
    async fn exchange_authorize_code(
        &self,
        pair: &RequestTokenPair,
        code: &AuthorizeCode,
    ) -> Result<AccessTokenPair, ExchangeError>;

    /// Fetch the profile snapshot for a fresh access token pair (step 3)
    async fn verify_credentials(
        &self,
        access: &AccessTokenPair,
    ) -> Result<UserCredentials, AuthError>;

    /// Upload one image, returning the media id to attach to a post
    async fn upload_image(
        &self,
        image: &ImageAttachment,
        access: &AccessTokenPair,
    ) -> Result<MediaId, PublishError>;

    /// Post a status, optionally referencing an uploaded media id
    async fn post_status(
        &self,
        text: &str,
        access: &AccessTokenPair,
        media_id: Option<&MediaId>,
    ) -> Result<PostResult, PublishError>;
}

/// Production [`StatusApi`] backed by the Twitter-style v1.1 endpoints
#[derive(Clone)]
pub struct TwitterApi {
    gate: oauth::CredentialGate,
    publisher: publish::Publisher,
}

impl TwitterApi {
    /// Build the API client from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("accept", "application/json".parse()?);
        headers.insert(
            "user-agent",
            format!(
                "{}/{} on {}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                consts::OS
            )
            .parse()?,
        );

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        let consumer = ConsumerKeys {
            key: config.consumer_key.clone(),
            secret: config.consumer_secret.clone(),
        };

        Ok(Self {
            gate: oauth::CredentialGate::new(
                client.clone(),
                consumer.clone(),
                &config.api_base_url,
            ),
            publisher: publish::Publisher::new(
                client,
                consumer,
                &config.api_base_url,
                &config.upload_base_url,
            ),
        })
    }
}

#[async_trait]
impl StatusApi for TwitterApi {
    async fn acquire_request_token(&self) -> Result<RequestTokenPair, AuthError> {
        self.gate.acquire_request_token().await
    }

    fn authorize_url(&self, pair: &RequestTokenPair) -> String {
        self.gate.authorize_url(pair)
    }

    async fn exchange_authorize_code(
        &self,
        pair: &RequestTokenPair,
        code: &AuthorizeCode,
    ) -> Result<AccessTokenPair, ExchangeError> {
        self.gate.exchange_authorize_code(pair, code).await
    }

    async fn verify_credentials(
        &self,
        access: &AccessTokenPair,
    ) -> Result<UserCredentials, AuthError> {
        self.gate.verify_credentials(access).await
    }

    async fn upload_image(
        &self,
        image: &ImageAttachment,
        access: &AccessTokenPair,
    ) -> Result<MediaId, PublishError> {
        self.publisher.upload_image(image, access).await
    }

    async fn post_status(
        &self,
        text: &str,
        access: &AccessTokenPair,
        media_id: Option<&MediaId>,
    ) -> Result<PostResult, PublishError> {
        self.publisher.post_status(text, access, media_id).await
    }
}
