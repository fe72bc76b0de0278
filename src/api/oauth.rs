//! Credential gate: the three-legged OAuth 1.0a handshake
//!
//! Three strictly ordered remote calls, each a single attempt with no
//! retry: request token, authorize-code exchange, credential verification.
//! Ordering is enforced by the type flow, each call consuming the previous
//! call's result.

use reqwest::Method;
use reqwest_oauth1::{OAuthClientProvider, Secrets};

use super::ConsumerKeys;
use crate::error::{AuthError, ExchangeError};
use crate::models::{AccessTokenPair, AuthorizeCode, RequestTokenPair, UserCredentials};

/// Path the authorization window lands on when the service is ready to
/// show the user a code; the session watches navigation events for it.
pub const AUTHORIZE_PATH: &str = "/oauth/authenticate";

/// Out-of-band callback marker: the service displays the verifier instead
/// of redirecting to an app URL.
const OOB_CALLBACK: &str = "oob";

/// Drives the OAuth 1.0a handshake against one service instance
#[derive(Clone)]
pub struct CredentialGate {
    client: reqwest::Client,
    consumer: ConsumerKeys,
    api_base: String,
}

impl CredentialGate {
    /// Create a gate for the service rooted at `api_base`
    pub fn new(client: reqwest::Client, consumer: ConsumerKeys, api_base: &str) -> Self {
        Self {
            client,
            consumer,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    fn consumer_secrets(&self) -> Secrets<'static> {
        Secrets::new(self.consumer.key.clone(), self.consumer.secret.clone())
    }

    /// Handshake step 1: acquire a request token pair
    pub async fn acquire_request_token(&self) -> Result<RequestTokenPair, AuthError> {
        let url = format!("{}/oauth/request_token", self.api_base);

        let response = self
            .client
            .clone()
            .oauth1(self.consumer_secrets())
            .request(Method::POST, &url)
            .query(&[("oauth_callback", OOB_CALLBACK)])
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let body = read_success_body(response).await?;
        let (token, secret) = parse_token_response(&body)?;

        Ok(RequestTokenPair { token, secret })
    }

    /// Where to send the user's browser after step 1
    pub fn authorize_url(&self, pair: &RequestTokenPair) -> String {
        format!(
            "{}{}?oauth_token={}",
            self.api_base,
            AUTHORIZE_PATH,
            urlencoding::encode(&pair.token)
        )
    }

    /// Handshake step 2: redeem the authorize code for an access token pair
    pub async fn exchange_authorize_code(
        &self,
        pair: &RequestTokenPair,
        code: &AuthorizeCode,
    ) -> Result<AccessTokenPair, ExchangeError> {
        let url = format!("{}/oauth/access_token", self.api_base);
        let secrets = self
            .consumer_secrets()
            .token(pair.token.clone(), pair.secret.clone());

        let response = self
            .client
            .clone()
            .oauth1(secrets)
            .request(Method::POST, &url)
            .query(&[("oauth_verifier", code.as_str())])
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let body = read_success_body(response).await?;
        let (token, secret) = parse_token_response(&body)?;

        Ok(AccessTokenPair { token, secret })
    }

    /// Handshake step 3: fetch the profile behind a fresh access token pair
    pub async fn verify_credentials(
        &self,
        access: &AccessTokenPair,
    ) -> Result<UserCredentials, AuthError> {
        let url = format!("{}/1.1/account/verify_credentials.json", self.api_base);
        let secrets = self
            .consumer_secrets()
            .token(access.token.clone(), access.secret.clone());

        let response = self
            .client
            .clone()
            .oauth1(secrets)
            .request(Method::GET, &url)
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let body = read_success_body(response).await?;
        serde_json::from_str(&body).map_err(|e| AuthError::MalformedResponse(e.to_string()))
    }
}

/// Read the body, turning non-success statuses into [`AuthError::Rejected`]
async fn read_success_body(response: reqwest::Response) -> Result<String, AuthError> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        Ok(body)
    } else {
        Err(AuthError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

/// Pull `oauth_token` and `oauth_token_secret` out of a urlencoded
/// token-endpoint response body.
fn parse_token_response(body: &str) -> Result<(String, String), AuthError> {
    let mut token = None;
    let mut secret = None;

    for pair in body.split('&') {
        let mut parts = pair.splitn(2, '=');
        match (parts.next(), parts.next()) {
            (Some("oauth_token"), Some(value)) => token = Some(decode_value(value)),
            (Some("oauth_token_secret"), Some(value)) => secret = Some(decode_value(value)),
            _ => {}
        }
    }

    match (token, secret) {
        (Some(token), Some(secret)) => Ok((token, secret)),
        _ => Err(AuthError::MalformedResponse(body.to_string())),
    }
}

fn decode_value(value: &str) -> String {
    urlencoding::decode(value).map_or_else(|_| value.to_string(), |decoded| decoded.into_owned())
}
