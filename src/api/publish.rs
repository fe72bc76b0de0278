//! Publisher: media upload and status post
//!
//! When a post carries an attachment the upload must finish first and its
//! media id is passed through verbatim; an upload failure short-circuits
//! the chain and the status is never posted.

use reqwest::Method;
use reqwest::multipart::Form;
use reqwest_oauth1::{OAuthClientProvider, Secrets};
use serde::Deserialize;

use super::ConsumerKeys;
use crate::error::PublishError;
use crate::models::{AccessTokenPair, ImageAttachment, MediaId, PostResult};

/// Publishes statuses (and their single optional image) for one service
#[derive(Clone)]
pub struct Publisher {
    client: reqwest::Client,
    consumer: ConsumerKeys,
    api_base: String,
    upload_base: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    media_id_string: String,
}

impl Publisher {
    /// Create a publisher for the service rooted at the two base URLs
    pub fn new(
        client: reqwest::Client,
        consumer: ConsumerKeys,
        api_base: &str,
        upload_base: &str,
    ) -> Self {
        Self {
            client,
            consumer,
            api_base: api_base.trim_end_matches('/').to_string(),
            upload_base: upload_base.trim_end_matches('/').to_string(),
        }
    }

    fn secrets(&self, access: &AccessTokenPair) -> Secrets<'static> {
        Secrets::new(self.consumer.key.clone(), self.consumer.secret.clone())
            .token(access.token.clone(), access.secret.clone())
    }

    /// Upload one image, returning the media id to attach to the post
    pub async fn upload_image(
        &self,
        image: &ImageAttachment,
        access: &AccessTokenPair,
    ) -> Result<MediaId, PublishError> {
        let url = format!("{}/1.1/media/upload.json", self.upload_base);
        let form = Form::new().text("media_data", image.base64_data.clone());

        let response = self
            .client
            .clone()
            .oauth1(self.secrets(access))
            .request(Method::POST, &url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| PublishError::Transport(e.to_string()))?;

        let body = read_success_body(response).await?;
        let upload: UploadResponse =
            serde_json::from_str(&body).map_err(|e| PublishError::Transport(e.to_string()))?;

        tracing::debug!("uploaded {} as media {}", image.path.display(), upload.media_id_string);
        Ok(MediaId(upload.media_id_string))
    }

    /// Post a status, optionally referencing a previously uploaded media id
    pub async fn post_status(
        &self,
        text: &str,
        access: &AccessTokenPair,
        media_id: Option<&MediaId>,
    ) -> Result<PostResult, PublishError> {
        let url = format!("{}/1.1/statuses/update.json", self.api_base);

        let mut params = vec![("status", text.to_string())];
        if let Some(id) = media_id {
            params.push(("media_ids", id.as_str().to_string()));
        }

        let response = self
            .client
            .clone()
            .oauth1(self.secrets(access))
            .request(Method::POST, &url)
            .query(&params)
            .send()
            .await
            .map_err(|e| PublishError::Transport(e.to_string()))?;

        let body = read_success_body(response).await?;
        serde_json::from_str(&body).map_err(|e| PublishError::Transport(e.to_string()))
    }

}

/// Read the body, turning non-success statuses into [`PublishError::Remote`]
/// with the service's own payload attached.
async fn read_success_body(response: reqwest::Response) -> Result<String, PublishError> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        Ok(body)
    } else {
        let payload = serde_json::from_str(&body)
            .unwrap_or_else(|_| serde_json::Value::String(body));
        Err(PublishError::Remote {
            status: status.as_u16(),
            payload,
        })
    }
}
