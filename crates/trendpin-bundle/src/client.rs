//! HTTP client for the Bundle.social REST API.
//!
//! Wraps `reqwest` with API-key header management and typed error handling
//! for the two endpoints the publish pipeline needs: media upload and post
//! scheduling. Non-success statuses are surfaced as
//! [`BundleError::UnexpectedStatus`] — nothing here retries.

use serde::Deserialize;

use crate::error::BundleError;
use crate::types::SchedulePost;

const DEFAULT_BASE_URL: &str = "https://api.bundle.social/api/v1";

const API_KEY_HEADER: &str = "x-api-key";

/// Client for the Bundle.social API.
///
/// Use [`BundleClient::new`] for production or
/// [`BundleClient::with_base_url`] to point at a mock server in tests.
pub struct BundleClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    id: String,
}

impl BundleClient {
    /// Creates a new client pointed at the production Bundle.social API.
    #[must_use]
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    #[must_use]
    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.to_owned(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Uploads image bytes as `pin.jpg` and returns the opaque upload id
    /// referenced later by the schedule-post request.
    ///
    /// # Errors
    ///
    /// - [`BundleError::Http`] on network failure.
    /// - [`BundleError::UnexpectedStatus`] on a non-2xx status.
    /// - [`BundleError::Deserialize`] if the response lacks the `id` field.
    pub async fn upload_image(&self, image: Vec<u8>) -> Result<String, BundleError> {
        let url = format!("{}/upload/", self.base_url);
        let part = reqwest::multipart::Part::bytes(image)
            .file_name("pin.jpg")
            .mime_str("image/jpeg")?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .multipart(form)
            .send()
            .await?;

        let body = Self::check_status(response, &url).await?;
        let upload: UploadResponse =
            serde_json::from_str(&body).map_err(|e| BundleError::Deserialize {
                context: "upload response".to_owned(),
                source: e,
            })?;
        tracing::debug!(upload_id = %upload.id, "bundle: image staged");
        Ok(upload.id)
    }

    /// Submits a schedule-post request and returns the API's confirmation
    /// payload.
    ///
    /// # Errors
    ///
    /// - [`BundleError::Http`] on network failure.
    /// - [`BundleError::UnexpectedStatus`] on a non-2xx status.
    /// - [`BundleError::Deserialize`] if the response body is not JSON.
    pub async fn schedule_post(
        &self,
        post: &SchedulePost,
    ) -> Result<serde_json::Value, BundleError> {
        let url = format!("{}/post", self.base_url);
        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(post)
            .send()
            .await?;

        let body = Self::check_status(response, &url).await?;
        tracing::debug!(team = %post.team_id, "bundle: post accepted");
        serde_json::from_str(&body).map_err(|e| BundleError::Deserialize {
            context: "schedule-post response".to_owned(),
            source: e,
        })
    }

    /// Asserts a 2xx status and returns the response body as text.
    async fn check_status(response: reqwest::Response, url: &str) -> Result<String, BundleError> {
        let status = response.status();
        if !status.is_success() {
            return Err(BundleError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_base_url_strips_trailing_slash() {
        let client = BundleClient::with_base_url("k", "https://api.bundle.social/api/v1/");
        assert_eq!(client.base_url, "https://api.bundle.social/api/v1");
    }
}
