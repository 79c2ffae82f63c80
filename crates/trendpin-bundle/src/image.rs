//! Product-image retrieval.

use crate::error::BundleError;

/// Downloads the product image and returns its raw bytes.
///
/// The caller provides the HTTP client so the transfer timeout is configured
/// once at startup rather than per call.
///
/// # Errors
///
/// - [`BundleError::EmptyImageUrl`] if `url` is empty.
/// - [`BundleError::Http`] on network failure or timeout.
/// - [`BundleError::UnexpectedStatus`] on a non-2xx status.
pub async fn fetch_image(client: &reqwest::Client, url: &str) -> Result<Vec<u8>, BundleError> {
    if url.is_empty() {
        return Err(BundleError::EmptyImageUrl);
    }

    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(BundleError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }

    Ok(response.bytes().await?.to_vec())
}
