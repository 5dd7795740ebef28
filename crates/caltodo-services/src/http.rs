//! Request plumbing shared by the clients.

use serde::de::DeserializeOwned;
use url::Url;

use crate::error::ServiceError;

/// Parse an API origin into a base URL that paths can be joined onto.
pub(crate) fn parse_base_url(base_url: &str) -> Result<Url, ServiceError> {
    let url = Url::parse(base_url.trim_end_matches('/'))
        .map_err(|e| ServiceError::InvalidUrl(format!("{}: {}", base_url, e)))?;

    if url.cannot_be_a_base() {
        return Err(ServiceError::InvalidUrl(base_url.to_string()));
    }
    Ok(url)
}

pub(crate) fn endpoint(base: &Url, path: &str) -> Result<Url, ServiceError> {
    base.join(path)
        .map_err(|e| ServiceError::InvalidUrl(format!("{}: {}", path, e)))
}

/// Turn a non-2xx response into `ServiceError::Http`, keeping the body text.
pub(crate) async fn check_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::warn!("API returned {}: {}", status, body);
    Err(ServiceError::Http {
        status: status.as_u16(),
        body,
    })
}

/// Check the status, then decode the JSON body.
pub(crate) async fn handle_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ServiceError> {
    let response = check_status(response).await?;
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes)
        .map_err(|e| ServiceError::Decode(format!("JSON parse error: {}", e)))
}
