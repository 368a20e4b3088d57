use crate::error::ChatError;
use reqwest::Method;
use serde::Serialize;
use tracing::{info, warn};

/// POST a JSON body once and hand back the response if the status is 2xx.
///
/// There is no retry: a failed send or non-success status is returned to the
/// caller immediately, with the response body folded into the message.
pub async fn send_json<T: Serialize>(
    http_client: &reqwest::Client,
    url: &str,
    request_body: &T,
) -> Result<reqwest::Response, ChatError> {
    let response = http_client
        .request(Method::POST, url)
        .json(request_body)
        .send()
        .await
        .map_err(|e| {
            warn!(
                %url,
                timeout = e.is_timeout(),
                connect = e.is_connect(),
                "request failed before a response arrived"
            );
            ChatError::NetworkError(e)
        })?;

    let status = response.status();
    if status.is_success() {
        info!(%url, status = status.as_u16(), "stream opened");
        return Ok(response);
    }

    let error_text = response.text().await.unwrap_or_default();
    warn!(%url, status = status.as_u16(), "request rejected");
    Err(ChatError::ApiError(format!(
        "API request failed (status {}): {}",
        status, error_text
    )))
}
