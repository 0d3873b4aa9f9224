use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::GetError;

/// Fields an error body may carry a human readable message under.
const ERROR_MESSAGE_KEYS: [&str; 3] = ["message", "detail", "error"];

pub fn default_http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().gzip(true).brotli(true).build()
}

/// Parse an absolute http(s) URL to be used as a base for relative paths.
///
/// A missing trailing slash is added so that joining keeps the last segment.
pub fn parse_base_url(raw: &str) -> Result<Url, GetError> {
    let invalid = |reason: &str| GetError::InvalidEndpoint(raw.to_string(), reason.to_string());
    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(&e.to_string()))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("not an absolute http(s) url"));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Append path segments to a base URL. Segments are percent-encoded.
pub fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, GetError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| GetError::InvalidEndpoint(base.to_string(), "cannot be a base".to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Read a response body as JSON, turning non-success statuses into
/// [`GetError::ResponseError`].
pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, GetError> {
    let status = response.status();
    let body = response.text().await.map_err(GetError::ResponseBodyError)?;
    if !status.is_success() {
        return Err(GetError::ResponseError {
            status,
            message: error_message(status, &body, None),
        });
    }
    Ok(serde_json::from_str(&body)?)
}

/// Like [`read_json`], but tolerates empty success bodies.
pub async fn read_ack<T: DeserializeOwned + Default>(response: Response) -> Result<T, GetError> {
    read_ack_or(response, None).await
}

/// [`read_ack`] with an operation-specific message for errors the server does
/// not explain.
pub async fn read_ack_or<T: DeserializeOwned + Default>(
    response: Response,
    fallback: Option<&str>,
) -> Result<T, GetError> {
    let status = response.status();
    let body = response.text().await.map_err(GetError::ResponseBodyError)?;
    if !status.is_success() {
        return Err(GetError::ResponseError {
            status,
            message: error_message(status, &body, fallback),
        });
    }
    if body.trim().is_empty() {
        return Ok(T::default());
    }
    Ok(serde_json::from_str(&body)?)
}

/// Server-provided message if the body is JSON with one, else `fallback`, else
/// a generic status line.
pub fn error_message(status: reqwest::StatusCode, body: &str, fallback: Option<&str>) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            ERROR_MESSAGE_KEYS
                .iter()
                .find_map(|key| value.get(*key).and_then(Value::as_str).map(str::to_string))
        })
        .filter(|message| !message.trim().is_empty())
        .or_else(|| fallback.map(str::to_string))
        .unwrap_or_else(|| format!("HTTP error! Status: {}", status.as_u16()))
}
