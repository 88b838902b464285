//! Blocking GET via libcurl.

use std::time::Duration;

use super::classify::{classify_curl_error, classify_status};
use super::error::{ApiError, Service};

/// Per-request transport settings.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub connect_timeout: Duration,
    /// Whole-request timeout; expiry is reported as a read timeout.
    pub timeout: Duration,
    /// Extra request headers (e.g. `X-Plex-Token`, `trakt-api-key`).
    pub headers: Vec<(String, String)>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(30),
            headers: Vec::new(),
        }
    }
}

/// A successful (2xx) response.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u32,
    pub body: Vec<u8>,
}

impl Response {
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Performs a GET and classifies the outcome for `service`.
///
/// Runs in the current thread.
pub fn fetch(service: Service, url: &str, opts: &FetchOptions) -> Result<Response, ApiError> {
    let parsed = url::Url::parse(url).map_err(|e| ApiError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ApiError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }

    let mut body: Vec<u8> = Vec::new();
    let mut easy = curl::easy::Easy::new();
    easy.url(parsed.as_str()).map_err(classify_curl_error)?;
    easy.follow_location(true).map_err(classify_curl_error)?;
    easy.connect_timeout(opts.connect_timeout)
        .map_err(classify_curl_error)?;
    easy.timeout(opts.timeout).map_err(classify_curl_error)?;

    let mut list = curl::easy::List::new();
    list.append("Accept: application/json")
        .map_err(classify_curl_error)?;
    if service == Service::Trakt {
        list.append("trakt-api-version: 2")
            .map_err(classify_curl_error)?;
    }
    for (k, v) in &opts.headers {
        list.append(&format!("{}: {}", k.trim(), v.trim()))
            .map_err(classify_curl_error)?;
    }
    easy.http_headers(list).map_err(classify_curl_error)?;

    {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(classify_curl_error)?;
        transfer.perform().map_err(classify_curl_error)?;
    }

    let status = easy.response_code().map_err(classify_curl_error)?;
    tracing::debug!(%service, url = %redacted(&parsed), status, bytes = body.len(), "GET finished");
    classify_status(service, status, &body)?;
    Ok(Response { status, body })
}

/// URL without query or credentials; Plex tokens travel in the query.
fn redacted(url: &url::Url) -> url::Url {
    let mut shown = url.clone();
    shown.set_query(None);
    let _ = shown.set_username("");
    let _ = shown.set_password(None);
    shown
}
