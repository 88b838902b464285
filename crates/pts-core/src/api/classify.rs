//! Classify HTTP status, response body, and curl errors into [`ApiError`].

use super::error::{ApiError, Service};

const SNIPPET_LEN: usize = 200;

/// Checks a completed response. `Ok(())` means the body can be used.
pub fn classify_status(service: Service, status: u32, body: &[u8]) -> Result<(), ApiError> {
    if (200..300).contains(&status) {
        if service == Service::Trakt && !body.is_empty() && !is_json(body) {
            return Err(ApiError::BadResponse {
                status,
                details: Some(snippet(body)),
            });
        }
        return Ok(());
    }

    match (service, status) {
        (Service::Plex, 401 | 404) => Err(ApiError::Http { service, status }),
        (Service::Plex, _) => Err(ApiError::BadRequest {
            status,
            codename: codename(status),
            message: snippet(body),
        }),
        (Service::Trakt, 500) => Err(ApiError::Internal {
            error_message: trakt_error_message(body),
        }),
        (Service::Trakt, 502) => Err(ApiError::BadGateway),
        (Service::Trakt, 503 | 504 | 520..=522) => Err(ApiError::Unavailable { status }),
        _ => Err(ApiError::Http { service, status }),
    }
}

/// Classify a curl error for retry decisions.
pub fn classify_curl_error(e: curl::Error) -> ApiError {
    if e.is_operation_timedout() {
        return ApiError::ReadTimeout(e);
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
        || e.is_partial_file()
        || e.is_ssl_connect_error()
        || e.is_http2_error()
        || e.is_http2_stream_error()
        || e.is_too_many_redirects()
        || e.is_bad_content_encoding()
    {
        return ApiError::Transport(e);
    }
    ApiError::Curl(e)
}

/// Short snake_case name for a status, as Plex error messages print it.
fn codename(status: u32) -> &'static str {
    match status {
        400 => "bad_request",
        403 => "forbidden",
        408 => "request_timeout",
        429 => "too_many_requests",
        500 => "internal_server_error",
        502 => "bad_gateway",
        503 => "service_unavailable",
        504 => "gateway_timeout",
        _ => "unknown",
    }
}

fn is_json(body: &[u8]) -> bool {
    serde_json::from_slice::<serde_json::Value>(body).is_ok()
}

/// Trakt puts a human-readable message in `error_message` (or `error`)
/// of its JSON error bodies.
fn trakt_error_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    ["error_message", "error"]
        .iter()
        .find_map(|k| value.get(*k).and_then(|v| v.as_str()))
        .map(str::to_string)
}

fn snippet(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    match text.char_indices().nth(SNIPPET_LEN) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
