//! API error type shared by the Plex and Trakt fetchers.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::retry::{Transient, TransientKind};

/// Remote service a request is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Plex,
    Trakt,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Plex => f.write_str("Plex"),
            Service::Trakt => f.write_str("Trakt"),
        }
    }
}

impl FromStr for Service {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plex" => Ok(Service::Plex),
            "trakt" => Ok(Service::Trakt),
            other => Err(format!("unknown service '{}' (expected plex or trakt)", other)),
        }
    }
}

/// Failure of a single Plex or Trakt request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Plex answered a non-2xx status other than 401 or 404.
    #[error("({status}) {codename}: {message}")]
    BadRequest {
        status: u32,
        codename: &'static str,
        message: String,
    },
    /// Connection refused, DNS failure, reset, etc.
    #[error("connection error: {0}")]
    Transport(#[source] curl::Error),
    /// Request timed out waiting for the response.
    #[error("read timed out: {0}")]
    ReadTimeout(#[source] curl::Error),
    /// Trakt is down or overloaded (503/504, CDN origin errors).
    #[error("Trakt unavailable (HTTP {status})")]
    Unavailable { status: u32 },
    /// Trakt answered 502.
    #[error("Trakt bad gateway (HTTP 502)")]
    BadGateway,
    /// Trakt answered with a body that is not JSON.
    #[error("unexpected response from Trakt (HTTP {status})")]
    BadResponse {
        status: u32,
        details: Option<String>,
    },
    /// Trakt answered 500.
    #[error("Trakt internal error (HTTP 500)")]
    Internal { error_message: Option<String> },
    /// Any other non-2xx status.
    #[error("{service} returned HTTP {status}")]
    Http { service: Service, status: u32 },
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    /// Curl failure that is not worth retrying (bad option, TLS setup, ...).
    #[error("curl: {0}")]
    Curl(#[source] curl::Error),
}

impl Transient for ApiError {
    fn transient_kind(&self) -> Option<TransientKind> {
        match self {
            ApiError::BadRequest { .. } => Some(TransientKind::BadRequest),
            ApiError::Transport(_) => Some(TransientKind::Transport),
            ApiError::ReadTimeout(_) => Some(TransientKind::ReadTimeout),
            ApiError::Unavailable { .. } => Some(TransientKind::Unavailable),
            ApiError::BadGateway => Some(TransientKind::BadGateway),
            ApiError::BadResponse { .. } => Some(TransientKind::BadResponse),
            ApiError::Internal { .. } => Some(TransientKind::Internal),
            ApiError::Http { .. } | ApiError::InvalidUrl { .. } | ApiError::Curl(_) => None,
        }
    }

    fn details(&self) -> Option<&str> {
        match self {
            ApiError::BadResponse { details, .. } => details.as_deref(),
            _ => None,
        }
    }

    fn error_message(&self) -> Option<&str> {
        match self {
            ApiError::Internal { error_message } => error_message.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_parses_case_insensitively() {
        assert_eq!("plex".parse::<Service>().unwrap(), Service::Plex);
        assert_eq!("Trakt".parse::<Service>().unwrap(), Service::Trakt);
        assert!("tvdb".parse::<Service>().is_err());
    }

    #[test]
    fn seven_transient_kinds() {
        let transient = [
            ApiError::BadRequest {
                status: 503,
                codename: "service_unavailable",
                message: "x".into(),
            },
            ApiError::Transport(curl::Error::new(7)),
            ApiError::ReadTimeout(curl::Error::new(28)),
            ApiError::Unavailable { status: 503 },
            ApiError::BadGateway,
            ApiError::BadResponse {
                status: 200,
                details: None,
            },
            ApiError::Internal {
                error_message: None,
            },
        ];
        for e in &transient {
            assert!(e.transient_kind().is_some(), "{} should be transient", e);
        }
    }

    #[test]
    fn other_errors_are_not_transient() {
        let http = ApiError::Http {
            service: Service::Trakt,
            status: 404,
        };
        assert_eq!(http.transient_kind(), None);
        assert_eq!(http.to_string(), "Trakt returned HTTP 404");
        assert_eq!(ApiError::Curl(curl::Error::new(3)).transient_kind(), None);
    }

    #[test]
    fn optional_payloads_are_exposed() {
        let e = ApiError::BadResponse {
            status: 200,
            details: Some("<html>".into()),
        };
        assert_eq!(e.details(), Some("<html>"));
        assert_eq!(e.error_message(), None);

        let e = ApiError::Internal {
            error_message: Some("database timeout".into()),
        };
        assert_eq!(e.error_message(), Some("database timeout"));
        assert_eq!(e.details(), None);
    }
}
