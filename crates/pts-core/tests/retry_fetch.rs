//! Integration test: retried fetches against a local scripted HTTP server.
//!
//! Backoff is zeroed so exhaustion scenarios run instantly.

mod common;

use common::status_server::{self, Scripted};
use pts_core::api::{ApiError, Client, FetchOptions, Service};
use pts_core::retry::{NoBackoff, Retry, RetryError, RetryPolicy, Transient, TransientKind};

fn fast_retry(retries: u32) -> Retry<NoBackoff> {
    Retry::new(RetryPolicy::new(retries)).with_backoff(NoBackoff)
}

#[test]
fn trakt_recovers_after_two_unavailable_responses() {
    let server = status_server::start(vec![
        Scripted::new(503, ""),
        Scripted::new(503, ""),
        Scripted::new(200, r#"[{"movie":{"title":"Dune"}}]"#),
    ]);
    let client = Client::new(Service::Trakt, FetchOptions::default());
    let resp = client
        .get_with_retry(&fast_retry(5), &server.url)
        .expect("should succeed on third try");
    assert_eq!(resp.status, 200);
    assert_eq!(resp.json().unwrap()[0]["movie"]["title"], "Dune");
    assert_eq!(server.hits(), 3);
}

#[test]
fn trakt_always_bad_gateway_exhausts_budget() {
    let server = status_server::start(vec![Scripted::new(502, "")]);
    let client = Client::new(Service::Trakt, FetchOptions::default());
    let err = client.get_with_retry(&fast_retry(2), &server.url).unwrap_err();
    assert!(err.is_exhausted());
    assert_eq!(server.hits(), 3);
}

#[test]
fn trakt_not_found_is_not_retried() {
    let server = status_server::start(vec![Scripted::new(404, "")]);
    let client = Client::new(Service::Trakt, FetchOptions::default());
    let err = client.get_with_retry(&fast_retry(5), &server.url).unwrap_err();
    match err {
        RetryError::Failed(ApiError::Http { service, status }) => {
            assert_eq!(service, Service::Trakt);
            assert_eq!(status, 404);
        }
        other => panic!("expected HTTP 404 passthrough, got {:?}", other),
    }
    assert_eq!(server.hits(), 1);
}

#[test]
fn trakt_html_body_is_retried_as_bad_response() {
    let server = status_server::start(vec![
        Scripted::new(200, "<html>maintenance</html>"),
        Scripted::new(200, "{}"),
    ]);
    let client = Client::new(Service::Trakt, FetchOptions::default());
    let resp = client.get_with_retry(&fast_retry(1), &server.url).unwrap();
    assert_eq!(resp.body, b"{}");
    assert_eq!(server.hits(), 2);
}

#[test]
fn plex_bad_request_is_retried() {
    let server = status_server::start(vec![
        Scripted::new(400, ""),
        Scripted::new(200, "<MediaContainer size=\"0\"/>"),
    ]);
    let client = Client::new(Service::Plex, FetchOptions::default());
    let resp = client.get_with_retry(&fast_retry(3), &server.url).unwrap();
    assert_eq!(resp.status, 200);
    assert_eq!(server.hits(), 2);
}

#[test]
fn plex_unavailable_is_retried_until_success() {
    let server = status_server::start(vec![
        Scripted::new(503, ""),
        Scripted::new(200, "<MediaContainer size=\"0\"/>"),
    ]);
    let client = Client::new(Service::Plex, FetchOptions::default());
    let resp = client.get_with_retry(&fast_retry(3), &server.url).unwrap();
    assert_eq!(resp.status, 200);
    assert_eq!(server.hits(), 2);
}

#[test]
fn plex_not_found_passes_through() {
    let server = status_server::start(vec![Scripted::new(404, "")]);
    let client = Client::new(Service::Plex, FetchOptions::default());
    let err = client.get_with_retry(&fast_retry(3), &server.url).unwrap_err();
    assert!(matches!(
        err,
        RetryError::Failed(ApiError::Http { status: 404, .. })
    ));
    assert_eq!(server.hits(), 1);
}

#[test]
fn connection_refused_is_transport_error() {
    let client = Client::new(Service::Trakt, FetchOptions::default());
    let url = status_server::refused_url();
    let err = client.get(&url).unwrap_err();
    assert_eq!(err.transient_kind(), Some(TransientKind::Transport));

    let err = client.get_with_retry(&fast_retry(1), &url).unwrap_err();
    assert!(err.is_exhausted());
}

#[test]
fn invalid_url_is_rejected_without_retry() {
    let client = Client::new(Service::Plex, FetchOptions::default());
    let err = client
        .get_with_retry(&fast_retry(3), "ftp://example.invalid/library")
        .unwrap_err();
    assert!(matches!(
        err,
        RetryError::Failed(ApiError::InvalidUrl { .. })
    ));
}
