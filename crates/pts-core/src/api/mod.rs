//! Plex and Trakt HTTP access.
//!
//! Blocking GETs through libcurl, with failures classified into
//! [`ApiError`] so the retry wrapper can tell transient errors from the
//! rest.

mod classify;
mod client;
mod error;
mod fetch;

pub use classify::{classify_curl_error, classify_status};
pub use client::Client;
pub use error::{ApiError, Service};
pub use fetch::{fetch, FetchOptions, Response};
