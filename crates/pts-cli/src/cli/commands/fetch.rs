//! Fetch command: one retried GET against Plex or Trakt.

use anyhow::{Context, Result};
use pts_core::api::{Client, Service};
use pts_core::config::PtsConfig;
use pts_core::retry::Retry;

/// GET `url` and print status and body size. Exhaustion surfaces as
/// `Exhausted` in the error chain for `main` to report.
pub fn run_fetch(
    cfg: &PtsConfig,
    service: Service,
    url: &str,
    retries: Option<u32>,
    headers: &[String],
) -> Result<()> {
    let mut options = cfg.fetch_options();
    for h in headers {
        options.headers.push(parse_header(h)?);
    }
    let retry = Retry::new(cfg.retry_policy(retries));
    let client = Client::new(service, options);

    let resp = client
        .get_with_retry(&retry, url)
        .with_context(|| format!("GET {}", url))?;
    println!("{} {} ({} bytes)", service, resp.status, resp.body.len());
    Ok(())
}

/// Splits `Name: value`.
pub(crate) fn parse_header(raw: &str) -> Result<(String, String)> {
    let (name, value) = raw
        .split_once(':')
        .with_context(|| format!("header '{}' is not in 'Name: value' form", raw))?;
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("header '{}' has an empty name", raw);
    }
    Ok((name.to_string(), value.trim().to_string()))
}
