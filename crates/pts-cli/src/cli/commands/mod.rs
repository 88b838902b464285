//! CLI command implementations.

mod config;
mod fetch;

pub use config::run_config;
pub use fetch::run_fetch;

#[cfg(test)]
pub(crate) use fetch::parse_header;
