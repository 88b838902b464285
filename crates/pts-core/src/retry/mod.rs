//! Retry wrapper for Plex and Trakt API calls.
//!
//! Transient failures (bad requests from Plex, transport errors, Trakt
//! 5xx-class and malformed responses) are retried with a linear backoff.
//! Once the budget is spent the call fails with [`Exhausted`], which the
//! CLI turns into a user-facing abort. Any other error passes through
//! untouched on its first occurrence.

mod call;
mod error;
mod log;
mod policy;
mod run;

pub use call::Call;
pub use error::{Exhausted, RetryError, Transient, TransientKind, EXHAUSTED_MESSAGE};
pub use log::{RetryLog, TracingLog};
pub use policy::{Backoff, LinearBackoff, NoBackoff, RetryPolicy, DEFAULT_RETRIES};
pub use run::{retry, Retry, Sleep, ThreadSleep};
