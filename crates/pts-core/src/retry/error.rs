//! Error classification for the retry loop.

use std::fmt;
use thiserror::Error;

/// Message carried by [`Exhausted`].
pub const EXHAUSTED_MESSAGE: &str =
    "API didn't respond properly, script will abort now. Please try again later.";

/// Failure kinds that are worth retrying with the same arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransientKind {
    /// Plex rejected the request as malformed (HTTP 400).
    BadRequest,
    /// Connection, DNS, send/recv failure in the HTTP layer.
    Transport,
    /// No response before the read timeout.
    ReadTimeout,
    /// Trakt is unavailable (503-class).
    Unavailable,
    /// Trakt's gateway failed (502).
    BadGateway,
    /// Trakt answered with a body we could not interpret.
    BadResponse,
    /// Trakt reported an internal server error (500).
    Internal,
}

impl TransientKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransientKind::BadRequest => "bad request",
            TransientKind::Transport => "transport",
            TransientKind::ReadTimeout => "read timeout",
            TransientKind::Unavailable => "unavailable",
            TransientKind::BadGateway => "bad gateway",
            TransientKind::BadResponse => "bad response",
            TransientKind::Internal => "internal error",
        }
    }
}

impl fmt::Display for TransientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error the retry loop can inspect.
///
/// Returning `None` from [`Transient::transient_kind`] makes the error
/// pass straight through the wrapper. `details` and `error_message` are
/// only read when the retry budget is exhausted, for the diagnostic log.
pub trait Transient: fmt::Display {
    fn transient_kind(&self) -> Option<TransientKind>;

    /// Structured detail attached to malformed responses.
    fn details(&self) -> Option<&str> {
        None
    }

    /// Message the remote service attached to an internal error.
    fn error_message(&self) -> Option<&str> {
        None
    }
}

/// Raised once per call when the retry budget is spent.
///
/// The message is fixed; the underlying error has already been logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("API didn't respond properly, script will abort now. Please try again later.")]
pub struct Exhausted;

/// Outcome of a retried call that did not succeed.
#[derive(Debug)]
pub enum RetryError<E> {
    /// Transient failures used up the retry budget.
    Exhausted(Exhausted),
    /// Non-transient error, returned unchanged from the first attempt.
    Failed(E),
}

impl<E> RetryError<E> {
    pub fn is_exhausted(&self) -> bool {
        matches!(self, RetryError::Exhausted(_))
    }

    /// Returns the passthrough error, if this is not an exhaustion.
    pub fn into_failed(self) -> Option<E> {
        match self {
            RetryError::Failed(e) => Some(e),
            RetryError::Exhausted(_) => None,
        }
    }
}

impl<E> From<Exhausted> for RetryError<E> {
    fn from(e: Exhausted) -> Self {
        RetryError::Exhausted(e)
    }
}

impl<E: fmt::Display> fmt::Display for RetryError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetryError::Exhausted(e) => write!(f, "{}", e),
            RetryError::Failed(e) => write!(f, "{}", e),
        }
    }
}

impl<E> std::error::Error for RetryError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RetryError::Exhausted(e) => Some(e),
            RetryError::Failed(e) => Some(e),
        }
    }
}
