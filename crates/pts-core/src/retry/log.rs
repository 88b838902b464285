//! Logging capability used by the retry loop.

/// Sink for retry diagnostics. Injected so tests can capture the lines.
pub trait RetryLog {
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards to the process-wide `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl RetryLog for TracingLog {
    fn warning(&self, message: &str) {
        tracing::warn!("{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}

impl<L: RetryLog + ?Sized> RetryLog for &L {
    fn warning(&self, message: &str) {
        (**self).warning(message)
    }

    fn error(&self, message: &str) {
        (**self).error(message)
    }
}
