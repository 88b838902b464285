//! Retry loop: run a closure until success, a non-transient error, or the
//! retry budget is spent.

use std::time::Duration;

use super::call::Call;
use super::error::{Exhausted, RetryError, Transient};
use super::log::{RetryLog, TracingLog};
use super::policy::{Backoff, LinearBackoff, RetryPolicy};

/// Blocking wait between attempts. Injected so tests can record delays.
pub trait Sleep {
    fn sleep(&self, delay: Duration);
}

/// Blocks the current thread with `std::thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleep;

impl Sleep for ThreadSleep {
    fn sleep(&self, delay: Duration) {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}

impl<S: Sleep + ?Sized> Sleep for &S {
    fn sleep(&self, delay: Duration) {
        (**self).sleep(delay)
    }
}

/// Retry executor: policy plus the log and sleep capabilities.
///
/// Holds no per-call state; the attempt counter lives on the stack of
/// [`Retry::run`], so one executor can serve many calls (and threads, when
/// the log and sleeper are `Sync`) without them affecting each other.
#[derive(Debug, Clone)]
pub struct Retry<B = LinearBackoff, L = TracingLog, S = ThreadSleep> {
    policy: RetryPolicy<B>,
    log: L,
    sleeper: S,
}

impl Retry {
    /// Executor that logs through `tracing` and really sleeps.
    pub fn new(policy: RetryPolicy) -> Self {
        Self::from_parts(policy, TracingLog, ThreadSleep)
    }
}

impl Default for Retry {
    fn default() -> Self {
        Self::new(RetryPolicy::default())
    }
}

impl<B: Backoff, L: RetryLog, S: Sleep> Retry<B, L, S> {
    pub fn from_parts(policy: RetryPolicy<B>, log: L, sleeper: S) -> Self {
        Self {
            policy,
            log,
            sleeper,
        }
    }

    pub fn policy(&self) -> &RetryPolicy<B> {
        &self.policy
    }

    pub fn with_log<L2: RetryLog>(self, log: L2) -> Retry<B, L2, S> {
        Retry::from_parts(self.policy, log, self.sleeper)
    }

    pub fn with_sleep<S2: Sleep>(self, sleeper: S2) -> Retry<B, L, S2> {
        Retry::from_parts(self.policy, self.log, sleeper)
    }

    pub fn with_backoff<B2: Backoff>(self, backoff: B2) -> Retry<B2, L, S> {
        Retry::from_parts(self.policy.with_backoff(backoff), self.log, self.sleeper)
    }

    /// Runs `f`, retrying transient failures.
    ///
    /// Non-transient errors come back as [`RetryError::Failed`] on first
    /// occurrence, without logging. After `retries` transient failures in a
    /// row the next one is logged at error level together with `call`, and
    /// [`RetryError::Exhausted`] is returned.
    pub fn run<T, E, F>(&self, call: &Call, mut f: F) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Result<T, E>,
        E: Transient,
    {
        let retries = self.policy.retries;
        let mut attempt = 0u32;
        loop {
            let err = match f() {
                Ok(v) => return Ok(v),
                Err(e) => e,
            };
            if err.transient_kind().is_none() {
                return Err(RetryError::Failed(err));
            }
            if attempt == retries {
                self.report_exhausted(call, &err);
                return Err(RetryError::Exhausted(Exhausted));
            }

            let delay = self.policy.delay(attempt);
            attempt += 1;
            self.log.warning(&format!(
                "{} for {}(), retrying after {} seconds (try: {}/{})",
                err,
                call.target(),
                delay.as_secs_f64(),
                attempt,
                retries
            ));
            self.sleeper.sleep(delay);
        }
    }

    /// Decorator form: returns a closure with `f`'s argument type that
    /// retries each invocation with a clone of its arguments.
    pub fn wrap<A, T, E, F>(self, call: Call, mut f: F) -> impl FnMut(A) -> Result<T, RetryError<E>>
    where
        A: Clone,
        F: FnMut(A) -> Result<T, E>,
        E: Transient,
    {
        move |args: A| self.run(&call, || f(args.clone()))
    }

    fn report_exhausted<E: Transient>(&self, call: &Call, err: &E) {
        self.log.error(&format!("Error: {}", err));
        if let Some(details) = err.details() {
            self.log.error(&format!("Details: {}", details));
        }
        if let Some(message) = err.error_message() {
            self.log.error(&format!("Error message: {}", message));
        }
        self.log.error(&format!("Last call: {}", call.last_call()));
    }
}

/// Runs `f` with `retries` retries, linear one second backoff, logging
/// through `tracing`.
pub fn retry<T, E, F>(call: &Call, retries: u32, f: F) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Result<T, E>,
    E: Transient,
{
    Retry::new(RetryPolicy::new(retries)).run(call, f)
}
