use super::error::{ApiError, Service};
use super::fetch::{fetch, FetchOptions, Response};
use crate::retry::{Backoff, Call, Retry, RetryError, RetryLog, Sleep};

/// GET client bound to one service.
#[derive(Debug, Clone)]
pub struct Client {
    service: Service,
    options: FetchOptions,
}

impl Client {
    pub fn new(service: Service, options: FetchOptions) -> Self {
        Self { service, options }
    }

    pub fn service(&self) -> Service {
        self.service
    }

    pub fn get(&self, url: &str) -> Result<Response, ApiError> {
        fetch(self.service, url, &self.options)
    }

    /// [`Client::get`] under `retry`. The client itself is the receiver and
    /// stays out of the "last call" diagnostic.
    pub fn get_with_retry<B, L, S>(
        &self,
        retry: &Retry<B, L, S>,
        url: &str,
    ) -> Result<Response, RetryError<ApiError>>
    where
        B: Backoff,
        L: RetryLog,
        S: Sleep,
    {
        let call = Call::new(module_path!(), "Client::get").receiver().arg(url);
        retry.run(&call, || self.get(url))
    }
}
