//! Retry strategy for the HTTP middleware stack.
//!
//! The middleware retries network-level failures (connection reset, DNS,
//! timeout) exactly once with a short delay. HTTP error statuses are never
//! retried here: 429 handling with its visible countdown lives in the
//! client's execute loop, and other 4xx/5xx surface immediately.

use reqwest_retry::{Retryable, RetryableStrategy};

/// Retries transport errors only; any received response is final.
pub struct TransportErrorStrategy;

impl RetryableStrategy for TransportErrorStrategy {
    fn handle(
        &self,
        res: &Result<reqwest::Response, reqwest_middleware::Error>,
    ) -> Option<Retryable> {
        match res {
            Ok(_) => None,
            Err(_) => Some(Retryable::Transient),
        }
    }
}
