//! Ready-made policies for common cases.
//!
//! - [`default_policy`]: 50ms constant delay, at most 5 retries.
//! - [`never`]: do not retry at all.
//! - [`capped_exponential`]: exponential growth with a ceiling and a retry budget.

use crate::combinators::{CapDelay, Concat};
use crate::{
    backoff::{ConstantDelay, ExponentialBackoff, LimitRetries},
    constant_delay, exponential_backoff, limit_retries, RetryPolicyExt,
};
use std::time::Duration;

const DEFAULT_DELAY_MILLIS: u64 = 50;
const DEFAULT_MAX_RETRIES: usize = 5;

/// Conventional default: retry up to 5 times, 50ms apart.
pub fn default_policy() -> Concat<ConstantDelay, LimitRetries> {
    constant_delay(Duration::from_millis(DEFAULT_DELAY_MILLIS))
        .concat(limit_retries(DEFAULT_MAX_RETRIES))
}

/// Stop immediately.
pub fn never() -> LimitRetries {
    limit_retries(0)
}

/// `base * 2^attempt`, never above `cap`, for at most `max_retries` retries.
pub fn capped_exponential(
    base: Duration,
    cap: Duration,
    max_retries: usize,
) -> CapDelay<Concat<ExponentialBackoff, LimitRetries>> {
    exponential_backoff(base).concat(limit_retries(max_retries)).cap_delay(cap)
}
