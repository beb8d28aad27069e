//! Primitive policies: constant delay, retry-count limit, and attempt-driven backoff curves.
//!
//! Attempt semantics: every primitive reads `status.iter_number()` (attempts made so far, `0`
//! before the first attempt). Backoff curves ignore `previous_delay` entirely; growth is purely a
//! function of the attempt count.
//!
//! Example
//! ```rust
//! use retry_algebra::{exponential_backoff, limit_retries, RetryPolicy, RetryStatus};
//! use std::time::Duration;
//!
//! let backoff = exponential_backoff(Duration::from_millis(100));
//! assert_eq!(backoff.evaluate(&RetryStatus::new()), Some(Duration::from_millis(100)));
//! assert_eq!(
//!     backoff.evaluate(&RetryStatus::from_parts(3, None)),
//!     Some(Duration::from_millis(800))
//! );
//!
//! let limit = limit_retries(2);
//! assert_eq!(limit.evaluate(&RetryStatus::from_parts(1, None)), Some(Duration::ZERO));
//! assert_eq!(limit.evaluate(&RetryStatus::from_parts(2, None)), None);
//! ```
//!
//! Overflow behavior: computations that would exceed the representable range saturate to
//! [`MAX_DELAY`]. A zero base stays zero for every attempt. Attempt counts larger than
//! `u32::MAX` are clamped when computing multipliers.

use crate::{RetryPolicy, RetryStatus};
use std::time::Duration;

/// Delay returned when a backoff computation overflows.
pub const MAX_DELAY: Duration = Duration::MAX;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Always returns the same delay. Never terminates on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantDelay {
    delay: Duration,
}

impl ConstantDelay {
    /// The delay returned for every status.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl RetryPolicy for ConstantDelay {
    fn evaluate(&self, _status: &RetryStatus) -> Option<Duration> {
        Some(self.delay)
    }
}

/// Retry immediately while fewer than `max_attempts` attempts were made, then stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitRetries {
    max_attempts: usize,
}

impl LimitRetries {
    /// Number of attempts after which the policy stops.
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }
}

impl RetryPolicy for LimitRetries {
    fn evaluate(&self, status: &RetryStatus) -> Option<Duration> {
        (status.iter_number() < self.max_attempts).then_some(Duration::ZERO)
    }
}

/// `base * 2^iter_number`, saturating at [`MAX_DELAY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExponentialBackoff {
    base: Duration,
}

impl ExponentialBackoff {
    /// Delay at attempt zero.
    pub fn base(&self) -> Duration {
        self.base
    }
}

impl RetryPolicy for ExponentialBackoff {
    fn evaluate(&self, status: &RetryStatus) -> Option<Duration> {
        let exponent = clamp_attempt(status.iter_number());
        let multiplier = 2u128.checked_pow(exponent);
        Some(scale(self.base, multiplier))
    }
}

/// `base * (iter_number + 1)`, saturating at [`MAX_DELAY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearBackoff {
    base: Duration,
}

impl LinearBackoff {
    /// Delay at attempt zero and the step added per attempt.
    pub fn base(&self) -> Duration {
        self.base
    }
}

impl RetryPolicy for LinearBackoff {
    fn evaluate(&self, status: &RetryStatus) -> Option<Duration> {
        let factor = u128::from(clamp_attempt(status.iter_number())) + 1;
        Some(scale(self.base, Some(factor)))
    }
}

/// `base * fib(iter_number + 1)` with `fib(1) = fib(2) = 1`, saturating at [`MAX_DELAY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FibonacciBackoff {
    base: Duration,
}

impl FibonacciBackoff {
    /// Delay at attempts zero and one.
    pub fn base(&self) -> Duration {
        self.base
    }
}

impl RetryPolicy for FibonacciBackoff {
    fn evaluate(&self, status: &RetryStatus) -> Option<Duration> {
        Some(scale(self.base, fibonacci(status.iter_number().saturating_add(1))))
    }
}

/// Always retry after `delay`. Combine with a limiter to terminate.
pub fn constant_delay(delay: Duration) -> ConstantDelay {
    ConstantDelay { delay }
}

/// Allow `max_attempts` retries with zero delay. `0` means never retry.
pub fn limit_retries(max_attempts: usize) -> LimitRetries {
    LimitRetries { max_attempts }
}

/// Delay doubles with every attempt, starting at `base`.
pub fn exponential_backoff(base: Duration) -> ExponentialBackoff {
    ExponentialBackoff { base }
}

/// Delay grows by `base` with every attempt, starting at `base`.
pub fn linear_backoff(base: Duration) -> LinearBackoff {
    LinearBackoff { base }
}

/// Delay follows the Fibonacci sequence scaled by `base`: 1, 1, 2, 3, 5, ...
pub fn fibonacci_backoff(base: Duration) -> FibonacciBackoff {
    FibonacciBackoff { base }
}

fn clamp_attempt(attempt: usize) -> u32 {
    u32::try_from(attempt).unwrap_or(u32::MAX)
}

/// Multiply `base` by `factor`; `None` stands for a factor too large to represent.
fn scale(base: Duration, factor: Option<u128>) -> Duration {
    if base.is_zero() {
        return Duration::ZERO;
    }
    let Some(nanos) = factor.and_then(|f| base.as_nanos().checked_mul(f)) else {
        return MAX_DELAY;
    };
    match u64::try_from(nanos / NANOS_PER_SEC) {
        // remainder is below one second, so it always fits in u32
        Ok(secs) => Duration::new(secs, (nanos % NANOS_PER_SEC) as u32),
        Err(_) => MAX_DELAY,
    }
}

/// nth Fibonacci number, `None` once it no longer fits in `u128`.
fn fibonacci(n: usize) -> Option<u128> {
    if n == 0 {
        return Some(0);
    }
    let mut a: u128 = 0;
    let mut b: u128 = 1;
    for _ in 1..n {
        let next = a.checked_add(b)?;
        a = b;
        b = next;
    }
    Some(b)
}
