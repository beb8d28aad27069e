//! The policy abstraction.
//!
//! A [`RetryPolicy`] is a pure decision function from a [`RetryStatus`] to an optional delay.
//! `None` is the only termination signal; `Some(Duration::ZERO)` means "retry immediately".
//!
//! Invariants every implementation must uphold:
//! - Determinism: equal statuses yield equal decisions. No clocks, randomness, or counters.
//! - No side effects: evaluating a policy never sleeps or performs I/O.
//!
//! Combinators only depend on this trait, so a primitive, a combinator output, a closure via
//! [`policy_fn`], or a type-erased [`BoxPolicy`] are all interchangeable.
//!
//! ```rust
//! use retry_algebra::{policy_fn, RetryPolicy, RetryStatus};
//! use std::time::Duration;
//!
//! // Retry twice, 5ms apart.
//! let policy = policy_fn(|status: &RetryStatus| {
//!     (status.iter_number() < 2).then(|| Duration::from_millis(5))
//! });
//! assert_eq!(policy.evaluate(&RetryStatus::new()), Some(Duration::from_millis(5)));
//! assert_eq!(policy.evaluate(&RetryStatus::from_parts(2, None)), None);
//! ```

use crate::RetryStatus;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Pure function deciding the next retry delay, or termination, from the current status.
pub trait RetryPolicy: Send + Sync {
    /// Delay before the next attempt, or `None` to stop retrying.
    fn evaluate(&self, status: &RetryStatus) -> Option<Duration>;
}

impl<P> RetryPolicy for &P
where
    P: RetryPolicy + ?Sized,
{
    fn evaluate(&self, status: &RetryStatus) -> Option<Duration> {
        (**self).evaluate(status)
    }
}

impl<P> RetryPolicy for Box<P>
where
    P: RetryPolicy + ?Sized,
{
    fn evaluate(&self, status: &RetryStatus) -> Option<Duration> {
        (**self).evaluate(status)
    }
}

impl<P> RetryPolicy for Arc<P>
where
    P: RetryPolicy + ?Sized,
{
    fn evaluate(&self, status: &RetryStatus) -> Option<Duration> {
        (**self).evaluate(status)
    }
}

/// Shared, type-erased policy. Cheap to clone.
pub type BoxPolicy = Arc<dyn RetryPolicy>;

/// Policy backed by a closure. Created with [`policy_fn`].
#[derive(Clone, Copy)]
pub struct FnPolicy<F> {
    f: F,
}

impl<F> fmt::Debug for FnPolicy<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPolicy").field("f", &"<fn>").finish()
    }
}

impl<F> RetryPolicy for FnPolicy<F>
where
    F: Fn(&RetryStatus) -> Option<Duration> + Send + Sync,
{
    fn evaluate(&self, status: &RetryStatus) -> Option<Duration> {
        (self.f)(status)
    }
}

/// Adapt a closure into a policy. The closure must be deterministic.
pub fn policy_fn<F>(f: F) -> FnPolicy<F>
where
    F: Fn(&RetryStatus) -> Option<Duration> + Send + Sync,
{
    FnPolicy { f }
}
