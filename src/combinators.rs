//! Higher-order policies built from other policies.
//!
//! - [`cap_delay`]: upper-bounds a policy's delay without touching its termination behavior.
//! - [`concat`]: merges two policies evaluated at the same status. Delays merge with `max` (the
//!   slower policy wins), continuation merges with AND (either side stopping stops both).
//! - [`limit_retries_by_delay`]: stops once the wrapped policy's delay reaches a threshold.
//!
//! Combinators only rely on [`RetryPolicy`], so they nest arbitrarily. The fluent
//! [`RetryPolicyExt`] methods express the usual left-to-right pipeline, where each later call
//! wraps everything before it:
//!
//! ```rust
//! use retry_algebra::prelude::*;
//! use std::time::Duration;
//!
//! let policy = constant_delay(Duration::from_millis(300))
//!     .concat(exponential_backoff(Duration::from_millis(200)))
//!     .concat(limit_retries(5))
//!     .cap_delay(Duration::from_millis(2000));
//!
//! assert_eq!(policy.evaluate(&RetryStatus::new()), Some(Duration::from_millis(300)));
//! assert_eq!(
//!     policy.evaluate(&RetryStatus::from_parts(4, None)),
//!     Some(Duration::from_millis(2000))
//! );
//! assert_eq!(policy.evaluate(&RetryStatus::from_parts(5, None)), None);
//! ```

use crate::{BoxPolicy, RetryPolicy, RetryStatus};
use std::sync::Arc;
use std::time::Duration;

/// Upper bound on a wrapped policy's delay. Created by [`cap_delay`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapDelay<P> {
    max_delay: Duration,
    inner: P,
}

impl<P> CapDelay<P> {
    /// Ceiling applied to every delay.
    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }

    /// The capped policy.
    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: RetryPolicy> RetryPolicy for CapDelay<P> {
    fn evaluate(&self, status: &RetryStatus) -> Option<Duration> {
        self.inner.evaluate(status).map(|delay| delay.min(self.max_delay))
    }
}

/// Merge of two policies: max on delay, AND on continuation. Created by [`concat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Concat<A, B> {
    pub first: A,
    pub second: B,
}

impl<A, B> RetryPolicy for Concat<A, B>
where
    A: RetryPolicy,
    B: RetryPolicy,
{
    fn evaluate(&self, status: &RetryStatus) -> Option<Duration> {
        // both sides are always evaluated
        let first = self.first.evaluate(status);
        let second = self.second.evaluate(status);
        match (first, second) {
            (Some(a), Some(b)) => Some(a.max(b)),
            _ => None,
        }
    }
}

/// Stops once the wrapped policy's delay reaches a threshold. Created by
/// [`limit_retries_by_delay`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitByDelay<P> {
    threshold: Duration,
    inner: P,
}

impl<P> LimitByDelay<P> {
    /// Smallest delay that stops the policy.
    pub fn threshold(&self) -> Duration {
        self.threshold
    }
}

impl<P: RetryPolicy> RetryPolicy for LimitByDelay<P> {
    fn evaluate(&self, status: &RetryStatus) -> Option<Duration> {
        self.inner.evaluate(status).filter(|delay| *delay < self.threshold)
    }
}

/// `min(max_delay, policy(status))`; absent stays absent.
pub fn cap_delay<P: RetryPolicy>(max_delay: Duration, policy: P) -> CapDelay<P> {
    CapDelay { max_delay, inner: policy }
}

/// Evaluate `first` and `second` at the same status; both must continue, the larger delay wins.
pub fn concat<A, B>(first: A, second: B) -> Concat<A, B>
where
    A: RetryPolicy,
    B: RetryPolicy,
{
    Concat { first, second }
}

/// Keep `policy`'s delay while it stays strictly below `threshold`; stop otherwise.
pub fn limit_retries_by_delay<P: RetryPolicy>(threshold: Duration, policy: P) -> LimitByDelay<P> {
    LimitByDelay { threshold, inner: policy }
}

/// Fluent pipeline syntax for the combinators. Implemented for every sized policy.
pub trait RetryPolicyExt: RetryPolicy + Sized {
    /// `cap_delay(max_delay, self)`.
    fn cap_delay(self, max_delay: Duration) -> CapDelay<Self> {
        cap_delay(max_delay, self)
    }

    /// `concat(self, other)`.
    fn concat<B: RetryPolicy>(self, other: B) -> Concat<Self, B> {
        concat(self, other)
    }

    /// `limit_retries_by_delay(threshold, self)`.
    fn limit_by_delay(self, threshold: Duration) -> LimitByDelay<Self> {
        limit_retries_by_delay(threshold, self)
    }

    /// Erase the concrete type.
    fn boxed(self) -> BoxPolicy
    where
        Self: 'static,
    {
        Arc::new(self)
    }
}

impl<P: RetryPolicy> RetryPolicyExt for P {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{constant_delay, exponential_backoff, limit_retries, policy_fn};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn at(iter: usize) -> RetryStatus {
        RetryStatus::from_parts(iter, None)
    }

    fn ms(n: u64) -> Option<Duration> {
        Some(Duration::from_millis(n))
    }

    #[test]
    fn cap_bounds_delay() {
        let capped = cap_delay(Duration::from_millis(500), exponential_backoff(Duration::from_millis(200)));
        assert_eq!(capped.evaluate(&at(0)), ms(200));
        assert_eq!(capped.evaluate(&at(1)), ms(400));
        assert_eq!(capped.evaluate(&at(2)), ms(500));
        assert_eq!(capped.evaluate(&at(30)), ms(500));
    }

    #[test]
    fn cap_preserves_termination() {
        let capped = limit_retries(1).cap_delay(Duration::from_secs(1));
        assert_eq!(capped.evaluate(&at(0)), Some(Duration::ZERO));
        assert_eq!(capped.evaluate(&at(1)), None);
    }

    #[test]
    fn concat_takes_larger_delay() {
        let merged = constant_delay(Duration::from_millis(300))
            .concat(exponential_backoff(Duration::from_millis(200)));
        assert_eq!(merged.evaluate(&at(0)), ms(300));
        assert_eq!(merged.evaluate(&at(1)), ms(400));
    }

    #[test]
    fn concat_stop_is_contagious_from_either_side() {
        let left = limit_retries(2).concat(constant_delay(Duration::from_millis(10)));
        let right = constant_delay(Duration::from_millis(10)).concat(limit_retries(2));
        for policy in [&left as &dyn RetryPolicy, &right] {
            assert_eq!(policy.evaluate(&at(1)), ms(10));
            assert_eq!(policy.evaluate(&at(2)), None);
        }
    }

    #[test]
    fn concat_evaluates_both_sides() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = calls.clone();
        let spy = policy_fn(move |_: &RetryStatus| {
            counted.fetch_add(1, Ordering::SeqCst);
            Some(Duration::ZERO)
        });

        let merged = limit_retries(0).concat(spy);
        assert_eq!(merged.evaluate(&RetryStatus::new()), None);
        assert_eq!(calls.load(Ordering::SeqCst), 1, "second operand must still run");
    }

    #[test]
    fn concat_is_associative() {
        let a = || constant_delay(Duration::from_millis(300));
        let b = || exponential_backoff(Duration::from_millis(100));
        let c = || limit_retries(4);
        let left = a().concat(b()).concat(c());
        let right = a().concat(b().concat(c()));
        for i in 0..8 {
            assert_eq!(left.evaluate(&at(i)), right.evaluate(&at(i)), "iteration {}", i);
        }
    }

    #[test]
    fn limit_by_delay_stops_at_threshold() {
        let policy = exponential_backoff(Duration::from_millis(100)).limit_by_delay(Duration::from_millis(800));
        assert_eq!(policy.evaluate(&at(2)), ms(400));
        assert_eq!(policy.evaluate(&at(3)), None, "800ms reaches the threshold");
        assert_eq!(policy.threshold(), Duration::from_millis(800));
    }

    #[test]
    fn nested_combinators_compose() {
        let inner = cap_delay(Duration::from_millis(250), constant_delay(Duration::from_secs(1)));
        let outer = concat(inner, cap_delay(Duration::from_secs(5), limit_retries(3)));
        assert_eq!(outer.evaluate(&at(0)), ms(250));
        assert_eq!(outer.evaluate(&at(3)), None);
    }

    #[test]
    fn boxed_policy_is_equivalent() {
        let concrete = constant_delay(Duration::from_millis(20)).concat(limit_retries(2));
        let boxed = concrete.boxed();
        for i in 0..4 {
            assert_eq!(boxed.evaluate(&at(i)), concrete.evaluate(&at(i)));
        }
    }

    #[test]
    fn accessors_expose_parts() {
        let capped = cap_delay(Duration::from_secs(2), limit_retries(1));
        assert_eq!(capped.max_delay(), Duration::from_secs(2));
        assert_eq!(capped.inner(), &limit_retries(1));
    }
}
