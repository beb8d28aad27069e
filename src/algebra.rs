//! Operator syntax for composing policies.
//!
//! The `Policy` wrapper is opt-in and exists purely for readability:
//!
//! - `Policy(A) & Policy(B)` - merge: both must agree to continue, the larger delay wins
//!   (same as [`concat`](crate::concat)).
//! - `Policy(A).capped(max)` - upper-bound the delay (same as [`cap_delay`](crate::cap_delay)).
//!
//! `&` matches the continuation semantics of the merge: the result keeps retrying only while
//! both operands do.
//!
//! # Examples
//!
//! ```
//! use retry_algebra::prelude::*;
//! use std::time::Duration;
//!
//! let policy = (Policy(constant_delay(Duration::from_millis(300)))
//!     & Policy(exponential_backoff(Duration::from_millis(200)))
//!     & Policy(limit_retries(5)))
//!     .capped(Duration::from_millis(500));
//!
//! let delays: Vec<_> = dry_run(&policy).iter().map(|s| s.previous_delay()).collect();
//! assert_eq!(delays.len(), 6);
//! assert_eq!(delays[2], Some(Duration::from_millis(500)));
//! assert_eq!(delays[5], None);
//! ```

use crate::combinators::{CapDelay, Concat};
use crate::{RetryPolicy, RetryStatus};
use std::ops::BitAnd;
use std::time::Duration;

/// Opt-in wrapper enabling operator composition of policies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Policy<P>(pub P);

impl<P> Policy<P> {
    /// Unwrap the inner policy.
    pub fn into_inner(self) -> P {
        self.0
    }

    /// Upper-bound the delay of the wrapped policy.
    pub fn capped(self, max_delay: Duration) -> Policy<CapDelay<P>>
    where
        P: RetryPolicy,
    {
        Policy(crate::cap_delay(max_delay, self.0))
    }
}

impl<P: RetryPolicy> RetryPolicy for Policy<P> {
    fn evaluate(&self, status: &RetryStatus) -> Option<Duration> {
        self.0.evaluate(status)
    }
}

impl<A, B> BitAnd<Policy<B>> for Policy<A>
where
    A: RetryPolicy,
    B: RetryPolicy,
{
    type Output = Policy<Concat<A, B>>;
    fn bitand(self, rhs: Policy<B>) -> Self::Output {
        Policy(crate::concat(self.0, rhs.0))
    }
}
