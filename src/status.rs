//! Retry status: the immutable record threaded through every policy evaluation.
//!
//! A status is created fresh by the caller (`iter_number == 0`, no previous delay) and is only
//! ever superseded, never mutated. [`RetryStatus::next`] derives the successor from a policy's
//! decision; it is the same transition as [`crate::simulate::apply_policy`].
//!
//! ```rust
//! use retry_algebra::{constant_delay, RetryStatus};
//! use std::time::Duration;
//!
//! let start = RetryStatus::new();
//! assert_eq!(start.iter_number(), 0);
//! assert_eq!(start.previous_delay(), None);
//!
//! let next = start.next(&constant_delay(Duration::from_millis(10)));
//! assert_eq!(next.iter_number(), 1);
//! assert_eq!(next.previous_delay(), Some(Duration::from_millis(10)));
//! ```

use crate::policy::RetryPolicy;
use std::fmt;
use std::time::Duration;

/// Attempt count plus the delay decided at the status this one was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RetryStatus {
    iter_number: usize,
    previous_delay: Option<Duration>,
}

impl RetryStatus {
    /// Status before the first attempt.
    pub const fn new() -> Self {
        Self { iter_number: 0, previous_delay: None }
    }

    /// Build an arbitrary status. Mostly useful for tests and for callers resuming a loop.
    pub const fn from_parts(iter_number: usize, previous_delay: Option<Duration>) -> Self {
        Self { iter_number, previous_delay }
    }

    /// Number of attempts made so far.
    pub const fn iter_number(&self) -> usize {
        self.iter_number
    }

    /// Delay decided at the previous status; `None` initially or once a policy said stop.
    pub const fn previous_delay(&self) -> Option<Duration> {
        self.previous_delay
    }

    /// True when this status records a decision to stop retrying.
    ///
    /// The initial status also has no previous delay but is not terminal.
    pub const fn is_terminal(&self) -> bool {
        self.iter_number > 0 && self.previous_delay.is_none()
    }

    /// Advance one step using `policy`. The decision is taken against `self`, before incrementing.
    pub fn next<P>(self, policy: &P) -> Self
    where
        P: RetryPolicy + ?Sized,
    {
        crate::simulate::apply_policy(policy, &self)
    }
}

impl fmt::Display for RetryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.previous_delay {
            Some(delay) => write!(f, "{{{}, {}}}", self.iter_number, delay.as_millis()),
            None => write!(f, "{{{}, absent}}", self.iter_number),
        }
    }
}
