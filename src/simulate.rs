//! Deterministic simulation of a policy's decisions.
//!
//! Semantics:
//! - [`apply_policy`] is the only state transition: `iter_number + 1`, and `previous_delay` set to
//!   the policy's decision taken against the *input* status.
//! - [`dry_run`] starts from [`RetryStatus::new`] and applies the policy repeatedly, stopping
//!   *after* the first status whose `previous_delay` is absent. That terminal status is included.
//! - [`dry_run_iter`] yields the same sequence lazily and is fused after the terminal status.
//!
//! A policy that never returns `None` (for example a bare [`constant_delay`](crate::constant_delay))
//! makes `dry_run` loop forever and grow without bound. Bound such policies with a limiter, or
//! use `dry_run_iter(&p).take(n)`.
//!
//! Example
//! ```rust
//! use retry_algebra::prelude::*;
//! use std::time::Duration;
//!
//! let policy = exponential_backoff(Duration::from_millis(10)).concat(limit_retries(2));
//! let steps = dry_run(&policy);
//! assert_eq!(
//!     steps,
//!     vec![
//!         RetryStatus::from_parts(1, Some(Duration::from_millis(10))),
//!         RetryStatus::from_parts(2, Some(Duration::from_millis(20))),
//!         RetryStatus::from_parts(3, None),
//!     ]
//! );
//!
//! // Unbounded policies can still be inspected lazily.
//! let first_three: Vec<_> = dry_run_iter(&constant_delay(Duration::from_millis(1))).take(3).collect();
//! assert_eq!(first_three.len(), 3);
//! ```

use crate::{RetryPolicy, RetryStatus};
use std::iter::FusedIterator;

/// Derive the next status: decision evaluated against `status`, then the attempt count increments.
///
/// The count saturates at `usize::MAX`, so a status already at the maximum keeps that count.
pub fn apply_policy<P>(policy: &P, status: &RetryStatus) -> RetryStatus
where
    P: RetryPolicy + ?Sized,
{
    let delay = policy.evaluate(status);
    let iter_number = status.iter_number().saturating_add(1);
    tracing::trace!(iter_number, delay = ?delay, "retry policy decision");
    RetryStatus::from_parts(iter_number, delay)
}

/// Collect every status up to and including the first one that records a stop.
///
/// Does not terminate for policies that never stop.
pub fn dry_run<P>(policy: &P) -> Vec<RetryStatus>
where
    P: RetryPolicy + ?Sized,
{
    let steps: Vec<RetryStatus> = dry_run_iter(policy).collect();
    tracing::debug!(steps = steps.len(), "dry run terminated");
    steps
}

/// Lazy form of [`dry_run`].
pub fn dry_run_iter<P>(policy: &P) -> DryRun<'_, P>
where
    P: RetryPolicy + ?Sized,
{
    DryRun { policy, current: Some(RetryStatus::new()) }
}

/// Iterator returned by [`dry_run_iter`].
#[derive(Debug)]
pub struct DryRun<'a, P: ?Sized> {
    policy: &'a P,
    // `None` once the terminal status has been yielded
    current: Option<RetryStatus>,
}

impl<P> Iterator for DryRun<'_, P>
where
    P: RetryPolicy + ?Sized,
{
    type Item = RetryStatus;

    fn next(&mut self) -> Option<Self::Item> {
        let status = self.current.take()?;
        let next = apply_policy(self.policy, &status);
        if next.previous_delay().is_some() {
            self.current = Some(next);
        }
        Some(next)
    }
}

impl<P> FusedIterator for DryRun<'_, P> where P: RetryPolicy + ?Sized {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{constant_delay, exponential_backoff, limit_retries, RetryPolicyExt};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tracing_subscriber::fmt::writer::BoxMakeWriter;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct SharedWriter(Arc<Mutex<Vec<u8>>>);

    impl<'a> MakeWriter<'a> for SharedWriter {
        type Writer = SharedGuard;
        fn make_writer(&'a self) -> Self::Writer {
            SharedGuard(self.0.clone())
        }
    }

    struct SharedGuard(Arc<Mutex<Vec<u8>>>);
    impl std::io::Write for SharedGuard {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            let mut guard = self.0.lock().unwrap();
            guard.extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn apply_policy_evaluates_before_incrementing() {
        // limit 1 allows the decision at iter 0 but not at iter 1
        let policy = limit_retries(1);
        let first = apply_policy(&policy, &RetryStatus::new());
        assert_eq!(first, RetryStatus::from_parts(1, Some(Duration::ZERO)));
        let second = apply_policy(&policy, &first);
        assert_eq!(second, RetryStatus::from_parts(2, None));
    }

    #[test]
    fn apply_policy_saturates_attempt_count() {
        let status = RetryStatus::from_parts(usize::MAX, None);
        let next = apply_policy(&limit_retries(1), &status);
        assert_eq!(next, RetryStatus::from_parts(usize::MAX, None));
    }

    #[test]
    fn next_is_apply_policy() {
        let policy = exponential_backoff(Duration::from_millis(5));
        let status = RetryStatus::from_parts(2, None);
        assert_eq!(status.next(&policy), apply_policy(&policy, &status));
    }

    #[test]
    fn dry_run_of_never_policy_has_single_terminal_step() {
        let steps = dry_run(&limit_retries(0));
        assert_eq!(steps, vec![RetryStatus::from_parts(1, None)]);
    }

    #[test]
    fn dry_run_includes_terminal_status_once() {
        let steps = dry_run(&constant_delay(Duration::from_millis(7)).concat(limit_retries(3)));
        assert_eq!(steps.len(), 4);
        assert!(steps[..3].iter().all(|s| s.previous_delay() == Some(Duration::from_millis(7))));
        assert!(steps[3].is_terminal());
    }

    #[test]
    fn dry_run_iter_is_fused() {
        let policy = limit_retries(1);
        let mut iter = dry_run_iter(&policy);
        assert!(iter.next().is_some());
        assert!(iter.next().map(|s| s.is_terminal()).unwrap_or(false));
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn dry_run_iter_bounds_infinite_policy() {
        let steps: Vec<_> = dry_run_iter(&constant_delay(Duration::ZERO)).take(1_000).collect();
        assert_eq!(steps.len(), 1_000);
        assert_eq!(steps.last().map(|s| s.iter_number()), Some(1_000));
    }

    #[test]
    fn dry_run_works_on_trait_objects() {
        let policy: Box<dyn RetryPolicy> = Box::new(limit_retries(2));
        assert_eq!(dry_run(policy.as_ref()).len(), 3);
    }

    #[test]
    fn dry_run_emits_trace_events() {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let writer = SharedWriter(buffer.clone());
        let subscriber = tracing_subscriber::fmt()
            .with_writer(BoxMakeWriter::new(writer))
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_target(true)
            .without_time()
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        dry_run(&limit_retries(2));

        let logs = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert_eq!(logs.matches("retry policy decision").count(), 3);
        assert!(logs.contains("dry run terminated"), "summary should be logged");
        assert!(logs.contains("steps=3"));
    }
}
