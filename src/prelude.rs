//! Convenient re-exports for building and inspecting policies.
pub use crate::{
    algebra::Policy,
    backoff::{
        constant_delay, exponential_backoff, fibonacci_backoff, limit_retries, linear_backoff,
        ConstantDelay, ExponentialBackoff, FibonacciBackoff, LimitRetries, LinearBackoff,
        MAX_DELAY,
    },
    combinators::{
        cap_delay, concat, limit_retries_by_delay, CapDelay, Concat, LimitByDelay, RetryPolicyExt,
    },
    policy::{policy_fn, BoxPolicy, FnPolicy, RetryPolicy},
    simulate::{apply_policy, dry_run, dry_run_iter, DryRun},
    PolicyError, RetryStatus,
};
