#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::all))]

//! # Retry Algebra
//!
//! Pure, composable retry policies. A policy decides, from how many attempts were made and the
//! delay decided last time, whether to retry again and after what delay. Nothing here sleeps,
//! spawns, or calls the operation being retried; a caller loops, waits the returned delay, and
//! feeds the next status back in.
//!
//! ## Features
//!
//! - **Primitives**: constant delay, retry-count limit, exponential/linear/Fibonacci backoff
//! - **Combinators**: `cap_delay` (upper bound) and `concat` (max on delay, AND on continuation)
//! - **Dry runs**: deterministic enumeration of every decision a policy makes
//! - **Config** (`serde` feature): policy trees described in JSON
//!
//! ## Quick Start
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
//! let rendered: Vec<String> = dry_run(&policy).iter().map(ToString::to_string).collect();
//! assert_eq!(
//!     rendered,
//!     ["{1, 300}", "{2, 400}", "{3, 800}", "{4, 1600}", "{5, 2000}", "{6, absent}"]
//! );
//! ```
//!
//! ## Driving a real retry loop
//!
//! ```rust
//! use retry_algebra::prelude::*;
//! use std::time::Duration;
//!
//! let policy = exponential_backoff(Duration::from_millis(10)).concat(limit_retries(3));
//! let mut status = RetryStatus::new();
//! let mut waited = Vec::new();
//! loop {
//!     // ... attempt the operation here; on failure ask the policy ...
//!     status = status.next(&policy);
//!     match status.previous_delay() {
//!         Some(delay) => waited.push(delay), // the caller would sleep `delay` here
//!         None => break,
//!     }
//! }
//! assert_eq!(waited.len(), 3);
//! ```

pub mod algebra;
pub mod backoff;
pub mod combinators;
#[cfg(feature = "serde")]
pub mod config;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod presets;
pub mod simulate;
pub mod status;

// Re-exports
pub use algebra::Policy;
pub use backoff::{
    constant_delay, exponential_backoff, fibonacci_backoff, limit_retries, linear_backoff,
    MAX_DELAY,
};
pub use combinators::{cap_delay, concat, limit_retries_by_delay, RetryPolicyExt};
pub use error::PolicyError;
pub use policy::{policy_fn, BoxPolicy, RetryPolicy};
pub use simulate::{apply_policy, dry_run, dry_run_iter};
pub use status::RetryStatus;
