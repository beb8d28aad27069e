//! Declarative policy descriptions.
//!
//! Lets a policy tree live in configuration instead of code. Each node is tagged by `kind`:
//!
//! | kind             | fields                         | builds                                  |
//! |------------------|--------------------------------|-----------------------------------------|
//! | `constant`       | `delay_ms`                     | [`constant_delay`]                      |
//! | `limit_retries`  | `max`                          | [`limit_retries`]                       |
//! | `exponential`    | `base_ms`                      | [`exponential_backoff`]                 |
//! | `linear`         | `base_ms`                      | [`linear_backoff`]                      |
//! | `fibonacci`      | `base_ms`                      | [`fibonacci_backoff`]                   |
//! | `cap_delay`      | `max_ms`, `policy`             | [`cap_delay`]                           |
//! | `limit_by_delay` | `threshold_ms`, `policy`       | [`limit_retries_by_delay`]              |
//! | `concat`         | `policies` (non-empty list)    | left fold of [`concat`]                 |
//!
//! Numbers are signed on the wire so that negative values are reported as
//! [`PolicyError::NegativeDelay`]/[`PolicyError::NegativeRetryLimit`] when building, rather than
//! as an opaque parse failure.
//!
//! ```rust
//! use retry_algebra::config::PolicyConfig;
//! use retry_algebra::dry_run;
//!
//! let json = r#"{
//!     "kind": "cap_delay",
//!     "max_ms": 2000,
//!     "policy": {
//!         "kind": "concat",
//!         "policies": [
//!             { "kind": "constant", "delay_ms": 300 },
//!             { "kind": "exponential", "base_ms": 200 },
//!             { "kind": "limit_retries", "max": 5 }
//!         ]
//!     }
//! }"#;
//! let policy = PolicyConfig::from_json(json)?.build()?;
//! assert_eq!(dry_run(&policy).len(), 6);
//! # Ok::<(), retry_algebra::PolicyError>(())
//! ```

use crate::{
    cap_delay, concat, constant_delay, exponential_backoff, fibonacci_backoff,
    limit_retries, limit_retries_by_delay, linear_backoff, BoxPolicy, PolicyError,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// One node of a policy tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PolicyConfig {
    /// Fixed delay, never stops.
    Constant { delay_ms: i64 },
    /// Zero delay for `max` attempts, then stop.
    LimitRetries { max: i64 },
    /// `base_ms * 2^attempt`.
    Exponential { base_ms: i64 },
    /// `base_ms * (attempt + 1)`.
    Linear { base_ms: i64 },
    /// `base_ms * fib(attempt + 1)`.
    Fibonacci { base_ms: i64 },
    /// Upper bound on the nested policy's delay.
    CapDelay { max_ms: i64, policy: Box<PolicyConfig> },
    /// Stop once the nested policy's delay reaches `threshold_ms`.
    LimitByDelay { threshold_ms: i64, policy: Box<PolicyConfig> },
    /// Merge of all listed policies, folded left to right.
    Concat { policies: Vec<PolicyConfig> },
}

impl PolicyConfig {
    /// Parse a JSON description. Values are not validated until [`PolicyConfig::build`].
    pub fn from_json(json: &str) -> Result<Self, PolicyError> {
        serde_json::from_str(json).map_err(|err| PolicyError::Parse(Box::new(err)))
    }

    /// Validate every node and assemble the policy tree.
    pub fn build(&self) -> Result<BoxPolicy, PolicyError> {
        let policy: BoxPolicy = match self {
            Self::Constant { delay_ms } => Arc::new(constant_delay(millis("delay_ms", *delay_ms)?)),
            Self::LimitRetries { max } => Arc::new(limit_retries(retry_limit(*max)?)),
            Self::Exponential { base_ms } => {
                Arc::new(exponential_backoff(millis("base_ms", *base_ms)?))
            }
            Self::Linear { base_ms } => Arc::new(linear_backoff(millis("base_ms", *base_ms)?)),
            Self::Fibonacci { base_ms } => Arc::new(fibonacci_backoff(millis("base_ms", *base_ms)?)),
            Self::CapDelay { max_ms, policy } => {
                Arc::new(cap_delay(millis("max_ms", *max_ms)?, policy.build()?))
            }
            Self::LimitByDelay { threshold_ms, policy } => Arc::new(limit_retries_by_delay(
                millis("threshold_ms", *threshold_ms)?,
                policy.build()?,
            )),
            Self::Concat { policies } => {
                let mut nodes = policies.iter();
                let first = nodes.next().ok_or(PolicyError::EmptyConcat)?.build()?;
                nodes.try_fold(first, |acc, next| -> Result<BoxPolicy, PolicyError> {
                    Ok(Arc::new(concat(acc, next.build()?)))
                })?
            }
        };
        tracing::debug!(kind = self.kind(), "built retry policy node");
        Ok(policy)
    }

    /// The `kind` tag of this node.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Constant { .. } => "constant",
            Self::LimitRetries { .. } => "limit_retries",
            Self::Exponential { .. } => "exponential",
            Self::Linear { .. } => "linear",
            Self::Fibonacci { .. } => "fibonacci",
            Self::CapDelay { .. } => "cap_delay",
            Self::LimitByDelay { .. } => "limit_by_delay",
            Self::Concat { .. } => "concat",
        }
    }
}

fn millis(field: &'static str, value: i64) -> Result<Duration, PolicyError> {
    u64::try_from(value)
        .map(Duration::from_millis)
        .map_err(|_| PolicyError::NegativeDelay { field, value })
}

fn retry_limit(value: i64) -> Result<usize, PolicyError> {
    if value < 0 {
        return Err(PolicyError::NegativeRetryLimit(value));
    }
    usize::try_from(value).map_err(|_| PolicyError::RetryLimitTooLarge(value))
}
