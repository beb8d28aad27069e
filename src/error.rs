//! Error types for policy construction.
//!
//! Evaluating a policy never fails; termination is modeled as an absent delay. Errors only arise
//! when a policy is built from untyped input (see the `config` module) and an argument is out of
//! range.

/// Invalid arguments supplied while constructing a policy.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// A delay argument was negative.
    #[error("{field} must be non-negative (got {value})")]
    NegativeDelay { field: &'static str, value: i64 },
    /// A retry limit was negative.
    #[error("retry limit must be non-negative (got {0})")]
    NegativeRetryLimit(i64),
    /// A retry limit does not fit this platform's `usize`. Only reachable where `usize` is
    /// narrower than 64 bits.
    #[error("retry limit {0} is too large for this platform")]
    RetryLimitTooLarge(i64),
    /// A merge was requested with nothing to merge.
    #[error("concat requires at least one policy")]
    EmptyConcat,
    /// The policy description could not be parsed.
    #[error("invalid policy description: {0}")]
    Parse(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl PolicyError {
    /// True for argument validation failures, as opposed to parse failures.
    pub fn is_invalid_argument(&self) -> bool {
        match self {
            Self::NegativeDelay { .. }
            | Self::NegativeRetryLimit(_)
            | Self::RetryLimitTooLarge(_)
            | Self::EmptyConcat => true,
            Self::Parse(_) => false,
        }
    }
}
