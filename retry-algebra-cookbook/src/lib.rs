//! Ready-to-use policy recipes ("cookbook") for retry-algebra.
//! Each function returns a concrete policy you can evaluate, dry-run, or box.
//!
//! **Ladder:**
//! - Simple: [`quick_retry`], [`patient_retry`]
//! - Intermediate: [`floored_backoff`]
//! - Advanced: [`standard_chain`], [`tight_chain`] (floor + growth + limit + ceiling)
//! - From configuration: [`from_json`]

use std::time::Duration;

use retry_algebra::backoff::{ConstantDelay, ExponentialBackoff, FibonacciBackoff, LimitRetries};
use retry_algebra::combinators::{CapDelay, Concat, LimitByDelay};
use retry_algebra::config::PolicyConfig;
use retry_algebra::{
    constant_delay, exponential_backoff, fibonacci_backoff, limit_retries, BoxPolicy,
    PolicyError, RetryPolicyExt,
};

/// Floor, exponential growth, and a retry limit, before any ceiling is applied.
pub type FlooredBackoff = Concat<Concat<ConstantDelay, ExponentialBackoff>, LimitRetries>;

/// Three immediate-ish retries, 20ms apart.
pub fn quick_retry() -> Concat<ConstantDelay, LimitRetries> {
    constant_delay(Duration::from_millis(20)).concat(limit_retries(3))
}

/// Fibonacci growth from 100ms that gives up once a single wait would reach 30s.
pub fn patient_retry() -> LimitByDelay<FibonacciBackoff> {
    fibonacci_backoff(Duration::from_millis(100)).limit_by_delay(Duration::from_secs(30))
}

/// Never wait less than `floor`, double from `base`, at most `max_retries` retries.
pub fn floored_backoff(floor: Duration, base: Duration, max_retries: usize) -> FlooredBackoff {
    constant_delay(floor).concat(exponential_backoff(base)).concat(limit_retries(max_retries))
}

/// 300ms floor, 200ms exponential base, 5 retries, 2s ceiling.
///
/// Dry run: `{1,300} {2,400} {3,800} {4,1600} {5,2000} {6,absent}`.
pub fn standard_chain() -> CapDelay<FlooredBackoff> {
    floored_backoff(Duration::from_millis(300), Duration::from_millis(200), 5)
        .cap_delay(Duration::from_secs(2))
}

/// Same chain with a 500ms ceiling: `300, 400, 500, 500, 500`, then stop.
pub fn tight_chain() -> CapDelay<FlooredBackoff> {
    floored_backoff(Duration::from_millis(300), Duration::from_millis(200), 5)
        .cap_delay(Duration::from_millis(500))
}

/// Build a policy from its JSON description.
pub fn from_json(json: &str) -> Result<BoxPolicy, PolicyError> {
    PolicyConfig::from_json(json)?.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use retry_algebra::dry_run;

    fn delays<P: retry_algebra::RetryPolicy>(policy: &P) -> Vec<Option<u128>> {
        dry_run(policy).iter().map(|s| s.previous_delay().map(|d| d.as_millis())).collect()
    }

    #[test]
    fn standard_chain_sequence() {
        assert_eq!(
            delays(&standard_chain()),
            vec![Some(300), Some(400), Some(800), Some(1600), Some(2000), None]
        );
    }

    #[test]
    fn tight_chain_sequence() {
        assert_eq!(
            delays(&tight_chain()),
            vec![Some(300), Some(400), Some(500), Some(500), Some(500), None]
        );
    }

    #[test]
    fn quick_retry_is_short() {
        assert_eq!(delays(&quick_retry()), vec![Some(20), Some(20), Some(20), None]);
    }

    #[test]
    fn patient_retry_stops_before_thirty_seconds() {
        let waits = delays(&patient_retry());
        let (last, earlier) = waits.split_last().unwrap();
        assert_eq!(*last, None);
        assert!(earlier.iter().all(|d| d.map(|ms| ms < 30_000).unwrap_or(false)));
    }

    #[test]
    fn json_recipe_matches_code_recipe() {
        let json = r#"{"kind":"cap_delay","max_ms":2000,"policy":{"kind":"concat","policies":[
            {"kind":"constant","delay_ms":300},
            {"kind":"exponential","base_ms":200},
            {"kind":"limit_retries","max":5}]}}"#;
        let policy = from_json(json).unwrap();
        assert_eq!(dry_run(&policy), dry_run(&standard_chain()));
    }

    #[test]
    fn standard_chain_renders_dry_run_table_line() {
        let rendered: Vec<String> =
            dry_run(&standard_chain()).iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered.join(" "),
            "{1, 300} {2, 400} {3, 800} {4, 1600} {5, 2000} {6, absent}"
        );
    }
}
