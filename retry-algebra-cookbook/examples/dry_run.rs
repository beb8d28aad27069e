//! Print the decision table of the composed chain for two ceilings.
//!
//! Run with `RUST_LOG=retry_algebra=trace` to see each decision as it is taken.

use retry_algebra::prelude::*;
use retry_algebra_cookbook::{standard_chain, tight_chain};
use tracing_subscriber::EnvFilter;

fn print_table<P: RetryPolicy>(title: &str, policy: &P) {
    println!("{}", title);
    for status in dry_run(policy) {
        match status.previous_delay() {
            Some(delay) => println!("  attempt {:>2}: wait {:>5} ms", status.iter_number(), delay.as_millis()),
            None => println!("  attempt {:>2}: stop", status.iter_number()),
        }
    }
    let rendered: Vec<String> = dry_run(policy).iter().map(ToString::to_string).collect();
    println!("  {}\n", rendered.join(" "));
}

fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    println!("=== Retry Algebra: Dry Run ===\n");
    print_table("constant 300 & exponential 200 & limit 5, capped at 2000ms:", &standard_chain());
    print_table("same chain capped at 500ms:", &tight_chain());
}
