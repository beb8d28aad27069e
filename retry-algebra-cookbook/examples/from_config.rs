//! Build a policy from a JSON description and show how validation reports bad input.

use retry_algebra::prelude::*;
use retry_algebra_cookbook::from_json;

const GOOD: &str = r#"{
    "kind": "cap_delay",
    "max_ms": 1000,
    "policy": {
        "kind": "concat",
        "policies": [
            { "kind": "linear", "base_ms": 250 },
            { "kind": "limit_retries", "max": 6 }
        ]
    }
}"#;

const BAD: &str = r#"{ "kind": "exponential", "base_ms": -200 }"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("=== Retry Algebra: Policy From Config ===\n");

    let policy = from_json(GOOD)?;
    for status in dry_run(&policy) {
        println!("  {}", status);
    }

    match from_json(BAD) {
        Ok(_) => println!("\nunexpectedly accepted negative base"),
        Err(err) => println!("\nrejected: {}", err),
    }
    Ok(())
}
