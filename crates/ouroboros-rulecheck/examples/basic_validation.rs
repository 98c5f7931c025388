//! Basic Validation Example
//!
//! This example demonstrates rule-driven validation with ouroboros-rulecheck.
//!
//! Run with:
//! ```bash
//! RUST_LOG=ouroboros_rulecheck=debug cargo run -p ouroboros-rulecheck --example basic_validation
//! ```

use ouroboros_rulecheck::{rules, Registry, RegistryConfig, Rule, ValidationResult, Value};
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn result_str(result: &ValidationResult) -> String {
    match result {
        Ok(None) => "✓ Valid".to_string(),
        Ok(Some(err)) => format!("✗ Invalid: {}", err),
        Err(err) => format!("! Broken rule: {}", err),
    }
}

fn rule(value: serde_json::Value) -> Rule {
    rules::from_json(value).expect("rule literal is an object")
}

// ============================================================================
// Scalars
// ============================================================================

fn validate_scalars(registry: &Registry) {
    println!("1. Scalar Validation");
    println!("--------------------");

    let age = rule(json!({"min": 0, "max": 150}));
    for value in [Value::Int(-1), Value::Int(25), Value::Int(151), Value::from("25")] {
        println!("  int {}: {}", value, result_str(&registry.check(&value, "int", &age)));
    }

    let amount = rule(json!({"min": 0, "max": "99.5", "inc": false}));
    for value in [Value::from("12.25"), Value::Float(99.5), Value::from("0x1A")] {
        let result = registry.check(&value, "numeric", &amount);
        println!("  numeric {}: {}", value, result_str(&result));
    }

    let code = rule(json!({
        "empty": false,
        "max_length": 8,
        "regex": "[a-z]{2}-[0-9]+$",
        "regex_mode": "i",
    }));
    for value in ["AB-12", "ab12", "", "xy-123456"] {
        let value = Value::from(value);
        println!("  string {}: {}", value, result_str(&registry.check(&value, "string", &code)));
    }
    println!();
}

// ============================================================================
// Nested Records
// ============================================================================

fn validate_records(registry: &Registry) {
    println!("2. Nested Records");
    println!("-----------------");

    let order = rule(json!({
        "strict": true,
        "elements": {
            "id": {"type": "id", "required": true, "rules": {"min": 1}},
            "lines": {
                "type": "array",
                "required": true,
                "rules": {
                    "min_length": 1,
                    "data": "dict",
                    "data_rules": {
                        "elements": {
                            "sku": {"type": "string", "required": true},
                            "qty": {"type": "int", "rules": {"min": 1}}
                        }
                    }
                }
            },
            "*": {"regex": "meta_", "type": "string"}
        }
    }));

    let orders = [
        json!({"id": 7, "lines": [{"sku": "A-1", "qty": 2}], "meta_source": "web"}),
        json!({"id": 8, "lines": [{"sku": "A-1", "qty": 2}, {"qty": 1}]}),
        json!({"id": 9, "lines": [], "meta_source": "web"}),
        json!({"id": 10, "lines": [{"sku": "B-2"}], "coupon": "FREE"}),
    ];

    let values: Vec<Value> = orders.into_iter().map(Value::from).collect();
    match registry.check_many(&values, "dict", &order) {
        Ok(verdicts) => {
            for (value, verdict) in values.iter().zip(verdicts) {
                match verdict {
                    None => println!("  {}: ✓ Valid", value),
                    Some(err) => println!("  {}: ✗ {} (path: {:?})", value, err, err.path()),
                }
            }
        }
        Err(err) => println!("  ! Broken rule: {}", err),
    }
    println!();
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== ouroboros-rulecheck basic validation ===\n");

    let config = RegistryConfig::new().alias("id", "int");
    let registry = match Registry::from_config(&config) {
        Ok(registry) => registry,
        Err(err) => {
            eprintln!("Failed to build registry: {}", err);
            return;
        }
    };

    validate_scalars(&registry);
    validate_records(&registry);
}
