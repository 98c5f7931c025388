//! End-to-end validation tests through the registry

use ouroboros_rulecheck::{
    rules, ConfigError, Registry, Rule, ValidationError, ValidationResult, Value,
};
use serde_json::{json, Value as Json};

fn rule(value: Json) -> Rule {
    rules::from_json(value).unwrap()
}

fn failing_key(registry: &Registry, value: &Value, alias: &str, rule_json: Json) -> Option<String> {
    registry
        .check(value, alias, &rule(rule_json))
        .unwrap()
        .and_then(|err| err.key().map(str::to_string))
}

// ============================================================================
// Numeric Validation Tests
// ============================================================================

#[test]
fn test_numeric_inclusive_and_exclusive_bounds() {
    let registry = Registry::with_defaults();
    let cases = [
        ("int", Value::Int(-3), Value::Int(3), Value::Int(0)),
        ("float", Value::Float(-1.5), Value::Float(1.5), Value::Float(0.25)),
        ("numeric", Value::from("-1.5"), Value::Int(3), Value::from("0")),
    ];

    for (alias, low, high, middle) in cases {
        let bounds = match alias {
            "int" => json!({"min": -3, "max": 3}),
            "float" => json!({"min": -1.5, "max": 1.5}),
            _ => json!({"min": "-1.5", "max": 3}),
        };

        let inclusive = rule(bounds.clone());
        for v in [&low, &high, &middle] {
            assert_eq!(registry.check(v, alias, &inclusive), Ok(None), "{} {}", alias, v);
        }

        let mut exclusive = bounds;
        exclusive["inc"] = json!(false);
        let exclusive = rule(exclusive);
        for v in [&low, &high] {
            assert_eq!(
                registry.check(v, alias, &exclusive),
                Ok(Some(ValidationError::InvalidFormat)),
                "{} {}",
                alias,
                v
            );
        }
        assert_eq!(registry.check(&middle, alias, &exclusive), Ok(None));
    }
}

#[test]
fn test_numeric_min_above_max_is_config_error() {
    let registry = Registry::with_defaults();
    for alias in ["int", "float", "numeric"] {
        for value in [Value::Int(0), Value::from("abc"), Value::List(vec![])] {
            assert!(matches!(
                registry.check(&value, alias, &rule(json!({"min": 5, "max": 1}))),
                Err(ConfigError::Rule(_))
            ));
        }
    }
}

// ============================================================================
// Sequence Validation Tests
// ============================================================================

#[test]
fn test_array_strictness() {
    let registry = Registry::with_defaults();
    let gapped = Value::map([(Value::Int(0), Value::from("a")), (Value::Int(2), Value::from("b"))]);

    for ok in [
        Value::List(vec![]),
        Value::List(vec![Value::from("a")]),
        Value::List(vec![Value::from("a"), Value::from("b")]),
    ] {
        assert_eq!(registry.check(&ok, "array", rules::empty()), Ok(None));
    }

    assert_eq!(
        registry.check(&gapped, "array", rules::empty()),
        Ok(Some(ValidationError::invalid_type("indexed array")))
    );
    assert_eq!(registry.check(&gapped, "array", &rule(json!({"strict": false}))), Ok(None));
}

#[test]
fn test_array_length_bounds() {
    let registry = Registry::with_defaults();
    let bounds = rule(json!({"min_length": 2, "max_length": 3}));
    let list = |n: usize| Value::List(vec![Value::Int(0); n]);

    let too_far: ValidationResult = Ok(Some(ValidationError::InvalidFormat));
    assert_eq!(registry.check(&list(1), "array", &bounds), too_far);
    assert_eq!(registry.check(&list(2), "array", &bounds), Ok(None));
    assert_eq!(registry.check(&list(3), "array", &bounds), Ok(None));
    assert_eq!(registry.check(&list(4), "array", &bounds), too_far);
}

#[test]
fn test_array_element_failure() {
    let registry = Registry::with_defaults();
    let value = Value::from(json!([1, 2, "3"]));
    assert_eq!(
        failing_key(&registry, &value, "array", json!({"data": "int"})).as_deref(),
        Some("2")
    );
}

// ============================================================================
// Dict Validation Tests
// ============================================================================

#[test]
fn test_dict_required_key() {
    let registry = Registry::with_defaults();
    let required = json!({"elements": {"3": {"required": true}}});

    assert_eq!(
        failing_key(&registry, &Value::from(json!({"b": 1})), "dict", required.clone()).as_deref(),
        Some("3")
    );
    assert_eq!(
        failing_key(&registry, &Value::from(json!({"3": 1})), "dict", required.clone()),
        None
    );
    assert_eq!(
        failing_key(&registry, &Value::map([(Value::Int(3), Value::Int(1))]), "dict", required),
        None
    );
}

#[test]
fn test_dict_strict_mode() {
    let registry = Registry::with_defaults();
    let value = Value::from(json!({"a": 1, "b": "x", "c": []}));
    assert_eq!(
        failing_key(
            &registry,
            &value,
            "dict",
            json!({"strict": true, "elements": {"a": {}, "c": {}}})
        )
        .as_deref(),
        Some("b")
    );
    assert_eq!(
        failing_key(&registry, &value, "dict", json!({"elements": {"a": {}, "c": {}}})),
        None
    );
}

#[test]
fn test_dict_wildcard() {
    let registry = Registry::with_defaults();
    let wildcard = json!({"elements": {"*": {"regex": "a[0-9]+"}, "b": {"type": "string"}}});
    let matching = Value::from(json!({"a1": 1, "a2": 2, "b": "s"}));
    let stray = Value::from(json!({"z1": 1, "b": "s"}));

    assert_eq!(
        failing_key(&registry, &matching, "dict", wildcard.clone()),
        None
    );
    assert_eq!(
        failing_key(&registry, &stray, "dict", wildcard).as_deref(),
        Some("z1")
    );
}

#[test]
fn test_nested_rule_path() {
    let registry = Registry::with_defaults();
    let user_rule = json!({
        "strict": true,
        "elements": {
            "name": {"type": "string", "required": true, "rules": {"empty": false}},
            "emails": {
                "type": "array",
                "rules": {"data": "string", "data_rules": {"regex": "[^@]+@[^@]+$"}}
            }
        }
    });
    let users_rule = json!({"data": "dict", "data_rules": user_rule});

    let users = Value::from(json!([
        {"name": "ann", "emails": ["ann@example.com"]},
        {"name": "bob", "emails": ["bob@example.com", "bob.example.com"]}
    ]));

    let err = registry.check(&users, "array", &rule(users_rule)).unwrap().unwrap();
    assert_eq!(err.path(), vec!["1", "emails", "1"]);
    assert_eq!(err.root_cause(), &ValidationError::InvalidFormat);
    assert_eq!(err.to_string(), "1: emails: 1: data format is invalid");
}

#[cfg(feature = "yaml")]
#[test]
fn test_yaml_rule_and_data() {
    let registry = Registry::with_defaults();
    let rule = rules::parse_yaml(
        r#"
strict: false
data: string
data_rules:
  regex: "[a-z]+"
  regex_mode: i
"#,
    )
    .unwrap();

    let sparse: serde_yaml::Value = serde_yaml::from_str("0: Alpha\n5: beta\n").unwrap();
    assert_eq!(registry.check(&Value::from(sparse), "array", &rule), Ok(None));

    let bad: serde_yaml::Value = serde_yaml::from_str("0: Alpha\n5: '42'\n").unwrap();
    let err = registry.check(&Value::from(bad), "array", &rule).unwrap().unwrap();
    assert_eq!(err.key(), Some("5"));
}

#[test]
fn test_check_and_throw_with_question_mark() {
    fn run(registry: &Registry, value: &Value) -> Result<(), ouroboros_rulecheck::CheckError> {
        let id_rule = rule(json!({"elements": {"id": {"type": "int", "required": true}}}));
        registry.check_and_throw(value, "dict", &id_rule)?;
        Ok(())
    }

    let registry = Registry::with_defaults();
    assert!(run(&registry, &Value::from(json!({"id": 1}))).is_ok());
    assert_eq!(
        run(&registry, &Value::from(json!({}))).unwrap_err().to_string(),
        "id: not found, but required"
    );
}
