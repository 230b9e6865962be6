//! Declarative input validation.
//!
//! # Data Flow
//! ```text
//! Query string / JSON body
//!     → query_input / body_input (normalize into a JSON object)
//!     → validate(rules, input) (generic interpreter over FieldRule tables)
//!     → Ok(()) or InvalidInput (→ 400 before any upstream call)
//! ```
//!
//! # Design Decisions
//! - Rule sets are `const` tables; nothing is built at request time
//! - Absent, `null` and empty-string values all count as missing
//! - Every violation is collected; the first one leads the error message

pub mod rule;

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

pub use rule::{positive_number, FieldRule, FieldType, Predicate};

/// Normalized validator input: field name to JSON value.
pub type Input = Map<String, Value>;

/// One failed rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

/// Input rejected by one or more rules. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", first_message(.0))]
pub struct InvalidInput(pub Vec<FieldViolation>);

fn first_message(violations: &[FieldViolation]) -> &str {
    violations
        .first()
        .map(|v| v.message.as_str())
        .unwrap_or("invalid input")
}

impl InvalidInput {
    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }

    pub fn fields(&self) -> Vec<&'static str> {
        self.0.iter().map(|v| v.field).collect()
    }
}

/// Check `input` against every rule in order.
pub fn validate(rules: &[FieldRule], input: &Input) -> Result<(), InvalidInput> {
    let violations: Vec<FieldViolation> = rules
        .iter()
        .filter_map(|rule| check_field(rule, input.get(rule.field)))
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(InvalidInput(violations))
    }
}

fn check_field(rule: &FieldRule, value: Option<&Value>) -> Option<FieldViolation> {
    let violation = |generated: String| FieldViolation {
        field: rule.field,
        message: rule.message.map(str::to_string).unwrap_or(generated),
    };

    let value = match value.filter(|v| !is_blank(v)) {
        Some(value) => value,
        None if rule.required => return Some(violation(format!("{} is required", rule.field))),
        None => return None,
    };

    if let Some(kind) = rule.kind {
        if !kind.matches(value) {
            return Some(violation(format!("{} must be a {}", rule.field, kind.name())));
        }
    }

    match rule.predicate {
        Some(predicate) if !predicate(value) => {
            Some(violation(format!("{} is invalid", rule.field)))
        }
        _ => None,
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Query parameters as validator input. Every value is a string.
pub fn query_input(query: &HashMap<String, String>) -> Input {
    query
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect()
}

/// JSON request body as validator input.
///
/// Anything that is not a JSON object (empty body, malformed JSON, arrays)
/// yields an empty input, so required-field rules report it.
pub fn body_input(body: &[u8]) -> Input {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => map,
        Ok(_) | Err(_) => {
            if !body.is_empty() {
                tracing::debug!(len = body.len(), "Request body is not a JSON object");
            }
            Input::new()
        }
    }
}

/// A string field from validated input. Empty when absent.
pub fn text(input: &Input, field: &str) -> String {
    match input.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FOLLOW: &[FieldRule] = &[
        FieldRule::string("follower").required(),
        FieldRule::string("followee").required(),
    ];

    const LIMIT: &[FieldRule] = &[FieldRule::string("limit")
        .required()
        .check(positive_number)
        .message("limit must be a positive integer")];

    fn input(value: Value) -> Input {
        match value {
            Value::Object(map) => map,
            _ => panic!("test input must be an object"),
        }
    }

    #[test]
    fn test_accepts_complete_input() {
        let data = input(json!({"follower": "a", "followee": "b", "extra": 1}));
        assert!(validate(FOLLOW, &data).is_ok());
    }

    #[test]
    fn test_omitting_any_required_field_fails() {
        for missing in ["follower", "followee"] {
            let mut data = input(json!({"follower": "a", "followee": "b"}));
            data.remove(missing);
            let err = validate(FOLLOW, &data).unwrap_err();
            assert_eq!(err.fields(), vec![missing]);
            assert_eq!(err.to_string(), format!("{} is required", missing));
        }
    }

    #[test]
    fn test_blank_values_count_as_missing() {
        let data = input(json!({"follower": "", "followee": null}));
        let err = validate(FOLLOW, &data).unwrap_err();
        assert_eq!(err.fields(), vec!["follower", "followee"]);
    }

    #[test]
    fn test_type_mismatch() {
        let data = input(json!({"follower": 42, "followee": "b"}));
        let err = validate(FOLLOW, &data).unwrap_err();
        assert_eq!(err.to_string(), "follower must be a string");
    }

    #[test]
    fn test_number_rule_rejects_numeric_strings() {
        const COUNT: &[FieldRule] = &[FieldRule::number("count").required()];
        assert!(validate(COUNT, &input(json!({"count": 3}))).is_ok());

        let err = validate(COUNT, &input(json!({"count": "3"}))).unwrap_err();
        assert_eq!(err.to_string(), "count must be a number");
    }

    #[test]
    fn test_optional_field_may_be_absent_but_not_mistyped() {
        const RULES: &[FieldRule] = &[FieldRule::string("before")];
        assert!(validate(RULES, &Input::new()).is_ok());

        let err = validate(RULES, &input(json!({"before": ["x"]}))).unwrap_err();
        assert_eq!(err.fields(), vec!["before"]);
    }

    #[test]
    fn test_predicate_uses_custom_message() {
        let err = validate(LIMIT, &input(json!({"limit": "0"}))).unwrap_err();
        assert_eq!(err.to_string(), "limit must be a positive integer");

        let err = validate(LIMIT, &Input::new()).unwrap_err();
        assert_eq!(err.to_string(), "limit must be a positive integer");

        assert!(validate(LIMIT, &input(json!({"limit": "5"}))).is_ok());
    }

    #[test]
    fn test_query_input_is_all_strings() {
        let mut query = HashMap::new();
        query.insert("ids".to_string(), "1|2".to_string());
        let data = query_input(&query);
        assert_eq!(data.get("ids"), Some(&json!("1|2")));
    }

    #[test]
    fn test_body_input_tolerates_garbage() {
        assert!(body_input(b"").is_empty());
        assert!(body_input(b"{not json").is_empty());
        assert!(body_input(b"[1,2]").is_empty());
        assert_eq!(body_input(br#"{"entryId":"e1"}"#).get("entryId"), Some(&json!("e1")));
    }

    #[test]
    fn test_text_helper() {
        let data = input(json!({"a": "x", "b": 3}));
        assert_eq!(text(&data, "a"), "x");
        assert_eq!(text(&data, "b"), "3");
        assert_eq!(text(&data, "c"), "");
    }
}
