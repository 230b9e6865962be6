//! Field rule definitions.

use serde_json::Value;

/// Custom check run after presence and type checks pass.
pub type Predicate = fn(&Value) -> bool;

/// Closed set of type tags a rule can demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Number,
}

impl FieldType {
    pub fn matches(self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Number => value.is_number(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
        }
    }
}

/// Constraint on a single input field.
///
/// Rule sets are `const` slices of these, built with the chaining constructors:
///
/// ```
/// use bff_proxy::validator::FieldRule;
///
/// const RULES: &[FieldRule] = &[
///     FieldRule::string("ids").required(),
///     FieldRule::string("before"),
/// ];
/// assert_eq!(RULES.len(), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub kind: Option<FieldType>,
    pub required: bool,
    pub predicate: Option<Predicate>,
    pub message: Option<&'static str>,
}

impl FieldRule {
    /// A rule with no type constraint.
    pub const fn any(field: &'static str) -> Self {
        Self {
            field,
            kind: None,
            required: false,
            predicate: None,
            message: None,
        }
    }

    pub const fn string(field: &'static str) -> Self {
        Self::any(field).of(FieldType::String)
    }

    pub const fn number(field: &'static str) -> Self {
        Self::any(field).of(FieldType::Number)
    }

    pub const fn of(mut self, kind: FieldType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn check(mut self, predicate: Predicate) -> Self {
        self.predicate = Some(predicate);
        self
    }

    /// Replace the generated message for every failure of this rule.
    pub const fn message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

/// True when a value is a number, or a string holding a decimal one, strictly
/// above zero and finite. Hex literals and `Infinity` are refused.
pub fn positive_number(value: &Value) -> bool {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.is_some_and(|n| n.is_finite() && n > 0.0)
}
