//! Declarative request validation.
//!
//! Each route declares an ordered `&'static [Rule]`. [`run_rules`] evaluates
//! all of them against the raw path parameters and JSON body and reports
//! every failure, in declaration order. The [`Validated`](crate::Validated)
//! extractor runs a route's rules before its handler.
//!
//! ```ignore
//! const NAME: FieldSchema = FieldSchema::body("name", FieldKind::Text);
//!
//! struct CreateRules;
//!
//! impl RuleSet for CreateRules {
//!     fn rules() -> &'static [Rule] {
//!         static RULES: [Rule; 1] = [Rule::required(&NAME, "name is required")];
//!         &RULES
//!     }
//! }
//! ```

pub mod coerce;

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use utoipa::ToSchema;

/// Where a field is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Params,
    Body,
}

/// Declared type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Text,
    Number,
    Boolean,
}

/// Compile-time default for an optional field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    Bool(bool),
}

impl FieldDefault {
    pub fn to_value(self) -> Value {
        match self {
            FieldDefault::Bool(b) => Value::Bool(b),
        }
    }
}

/// Static description of one request field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSchema {
    pub name: &'static str,
    pub location: Location,
    pub kind: FieldKind,
    pub required: bool,
    /// Used when an optional field is absent.
    pub default: Option<FieldDefault>,
}

impl FieldSchema {
    pub const fn param(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            location: Location::Params,
            kind,
            required: true,
            default: None,
        }
    }

    pub const fn body(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            location: Location::Body,
            kind,
            required: true,
            default: None,
        }
    }

    /// Optional body field falling back to `default`.
    pub const fn optional(name: &'static str, kind: FieldKind, default: FieldDefault) -> Self {
        Self {
            name,
            location: Location::Body,
            kind,
            required: false,
            default: Some(default),
        }
    }

    /// The same field with its default dropped, for routes that demand it.
    pub const fn mandatory(self) -> Self {
        Self {
            required: true,
            default: None,
            ..self
        }
    }
}

/// A single pass/fail test on a raw value. `None` means the field is absent.
#[derive(Debug, Clone, Copy)]
pub enum Check {
    NotEmpty,
    Numeric,
    Boolean,
    Int,
    Custom(fn(&Value) -> bool),
}

impl Check {
    pub fn passes(&self, value: Option<&Value>) -> bool {
        let Some(value) = value else {
            return false;
        };

        match self {
            Check::NotEmpty => coerce::is_not_empty(value),
            Check::Numeric => coerce::is_numeric(value),
            Check::Boolean => coerce::is_boolean(value),
            Check::Int => coerce::is_int(value),
            Check::Custom(predicate) => predicate(value),
        }
    }

    /// Type check implied by a field kind.
    pub const fn for_kind(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Integer => Check::Int,
            FieldKind::Number => Check::Numeric,
            FieldKind::Boolean => Check::Boolean,
            FieldKind::Text => Check::NotEmpty,
        }
    }
}

/// One check on one field.
///
/// Type and custom rules on an optional field run against the field's
/// default when it is absent, and are skipped when it has none.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub location: Location,
    pub field: &'static str,
    pub check: Check,
    pub message: &'static str,
    pub optional: bool,
    pub default: Option<FieldDefault>,
}

impl Rule {
    pub const fn new(
        location: Location,
        field: &'static str,
        check: Check,
        message: &'static str,
    ) -> Self {
        Self {
            location,
            field,
            check,
            message,
            optional: false,
            default: None,
        }
    }

    const fn on(schema: &FieldSchema, check: Check, message: &'static str) -> Self {
        Self {
            location: schema.location,
            field: schema.name,
            check,
            message,
            optional: !schema.required,
            default: schema.default,
        }
    }

    /// Presence rule for a schema field. Always enforced.
    pub const fn required(schema: &FieldSchema, message: &'static str) -> Self {
        Self::new(schema.location, schema.name, Check::NotEmpty, message)
    }

    /// Type rule derived from the schema field's kind.
    pub const fn typed(schema: &FieldSchema, message: &'static str) -> Self {
        Self::on(schema, Check::for_kind(schema.kind), message)
    }

    pub const fn custom(
        schema: &FieldSchema,
        predicate: fn(&Value) -> bool,
        message: &'static str,
    ) -> Self {
        Self::on(schema, Check::Custom(predicate), message)
    }

    fn passes(&self, input: &RequestInput) -> bool {
        let value = input
            .lookup(self.location, self.field)
            .filter(|value| !value.is_null());

        match value {
            Some(value) => self.check.passes(Some(&value)),
            None if self.optional => self
                .default
                .is_none_or(|default| self.check.passes(Some(&default.to_value()))),
            None => false,
        }
    }
}

/// Ordered rule list bound to a route.
pub trait RuleSet {
    fn rules() -> &'static [Rule];
}

/// One failed rule as reported to the client.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Violation {
    pub field: String,
    pub message: String,
    pub location: Location,
}

impl Violation {
    pub fn new(location: Location, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            location,
        }
    }
}

/// Raw request values the rules run against.
#[derive(Debug, Clone, Default)]
pub struct RequestInput {
    pub params: HashMap<String, String>,
    pub body: Map<String, Value>,
}

impl RequestInput {
    pub fn new(params: HashMap<String, String>, body: Map<String, Value>) -> Self {
        Self { params, body }
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Value of a body field, `None` when absent or `null`.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.body.get(name).filter(|v| !v.is_null())
    }

    /// Body field, or the schema default when the field is absent.
    pub fn field_or_default(&self, schema: &FieldSchema) -> Option<Value> {
        self.field(schema.name)
            .cloned()
            .or_else(|| schema.default.map(FieldDefault::to_value))
    }

    fn lookup(&self, location: Location, name: &str) -> Option<Value> {
        match location {
            Location::Params => self.param(name).map(|s| Value::String(s.to_owned())),
            Location::Body => self.body.get(name).cloned(),
        }
    }
}

/// Evaluate every rule; fail with all violations in declaration order.
pub fn run_rules(rules: &[Rule], input: &RequestInput) -> Result<(), Vec<Violation>> {
    let violations: Vec<Violation> = rules
        .iter()
        .filter(|rule| !rule.passes(input))
        .map(|rule| Violation::new(rule.location, rule.field, rule.message))
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
