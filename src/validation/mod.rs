//! Form validation for shoe drafts.
//!
//! Each field is checked against one entry of [`SHOE_RULES`]. Every violated field is
//! reported, not just the first, so a form can show all errors inline at once.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::errors::{FieldError, FieldIssue, ValidationError};
use crate::models::{ShoeDraft, ShoeInput};

/// How one field is checked and coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Required text of at least `min_len` characters once trimmed.
    Text { min_len: usize },
    /// Required number, from a JSON number or numeric string, strictly greater than zero.
    Positive,
    /// Optional text; empty or blank counts as absent.
    OptionalText,
    /// Boolean, from a JSON bool or "true"/"false"; `default` when absent.
    Flag { default: bool },
}

/// A field name, the draft keys it may arrive under, and its rule.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub keys: &'static [&'static str],
    pub rule: FieldRule,
}

/// The shoe schema, in the order errors are reported.
pub const SHOE_RULES: &[FieldSpec] = &[
    FieldSpec {
        name: "name",
        keys: &["name"],
        rule: FieldRule::Text { min_len: 2 },
    },
    FieldSpec {
        name: "brand",
        keys: &["brand"],
        rule: FieldRule::Text { min_len: 2 },
    },
    FieldSpec {
        name: "price",
        keys: &["price"],
        rule: FieldRule::Positive,
    },
    FieldSpec {
        name: "size",
        keys: &["size"],
        rule: FieldRule::Positive,
    },
    FieldSpec {
        name: "color",
        keys: &["color"],
        rule: FieldRule::Text { min_len: 1 },
    },
    FieldSpec {
        name: "photoUrl",
        keys: &["photoUrl", "imageUrl"],
        rule: FieldRule::OptionalText,
    },
    FieldSpec {
        name: "inStock",
        keys: &["inStock"],
        rule: FieldRule::Flag { default: true },
    },
];

/// A field value after coercion.
#[derive(Debug, Clone, PartialEq)]
enum Coerced {
    Text(String),
    Number(Decimal),
    Optional(Option<String>),
    Flag(bool),
}

impl FieldRule {
    fn check(self, value: Option<&Value>) -> Result<Coerced, FieldIssue> {
        let value = value.filter(|v| !v.is_null());
        match self {
            FieldRule::Text { min_len } => {
                let text = match value {
                    None => return Err(FieldIssue::Missing),
                    Some(Value::String(s)) => s.trim(),
                    Some(_) => return Err(FieldIssue::NotText),
                };
                if text.chars().count() < min_len {
                    return Err(FieldIssue::TooShort { min_len });
                }
                Ok(Coerced::Text(text.to_string()))
            }
            FieldRule::Positive => {
                let number = match value {
                    None => return Err(FieldIssue::Missing),
                    Some(Value::Number(n)) => parse_decimal(&n.to_string())?,
                    // An empty numeric input reads as zero.
                    Some(Value::String(s)) if s.trim().is_empty() => Decimal::ZERO,
                    Some(Value::String(s)) => parse_decimal(s.trim())?,
                    Some(_) => return Err(FieldIssue::NotANumber),
                };
                if number <= Decimal::ZERO {
                    return Err(FieldIssue::NotPositive);
                }
                Ok(Coerced::Number(number))
            }
            FieldRule::OptionalText => match value {
                None => Ok(Coerced::Optional(None)),
                Some(Value::String(s)) if s.trim().is_empty() => Ok(Coerced::Optional(None)),
                Some(Value::String(s)) => Ok(Coerced::Optional(Some(s.trim().to_string()))),
                Some(_) => Err(FieldIssue::NotText),
            },
            FieldRule::Flag { default } => match value {
                None => Ok(Coerced::Flag(default)),
                Some(Value::Bool(b)) => Ok(Coerced::Flag(*b)),
                Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
                    "true" | "on" => Ok(Coerced::Flag(true)),
                    "false" | "off" => Ok(Coerced::Flag(false)),
                    _ => Err(FieldIssue::NotABoolean),
                },
                Some(_) => Err(FieldIssue::NotABoolean),
            },
        }
    }
}

/// Parse plain or scientific notation without rounding.
///
/// Text that is a finite number but does not fit a `Decimal` exactly is `OutOfRange`.
fn parse_decimal(s: &str) -> Result<Decimal, FieldIssue> {
    if let Ok(number) = Decimal::from_str_exact(s) {
        return Ok(number);
    }
    let approx = match s.parse::<f64>() {
        Ok(approx) if approx.is_finite() => approx,
        _ => return Err(FieldIssue::NotANumber),
    };
    match Decimal::from_scientific(s) {
        // Scientific notation may still round a tiny magnitude down to zero.
        Ok(number) if number.is_zero() == (approx == 0.0) => Ok(number),
        _ => Err(FieldIssue::OutOfRange),
    }
}

/// Validate and coerce a draft into a `ShoeInput`.
///
/// Synchronous and side-effect-free.
pub fn validate(draft: &ShoeDraft) -> Result<ShoeInput, ValidationError> {
    let mut values: HashMap<&'static str, Coerced> = HashMap::new();
    let mut errors = Vec::new();

    for spec in SHOE_RULES {
        let raw = spec.keys.iter().find_map(|key| draft.get(key));
        match spec.rule.check(raw) {
            Ok(value) => {
                values.insert(spec.name, value);
            }
            Err(issue) => errors.push(FieldError::new(spec.name, issue)),
        }
    }

    if !errors.is_empty() {
        return Err(ValidationError::new(errors));
    }

    let mut take = |name: &str| values.remove(name);
    Ok(ShoeInput {
        name: text(take("name")),
        brand: text(take("brand")),
        price: number(take("price")),
        size: number(take("size")),
        color: text(take("color")),
        photo_url: match take("photoUrl") {
            Some(Coerced::Optional(url)) => url,
            _ => None,
        },
        in_stock: !matches!(take("inStock"), Some(Coerced::Flag(false))),
    })
}

fn text(value: Option<Coerced>) -> String {
    match value {
        Some(Coerced::Text(s)) => s,
        _ => String::new(),
    }
}

fn number(value: Option<Coerced>) -> Decimal {
    match value {
        Some(Coerced::Number(n)) => n,
        _ => Decimal::ZERO,
    }
}
