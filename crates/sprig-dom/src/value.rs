//! Scalar values and the injected "render to string" capability.
//!
//! Attribute values, character data, style and dataset entries are strings.
//! Callers may hand in numbers, booleans and other scalars; those are offered
//! to a [`Stringify`] implementation first and rejected with
//! [`DomError::TypeConversion`] if it declines.

use std::fmt;
use std::num::FpCategory;

use serde::{Deserialize, Serialize};

use crate::error::{DomError, DomResult};

/// A scalar payload that can appear as an attribute value, character data,
/// or directly inside a child list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Absence of a value.
    Null,
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// A string, used as-is.
    Str(String),
    /// A list of values; the default renderer declines these.
    List(Vec<Value>),
}

impl Value {
    /// Short description of the value's shape, used in error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Bool(b) => format!("boolean {b}"),
            Self::Int(i) => format!("number {i}"),
            Self::Float(f) => format!("number {f}"),
            Self::Str(s) => format!("string {s:?}"),
            Self::List(items) => format!("list of {} values", items.len()),
        }
    }

    /// Returns the string payload if this is a [`Value::Str`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Capability that renders a non-string [`Value`] to text.
///
/// Returning `None` declines the value; the caller then raises
/// [`DomError::TypeConversion`].
pub trait Stringify: fmt::Debug {
    /// Render `value`, or decline with `None`.
    fn render(&self, value: &Value) -> Option<String>;
}

/// The built-in renderer.
///
/// Strings pass through, booleans render as `true` / `false`, numbers render
/// the way a browser prints them (`1`, `1.5`, `NaN`, `Infinity`). `Null` and
/// lists are declined.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStringify;

impl Stringify for DefaultStringify {
    fn render(&self, value: &Value) -> Option<String> {
        match value {
            Value::Str(s) => Some(s.clone()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Int(i) => Some(i.to_string()),
            Value::Float(f) => Some(format_number(*f)),
            Value::Null | Value::List(_) => None,
        }
    }
}

/// [Number::toString](https://tc39.es/ecma262/#sec-numeric-types-number-tostring)
///
/// Format a float the way `String(number)` does.
fn format_number(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f.is_infinite() {
        if f.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if f.classify() == FpCategory::Zero {
        // Negative zero prints as "0".
        "0".to_string()
    } else {
        // `{:e}` yields the shortest round-trip digits, e.g. `1.25e-7`.
        let scientific = format!("{:e}", f.abs());
        let (mantissa, exponent) = scientific
            .split_once('e')
            .unwrap_or((scientific.as_str(), "0"));
        let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
        let exponent: i32 = exponent.parse().unwrap_or(0);
        let sign = if f.is_sign_negative() { "-" } else { "" };
        format!("{sign}{}", layout_digits(&digits, exponent + 1))
    }
}

/// Place the decimal point in `digits` so the value is
/// `0.digits * 10^point`, switching to exponent form outside `1e-6..1e21`.
fn layout_digits(digits: &str, point: i32) -> String {
    let len = i32::try_from(digits.len()).unwrap_or(i32::MAX);
    let zeros = |count: i32| "0".repeat(usize::try_from(count).unwrap_or(0));
    if len <= point && point <= 21 {
        format!("{digits}{}", zeros(point - len))
    } else if 0 < point && point <= 21 {
        let (whole, fraction) = digits.split_at(usize::try_from(point).unwrap_or(0));
        format!("{whole}.{fraction}")
    } else if -6 < point && point <= 0 {
        format!("0.{}{digits}", zeros(-point))
    } else {
        let exponent = point - 1;
        let sign = if exponent < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1.min(digits.len()));
        if rest.is_empty() {
            format!("{first}e{sign}{}", exponent.unsigned_abs())
        } else {
            format!("{first}.{rest}e{sign}{}", exponent.unsigned_abs())
        }
    }
}

/// Coerce `value` to a string through `stringify`.
///
/// # Errors
///
/// Returns [`DomError::TypeConversion`] if the renderer declines the value.
pub fn coerce(stringify: &dyn Stringify, value: &Value) -> DomResult<String> {
    stringify
        .render(value)
        .ok_or_else(|| DomError::TypeConversion {
            found: value.describe(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_render_like_a_browser() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_numbers_switch_to_exponent_form_like_a_browser() {
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(1.5e300), "1.5e+300");
        assert_eq!(format_number(-2.5e22), "-2.5e+22");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(1.25e-7), "1.25e-7");
        assert_eq!(format_number(1e-6), "0.000001");
        assert_eq!(format_number(0.1), "0.1");
        assert_eq!(format_number(123.456), "123.456");
        assert_eq!(format_number(-0.5), "-0.5");
    }

    #[test]
    fn test_default_stringify_declines_null_and_lists() {
        assert!(coerce(&DefaultStringify, &Value::Null).is_err());
        assert!(coerce(&DefaultStringify, &Value::List(vec![])).is_err());
        assert_eq!(
            coerce(&DefaultStringify, &Value::Bool(true)),
            Ok("true".to_string())
        );
    }
}
