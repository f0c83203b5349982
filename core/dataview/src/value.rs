//! FILENAME: core/dataview/src/value.rs
//! PURPOSE: Primitive values as they appear in host data views.
//! CONTEXT: Category labels and measure values both arrive as untyped JSON
//! scalars. This type keeps them intact until the visual decides how to
//! display them.

use std::fmt;
use serde::{Deserialize, Serialize};

/// A scalar value from the host (category value or measure value).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum PrimitiveValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl PrimitiveValue {
    pub fn text(s: impl Into<String>) -> Self {
        PrimitiveValue::Text(s.into())
    }
}

impl From<f64> for PrimitiveValue {
    fn from(value: f64) -> Self {
        PrimitiveValue::Number(value)
    }
}

impl From<&str> for PrimitiveValue {
    fn from(value: &str) -> Self {
        PrimitiveValue::Text(value.to_string())
    }
}

impl From<String> for PrimitiveValue {
    fn from(value: String) -> Self {
        PrimitiveValue::Text(value)
    }
}

impl From<bool> for PrimitiveValue {
    fn from(value: bool) -> Self {
        PrimitiveValue::Bool(value)
    }
}

/// Display form used for labels and measure entries.
/// Null renders as an empty string; whole numbers render without a fraction.
impl fmt::Display for PrimitiveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveValue::Null => Ok(()),
            PrimitiveValue::Bool(b) => write!(f, "{}", b),
            PrimitiveValue::Number(n) => write!(f, "{}", n),
            PrimitiveValue::Text(s) => f.write_str(s),
        }
    }
}
