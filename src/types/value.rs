//! Runtime values and their comparison semantics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::data_type::DataType;
use super::decimal::Decimal;

/// The outcome of comparing two values. Values of different variants are
/// never ordered relative to each other.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Comparison {
    Less,
    Equal,
    Greater,
    Incomparable,
}

impl From<std::cmp::Ordering> for Comparison {
    fn from(ordering: std::cmp::Ordering) -> Self {
        match ordering {
            std::cmp::Ordering::Less => Comparison::Less,
            std::cmp::Ordering::Equal => Comparison::Equal,
            std::cmp::Ordering::Greater => Comparison::Greater,
        }
    }
}

/// A single value in a row. The variant set is closed and every consumer
/// matches it exhaustively.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Boolean(bool),
    Text(String),
    Date(NaiveDate),
    Decimal(Decimal),
}

impl Value {
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Boolean(_) => DataType::Boolean,
            Value::Text(_) => DataType::Text,
            Value::Date(_) => DataType::Date,
            Value::Decimal(_) => DataType::Decimal,
        }
    }

    /// Compares two values, yielding `Incomparable` when the variants
    /// differ. Within a variant the ordering is total: false < true, text
    /// is ordered lexicographically, dates chronologically, and decimals
    /// numerically.
    pub fn compare(&self, other: &Value) -> Comparison {
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b).into(),
            (Value::Text(a), Value::Text(b)) => a.cmp(b).into(),
            (Value::Date(a), Value::Date(b)) => a.cmp(b).into(),
            (Value::Decimal(a), Value::Decimal(b)) => a.cmp(b).into(),
            _ => Comparison::Incomparable,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Text(s) => write!(f, "'{s}'"),
            Value::Date(d) => write!(f, "{d}"),
            Value::Decimal(d) => write!(f, "{d}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Decimal(d)
    }
}
