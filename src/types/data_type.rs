//! Column data types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The type of a column or expression: one variant per value variant. There
/// are no parameterized or nullable types.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum DataType {
    Boolean,
    Text,
    Date,
    Decimal,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Boolean => write!(f, "boolean"),
            DataType::Text => write!(f, "text"),
            DataType::Date => write!(f, "date"),
            DataType::Decimal => write!(f, "decimal"),
        }
    }
}
