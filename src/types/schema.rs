//! Relation schemas and column resolution.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::data_type::DataType;
use super::value::Value;
use crate::error::{Error, Result};

/// A column's name and type. Column names become relation-qualified
/// (`table.column`) when the column enters a plan via [`Schema::qualify`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data_type: DataType,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Column {
            name: name.into(),
            data_type,
        }
    }

    /// Checks that a value has this column's type.
    fn check(&self, value: &Value) -> Result<()> {
        if value.data_type() != self.data_type {
            return Err(Error::TypeMismatch {
                expected: format!("{} for column {}", self.data_type, self.name),
                found: value.data_type().to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.data_type)
    }
}

/// An ordered sequence of columns describing a relation.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub columns: Vec<Column>,
}

impl Schema {
    pub fn new(columns: Vec<Column>) -> Self {
        Schema { columns }
    }

    /// Validates a row against this schema: arity first, then the type of
    /// every value in order.
    pub fn check_row(&self, row: &[Value]) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(Error::InvalidValue(format!(
                "wrong number of values: expected {}, got {}",
                self.columns.len(),
                row.len()
            )));
        }
        for (column, value) in self.columns.iter().zip(row) {
            column.check(value)?;
        }
        Ok(())
    }

    /// A copy of this schema with every column name qualified as
    /// `relation.column`.
    pub fn qualify(&self, relation: &str) -> Schema {
        let columns = self
            .columns
            .iter()
            .map(|c| Column::new(format!("{relation}.{}", c.name), c.data_type))
            .collect();
        Schema::new(columns)
    }

    /// Concatenates two schemas positionally, left columns first.
    pub fn concat(left: &Schema, right: &Schema) -> Schema {
        let mut columns = left.columns.clone();
        columns.extend(right.columns.iter().cloned());
        Schema::new(columns)
    }

    /// Resolves an unqualified column name by its dotted suffix. Exactly
    /// one column may match; zero is unknown and more than one is
    /// ambiguous.
    pub fn resolve_suffix(&self, name: &str) -> Result<usize> {
        let suffix = format!(".{name}");
        let mut found = None;
        for (index, column) in self.columns.iter().enumerate() {
            if column.name.ends_with(&suffix) {
                if found.is_some() {
                    return Err(Error::AmbiguousColumn(name.into()));
                }
                found = Some(index);
            }
        }
        found.ok_or_else(|| Error::ColumnNotFound(name.into()))
    }

    /// Resolves a fully qualified `relation.column` name by exact match.
    pub fn resolve_qualified(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| Error::ColumnNotFound(name.into()))
    }
}
