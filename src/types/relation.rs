//! Relations: a schema plus ordered rows.

use serde::{Deserialize, Serialize};

use super::schema::Schema;
use super::value::Value;
use crate::error::Result;

/// A row is an ordered value sequence matching its relation's schema.
pub type Row = Vec<Value>;

/// A table or query result: a schema and the rows conforming to it.
/// Externally, rows only enter through [`Relation::insert`], which enforces
/// the schema invariant; the executor builds relations whose rows are
/// schema-conformant by construction.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub schema: Schema,
    pub rows: Vec<Row>,
}

impl Relation {
    /// An empty relation with the given schema.
    pub fn new(schema: Schema) -> Self {
        Relation {
            schema,
            rows: Vec::new(),
        }
    }

    /// Appends a row after validating it against the schema.
    pub fn insert(&mut self, row: Row) -> Result<()> {
        self.schema.check_row(&row)?;
        self.rows.push(row);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Column, DataType};

    #[test]
    fn insert_enforces_the_schema() {
        let mut relation = Relation::new(Schema::new(vec![
            Column::new("id", DataType::Decimal),
            Column::new("name", DataType::Text),
        ]));

        relation
            .insert(vec![Value::Decimal("1".parse().unwrap()), Value::from("a")])
            .unwrap();
        assert_eq!(relation.rows.len(), 1);

        // Wrong arity.
        assert!(relation.insert(vec![Value::from("a")]).is_err());
        // Wrong type in the second position.
        assert!(relation
            .insert(vec![Value::Decimal("2".parse().unwrap()), Value::Boolean(true)])
            .is_err());
        assert_eq!(relation.rows.len(), 1);
    }
}
