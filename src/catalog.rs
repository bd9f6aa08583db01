//! The table directory a statement is planned and executed against.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::types::{Relation, Schema};

/// A name-to-relation directory. The engine reads it twice per statement:
/// during planning for schema lookup and during execution for row fetch.
/// No isolation is provided between the two reads.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    tables: HashMap<String, Relation>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Looks up a table by name.
    pub fn get_table(&self, name: &str) -> Result<&Relation> {
        self.tables
            .get(name)
            .ok_or_else(|| Error::TableNotFound(name.into()))
    }

    /// Mutable access to an existing table, for row inserts.
    pub fn get_table_mut(&mut self, name: &str) -> Result<&mut Relation> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| Error::TableNotFound(name.into()))
    }

    /// Creates an empty table with the given schema, failing if the name is
    /// already taken.
    pub fn create_table(&mut self, name: &str, schema: Schema) -> Result<&mut Relation> {
        if self.tables.contains_key(name) {
            return Err(Error::DuplicateTable(name.into()));
        }
        Ok(self
            .tables
            .entry(name.into())
            .or_insert_with(|| Relation::new(schema)))
    }
}
