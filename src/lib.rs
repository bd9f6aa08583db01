//! An embeddable relational query engine for single-statement SELECT
//! queries over in-memory tables.
//!
//! The pipeline is strictly linear and synchronous: text → tokens → AST →
//! type-checked logical plan → result relation. Each stage returns a full
//! value or a single terminating error; no stage revisits an earlier one.
//!
//! ```
//! use picosql::{Catalog, Column, DataType, Schema, Value};
//!
//! let mut catalog = Catalog::new();
//! let films = catalog
//!     .create_table(
//!         "films",
//!         Schema::new(vec![
//!             Column::new("id", DataType::Decimal),
//!             Column::new("title", DataType::Text),
//!         ]),
//!     )
//!     .unwrap();
//! films
//!     .insert(vec![Value::Decimal("1".parse().unwrap()), Value::from("Alien")])
//!     .unwrap();
//!
//! let result = picosql::execute("select title from films where id = 1", &catalog).unwrap();
//! assert_eq!(result.rows, vec![vec![Value::from("Alien")]]);
//! ```

mod catalog;
mod error;
mod execution;
pub mod parsing;
mod planning;
mod types;

pub use catalog::Catalog;
pub use error::{Error, Result};
pub use parsing::ast::Statement;
pub use parsing::parse;
pub use planning::{plan, Node, OutputColumn};
pub use types::{Column, Comparison, DataType, Decimal, Relation, Row, Schema, Value};

use tracing::debug;

/// Parses, plans, and runs a single statement against the catalog.
pub fn execute(input: &str, catalog: &Catalog) -> Result<Relation> {
    debug!(input, "executing statement");
    let statement = parse(input)?;
    let node = plan(&statement, catalog)?;
    Ok(node.run(catalog))
}
