//! The value and type system: runtime values, column data types, exact
//! decimals, schemas, and relations.

mod data_type;
mod decimal;
mod relation;
mod schema;
mod value;

pub use data_type::DataType;
pub use decimal::Decimal;
pub use relation::{Relation, Row};
pub use schema::{Column, Schema};
pub use value::{Comparison, Value};
