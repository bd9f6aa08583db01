//! Plan execution against a catalog.
//!
//! Every node evaluates to a complete relation. Select and Project preserve
//! their source's row order; Join iterates left rows in the outer loop and
//! right rows in the inner loop, appending matches in enumeration order.
//! Execution is infallible: the planner already checked names and types.

use tracing::trace;

use crate::catalog::Catalog;
use crate::planning::Node;
use crate::types::{Relation, Row, Value};

impl Node {
    /// Runs the plan to completion against the catalog.
    ///
    /// Panics if a table the planner validated has since vanished from the
    /// catalog: that is an internal invariant violation, not a user error,
    /// and must abort loudly.
    pub fn run(&self, catalog: &Catalog) -> Relation {
        let relation = match self {
            Node::Load { table, schema } => {
                let source = match catalog.get_table(table) {
                    Ok(source) => source,
                    Err(_) => panic!("table {table} disappeared between planning and execution"),
                };
                Relation {
                    schema: schema.clone(),
                    rows: source.rows.clone(),
                }
            }
            Node::Select { source, predicate } => {
                let Relation { schema, rows } = source.run(catalog);
                let rows = rows
                    .into_iter()
                    .filter(|row| matches!(predicate.evaluate(row), Value::Boolean(true)))
                    .collect();
                Relation { schema, rows }
            }
            Node::Project {
                source,
                columns,
                schema,
            } => {
                let input = source.run(catalog);
                let rows = input
                    .rows
                    .iter()
                    .map(|row| columns.iter().map(|c| c.expression.evaluate(row)).collect())
                    .collect();
                Relation {
                    schema: schema.clone(),
                    rows,
                }
            }
            Node::Join {
                left,
                right,
                predicate,
                schema,
            } => {
                let left = left.run(catalog);
                let right = right.run(catalog);
                let mut rows = Vec::new();
                for left_row in &left.rows {
                    for right_row in &right.rows {
                        let mut row: Row =
                            Vec::with_capacity(left_row.len() + right_row.len());
                        row.extend(left_row.iter().cloned());
                        row.extend(right_row.iter().cloned());
                        if matches!(predicate.evaluate(&row), Value::Boolean(true)) {
                            rows.push(row);
                        }
                    }
                }
                Relation {
                    schema: schema.clone(),
                    rows,
                }
            }
        };
        trace!(node = self.kind(), rows = relation.rows.len(), "executed plan node");
        relation
    }

    fn kind(&self) -> &'static str {
        match self {
            Node::Load { .. } => "load",
            Node::Select { .. } => "select",
            Node::Project { .. } => "project",
            Node::Join { .. } => "join",
        }
    }
}
