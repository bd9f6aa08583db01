//! Logical plan nodes.
//!
//! The plan tree mirrors the statement shape; there is no optimizer. Every
//! node knows its output schema once constructed, and the constructors are
//! where static type checking happens: a node that would violate typing is
//! never built.

use std::fmt;

use super::expression::Expression;
use crate::error::{Error, Result};
use crate::parsing::ast::JoinType;
use crate::types::{Column, DataType, Schema};

/// A projected output column: its name and the expression producing it.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputColumn {
    pub name: String,
    pub expression: Expression,
}

/// A node in the logical plan tree. Built via the checked constructors;
/// executed by `run` in the execution module.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Emits a table's rows. The schema carries table-qualified column
    /// names.
    Load { table: String, schema: Schema },
    /// Keeps the source rows matching a boolean predicate, in order.
    Select {
        source: Box<Node>,
        predicate: Expression,
    },
    /// Evaluates an output expression list per source row.
    Project {
        source: Box<Node>,
        columns: Vec<OutputColumn>,
        schema: Schema,
    },
    /// Inner join: concatenates left and right rows positionally and keeps
    /// the pairs matching the predicate.
    Join {
        left: Box<Node>,
        right: Box<Node>,
        predicate: Expression,
        schema: Schema,
    },
}

impl Node {
    /// A load node over a table's (unqualified) schema.
    pub fn load(table: impl Into<String>, schema: &Schema) -> Node {
        let table = table.into();
        let schema = schema.qualify(&table);
        Node::Load { table, schema }
    }

    /// A selection over `source`. The predicate must be boolean and valid
    /// against the source schema.
    pub fn select(source: Node, predicate: Expression) -> Result<Node> {
        require_boolean(&predicate)?;
        predicate.check(source.schema())?;
        Ok(Node::Select {
            source: Box::new(source),
            predicate,
        })
    }

    /// A projection over `source`. Every output expression must check
    /// against the source schema, and output names must be distinct.
    pub fn project(source: Node, columns: Vec<OutputColumn>) -> Result<Node> {
        let mut names: Vec<&str> = Vec::with_capacity(columns.len());
        for column in &columns {
            column.expression.check(source.schema())?;
            if names.contains(&column.name.as_str()) {
                return Err(Error::DuplicateColumn(column.name.clone()));
            }
            names.push(&column.name);
        }
        let schema = Schema::new(
            columns
                .iter()
                .map(|c| Column::new(c.name.clone(), c.expression.data_type()))
                .collect(),
        );
        Ok(Node::Project {
            source: Box::new(source),
            columns,
            schema,
        })
    }

    /// An inner join of two sources on a boolean predicate over their
    /// concatenated schemas. Other join kinds are rejected here, never
    /// silently downgraded.
    pub fn join(kind: JoinType, left: Node, right: Node, predicate: Expression) -> Result<Node> {
        if kind != JoinType::Inner {
            return Err(Error::UnsupportedJoin(kind.to_string()));
        }
        require_boolean(&predicate)?;
        let schema = Schema::concat(left.schema(), right.schema());
        predicate.check(&schema)?;
        Ok(Node::Join {
            left: Box::new(left),
            right: Box::new(right),
            predicate,
            schema,
        })
    }

    /// The statically computed output schema.
    pub fn schema(&self) -> &Schema {
        match self {
            Node::Load { schema, .. } => schema,
            Node::Select { source, .. } => source.schema(),
            Node::Project { schema, .. } => schema,
            Node::Join { schema, .. } => schema,
        }
    }

    /// Renders the plan as an indented tree, one node per line.
    fn format(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let pad = "  ".repeat(indent);
        match self {
            Node::Load { table, .. } => writeln!(f, "{pad}Load {table}"),
            Node::Select { source, predicate } => {
                writeln!(f, "{pad}Select {predicate}")?;
                source.format(f, indent + 1)
            }
            Node::Project {
                source, columns, ..
            } => {
                let list: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
                writeln!(f, "{pad}Project {}", list.join(", "))?;
                source.format(f, indent + 1)
            }
            Node::Join {
                left,
                right,
                predicate,
                ..
            } => {
                writeln!(f, "{pad}Join {predicate}")?;
                left.format(f, indent + 1)?;
                right.format(f, indent + 1)
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.format(f, 0)
    }
}

fn require_boolean(predicate: &Expression) -> Result<()> {
    if predicate.data_type() != DataType::Boolean {
        return Err(Error::TypeMismatch {
            expected: DataType::Boolean.to_string(),
            found: predicate.data_type().to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::ast::CompareOp;
    use crate::types::Value;

    fn films() -> Schema {
        Schema::new(vec![
            Column::new("id", DataType::Decimal),
            Column::new("title", DataType::Text),
        ])
    }

    fn title_is(title: &str) -> Expression {
        Expression::compare(
            Expression::Column(1, DataType::Text),
            CompareOp::Equal,
            Expression::Constant(Value::from(title)),
        )
        .unwrap()
    }

    #[test]
    fn load_qualifies_the_schema() {
        let load = Node::load("films", &films());
        let names: Vec<&str> = load
            .schema()
            .columns
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, ["films.id", "films.title"]);
    }

    #[test]
    fn select_requires_a_boolean_predicate() {
        let load = Node::load("films", &films());
        assert!(Node::select(load.clone(), title_is("a")).is_ok());
        let err = Node::select(load, Expression::Constant(Value::from("a"))).unwrap_err();
        assert_eq!(
            err,
            Error::TypeMismatch {
                expected: "boolean".into(),
                found: "text".into(),
            }
        );
    }

    #[test]
    fn project_rejects_duplicate_output_names() {
        let load = Node::load("films", &films());
        let column = |name: &str| OutputColumn {
            name: name.into(),
            expression: Expression::Column(0, DataType::Decimal),
        };
        assert!(Node::project(load.clone(), vec![column("a"), column("b")]).is_ok());
        assert_eq!(
            Node::project(load, vec![column("a"), column("a")]).unwrap_err(),
            Error::DuplicateColumn("a".into())
        );
    }

    #[test]
    fn project_schema_uses_expression_types() {
        let load = Node::load("films", &films());
        let project = Node::project(
            load,
            vec![OutputColumn {
                name: "films.title".into(),
                expression: Expression::Column(1, DataType::Text),
            }],
        )
        .unwrap();
        assert_eq!(
            project.schema(),
            &Schema::new(vec![Column::new("films.title", DataType::Text)])
        );
    }

    #[test]
    fn join_concatenates_schemas_left_then_right() {
        let left = Node::load("films", &films());
        let right = Node::load(
            "people",
            &Schema::new(vec![
                Column::new("id", DataType::Decimal),
                Column::new("name", DataType::Text),
            ]),
        );
        let predicate = Expression::compare(
            Expression::Column(0, DataType::Decimal),
            CompareOp::Equal,
            Expression::Column(2, DataType::Decimal),
        )
        .unwrap();
        let join = Node::join(JoinType::Inner, left, right, predicate).unwrap();
        let names: Vec<&str> = join
            .schema()
            .columns
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(
            names,
            ["films.id", "films.title", "people.id", "people.name"]
        );
    }

    #[test]
    fn outer_joins_are_rejected() {
        for kind in [JoinType::LeftOuter, JoinType::RightOuter] {
            let left = Node::load("films", &films());
            let right = Node::load("people", &films());
            let err = Node::join(kind, left, right, title_is("a")).unwrap_err();
            assert_eq!(err, Error::UnsupportedJoin(kind.to_string()));
        }
    }
}
