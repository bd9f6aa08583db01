//! Compiles a statement against a catalog into an executable plan.
//!
//! Resolution order: the FROM tree first, then the WHERE predicate against
//! its schema, then the projection. Each step type checks as its node is
//! built, so a returned plan is fully checked.

use tracing::debug;

use super::expression::Expression;
use super::plan::{Node, OutputColumn};
use crate::catalog::Catalog;
use crate::error::Result;
use crate::parsing::ast;
use crate::types::{Schema, Value};

/// Plans a statement. The resulting node tree mirrors the statement shape:
/// loads and joins from the FROM clause, a selection for WHERE, and a
/// projection unless the statement selects `*`.
pub fn plan(statement: &ast::Statement, catalog: &Catalog) -> Result<Node> {
    let ast::Statement::Select(select) = statement;

    let mut node = plan_table_reference(&select.from, catalog)?;
    if let Some(predicate) = &select.r#where {
        let (predicate, _) = resolve_expression(predicate, node.schema())?;
        node = Node::select(node, predicate)?;
    }
    match &select.what {
        // Star passes the source schema through unchanged.
        ast::SelectList::Star => {}
        ast::SelectList::Expressions(expressions) => {
            let mut columns = Vec::with_capacity(expressions.len());
            for expression in expressions {
                let (expression, name) = resolve_expression(expression, node.schema())?;
                columns.push(OutputColumn { name, expression });
            }
            node = Node::project(node, columns)?;
        }
    }
    debug!(plan = %node, "planned statement");
    Ok(node)
}

fn plan_table_reference(reference: &ast::TableReference, catalog: &Catalog) -> Result<Node> {
    match reference {
        ast::TableReference::Table(name) => {
            let table = catalog.get_table(name)?;
            Ok(Node::load(name.as_str(), &table.schema))
        }
        ast::TableReference::Join {
            left,
            right,
            predicate,
            kind,
        } => {
            let left = plan_table_reference(left, catalog)?;
            let right = plan_table_reference(right, catalog)?;
            let schema = Schema::concat(left.schema(), right.schema());
            let (predicate, _) = resolve_expression(predicate, &schema)?;
            Node::join(*kind, left, right, predicate)
        }
    }
}

/// Converts an AST expression against a schema, returning the typed
/// expression and its output name: the resolved qualified name for column
/// references, the canonical rendering for anything else.
fn resolve_expression(
    expression: &ast::Expression,
    schema: &Schema,
) -> Result<(Expression, String)> {
    match expression {
        ast::Expression::Literal(literal) => Ok((
            Expression::Constant(literal_value(literal)),
            literal.to_string(),
        )),
        ast::Expression::Column(relation, name) => {
            let index = match relation {
                Some(relation) => schema.resolve_qualified(&format!("{relation}.{name}"))?,
                None => schema.resolve_suffix(name)?,
            };
            let column = &schema.columns[index];
            Ok((
                Expression::Column(index, column.data_type),
                column.name.clone(),
            ))
        }
        ast::Expression::Compare(left, op, right) => {
            let (left, _) = resolve_expression(left, schema)?;
            let (right, _) = resolve_expression(right, schema)?;
            Ok((
                Expression::compare(left, *op, right)?,
                expression.to_string(),
            ))
        }
    }
}

fn literal_value(literal: &ast::Literal) -> Value {
    match literal {
        ast::Literal::Boolean(b) => Value::Boolean(*b),
        ast::Literal::Number(n) => Value::Decimal(n.clone()),
        ast::Literal::String(s) => Value::Text(s.clone()),
    }
}
