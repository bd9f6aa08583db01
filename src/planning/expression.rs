//! Typed expressions attached to plan nodes.
//!
//! Unlike AST expressions, these are compiled against a schema: column
//! references carry their resolved position, and every node's output type
//! is known statically. The planner builds them; evaluation happens during
//! execution and cannot fail.

use std::fmt;

use crate::error::{Error, Result};
use crate::parsing::ast::CompareOp;
use crate::types::{Comparison, DataType, Row, Schema, Value};

#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    /// A literal value.
    Constant(Value),
    /// A column reference by resolved position, with the column's type.
    Column(usize, DataType),
    /// A comparison of two same-typed operands; always boolean.
    Compare(Box<Expression>, CompareOp, Box<Expression>),
}

impl Expression {
    /// Builds a comparison, requiring identical operand types.
    pub fn compare(left: Expression, op: CompareOp, right: Expression) -> Result<Expression> {
        if left.data_type() != right.data_type() {
            return Err(Error::TypeMismatch {
                expected: left.data_type().to_string(),
                found: right.data_type().to_string(),
            });
        }
        Ok(Expression::Compare(Box::new(left), op, Box::new(right)))
    }

    /// The statically known result type.
    pub fn data_type(&self) -> DataType {
        match self {
            Expression::Constant(value) => value.data_type(),
            Expression::Column(_, data_type) => *data_type,
            Expression::Compare(..) => DataType::Boolean,
        }
    }

    /// Verifies the expression against a schema: every column position must
    /// exist and carry the recorded type.
    pub fn check(&self, schema: &Schema) -> Result<()> {
        match self {
            Expression::Constant(_) => Ok(()),
            Expression::Column(index, data_type) => {
                let column = schema.columns.get(*index).ok_or_else(|| {
                    Error::ColumnNotFound(format!("column index {index} out of range"))
                })?;
                if column.data_type != *data_type {
                    return Err(Error::TypeMismatch {
                        expected: data_type.to_string(),
                        found: column.data_type.to_string(),
                    });
                }
                Ok(())
            }
            Expression::Compare(left, _, right) => {
                left.check(schema)?;
                right.check(schema)
            }
        }
    }

    /// Evaluates against a row. Infallible: the types were checked when the
    /// plan was built.
    pub fn evaluate(&self, row: &Row) -> Value {
        match self {
            Expression::Constant(value) => value.clone(),
            Expression::Column(index, _) => row[*index].clone(),
            Expression::Compare(left, op, right) => {
                let left = left.evaluate(row);
                let right = right.evaluate(row);
                Value::Boolean(compare_outcome(left.compare(&right), *op))
            }
        }
    }
}

/// Maps a comparison outcome and an operator to the boolean result.
/// `Incomparable` yields false for every operator: the planner only builds
/// comparisons over identical types, so it can arise only if the catalog
/// changed between planning and execution.
fn compare_outcome(comparison: Comparison, op: CompareOp) -> bool {
    use CompareOp::*;
    match comparison {
        Comparison::Equal => matches!(op, Equal | LessThanOrEqual | GreaterThanOrEqual),
        Comparison::Less => matches!(op, NotEqual | LessThan | LessThanOrEqual),
        Comparison::Greater => matches!(op, NotEqual | GreaterThan | GreaterThanOrEqual),
        Comparison::Incomparable => false,
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Constant(value) => write!(f, "{value}"),
            Expression::Column(index, _) => write!(f, "#{index}"),
            Expression::Compare(left, op, right) => write!(f, "{left} {op} {right}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Expression {
        Expression::Constant(Value::from(s))
    }

    fn decimal(s: &str) -> Expression {
        Expression::Constant(Value::Decimal(s.parse().unwrap()))
    }

    #[test]
    fn compare_requires_identical_operand_types() {
        assert!(Expression::compare(text("a"), CompareOp::Equal, text("b")).is_ok());
        assert_eq!(
            Expression::compare(text("1"), CompareOp::Equal, decimal("1")),
            Err(Error::TypeMismatch {
                expected: "text".into(),
                found: "decimal".into(),
            })
        );
    }

    #[test]
    fn comparisons_are_boolean_typed() {
        let expr = Expression::compare(decimal("1"), CompareOp::LessThan, decimal("2")).unwrap();
        assert_eq!(expr.data_type(), DataType::Boolean);
    }

    #[test]
    fn evaluates_each_operator_against_each_outcome() {
        use CompareOp::*;
        // (left, right, operator, expected)
        let cases = [
            ("1", "1", Equal, true),
            ("1", "2", Equal, false),
            ("1", "2", NotEqual, true),
            ("1", "1", NotEqual, false),
            ("1", "2", LessThan, true),
            ("2", "2", LessThan, false),
            ("2", "2", LessThanOrEqual, true),
            ("3", "2", LessThanOrEqual, false),
            ("3", "2", GreaterThan, true),
            ("2", "2", GreaterThan, false),
            ("2", "2", GreaterThanOrEqual, true),
            ("1", "2", GreaterThanOrEqual, false),
        ];
        for (left, right, op, want) in cases {
            let expr = Expression::compare(decimal(left), op, decimal(right)).unwrap();
            assert_eq!(
                expr.evaluate(&vec![]),
                Value::Boolean(want),
                "{left} {op} {right}"
            );
        }
    }

    #[test]
    fn column_references_index_the_row() {
        let expr = Expression::Column(1, DataType::Text);
        let row = vec![Value::Decimal("1".parse().unwrap()), Value::from("a")];
        assert_eq!(expr.evaluate(&row), Value::from("a"));
    }
}
