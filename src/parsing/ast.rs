//! The abstract syntax tree produced by the parser.
//!
//! The AST describes the syntactic structure of a statement only. Whether
//! tables and columns exist, and whether types line up, is established by
//! the planner. Every type renders back to canonical query text via
//! `Display`; re-tokenizing that rendering is stable.

use std::fmt;

use crate::types::Decimal;

/// A parsed statement. The engine accepts a single SELECT per input.
#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    Select(SelectStatement),
}

/// `SELECT <list> FROM <tables> [WHERE <predicate>]`.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectStatement {
    pub what: SelectList,
    pub from: TableReference,
    pub r#where: Option<Expression>,
}

/// The projected columns: `*`, or an expression list. The list may be
/// empty, which is a valid zero-column projection.
#[derive(Clone, Debug, PartialEq)]
pub enum SelectList {
    Star,
    Expressions(Vec<Expression>),
}

/// A scalar expression: a literal, a column reference, or a single
/// comparison. Comparisons do not nest.
#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    Literal(Literal),
    /// A column reference, optionally qualified with a relation name.
    Column(Option<String>, String),
    Compare(Box<Expression>, CompareOp, Box<Expression>),
}

/// Literal values.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Boolean(bool),
    Number(Decimal),
    String(String),
}

/// Comparison operators. Every comparison produces a boolean.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompareOp {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

/// A table source: a named table, or a join of two sources.
#[derive(Clone, Debug, PartialEq)]
pub enum TableReference {
    Table(String),
    Join {
        left: Box<TableReference>,
        right: Box<TableReference>,
        predicate: Expression,
        kind: JoinType,
    },
}

/// The parsed join kind. Outer kinds parse but are rejected by the
/// planner, which only executes inner joins.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum JoinType {
    Inner,
    LeftOuter,
    RightOuter,
}

impl From<Literal> for Expression {
    fn from(literal: Literal) -> Self {
        Expression::Literal(literal)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Statement::Select(select) = self;
        write!(f, "{select}")
    }
}

impl fmt::Display for SelectStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "select {} from {}", self.what, self.from)?;
        if let Some(predicate) = &self.r#where {
            write!(f, " where {predicate}")?;
        }
        Ok(())
    }
}

impl fmt::Display for SelectList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectList::Star => write!(f, "*"),
            SelectList::Expressions(expressions) => {
                let list: Vec<String> = expressions.iter().map(Expression::to_string).collect();
                write!(f, "{}", list.join(", "))
            }
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(literal) => write!(f, "{literal}"),
            Expression::Column(None, name) => write!(f, "{name}"),
            Expression::Column(Some(relation), name) => write!(f, "{relation}.{name}"),
            Expression::Compare(left, op, right) => write!(f, "{left} {op} {right}"),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Boolean(b) => write!(f, "{b}"),
            Literal::Number(n) => write!(f, "{n}"),
            Literal::String(s) => write!(f, "'{s}'"),
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            CompareOp::Equal => "=",
            CompareOp::NotEqual => "!=",
            CompareOp::LessThan => "<",
            CompareOp::LessThanOrEqual => "<=",
            CompareOp::GreaterThan => ">",
            CompareOp::GreaterThanOrEqual => ">=",
        };
        write!(f, "{symbol}")
    }
}

impl fmt::Display for TableReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableReference::Table(name) => write!(f, "{name}"),
            TableReference::Join {
                left,
                right,
                predicate,
                kind,
            } => write!(f, "{left} {kind} {right} on {predicate}"),
        }
    }
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinType::Inner => write!(f, "join"),
            JoinType::LeftOuter => write!(f, "left outer join"),
            JoinType::RightOuter => write!(f, "right outer join"),
        }
    }
}
