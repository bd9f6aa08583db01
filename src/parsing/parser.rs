//! Recursive-descent parser over the token sequence.
//!
//! The parser runs the lexer, then descends over a cursor into the token
//! buffer. It only checks that the syntax is well-formed; name and type
//! resolution happen in the planner.

use super::ast::{
    CompareOp, Expression, JoinType, Literal, SelectList, SelectStatement, Statement,
    TableReference,
};
use super::lexer::{tokenize, Token, TokenKind};
use crate::error::{Error, Result};
use crate::types::Decimal;

/// Parses the input into a single statement. A trailing semicolon is
/// optional; any input after it is an error.
pub fn parse(input: &str) -> Result<Statement> {
    let mut tokens = Tokens::new(input, tokenize(input)?);
    let select = parse_select(&mut tokens)?;
    tokens.skip(TokenKind::Semicolon);
    if !tokens.done() {
        let token = tokens.peek(&[])?;
        return Err(Error::syntax(token.from, expectation(&[], token)));
    }
    Ok(Statement::Select(select))
}

/// The parser's cursor: an explicit index into an immutable token buffer.
/// Advancing never aliases or mutates the buffer itself.
struct Tokens {
    /// Total input length in characters, for end-of-input errors.
    input_len: usize,
    tokens: Vec<Token>,
    pos: usize,
}

impl Tokens {
    fn new(input: &str, tokens: Vec<Token>) -> Self {
        Tokens {
            input_len: input.chars().count(),
            tokens,
            pos: 0,
        }
    }

    /// The current token, checked against the expected kinds; an empty set
    /// accepts anything. Does not advance. Fails past the last token with
    /// an end-of-input error at the input's total length.
    fn peek(&self, expected: &[TokenKind]) -> Result<&Token> {
        let token = self
            .tokens
            .get(self.pos)
            .ok_or_else(|| Error::syntax(self.input_len, "unexpected end of input"))?;
        if !expected.is_empty() && !expected.contains(&token.kind) {
            return Err(Error::syntax(token.from, expectation(expected, token)));
        }
        Ok(token)
    }

    /// As `peek`, but advances past the token and returns it by value.
    fn next(&mut self, expected: &[TokenKind]) -> Result<Token> {
        let token = self.peek(expected)?.clone();
        self.pos += 1;
        Ok(token)
    }

    /// As `next`, discarding the token.
    fn expect(&mut self, expected: &[TokenKind]) -> Result<()> {
        self.next(expected).map(|_| ())
    }

    /// Advances past the current token if it has the given kind, returning
    /// whether it did.
    fn next_is(&mut self, kind: TokenKind) -> bool {
        if self.peek_in(&[kind]) {
            self.pos += 1;
            return true;
        }
        false
    }

    /// As `next_is`, but expresses that the token is optional noise.
    fn skip(&mut self, kind: TokenKind) {
        self.next_is(kind);
    }

    /// Non-erroring lookahead: whether the current token is one of `kinds`.
    fn peek_in(&self, kinds: &[TokenKind]) -> bool {
        self.tokens
            .get(self.pos)
            .is_some_and(|t| kinds.contains(&t.kind))
    }

    fn done(&self) -> bool {
        self.pos == self.tokens.len()
    }
}

/// Formats an expectation failure: `expected Eq, got "x"` for a single
/// kind, `expected one of Eq, Lt or Gt, got "x"` for several.
fn expectation(expected: &[TokenKind], got: &Token) -> String {
    match expected {
        [] => format!("unexpected token {:?}", got.text),
        [kind] => format!("expected {kind}, got {:?}", got.text),
        [init @ .., last] => {
            let init: Vec<String> = init.iter().map(TokenKind::to_string).collect();
            format!(
                "expected one of {} or {last}, got {:?}",
                init.join(", "),
                got.text
            )
        }
    }
}

/// Kinds that can begin an expression. Used to tell an absent select list
/// from a malformed one: only when the lookahead cannot begin an expression
/// is the list empty.
const EXPRESSION_START: &[TokenKind] = &[
    TokenKind::String,
    TokenKind::Number,
    TokenKind::True,
    TokenKind::False,
    TokenKind::Identifier,
];

fn parse_select(tokens: &mut Tokens) -> Result<SelectStatement> {
    tokens.expect(&[TokenKind::Select])?;
    let what = parse_select_list(tokens)?;
    tokens.expect(&[TokenKind::From])?;
    let from = parse_table_reference(tokens)?;
    let r#where = if tokens.next_is(TokenKind::Where) {
        Some(parse_expression(tokens)?)
    } else {
        None
    };
    Ok(SelectStatement {
        what,
        from,
        r#where,
    })
}

fn parse_select_list(tokens: &mut Tokens) -> Result<SelectList> {
    if tokens.next_is(TokenKind::Star) {
        return Ok(SelectList::Star);
    }
    let mut expressions = Vec::new();
    if tokens.peek_in(EXPRESSION_START) {
        expressions.push(parse_expression(tokens)?);
        while tokens.next_is(TokenKind::Comma) {
            expressions.push(parse_expression(tokens)?);
        }
    }
    Ok(SelectList::Expressions(expressions))
}

/// A single comparison level: `value (op value)?`. Comparisons do not
/// chain.
fn parse_expression(tokens: &mut Tokens) -> Result<Expression> {
    let left = parse_value(tokens)?;
    match tokens.peek(&[]).ok().and_then(|t| compare_op(t.kind)) {
        Some(op) => {
            tokens.expect(&[])?;
            let right = parse_value(tokens)?;
            Ok(Expression::Compare(Box::new(left), op, Box::new(right)))
        }
        None => Ok(left),
    }
}

fn compare_op(kind: TokenKind) -> Option<CompareOp> {
    let op = match kind {
        TokenKind::Eq => CompareOp::Equal,
        TokenKind::NotEq => CompareOp::NotEqual,
        TokenKind::Lt => CompareOp::LessThan,
        TokenKind::Lte => CompareOp::LessThanOrEqual,
        TokenKind::Gt => CompareOp::GreaterThan,
        TokenKind::Gte => CompareOp::GreaterThanOrEqual,
        _ => return None,
    };
    Some(op)
}

fn parse_value(tokens: &mut Tokens) -> Result<Expression> {
    let token = tokens.next(EXPRESSION_START)?;
    match token.kind {
        TokenKind::String => Ok(Literal::String(token.text).into()),
        TokenKind::True => Ok(Literal::Boolean(true).into()),
        TokenKind::False => Ok(Literal::Boolean(false).into()),
        TokenKind::Number => {
            let number: Decimal = token.text.parse().map_err(|err| match err {
                Error::InvalidValue(message) => Error::syntax(token.from, message),
                err => err,
            })?;
            Ok(Literal::Number(number).into())
        }
        // Identifier, by EXPRESSION_START: a column reference, optionally
        // qualified with a relation name.
        _ => {
            if tokens.next_is(TokenKind::Dot) {
                let column = tokens.next(&[TokenKind::Identifier])?;
                return Ok(Expression::Column(Some(token.text), column.text));
            }
            Ok(Expression::Column(None, token.text))
        }
    }
}

/// Right-recursive: `name (join-kind table-ref ON expr)?`. A join is
/// detected by peeking for a join-introducing keyword after the table name.
fn parse_table_reference(tokens: &mut Tokens) -> Result<TableReference> {
    let name = tokens.next(&[TokenKind::Identifier])?;
    let left = TableReference::Table(name.text);
    if !tokens.peek_in(&[TokenKind::Left, TokenKind::Right, TokenKind::Join]) {
        return Ok(left);
    }
    let kind = parse_join_kind(tokens)?;
    let right = parse_table_reference(tokens)?;
    expect_on(tokens)?;
    let predicate = parse_expression(tokens)?;
    Ok(TableReference::Join {
        left: Box::new(left),
        right: Box::new(right),
        predicate,
        kind,
    })
}

/// `(LEFT | RIGHT)? OUTER? JOIN`. OUTER is only accepted after a side; the
/// side alone already determines the kind.
fn parse_join_kind(tokens: &mut Tokens) -> Result<JoinType> {
    let kind = if tokens.next_is(TokenKind::Left) {
        tokens.skip(TokenKind::Outer);
        JoinType::LeftOuter
    } else if tokens.next_is(TokenKind::Right) {
        tokens.skip(TokenKind::Outer);
        JoinType::RightOuter
    } else {
        JoinType::Inner
    };
    tokens.expect(&[TokenKind::Join])?;
    Ok(kind)
}

/// `ON` is not in the keyword table; it arrives as a plain identifier and
/// is matched case-insensitively.
fn expect_on(tokens: &mut Tokens) -> Result<()> {
    let token = tokens.peek(&[TokenKind::Identifier])?;
    if !token.text.eq_ignore_ascii_case("on") {
        return Err(Error::syntax(
            token.from,
            format!("expected on, got {:?}", token.text),
        ));
    }
    tokens.expect(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str) -> Expression {
        Expression::Column(None, name.into())
    }

    fn qualified(relation: &str, name: &str) -> Expression {
        Expression::Column(Some(relation.into()), name.into())
    }

    fn number(input: &str) -> Expression {
        Literal::Number(input.parse().unwrap()).into()
    }

    fn compare(left: Expression, op: CompareOp, right: Expression) -> Expression {
        Expression::Compare(Box::new(left), op, Box::new(right))
    }

    fn select(input: &str) -> SelectStatement {
        match parse(input).expect(input) {
            Statement::Select(select) => select,
        }
    }

    #[test]
    fn parses_a_column_list() {
        assert_eq!(
            select("select x,y from foo"),
            SelectStatement {
                what: SelectList::Expressions(vec![column("x"), column("y")]),
                from: TableReference::Table("foo".into()),
                r#where: None,
            }
        );
    }

    #[test]
    fn parses_star() {
        assert_eq!(
            select("select * from foo"),
            SelectStatement {
                what: SelectList::Star,
                from: TableReference::Table("foo".into()),
                r#where: None,
            }
        );
    }

    #[test]
    fn parses_an_empty_select_list() {
        assert_eq!(
            select("select from foo").what,
            SelectList::Expressions(vec![])
        );
    }

    #[test]
    fn parses_literals() {
        assert_eq!(
            select("select 'a', 1.5, true, false from foo").what,
            SelectList::Expressions(vec![
                Literal::String("a".into()).into(),
                number("1.5"),
                Literal::Boolean(true).into(),
                Literal::Boolean(false).into(),
            ])
        );
    }

    #[test]
    fn parses_where_with_a_comparison() {
        assert_eq!(
            select("select id from films where title = 'The Godfather'"),
            SelectStatement {
                what: SelectList::Expressions(vec![column("id")]),
                from: TableReference::Table("films".into()),
                r#where: Some(compare(
                    column("title"),
                    CompareOp::Equal,
                    Literal::String("The Godfather".into()).into(),
                )),
            }
        );
    }

    #[test]
    fn parses_every_comparison_operator() {
        let cases = [
            ("=", CompareOp::Equal),
            ("!=", CompareOp::NotEqual),
            ("<>", CompareOp::NotEqual),
            ("<", CompareOp::LessThan),
            ("<=", CompareOp::LessThanOrEqual),
            (">", CompareOp::GreaterThan),
            (">=", CompareOp::GreaterThanOrEqual),
        ];
        for (symbol, op) in cases {
            let stmt = select(&format!("select * from t where x {symbol} 1"));
            assert_eq!(
                stmt.r#where,
                Some(compare(column("x"), op, number("1"))),
                "operator {symbol}"
            );
        }
    }

    #[test]
    fn parses_an_inner_join() {
        assert_eq!(
            select("select films.title, people.name from films join people on films.director = people.id"),
            SelectStatement {
                what: SelectList::Expressions(vec![
                    qualified("films", "title"),
                    qualified("people", "name"),
                ]),
                from: TableReference::Join {
                    left: Box::new(TableReference::Table("films".into())),
                    right: Box::new(TableReference::Table("people".into())),
                    predicate: compare(
                        qualified("films", "director"),
                        CompareOp::Equal,
                        qualified("people", "id"),
                    ),
                    kind: JoinType::Inner,
                },
                r#where: None,
            }
        );
    }

    #[test]
    fn parses_outer_join_kinds() {
        let cases = [
            ("left join", JoinType::LeftOuter),
            ("left outer join", JoinType::LeftOuter),
            ("right join", JoinType::RightOuter),
            ("right outer join", JoinType::RightOuter),
            ("join", JoinType::Inner),
        ];
        for (phrase, want) in cases {
            let stmt = select(&format!("select x from t1 {phrase} t2 on t1.a = t2.a"));
            match stmt.from {
                TableReference::Join { kind, .. } => assert_eq!(kind, want, "{phrase}"),
                from => panic!("expected a join for {phrase:?}, got {from:?}"),
            }
        }
    }

    #[test]
    fn joins_nest_to_the_right() {
        // The table reference is right-recursive: the right side of a join
        // is itself a full table reference, so chained joins nest with
        // their ON clauses innermost-first.
        let stmt = select("select * from a join b join c on c.y = 2 on b.x = 1");
        let TableReference::Join {
            left,
            right,
            predicate,
            ..
        } = stmt.from
        else {
            panic!("expected a join");
        };
        assert_eq!(*left, TableReference::Table("a".into()));
        assert_eq!(
            predicate,
            compare(qualified("b", "x"), CompareOp::Equal, number("1"))
        );
        match *right {
            TableReference::Join { ref left, ref right, .. } => {
                assert_eq!(**left, TableReference::Table("b".into()));
                assert_eq!(**right, TableReference::Table("c".into()));
            }
            ref other => panic!("expected a nested join, got {other:?}"),
        }
    }

    #[test]
    fn accepts_a_trailing_semicolon() {
        assert_eq!(select("select * from foo;"), select("select * from foo"));
    }

    #[test]
    fn rejects_trailing_input() {
        assert_eq!(
            parse("select * from foo; x"),
            Err(Error::syntax(19, "unexpected token \"x\"")),
        );
    }

    #[test]
    fn reports_errors_with_offsets() {
        let cases = [
            ("", 0, "unexpected end of input"),
            ("select % from temptable", 7, "unexpected character '%'"),
            ("hello x from y", 0, "expected Select, got \"hello\""),
            ("select foo,, bar from t", 10, "unrecognized symbol \",,\""),
            ("select x from", 13, "unexpected end of input"),
            (
                "select 1.2.3 from t",
                7,
                "multiple decimal points in \"1.2.3\"",
            ),
            (
                "select x from t1 join t2 over t1.a = t2.a",
                25,
                "expected on, got \"over\"",
            ),
            ("select x from t where", 21, "unexpected end of input"),
        ];
        for (input, offset, message) in cases {
            assert_eq!(
                parse(input),
                Err(Error::syntax(offset, message)),
                "parsing {input:?}"
            );
        }
    }

    #[test]
    fn a_malformed_first_expression_is_not_an_empty_list() {
        // A token that can begin an expression commits the parser to the
        // expression list; its failure propagates instead of collapsing to
        // an empty list.
        assert!(parse("select 1.2.3 from t").is_err());
        assert!(parse("select x. from t").is_err());
    }

    #[test]
    fn bare_outer_is_rejected() {
        assert!(parse("select x from t1 outer join t2 on t1.a = t2.a").is_err());
    }

    #[test]
    fn rendering_reparses_to_the_same_statement() {
        let inputs = [
            "select * from foo",
            "select from foo",
            "select x, y from foo where x = 1.5",
            "SELECT films.title, people.name FROM films JOIN people ON films.director = people.id",
            "select x from t1 left outer join t2 on t1.a = t2.a;",
            "select 'a', true, 0.5 from t",
        ];
        for input in inputs {
            let statement = parse(input).expect(input);
            let rendered = statement.to_string();
            assert_eq!(
                parse(&rendered).expect(&rendered),
                statement,
                "re-parsing {rendered:?}"
            );
        }
    }
}
