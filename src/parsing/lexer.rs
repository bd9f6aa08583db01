//! A character-class state machine that turns query text into tokens.
//!
//! Offsets are character positions, not byte positions, and the parser
//! reports its errors at them. End of input is modeled as one trailing
//! virtual whitespace character, so the final token is always flushed.

use std::fmt;

use crate::error::{Error, Result};

/// The kind of a lexed token: literal kinds first, then punctuation, then
/// keywords. Keywords are matched case-insensitively.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TokenKind {
    Identifier,
    String,
    Number,

    Comma,
    Dot,
    Star,
    Semicolon,
    OpenParen,
    CloseParen,
    Eq,
    NotEq,
    Lt,
    Lte,
    Gt,
    Gte,

    Select,
    From,
    Where,
    And,
    Or,
    Not,
    In,
    Is,
    Null,
    Left,
    Right,
    Inner,
    Outer,
    Join,
    True,
    False,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Identifier => "Identifier",
            TokenKind::String => "String",
            TokenKind::Number => "Number",
            TokenKind::Comma => "Comma",
            TokenKind::Dot => "Dot",
            TokenKind::Star => "Star",
            TokenKind::Semicolon => "Semicolon",
            TokenKind::OpenParen => "OpenParen",
            TokenKind::CloseParen => "CloseParen",
            TokenKind::Eq => "Eq",
            TokenKind::NotEq => "NotEq",
            TokenKind::Lt => "Lt",
            TokenKind::Lte => "Lte",
            TokenKind::Gt => "Gt",
            TokenKind::Gte => "Gte",
            TokenKind::Select => "Select",
            TokenKind::From => "From",
            TokenKind::Where => "Where",
            TokenKind::And => "And",
            TokenKind::Or => "Or",
            TokenKind::Not => "Not",
            TokenKind::In => "In",
            TokenKind::Is => "Is",
            TokenKind::Null => "Null",
            TokenKind::Left => "Left",
            TokenKind::Right => "Right",
            TokenKind::Inner => "Inner",
            TokenKind::Outer => "Outer",
            TokenKind::Join => "Join",
            TokenKind::True => "True",
            TokenKind::False => "False",
        };
        write!(f, "{name}")
    }
}

/// A token: its kind, its lexeme, and its half-open character span in the
/// input. String lexemes and spans exclude the quote delimiters.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub from: usize,
    pub to: usize,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier | TokenKind::String | TokenKind::Number => {
                write!(f, "({} {:?})", self.kind, self.text)
            }
            kind => write!(f, "{kind}"),
        }
    }
}

/// Formats a token sequence as a single space-separated line.
pub fn format_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// The keyword table, keyed by the lowercased lexeme.
fn keyword(word: &str) -> Option<TokenKind> {
    let kind = match word.to_ascii_lowercase().as_str() {
        "select" => TokenKind::Select,
        "from" => TokenKind::From,
        "where" => TokenKind::Where,
        "and" => TokenKind::And,
        "or" => TokenKind::Or,
        "not" => TokenKind::Not,
        "in" => TokenKind::In,
        "is" => TokenKind::Is,
        "null" => TokenKind::Null,
        "left" => TokenKind::Left,
        "right" => TokenKind::Right,
        "inner" => TokenKind::Inner,
        "outer" => TokenKind::Outer,
        "join" => TokenKind::Join,
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        _ => return None,
    };
    Some(kind)
}

/// The symbol table for punctuation runs. `<>` is an alias for `!=`.
fn symbol(run: &str) -> Option<TokenKind> {
    let kind = match run {
        "," => TokenKind::Comma,
        "." => TokenKind::Dot,
        "*" => TokenKind::Star,
        ";" => TokenKind::Semicolon,
        "(" => TokenKind::OpenParen,
        ")" => TokenKind::CloseParen,
        "=" => TokenKind::Eq,
        "!=" | "<>" => TokenKind::NotEq,
        "<" => TokenKind::Lt,
        "<=" => TokenKind::Lte,
        ">" => TokenKind::Gt,
        ">=" => TokenKind::Gte,
        _ => return None,
    };
    Some(kind)
}

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

fn is_digit_or_dot(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

fn is_word_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_word(c: char) -> bool {
    is_word_start(c) || c.is_ascii_digit() || c == '$'
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

fn is_punctuation(c: char) -> bool {
    matches!(c, ',' | '.' | ';' | '(' | ')' | '=' | '<' | '>' | '!' | '*')
}

/// What the characters accumulated since `Lexer::from` form.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    Initial,
    Identifier,
    Number,
    String,
    Punctuation,
}

/// Tokenizes the input, producing the full token sequence or the first
/// error encountered.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    Lexer {
        input: input.chars().collect(),
        state: State::Initial,
        from: 0,
        tokens: Vec::new(),
    }
    .lex()
}

struct Lexer {
    input: Vec<char>,
    state: State,
    /// Start offset of the token being accumulated.
    from: usize,
    tokens: Vec<Token>,
}

impl Lexer {
    fn lex(mut self) -> Result<Vec<Token>> {
        for next in 0..=self.input.len() {
            // One virtual trailing whitespace flushes the last token.
            let c = self.input.get(next).copied().unwrap_or(' ');
            match self.state {
                State::Initial => self.initial(next, c)?,
                State::Identifier => self.identifier(next, c)?,
                State::Number => self.number(next, c)?,
                State::String => self.string(next, c),
                State::Punctuation => self.punctuation(next, c)?,
            }
        }
        Ok(self.tokens)
    }

    fn initial(&mut self, next: usize, c: char) -> Result<()> {
        match c {
            c if is_whitespace(c) => {}
            c if is_word_start(c) => self.enter(State::Identifier, next),
            c if is_digit_or_dot(c) => self.enter(State::Number, next),
            c if is_quote(c) => self.enter(State::String, next),
            c if is_punctuation(c) => self.enter(State::Punctuation, next),
            c => return Err(unexpected(next, c)),
        }
        Ok(())
    }

    fn identifier(&mut self, next: usize, c: char) -> Result<()> {
        match c {
            c if is_word(c) => {}
            c if is_whitespace(c) => {
                self.word_token(next);
                self.enter(State::Initial, next);
            }
            c if is_punctuation(c) => {
                self.word_token(next);
                self.enter(State::Punctuation, next);
            }
            c => return Err(unexpected(next, c)),
        }
        Ok(())
    }

    fn number(&mut self, next: usize, c: char) -> Result<()> {
        match c {
            c if is_digit_or_dot(c) => {}
            c if is_whitespace(c) => {
                self.token(TokenKind::Number, next);
                self.enter(State::Initial, next);
            }
            c if is_punctuation(c) => {
                self.token(TokenKind::Number, next);
                self.enter(State::Punctuation, next);
            }
            c => return Err(unexpected(next, c)),
        }
        Ok(())
    }

    fn string(&mut self, next: usize, c: char) {
        // Strings take any character up to the closing quote; there are no
        // escapes. The lexeme excludes the delimiters.
        if is_quote(c) {
            let text: String = self.input[self.from + 1..next].iter().collect();
            self.tokens.push(Token {
                kind: TokenKind::String,
                text,
                from: self.from + 1,
                to: next,
            });
            self.enter(State::Initial, next);
        }
    }

    fn punctuation(&mut self, next: usize, c: char) -> Result<()> {
        match c {
            c if is_punctuation(c) => Ok(()),
            c if is_digit_or_dot(c) => {
                self.punctuation_token(next)?;
                self.enter(State::Number, next);
                Ok(())
            }
            c if is_quote(c) => {
                self.punctuation_token(next)?;
                self.enter(State::String, next);
                Ok(())
            }
            c if is_word_start(c) => {
                self.punctuation_token(next)?;
                self.enter(State::Identifier, next);
                Ok(())
            }
            c if is_whitespace(c) => {
                self.punctuation_token(next)?;
                self.enter(State::Initial, next);
                Ok(())
            }
            c => Err(unexpected(next, c)),
        }
    }

    fn enter(&mut self, state: State, from: usize) {
        self.state = state;
        self.from = from;
    }

    /// Flushes an identifier, remapping it to a keyword kind when the
    /// lowercased lexeme is in the keyword table.
    fn word_token(&mut self, next: usize) {
        let text: String = self.input[self.from..next].iter().collect();
        let kind = keyword(&text).unwrap_or(TokenKind::Identifier);
        self.tokens.push(Token {
            kind,
            text,
            from: self.from,
            to: next,
        });
    }

    fn token(&mut self, kind: TokenKind, next: usize) {
        let text: String = self.input[self.from..next].iter().collect();
        self.tokens.push(Token {
            kind,
            text,
            from: self.from,
            to: next,
        });
    }

    /// Flushes a maximal punctuation run, which must appear in the symbol
    /// table as a whole; an unknown run errors at its start offset.
    fn punctuation_token(&mut self, next: usize) -> Result<()> {
        let text: String = self.input[self.from..next].iter().collect();
        match symbol(&text) {
            Some(kind) => {
                self.tokens.push(Token {
                    kind,
                    text,
                    from: self.from,
                    to: next,
                });
                Ok(())
            }
            None => Err(Error::syntax(
                self.from,
                format!("unrecognized symbol {text:?}"),
            )),
        }
    }
}

fn unexpected(offset: usize, c: char) -> Error {
    Error::syntax(offset, format!("unexpected character '{c}'"))
}
