//! Boolean query evaluation by recursive descent.
//!
//! ```text
//! query    ::= andterm ( "ANDNOT" query )?
//! andterm  ::= orterm ( "AND" andterm )?
//! orterm   ::= term ( "OR" orterm )?
//! term     ::= "(" query ")" | <word>
//! ```
//!
//! Each rule evaluates as it parses, so the result of a successful parse is
//! the matching posting set. Chained operators of the same level group to the
//! right: `a ANDNOT b ANDNOT c` is `a ANDNOT (b ANDNOT c)`. Chains are read in
//! a loop; only parentheses recurse, and no deeper than [`MAX_NESTING`].

use crate::index::{InvertedIndex, Posting};
use crate::set::Set;
use thiserror::Error;

pub const AND: &str = "AND";
pub const OR: &str = "OR";
pub const ANDNOT: &str = "ANDNOT";
pub const OPEN: &str = "(";
pub const CLOSE: &str = ")";

/// Deepest parenthesis nesting accepted in one query.
pub const MAX_NESTING: usize = 128;

/// Postings borrowed from the index; evaluation never copies a posting.
pub type PostingSet<'a> = Set<&'a Posting>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("syntax error: expected {expected}, found {}", .found.as_deref().unwrap_or("end of query"))]
    Syntax { expected: &'static str, found: Option<String> },

    #[error("unknown term '{0}'")]
    UnknownTerm(String),
}

impl QueryError {
    /// Short machine-readable name for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            QueryError::Syntax { .. } => "syntax",
            QueryError::UnknownTerm(_) => "unknown_term",
        }
    }
}

pub fn is_operator(token: &str) -> bool {
    matches!(token, AND | OR | ANDNOT | OPEN | CLOSE)
}

/// Forward-only position in the token stream.
struct Cursor<'q, S> {
    tokens: &'q [S],
    pos: usize,
}

impl<'q, S: AsRef<str>> Cursor<'q, S> {
    fn new(tokens: &'q [S]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&'q str> {
        self.tokens.get(self.pos).map(|token| token.as_ref())
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    /// Consume the current token if it equals `literal`.
    fn eat(&mut self, literal: &str) -> bool {
        if self.peek() == Some(literal) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn syntax_error(&self, expected: &'static str) -> QueryError {
        QueryError::Syntax { expected, found: self.peek().map(str::to_string) }
    }
}

/// Combine `first op (rest[0] op (rest[1] op ...))`.
fn fold_right<T>(first: T, rest: Vec<T>, op: impl Fn(&T, &T) -> T) -> T {
    match rest.into_iter().rev().reduce(|right, left| op(&left, &right)) {
        Some(right) => op(&first, &right),
        None => first,
    }
}

struct Parser<'a, 'q, S> {
    index: &'a InvertedIndex,
    cursor: Cursor<'q, S>,
    depth: usize,
}

impl<'a, 'q, S: AsRef<str>> Parser<'a, 'q, S> {
    fn query(&mut self) -> Result<PostingSet<'a>, QueryError> {
        let first = self.andterm()?;
        let mut rest = Vec::new();
        while self.cursor.eat(ANDNOT) {
            rest.push(self.andterm()?);
        }
        Ok(fold_right(first, rest, |l, r| l.difference(r)))
    }

    fn andterm(&mut self) -> Result<PostingSet<'a>, QueryError> {
        let first = self.orterm()?;
        let mut rest = Vec::new();
        while self.cursor.eat(AND) {
            rest.push(self.orterm()?);
        }
        Ok(fold_right(first, rest, |l, r| l.intersection(r)))
    }

    fn orterm(&mut self) -> Result<PostingSet<'a>, QueryError> {
        let first = self.term()?;
        let mut rest = Vec::new();
        while self.cursor.eat(OR) {
            rest.push(self.term()?);
        }
        Ok(fold_right(first, rest, |l, r| l.union(r)))
    }

    fn term(&mut self) -> Result<PostingSet<'a>, QueryError> {
        match self.cursor.peek() {
            Some(OPEN) => {
                if self.depth >= MAX_NESTING {
                    return Err(self.cursor.syntax_error("shallower nesting"));
                }
                self.cursor.advance();
                self.depth += 1;
                let inner = self.query();
                self.depth -= 1;
                let inner = inner?;
                if !self.cursor.eat(CLOSE) {
                    return Err(self.cursor.syntax_error("')'"));
                }
                Ok(inner)
            }
            Some(word) if !is_operator(word) => {
                let index = self.index;
                let postings = index
                    .postings(word)
                    .ok_or_else(|| QueryError::UnknownTerm(word.to_string()))?;
                self.cursor.advance();
                Ok(postings.view())
            }
            _ => Err(self.cursor.syntax_error("a term or '('")),
        }
    }
}

/// Evaluate `tokens` against `index`. The whole token stream must form one
/// expression; anything left over after it is a syntax error.
pub fn evaluate<'a, S: AsRef<str>>(index: &'a InvertedIndex, tokens: &[S]) -> Result<PostingSet<'a>, QueryError> {
    let mut parser = Parser { index, cursor: Cursor::new(tokens), depth: 0 };
    let matches = parser.query()?;
    if parser.cursor.peek().is_some() {
        return Err(parser.cursor.syntax_error("an operator or end of query"));
    }
    Ok(matches)
}
