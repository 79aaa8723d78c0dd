// HireScope - core/query.rs
//
// Boolean query language for the applicant search box.
//
//   query   := chain
//   chain   := unary ( [AND | OR] unary )*      (missing operator = AND)
//   unary   := NOT unary | primary
//   primary := "phrase" | word | '(' chain ')'
//
// AND, OR and the implicit AND share one precedence level and associate to
// the left, so `a OR b AND c` reads as `(a OR b) AND c`. Saved queries depend
// on this order; do not introduce conventional precedence here.
//
// Core layer: pure logic, no I/O. Input is tokenised into a closed token set
// and parsed by recursive descent; nothing is ever evaluated as code.

use crate::util::constants::{MAX_GROUP_DEPTH, MAX_QUERY_TERMS};
use crate::util::error::QueryError;
use std::fmt;

// =============================================================================
// Tokens
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// Text between double quotes, verbatim.
    Phrase(String),
    /// Unquoted run of non-space characters.
    Word(String),
    And,
    Or,
    Not,
    LParen,
    RParen,
}

impl Token {
    /// Name used in diagnostics.
    fn describe(&self) -> &'static str {
        match self {
            Token::Phrase(_) => "a phrase",
            Token::Word(_) => "a word",
            Token::And => "AND",
            Token::Or => "OR",
            Token::Not => "NOT",
            Token::LParen => "'('",
            Token::RParen => "')'",
        }
    }
}

/// A token and the byte offset where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Spanned {
    pub token: Token,
    pub position: usize,
}

fn is_word_boundary(c: char) -> bool {
    c.is_whitespace() || c == '"' || c == '(' || c == ')'
}

/// Classify an unquoted word. Keywords are case-sensitive; runs made only of
/// `&` or only of `|` are operator spellings (`&&&&` is just AND).
fn classify_word(word: &str) -> Token {
    match word {
        "AND" => Token::And,
        "OR" => Token::Or,
        "NOT" => Token::Not,
        w if w.chars().all(|c| c == '&') => Token::And,
        w if w.chars().all(|c| c == '|') => Token::Or,
        w => Token::Word(w.to_string()),
    }
}

/// True for a word the tokenizer reads as AND, OR or NOT.
pub(crate) fn is_operator_word(word: &str) -> bool {
    !matches!(classify_word(word), Token::Word(_))
}

/// Split a query into tokens.
pub(crate) fn tokenize(input: &str) -> Result<Vec<Spanned>, QueryError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let token = match c {
            '(' => {
                chars.next();
                Token::LParen
            }
            ')' => {
                chars.next();
                Token::RParen
            }
            '"' => {
                chars.next();
                let body_start = start + 1;
                let close = input[body_start..]
                    .find('"')
                    .ok_or(QueryError::UnterminatedQuote { position: start })?;
                let body_end = body_start + close;
                // Skip past the body and the closing quote.
                while let Some(&(i, _)) = chars.peek() {
                    if i > body_end {
                        break;
                    }
                    chars.next();
                }
                Token::Phrase(input[body_start..body_end].to_string())
            }
            _ => {
                let mut end = input.len();
                while let Some(&(i, ch)) = chars.peek() {
                    if is_word_boundary(ch) {
                        end = i;
                        break;
                    }
                    chars.next();
                }
                classify_word(&input[start..end])
            }
        };

        tokens.push(Spanned {
            token,
            position: start,
        });
    }

    Ok(tokens)
}

// =============================================================================
// Expression tree
// =============================================================================

/// Parsed boolean query. Term text is stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// True when any searchable field contains the text.
    Term(String),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Evaluate the tree, resolving each term with `contains`.
    ///
    /// `contains` receives the lower-cased term text.
    pub fn evaluate<F>(&self, contains: &F) -> bool
    where
        F: Fn(&str) -> bool,
    {
        match self {
            Expr::Term(text) => contains(text),
            Expr::Not(inner) => !inner.evaluate(contains),
            Expr::And(lhs, rhs) => lhs.evaluate(contains) && rhs.evaluate(contains),
            Expr::Or(lhs, rhs) => lhs.evaluate(contains) || rhs.evaluate(contains),
        }
    }
}

impl fmt::Display for Expr {
    /// Fully parenthesised canonical form, e.g. `(("a" OR "b") AND NOT "c")`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Term(text) => write!(f, "\"{text}\""),
            Expr::Not(inner) => write!(f, "NOT {inner}"),
            Expr::And(lhs, rhs) => write!(f, "({lhs} AND {rhs})"),
            Expr::Or(lhs, rhs) => write!(f, "({lhs} OR {rhs})"),
        }
    }
}

// =============================================================================
// Parser
// =============================================================================

#[derive(Clone, Copy)]
enum BinaryOp {
    And,
    Or,
}

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    /// Offset reported for errors at end of input.
    end: usize,
    terms: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Spanned> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'a Spanned> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn chain(&mut self, depth: usize) -> Result<Expr, QueryError> {
        let mut lhs = self.unary(depth)?;

        loop {
            let op = match self.peek().map(|s| &s.token) {
                None | Some(Token::RParen) => break,
                Some(Token::And) => {
                    self.advance();
                    BinaryOp::And
                }
                Some(Token::Or) => {
                    self.advance();
                    BinaryOp::Or
                }
                // Juxtaposed operands.
                Some(_) => BinaryOp::And,
            };

            let rhs = self.unary(depth)?;
            lhs = match op {
                BinaryOp::And => Expr::And(Box::new(lhs), Box::new(rhs)),
                BinaryOp::Or => Expr::Or(Box::new(lhs), Box::new(rhs)),
            };
        }

        Ok(lhs)
    }

    fn unary(&mut self, depth: usize) -> Result<Expr, QueryError> {
        let Some(spanned) = self.advance() else {
            return Err(QueryError::ExpectedOperand {
                found: "end of query",
                position: self.end,
            });
        };

        if depth >= MAX_GROUP_DEPTH {
            return Err(QueryError::NestingTooDeep {
                max: MAX_GROUP_DEPTH,
                position: spanned.position,
            });
        }

        match &spanned.token {
            Token::Phrase(text) | Token::Word(text) => {
                self.terms += 1;
                if self.terms > MAX_QUERY_TERMS {
                    return Err(QueryError::TooManyTerms {
                        max: MAX_QUERY_TERMS,
                        position: spanned.position,
                    });
                }
                Ok(Expr::Term(text.to_lowercase()))
            }
            Token::Not => Ok(Expr::Not(Box::new(self.unary(depth + 1)?))),
            Token::LParen => {
                let inner = self.chain(depth + 1)?;
                match self.advance() {
                    Some(Spanned {
                        token: Token::RParen,
                        ..
                    }) => Ok(inner),
                    _ => Err(QueryError::UnclosedGroup {
                        position: spanned.position,
                    }),
                }
            }
            other => Err(QueryError::ExpectedOperand {
                found: other.describe(),
                position: spanned.position,
            }),
        }
    }
}

/// Parse a boolean query into an expression tree.
pub fn parse(input: &str) -> Result<Expr, QueryError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        end: input.len(),
        terms: 0,
    };

    let expr = parser.chain(0)?;

    // chain() only stops early on a ')' it cannot pair.
    if let Some(stray) = parser.peek() {
        return Err(QueryError::UnmatchedCloseParen {
            position: stray.position,
        });
    }

    Ok(expr)
}
