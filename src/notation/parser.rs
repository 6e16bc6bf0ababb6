//! Recursive-descent parser for the catalog literal notation.
//!
//! Two tolerances are deliberate, inherited from the legacy tool: trailing
//! tokens after a single parsed value are ignored, and a dangling unmatched
//! `]` inside a table stream is skipped. Historic files depend on both.

use crate::error::{Result, ShelfError};
use crate::notation::lexer::tokenize;
use crate::notation::token::{Location, Token, TokenKind};
use crate::notation::value::{Color, List, Point, Rect, Value};

/// Parse a single value from `text`. Trailing tokens after the value are
/// ignored.
pub fn parse_value(text: &str) -> Result<Value> {
    let mut parser = Parser::new(tokenize(text)?);
    parser.read_value()
}

/// Best-effort variant of [`parse_value`]: any lexical or syntactic error
/// collapses to `None`. Catalog files are hand-edited, so a malformed line is
/// expected input rather than an exceptional one.
pub fn parse_one_value(text: &str) -> Option<Value> {
    parse_value(text).ok()
}

/// Parse a stream of *tables*: runs of values separated by top-level
/// standalone hyphens. This is the bulk grouping convention used by
/// multi-record blocks, distinct from a bracketed list.
pub fn parse_table_stream(text: &str) -> Result<Vec<Vec<Value>>> {
    let mut parser = Parser::new(tokenize(text)?);
    parser.read_table_stream()
}

struct Parser {
    tokens: std::iter::Peekable<std::vec::IntoIter<Token>>,
    /// Start of the most recently consumed token, for end-of-input errors.
    last: Location,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens: tokens.into_iter().peekable(),
            last: Location::new(1, 1),
        }
    }

    fn peek(&mut self) -> Option<&TokenKind> {
        self.tokens.peek().map(|t| &t.kind)
    }

    fn pop(&mut self) -> Result<Token> {
        match self.tokens.next() {
            Some(tok) => {
                self.last = tok.pos;
                Ok(tok)
            }
            None => Err(ShelfError::parse(
                self.last.line,
                self.last.column,
                "unexpected end of input",
            )),
        }
    }

    /// Consume one token of an exact payload-free kind.
    fn expect(&mut self, kind: TokenKind) -> Result<()> {
        let tok = self.pop()?;
        if tok.kind != kind {
            return Err(unexpected(&tok, kind.describe()));
        }
        Ok(())
    }

    fn expect_int(&mut self) -> Result<(i32, Location)> {
        let tok = self.pop()?;
        match tok.kind {
            TokenKind::Int(n) => Ok((n, tok.pos)),
            _ => Err(unexpected(&tok, "integer")),
        }
    }

    /// Either numeric token, widened to float.
    fn expect_number(&mut self) -> Result<f32> {
        let tok = self.pop()?;
        match tok.kind {
            TokenKind::Int(n) => Ok(n as f32),
            TokenKind::Float(n) => Ok(n),
            _ => Err(unexpected(&tok, "float or integer")),
        }
    }

    fn read_value(&mut self) -> Result<Value> {
        let tok = self.pop()?;
        self.read_value_from(tok)
    }

    fn read_value_from(&mut self, tok: Token) -> Result<Value> {
        match tok.kind {
            TokenKind::Void => Ok(Value::Nil),
            TokenKind::Str(s) => Ok(Value::Text(s)),
            TokenKind::Float(n) => Ok(Value::Float(n)),
            TokenKind::Int(n) => Ok(Value::Int(n)),
            TokenKind::OpenBracket => self.read_list().map(Value::List),
            TokenKind::KeywordColor => {
                self.expect(TokenKind::OpenParen)?;
                let mut components = [0u8; 3];
                for (i, slot) in components.iter_mut().enumerate() {
                    let (n, pos) = self.expect_int()?;
                    *slot = u8::try_from(n).map_err(|_| {
                        ShelfError::parse(
                            pos.line,
                            pos.column,
                            format!("color component {n} out of range"),
                        )
                    })?;
                    if i < 2 {
                        self.expect(TokenKind::Comma)?;
                    }
                }
                self.expect(TokenKind::CloseParen)?;
                Ok(Value::Color(Color::new(
                    components[0],
                    components[1],
                    components[2],
                )))
            }
            TokenKind::KeywordPoint => {
                self.expect(TokenKind::OpenParen)?;
                let x = self.expect_number()?;
                self.expect(TokenKind::Comma)?;
                let y = self.expect_number()?;
                self.expect(TokenKind::CloseParen)?;
                Ok(Value::Point(Point::new(x, y)))
            }
            TokenKind::KeywordRect => {
                self.expect(TokenKind::OpenParen)?;
                let mut components = [0f32; 4];
                for (i, slot) in components.iter_mut().enumerate() {
                    *slot = self.expect_number()?;
                    if i < 3 {
                        self.expect(TokenKind::Comma)?;
                    }
                }
                self.expect(TokenKind::CloseParen)?;
                Ok(Value::Rect(Rect::new(
                    components[0],
                    components[1],
                    components[2],
                    components[3],
                )))
            }
            _ => Err(unexpected(&tok, "value")),
        }
    }

    /// The opening bracket has already been consumed.
    fn read_list(&mut self) -> Result<List> {
        let mut list = List::new();
        if self.peek() == Some(&TokenKind::CloseBracket) {
            self.pop()?;
            return Ok(list);
        }

        loop {
            let tok = self.pop()?;
            match tok.kind {
                TokenKind::Symbol(key) => {
                    self.expect(TokenKind::Colon)?;
                    let value = self.read_value()?;
                    // a nil field is dropped rather than stored
                    if !value.is_nil() {
                        list.insert(key, value);
                    }
                }
                // a lone void entry contributes nothing
                TokenKind::Void => {}
                _ => list.push(self.read_value_from(tok)?),
            }

            if self.peek() != Some(&TokenKind::Comma) {
                break;
            }
            self.pop()?;
        }

        self.expect(TokenKind::CloseBracket)?;
        Ok(list)
    }

    fn read_table_stream(&mut self) -> Result<Vec<Vec<Value>>> {
        let mut tables = Vec::new();

        if self.peek() == Some(&TokenKind::Hyphen) {
            self.pop()?;
        }

        while self.peek().is_some() {
            tables.push(self.read_table()?);

            if self.peek() == Some(&TokenKind::Hyphen) {
                self.pop()?;
            }
        }

        Ok(tables)
    }

    fn read_table(&mut self) -> Result<Vec<Value>> {
        let mut items = Vec::new();

        while matches!(self.peek(), Some(kind) if *kind != TokenKind::Hyphen) {
            let value = self.read_value()?;
            if !value.is_nil() {
                items.push(value);
            }

            // historic files contain stray unmatched closing brackets; the
            // legacy tool skipped them silently, so this does too
            if self.peek() == Some(&TokenKind::CloseBracket) {
                self.pop()?;
            }
        }

        Ok(items)
    }
}

fn unexpected(tok: &Token, wanted: &str) -> ShelfError {
    ShelfError::parse(
        tok.pos.line,
        tok.pos.column,
        format!("expected {wanted}, got {}", tok.kind),
    )
}
