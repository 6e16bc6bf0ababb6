//! Tokens and source locations for the catalog literal notation.

use std::fmt;

/// A location in source text (line, column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    /// Line number (1-indexed)
    pub line: u32,
    /// Column number (1-indexed, in characters not bytes)
    pub column: u32,
}

impl Location {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// One lexical token. Literal payloads ride inside the kind.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    OpenBracket,
    CloseBracket,
    OpenParen,
    CloseParen,
    Comma,
    Colon,
    /// Standalone `-`; a table/category delimiter at higher levels.
    Hyphen,
    /// The `void` keyword.
    Void,
    Str(String),
    Float(f32),
    Int(i32),
    /// `#name`
    Symbol(String),
    KeywordColor,
    KeywordPoint,
    KeywordRect,
}

impl TokenKind {
    /// Short name used in "expected X, got Y" diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::OpenBracket => "'['",
            TokenKind::CloseBracket => "']'",
            TokenKind::OpenParen => "'('",
            TokenKind::CloseParen => "')'",
            TokenKind::Comma => "','",
            TokenKind::Colon => "':'",
            TokenKind::Hyphen => "'-'",
            TokenKind::Void => "void",
            TokenKind::Str(_) => "string",
            TokenKind::Float(_) => "float",
            TokenKind::Int(_) => "integer",
            TokenKind::Symbol(_) => "symbol",
            TokenKind::KeywordColor => "'color'",
            TokenKind::KeywordPoint => "'point'",
            TokenKind::KeywordRect => "'rect'",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A token with the location it started at.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: Location,
}

impl Token {
    pub fn new(kind: TokenKind, pos: Location) -> Self {
        Self { kind, pos }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_display() {
        assert_eq!(Location::new(3, 14).to_string(), "3:14");
    }

    #[test]
    fn test_describe() {
        assert_eq!(TokenKind::Int(5).describe(), "integer");
        assert_eq!(TokenKind::CloseBracket.describe(), "']'");
    }
}
