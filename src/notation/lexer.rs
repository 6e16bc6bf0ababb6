//! Hand-rolled lexer for the catalog literal notation.
//!
//! Positions are tracked across LF, CR, and CRLF line endings for diagnostics.
//! The hyphen is context-sensitive: directly followed by a digit it folds into
//! a negative number token, otherwise it stands alone as a delimiter. That
//! decision is made here with one character of lookahead so the parser never
//! sees it.

use std::iter::Peekable;
use std::str::Chars;

use crate::error::{Result, ShelfError};
use crate::notation::token::{Location, Token, TokenKind};

/// Tokenize a complete payload text.
pub fn tokenize(text: &str) -> Result<Vec<Token>> {
    Lexer::new(text).run()
}

struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: u32,
    column: u32,
}

impl<'a> Lexer<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    fn run(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        self.skip_whitespace();
        while self.peek().is_some() {
            tokens.push(self.read_token()?);
            self.skip_whitespace();
        }
        Ok(tokens)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    /// Consume one character. A CRLF pair counts as a single newline.
    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        let newline = if ch == '\r' {
            if self.peek() == Some('\n') {
                self.chars.next();
            }
            true
        } else {
            ch == '\n'
        };
        if newline {
            self.line += 1;
            self.column = 0;
        }
        self.column += 1;
        Some(ch)
    }

    fn here(&self) -> Location {
        Location::new(self.line, self.column)
    }

    fn error(&self, at: Location, message: impl Into<String>) -> ShelfError {
        ShelfError::parse(at.line, at.column, message)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    /// Letters, digits, and underscores.
    fn read_word(&mut self) -> String {
        let mut word = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                word.push(c);
                self.bump();
            } else {
                break;
            }
        }
        word
    }

    fn read_token(&mut self) -> Result<Token> {
        let start = self.here();
        let ch = match self.peek() {
            Some(c) => c,
            None => return Err(self.error(start, "unexpected end of input")),
        };

        let kind = match ch {
            '[' => {
                self.bump();
                TokenKind::OpenBracket
            }
            ']' => {
                self.bump();
                TokenKind::CloseBracket
            }
            '(' => {
                self.bump();
                TokenKind::OpenParen
            }
            ')' => {
                self.bump();
                TokenKind::CloseParen
            }
            ',' => {
                self.bump();
                TokenKind::Comma
            }
            ':' => {
                self.bump();
                TokenKind::Colon
            }
            '#' => {
                self.bump();
                TokenKind::Symbol(self.read_word())
            }
            '"' => {
                self.bump();
                self.read_string(start)?
            }
            '-' => {
                self.bump();
                if matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                    self.read_number(start, true)?
                } else {
                    TokenKind::Hyphen
                }
            }
            c if c.is_ascii_digit() => self.read_number(start, false)?,
            _ => {
                let word = self.read_word();
                match word.as_str() {
                    "point" => TokenKind::KeywordPoint,
                    "color" => TokenKind::KeywordColor,
                    "rect" => TokenKind::KeywordRect,
                    "void" => TokenKind::Void,
                    "" => {
                        return Err(self.error(start, format!("unexpected character '{ch}'")));
                    }
                    _ => {
                        return Err(self.error(start, format!("invalid keyword '{word}'")));
                    }
                }
            }
        };

        Ok(Token::new(kind, start))
    }

    /// No escape processing; the string runs to the next quote. The legacy
    /// tool looped forever on an unterminated string, which is reported as an
    /// error here instead.
    fn read_string(&mut self, start: Location) -> Result<TokenKind> {
        let mut text = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(TokenKind::Str(text)),
                Some(c) => text.push(c),
                None => return Err(self.error(start, "unterminated string")),
            }
        }
    }

    /// Digit run with at most one dot; a second dot ends the number and is
    /// left for the next token (where it will fail as an unknown character).
    fn read_number(&mut self, start: Location, negative: bool) -> Result<TokenKind> {
        let mut digits = String::new();
        let mut is_float = false;
        while let Some(c) = self.peek() {
            match c {
                '0'..='9' => {
                    digits.push(c);
                    self.bump();
                }
                '.' if !is_float => {
                    is_float = true;
                    digits.push(c);
                    self.bump();
                }
                _ => break,
            }
        }

        if is_float {
            let value: f32 = digits
                .parse()
                .map_err(|_| self.error(start, format!("invalid number '{digits}'")))?;
            Ok(TokenKind::Float(if negative { -value } else { value }))
        } else {
            let value: i32 = digits
                .parse()
                .map_err(|_| self.error(start, format!("invalid number '{digits}'")))?;
            Ok(TokenKind::Int(if negative { -value } else { value }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(text: &str) -> Vec<TokenKind> {
        tokenize(text)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            kinds("[](),:"),
            vec![
                TokenKind::OpenBracket,
                TokenKind::CloseBracket,
                TokenKind::OpenParen,
                TokenKind::CloseParen,
                TokenKind::Comma,
                TokenKind::Colon,
            ]
        );
    }

    #[test]
    fn test_symbol() {
        assert_eq!(
            kinds("#nm #loadOrder2"),
            vec![
                TokenKind::Symbol("nm".into()),
                TokenKind::Symbol("loadOrder2".into()),
            ]
        );
    }

    #[test]
    fn test_string() {
        assert_eq!(
            kinds("\"Big Stone\" \"\""),
            vec![
                TokenKind::Str("Big Stone".into()),
                TokenKind::Str("".into()),
            ]
        );
    }

    #[test]
    fn test_string_has_no_escapes() {
        assert_eq!(
            kinds(r#""a\n" "b""#),
            vec![
                TokenKind::Str("a\\n".into()),
                TokenKind::Str("b".into()),
            ]
        );
    }

    #[test]
    fn test_unterminated_string() {
        let err = tokenize("  \"oops").unwrap_err();
        assert_eq!(
            err.to_string(),
            "parse error at 1:3: unterminated string"
        );
    }

    #[test]
    fn test_negative_number_lookahead() {
        assert_eq!(kinds("-5"), vec![TokenKind::Int(-5)]);
        assert_eq!(kinds("-2.5"), vec![TokenKind::Float(-2.5)]);
    }

    #[test]
    fn test_hyphen_then_space_is_delimiter() {
        assert_eq!(kinds("- 5"), vec![TokenKind::Hyphen, TokenKind::Int(5)]);
        assert_eq!(kinds("-"), vec![TokenKind::Hyphen]);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            kinds("12 3.14 0.5 7."),
            vec![
                TokenKind::Int(12),
                TokenKind::Float(3.14),
                TokenKind::Float(0.5),
                TokenKind::Float(7.0),
            ]
        );
    }

    #[test]
    fn test_second_dot_ends_number() {
        let err = tokenize("1.2.3").unwrap_err();
        assert_eq!(
            err.to_string(),
            "parse error at 1:4: unexpected character '.'"
        );
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            kinds("point color rect void"),
            vec![
                TokenKind::KeywordPoint,
                TokenKind::KeywordColor,
                TokenKind::KeywordRect,
                TokenKind::Void,
            ]
        );
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        let err = tokenize("Color").unwrap_err();
        assert_eq!(
            err.to_string(),
            "parse error at 1:1: invalid keyword 'Color'"
        );
    }

    #[test]
    fn test_unknown_keyword() {
        let err = tokenize("[#a: blorb]").unwrap_err();
        assert_eq!(
            err.to_string(),
            "parse error at 1:6: invalid keyword 'blorb'"
        );
    }

    #[test]
    fn test_unexpected_character() {
        let err = tokenize("@").unwrap_err();
        assert_eq!(
            err.to_string(),
            "parse error at 1:1: unexpected character '@'"
        );
    }

    #[test]
    fn test_locations_across_line_endings() {
        for text in ["[\n  #a", "[\r  #a", "[\r\n  #a"] {
            let tokens = tokenize(text).unwrap();
            assert_eq!(tokens[0].pos, Location::new(1, 1));
            assert_eq!(tokens[1].pos, Location::new(2, 3), "input {text:?}");
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(kinds(""), vec![]);
        assert_eq!(kinds("   \n  "), vec![]);
    }
}
