//! Raw line records and header syntax for catalog files.
//!
//! The record sequence is the ground truth for a catalog: every byte of every
//! line survives in `raw`, whether or not the reader understood it. The
//! classification in `kind` is derived and rebuilt alongside every edit.

use crate::catalog::store::{CategoryId, ItemId};
use crate::notation::{parse_one_value, Color};

/// How category headers are written in a given catalog file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStyle {
    /// `-["Name", color(R,G,B)]`
    Colored,
    /// `-Name`, the text after the hyphen taken verbatim.
    Plain,
}

/// One raw line plus its structural classification.
#[derive(Debug, Clone)]
pub struct LineRecord {
    pub raw: String,
    pub kind: LineKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Blank, or content the reader could not classify. Preserved verbatim.
    Irrelevant,
    Category(CategoryId),
    Item(ItemId),
}

impl LineRecord {
    pub fn irrelevant(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            kind: LineKind::Irrelevant,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.raw.trim().is_empty()
    }
}

/// Split catalog text into lines, accepting LF, CR, and CRLF terminators.
/// A single trailing terminator does not produce a final empty line.
pub fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                lines.push(std::mem::take(&mut current));
            }
            '\n' => lines.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Serialize a category header line. A color renders the colored convention,
/// its absence the plain one.
pub fn format_header(name: &str, color: Option<Color>) -> String {
    match color {
        Some(c) => format!("-[\"{name}\", {c}]"),
        None => format!("-{name}"),
    }
}

/// Interpret the text after a leading hyphen as a category header.
/// Returns `None` when the text does not fit the store's convention.
pub fn parse_header(rest: &str, style: HeaderStyle) -> Option<(String, Option<Color>)> {
    match style {
        HeaderStyle::Plain => Some((rest.to_string(), None)),
        HeaderStyle::Colored => {
            let value = parse_one_value(rest)?;
            let list = value.as_list()?;
            let name = list.values().first()?.as_text()?;
            let color = list.values().get(1)?.as_color()?;
            Some((name.to_string(), Some(color)))
        }
    }
}
