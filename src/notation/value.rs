//! The literal value model for the catalog notation.
//!
//! `Display` renders a value back in source notation. Item lines are never
//! regenerated from parsed values (the raw text is preserved verbatim), so
//! rendering is for new category headers, diagnostics, and tooling output.

use serde::Serialize;
use std::fmt;

/// An RGB color literal, components 0–255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "color({},{},{})", self.r, self.g, self.b)
    }
}

/// A 2D point literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "point({:?},{:?})", self.x, self.y)
    }
}

/// A rectangle literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rect({:?},{:?},{:?},{:?})", self.x, self.y, self.w, self.h)
    }
}

/// The hybrid list literal: an ordered array of values plus a keyed map, both
/// living in one container. Which part an entry lands in depends on its
/// syntactic form (`#name: value` goes to the map, a bare value to the array).
///
/// The map is kept as an ordered pair list so field order is deterministic;
/// inserting an existing key replaces its value in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct List {
    values: Vec<Value>,
    fields: Vec<(String, Value)>,
}

impl List {
    pub fn new() -> Self {
        Self::default()
    }

    /// The ordered array part.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// The keyed part, in first-insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Append to the array part.
    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    /// Set a keyed entry, replacing in place if the key already exists.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.fields.is_empty()
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        let mut first = true;
        for value in &self.values {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{value}")?;
        }
        for (key, value) in &self.fields {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "#{key}:{value}")?;
        }
        f.write_str("]")
    }
}

/// A parsed literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Int(i32),
    Float(f32),
    Text(String),
    Symbol(String),
    Color(Color),
    Point(Point),
    Rect(Rect),
    List(List),
}

impl Value {
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Either numeric variant, widened to float.
    pub fn as_number(&self) -> Option<f32> {
        match self {
            Value::Int(n) => Some(*n as f32),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            Value::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("void"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n:?}"),
            Value::Text(s) => write!(f, "\"{s}\""),
            Value::Symbol(s) => write!(f, "#{s}"),
            Value::Color(c) => write!(f, "{c}"),
            Value::Point(p) => write!(f, "{p}"),
            Value::Rect(r) => write!(f, "{r}"),
            Value::List(l) => write!(f, "{l}"),
        }
    }
}
