//! The legacy literal notation: lexer, parser, and value model.
//!
//! Catalog files carry composite values in an idiosyncratic notation: lists
//! that are simultaneously an ordered array and a keyed map, tagged composites
//! like `color(r,g,b)` and `point(x,y)`, `#symbol` keys, quoted text with no
//! escapes, and the keyword `void` for nil.
//!
//! # Usage
//!
//! ```ignore
//! use shelf::notation::parse_one_value;
//!
//! let value = parse_one_value(r#"[#nm:"Big Stone", #sz:point(2,2)]"#);
//! let name = value.as_ref().and_then(|v| v.as_list()?.get("nm")?.as_text());
//! ```

pub mod lexer;
pub mod parser;
pub mod token;
pub mod value;

// Re-export main entry points
pub use lexer::tokenize;
pub use parser::{parse_one_value, parse_table_stream, parse_value};
pub use token::{Location, Token, TokenKind};
pub use value::{Color, List, Point, Rect, Value};
