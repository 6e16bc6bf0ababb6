//! shelf - Format-preserving reader, editor, and merger for legacy asset
//! catalogs
//!
//! A library for loading the textual catalog files a legacy level editor
//! uses, editing their categories and items without disturbing untouched
//! bytes, and merging catalogs with deferred graphics-file handling.

pub mod catalog;
pub mod cli;
pub mod error;
pub mod notation;
pub mod output;

pub use catalog::{
    append, replace, ActionQueue, AssetLibrary, Catalog, Category, CategoryId, GraphicsAction,
    GraphicsManager, HeaderStyle, Item, ItemId, SpriteGraphics, VariantGraphics,
};
pub use error::{Result, ShelfError};
pub use notation::{parse_one_value, parse_table_stream, parse_value, tokenize, Color, List, Point, Rect, Value};
