//! Format-preserving catalog stores and the operations over them.
//!
//! A catalog file is a sequence of category headers and item lines. The store
//! keeps every raw line and rewrites only what an edit actually touches, so
//! hand-written quirks survive a round trip.
//!
//! # Usage
//!
//! ```ignore
//! use shelf::catalog::{Catalog, HeaderStyle, Item};
//!
//! let mut tiles = Catalog::open("Tiles/catalog.txt".as_ref(), HeaderStyle::Colored)?;
//! let stone = tiles.category_by_name("Stone").unwrap();
//! tiles.add_item(stone, &Item::from_line(r#"[#nm:"Big Stone"]"#).unwrap())?;
//! tiles.commit()?;
//! ```

pub mod graphics;
pub mod library;
pub mod line;
pub mod merge;
pub mod store;

// Re-export main entry points
pub use graphics::{ActionQueue, GraphicsAction, GraphicsManager, SpriteGraphics, VariantGraphics};
pub use library::AssetLibrary;
pub use line::HeaderStyle;
pub use merge::{append, replace, ConflictChoice, ConflictPrompt};
pub use store::{Catalog, Category, CategoryId, Item, ItemId};
