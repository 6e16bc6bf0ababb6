//! The format-preserving line store.
//!
//! A [`Catalog`] holds the raw lines of one catalog file plus a derived
//! category/item index, kept in lockstep through every mutation. Lines the
//! reader cannot understand stay in the sequence verbatim and round-trip
//! through [`Catalog::commit`] untouched; the engine never discards content
//! it failed to parse.
//!
//! Handles ([`CategoryId`], [`ItemId`]) carry the id of the store that issued
//! them, so presenting a handle to the wrong store is caught as an error
//! instead of silently editing the wrong file.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

use crate::catalog::line::{
    format_header, parse_header, split_lines, HeaderStyle, LineKind, LineRecord,
};
use crate::error::{Result, ShelfError};
use crate::notation::{parse_one_value, Color};

static NEXT_STORE_ID: AtomicU32 = AtomicU32::new(0);

/// Handle to a category in a specific store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CategoryId {
    store: u32,
    slot: u32,
}

/// Handle to an item in a specific store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId {
    store: u32,
    slot: u32,
}

/// A named, optionally colored, ordered grouping of items.
#[derive(Debug)]
pub struct Category {
    name: String,
    color: Option<Color>,
    items: Vec<ItemId>,
}

impl Category {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Item handles in block order.
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }
}

/// One asset definition: its display name and its verbatim line.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    name: String,
    raw: String,
}

impl Item {
    /// Read an item from one catalog line; `None` when the line does not
    /// parse to a list carrying an `nm` name.
    pub fn from_line(raw: &str) -> Option<Self> {
        let value = parse_one_value(raw)?;
        let name = value.as_list()?.get("nm")?.as_text()?.to_string();
        Some(Self {
            name,
            raw: raw.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The verbatim catalog line this item came from.
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

#[derive(Debug)]
struct ItemSlot {
    item: Item,
    owner: CategoryId,
}

/// The in-memory, format-preserving model of one catalog file.
#[derive(Debug)]
pub struct Catalog {
    path: PathBuf,
    style: HeaderStyle,
    id: u32,
    lines: Vec<LineRecord>,
    /// Category display order; always consistent with header line order.
    order: Vec<CategoryId>,
    categories: Vec<Option<Category>>,
    items: Vec<Option<ItemSlot>>,
}

impl Catalog {
    /// Open a catalog file. A missing file yields an empty store so first-run
    /// directories work; any other read failure is an error.
    pub fn open(path: &Path, style: HeaderStyle) -> Result<Self> {
        if !path.exists() {
            log::warn!("catalog {} not found, starting empty", path.display());
            return Ok(Self::empty(path.to_path_buf(), style));
        }
        let text = std::fs::read_to_string(path).map_err(|e| ShelfError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_text(path, style, &text)
    }

    /// Build a store from catalog text without touching the filesystem.
    pub fn from_text(path: &Path, style: HeaderStyle, text: &str) -> Result<Self> {
        let mut store = Self::empty(path.to_path_buf(), style);
        for raw in split_lines(text) {
            store.classify_line(raw)?;
        }
        Ok(store)
    }

    fn empty(path: PathBuf, style: HeaderStyle) -> Self {
        Self {
            path,
            style,
            id: NEXT_STORE_ID.fetch_add(1, Ordering::Relaxed),
            lines: Vec::new(),
            order: Vec::new(),
            categories: Vec::new(),
            items: Vec::new(),
        }
    }

    fn classify_line(&mut self, raw: String) -> Result<()> {
        if raw.trim().is_empty() {
            self.lines.push(LineRecord::irrelevant(raw));
            return Ok(());
        }

        if let Some(rest) = raw.strip_prefix('-') {
            match parse_header(rest, self.style) {
                Some((name, color)) => {
                    if self.category_by_name(&name).is_some() {
                        log::warn!(
                            "duplicate category '{}' in {}",
                            name,
                            self.path.display()
                        );
                    }
                    let id = self.alloc_category(Category {
                        name,
                        color,
                        items: Vec::new(),
                    });
                    self.order.push(id);
                    self.lines.push(LineRecord {
                        raw,
                        kind: LineKind::Category(id),
                    });
                }
                None => {
                    log::warn!(
                        "{} line {}: unreadable category header kept verbatim",
                        self.path.display(),
                        self.lines.len() + 1
                    );
                    self.lines.push(LineRecord::irrelevant(raw));
                }
            }
            return Ok(());
        }

        match Item::from_line(&raw) {
            Some(item) => {
                let owner = match self.order.last().copied() {
                    Some(id) => id,
                    None => {
                        return Err(ShelfError::Catalog {
                            message: format!(
                                "item '{}' appears before any category in {}",
                                item.name,
                                self.path.display()
                            ),
                            help: Some(
                                "catalog files must open a category before listing items".into(),
                            ),
                        });
                    }
                };
                let id = self.alloc_item(item, owner);
                self.category_mut(owner)?.items.push(id);
                self.lines.push(LineRecord {
                    raw,
                    kind: LineKind::Item(id),
                });
            }
            None => {
                log::warn!(
                    "{} line {}: unreadable item line kept verbatim",
                    self.path.display(),
                    self.lines.len() + 1
                );
                self.lines.push(LineRecord::irrelevant(raw));
            }
        }
        Ok(())
    }

    fn alloc_category(&mut self, category: Category) -> CategoryId {
        let slot = self.categories.len() as u32;
        self.categories.push(Some(category));
        CategoryId {
            store: self.id,
            slot,
        }
    }

    fn alloc_item(&mut self, item: Item, owner: CategoryId) -> ItemId {
        let slot = self.items.len() as u32;
        self.items.push(Some(ItemSlot { item, owner }));
        ItemId {
            store: self.id,
            slot,
        }
    }

    fn category_ref(&self, id: CategoryId) -> Result<&Category> {
        if id.store != self.id {
            return Err(ShelfError::catalog(
                "category handle belongs to a different store",
            ));
        }
        self.categories
            .get(id.slot as usize)
            .and_then(|slot| slot.as_ref())
            .ok_or_else(|| ShelfError::catalog("category handle is stale"))
    }

    fn category_mut(&mut self, id: CategoryId) -> Result<&mut Category> {
        if id.store != self.id {
            return Err(ShelfError::catalog(
                "category handle belongs to a different store",
            ));
        }
        self.categories
            .get_mut(id.slot as usize)
            .and_then(|slot| slot.as_mut())
            .ok_or_else(|| ShelfError::catalog("category handle is stale"))
    }

    fn item_slot(&self, id: ItemId) -> Result<&ItemSlot> {
        if id.store != self.id {
            return Err(ShelfError::catalog(
                "item handle belongs to a different store",
            ));
        }
        self.items
            .get(id.slot as usize)
            .and_then(|slot| slot.as_ref())
            .ok_or_else(|| ShelfError::catalog("item handle is stale"))
    }

    /// Line index of a category's header.
    fn header_index(&self, category: CategoryId) -> Result<usize> {
        self.lines
            .iter()
            .position(|rec| rec.kind == LineKind::Category(category))
            .ok_or_else(|| ShelfError::catalog("category header line is missing"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory the catalog file sits in; graphics files live beside it.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }

    pub fn style(&self) -> HeaderStyle {
        self.style
    }

    pub fn category_count(&self) -> usize {
        self.order.len()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Categories in file order.
    pub fn categories(&self) -> impl Iterator<Item = (CategoryId, &Category)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.category(*id).map(|cat| (*id, cat)))
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.category_ref(id).ok()
    }

    /// First category with this name. Duplicate names are tolerated on read;
    /// the earliest wins lookups.
    pub fn category_by_name(&self, name: &str) -> Option<CategoryId> {
        self.order
            .iter()
            .copied()
            .find(|id| self.category(*id).is_some_and(|cat| cat.name == name))
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.item_slot(id).ok().map(|slot| &slot.item)
    }

    /// Look up an item by name within one category.
    pub fn find_item(&self, category: CategoryId, name: &str) -> Option<ItemId> {
        self.category(category)?
            .items
            .iter()
            .copied()
            .find(|id| self.item(*id).is_some_and(|it| it.name == name))
    }

    /// The owning category of an item, from the derived back-reference.
    pub fn item_category(&self, id: ItemId) -> Option<CategoryId> {
        self.item_slot(id).ok().map(|slot| slot.owner)
    }

    /// Non-blank lines the reader could not classify, with 1-based numbers.
    pub fn unclassified_lines(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.lines.iter().enumerate().filter_map(|(i, rec)| {
            (rec.kind == LineKind::Irrelevant && !rec.is_blank())
                .then_some((i + 1, rec.raw.as_str()))
        })
    }

    /// Add a clone of `item` to `category`. The line lands just after the
    /// last non-blank line of the category's block, in front of any trailing
    /// padding. Adding a name the category already holds is a no-op that
    /// returns the existing handle.
    pub fn add_item(&mut self, category: CategoryId, item: &Item) -> Result<ItemId> {
        self.category_ref(category)?;
        if let Some(existing) = self.find_item(category, &item.name) {
            return Ok(existing);
        }

        let header = self.header_index(category)?;
        let mut end = header + 1;
        while end < self.lines.len() && !matches!(self.lines[end].kind, LineKind::Category(_)) {
            end += 1;
        }
        // walk back over trailing blanks to sit right after the last
        // non-blank line of the block
        let mut at = end;
        while at > header + 1 && self.lines[at - 1].is_blank() {
            at -= 1;
        }

        let id = self.alloc_item(item.clone(), category);
        self.lines.insert(
            at,
            LineRecord {
                raw: item.raw.clone(),
                kind: LineKind::Item(id),
            },
        );
        self.category_mut(category)?.items.push(id);
        Ok(id)
    }

    /// Create a category. An `index` within the current count inserts before
    /// that category's header; anything larger appends at EOF, padding with
    /// one blank line when the file does not already end on one.
    pub fn add_category(
        &mut self,
        name: &str,
        color: Option<Color>,
        index: usize,
    ) -> Result<CategoryId> {
        if self.category_by_name(name).is_some() {
            return Err(ShelfError::Catalog {
                message: format!("category '{name}' already exists"),
                help: Some("category names are unique within one catalog".into()),
            });
        }

        let color = match (self.style, color) {
            (HeaderStyle::Colored, Some(c)) => Some(c),
            (HeaderStyle::Colored, None) => {
                return Err(ShelfError::Catalog {
                    message: format!("category '{name}' needs a color in a colored catalog"),
                    help: None,
                });
            }
            (HeaderStyle::Plain, c) => {
                if c.is_some() {
                    log::debug!("plain catalog ignores the color given for '{name}'");
                }
                None
            }
        };

        // resolve the insertion line before touching the index
        let insert_at = match self.order.get(index).copied() {
            Some(anchor) => Some(self.header_index(anchor)?),
            None => None,
        };

        let raw = format_header(name, color);
        let id = self.alloc_category(Category {
            name: name.to_string(),
            color,
            items: Vec::new(),
        });
        let record = LineRecord {
            raw,
            kind: LineKind::Category(id),
        };

        match insert_at {
            Some(line) => {
                self.lines.insert(line, record);
                self.order.insert(index, id);
            }
            None => {
                if self.lines.last().is_some_and(|rec| !rec.is_blank()) {
                    self.lines.push(LineRecord::irrelevant(""));
                }
                self.lines.push(record);
                self.order.push(id);
            }
        }
        Ok(id)
    }

    /// Move an item to another category; its line leaves the current block
    /// and lands at the end of `dest`'s block. The returned handle replaces
    /// the one passed in. If `dest` already holds the name, this degrades to
    /// removal plus the no-op add, keeping the existing definition.
    pub fn move_item(&mut self, item: ItemId, dest: CategoryId) -> Result<ItemId> {
        self.category_ref(dest)?;
        self.header_index(dest)?;
        let owner = self.item_slot(item)?.owner;
        let header = self.header_index(owner)?;

        let mut line = None;
        let mut i = header + 1;
        while i < self.lines.len() && !matches!(self.lines[i].kind, LineKind::Category(_)) {
            if self.lines[i].kind == LineKind::Item(item) {
                line = Some(i);
                break;
            }
            i += 1;
        }

        let moved = self.take_item(item, owner)?;
        match line {
            Some(i) => {
                self.lines.remove(i);
            }
            None => log::warn!(
                "no line for item '{}' in its category block; index entry removed anyway",
                moved.name
            ),
        }

        self.add_item(dest, &moved)
    }

    /// Remove a category, its header line, and every line in its block.
    /// An item line inside the block that belongs to a different category
    /// fails the whole operation before anything is touched.
    pub fn delete_category(&mut self, category: CategoryId) -> Result<()> {
        self.category_ref(category)?;
        let header = self.header_index(category)?;
        let order_pos = self
            .order
            .iter()
            .position(|id| *id == category)
            .ok_or_else(|| ShelfError::catalog("category is missing from the traversal order"))?;

        let mut end = header + 1;
        while end < self.lines.len() && !matches!(self.lines[end].kind, LineKind::Category(_)) {
            if let LineKind::Item(id) = self.lines[end].kind {
                let slot = self.item_slot(id)?;
                if slot.owner != category {
                    return Err(ShelfError::catalog(format!(
                        "item '{}' in the deleted block belongs to a different category",
                        slot.item.name
                    )));
                }
            }
            end += 1;
        }

        for record in self.lines.drain(header..end) {
            if let LineKind::Item(id) = record.kind {
                if let Some(slot) = self.items.get_mut(id.slot as usize) {
                    slot.take();
                }
            }
        }

        let former = self
            .categories
            .get_mut(category.slot as usize)
            .and_then(Option::take)
            .ok_or_else(|| ShelfError::catalog("category handle is stale"))?;
        for id in &former.items {
            if let Some(slot) = self.items.get_mut(id.slot as usize) {
                slot.take();
            }
        }
        self.order.remove(order_pos);

        debug_assert!(self
            .lines
            .iter()
            .all(|rec| !former.items.iter().any(|id| rec.kind == LineKind::Item(*id))));
        Ok(())
    }

    /// Remove a single item and its line.
    pub fn delete_item(&mut self, item: ItemId) -> Result<()> {
        let owner = self.item_slot(item)?.owner;
        let line = self
            .lines
            .iter()
            .position(|rec| rec.kind == LineKind::Item(item))
            .ok_or_else(|| ShelfError::catalog("item has no line record"))?;

        self.take_item(item, owner)?;
        self.lines.remove(line);
        Ok(())
    }

    /// Remove an item from the index (membership and slab), returning it.
    /// Line records are the caller's responsibility.
    fn take_item(&mut self, item: ItemId, owner: CategoryId) -> Result<Item> {
        let pos = self
            .category_ref(owner)?
            .items
            .iter()
            .position(|id| *id == item)
            .ok_or_else(|| ShelfError::catalog("item is not in its owner's list"))?;
        let slot = self
            .items
            .get_mut(item.slot as usize)
            .and_then(Option::take)
            .ok_or_else(|| ShelfError::catalog("item handle is stale"))?;
        self.category_mut(owner)?.items.remove(pos);
        Ok(slot.item)
    }

    /// The full catalog text as it would be committed.
    pub fn to_text(&self) -> String {
        let raws: Vec<&str> = self.lines.iter().map(|rec| rec.raw.as_str()).collect();
        raws.join("\r")
    }

    /// Serialize back to the backing file with the legacy `\r` separator.
    /// A path that no longer exists makes this a no-op; the legacy tool saves
    /// over what is there and never creates catalog files.
    pub fn commit(&self) -> Result<()> {
        if !self.path.exists() {
            log::debug!("{} does not exist, commit skipped", self.path.display());
            return Ok(());
        }
        std::fs::write(&self.path, self.to_text()).map_err(|e| ShelfError::Io {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }
}
