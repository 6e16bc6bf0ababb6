//! Graphics-file collaborators for the merge orchestrator.
//!
//! Image files live beside each catalog and are named after the items they
//! belong to. Merging never touches them inline; it queues [`GraphicsAction`]s
//! and the caller drains the queue against a [`GraphicsManager`] once the
//! structural pass has succeeded.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Result, ShelfError};

/// Copies and deletes the image files backing catalog items. The file-naming
/// convention (single file vs. suffixed variants) is the implementation's
/// concern.
pub trait GraphicsManager {
    /// Copy the graphics for `name` between catalog directories. When
    /// `expect_exists` is true a missing source file is an error; otherwise
    /// absence is a silent no-op.
    fn copy_graphics(
        &self,
        name: &str,
        source_dir: &Path,
        dest_dir: &Path,
        expect_exists: bool,
    ) -> Result<()>;

    /// Remove the graphics for `name` from a catalog directory, if present.
    fn delete_graphics(&self, name: &str, dir: &Path) -> Result<()>;
}

/// One `{name}.png` per item.
#[derive(Debug, Default)]
pub struct SpriteGraphics;

impl SpriteGraphics {
    fn file(name: &str, dir: &Path) -> PathBuf {
        dir.join(format!("{name}.png"))
    }
}

impl GraphicsManager for SpriteGraphics {
    fn copy_graphics(
        &self,
        name: &str,
        source_dir: &Path,
        dest_dir: &Path,
        expect_exists: bool,
    ) -> Result<()> {
        let source = Self::file(name, source_dir);
        if !source.exists() {
            if expect_exists {
                return Err(ShelfError::Io {
                    path: source,
                    message: format!("graphics file for '{name}' is missing"),
                });
            }
            return Ok(());
        }
        std::fs::copy(&source, Self::file(name, dest_dir)).map_err(|e| ShelfError::Io {
            path: source,
            message: e.to_string(),
        })?;
        Ok(())
    }

    fn delete_graphics(&self, name: &str, dir: &Path) -> Result<()> {
        let file = Self::file(name, dir);
        if file.exists() {
            std::fs::remove_file(&file).map_err(|e| ShelfError::Io {
                path: file,
                message: e.to_string(),
            })?;
        }
        Ok(())
    }
}

/// A set of suffixed files per item, e.g. `{name}.png` plus
/// `{name}Texture.png`. Copies whichever variants exist; `expect_exists`
/// carries no meaning here because no single variant is mandatory.
#[derive(Debug)]
pub struct VariantGraphics {
    suffixes: Vec<String>,
}

impl VariantGraphics {
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            suffixes: suffixes.into_iter().map(Into::into).collect(),
        }
    }

    /// The suffix set the legacy material catalogs used: the bare image plus
    /// the `Texture`, `Floor`, and `Slopes` variants.
    pub fn standard() -> Self {
        Self::new([".png", "Texture.png", "Floor.png", "Slopes.png"])
    }

    fn files<'a>(&'a self, name: &'a str, dir: &'a Path) -> impl Iterator<Item = PathBuf> + 'a {
        self.suffixes
            .iter()
            .map(move |suffix| dir.join(format!("{name}{suffix}")))
    }
}

impl GraphicsManager for VariantGraphics {
    fn copy_graphics(
        &self,
        name: &str,
        source_dir: &Path,
        dest_dir: &Path,
        _expect_exists: bool,
    ) -> Result<()> {
        for suffix in &self.suffixes {
            let file = format!("{name}{suffix}");
            let source = source_dir.join(&file);
            if source.exists() {
                std::fs::copy(&source, dest_dir.join(&file)).map_err(|e| ShelfError::Io {
                    path: source,
                    message: e.to_string(),
                })?;
            }
        }
        Ok(())
    }

    fn delete_graphics(&self, name: &str, dir: &Path) -> Result<()> {
        for file in self.files(name, dir) {
            if file.exists() {
                std::fs::remove_file(&file).map_err(|e| ShelfError::Io {
                    path: file,
                    message: e.to_string(),
                })?;
            }
        }
        Ok(())
    }
}

/// A deferred graphics-file operation recorded during a merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphicsAction {
    Copy {
        name: String,
        source_dir: PathBuf,
        dest_dir: PathBuf,
        expect_exists: bool,
    },
    Delete {
        name: String,
        dir: PathBuf,
    },
}

impl fmt::Display for GraphicsAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphicsAction::Copy {
                name,
                source_dir,
                dest_dir,
                ..
            } => write!(
                f,
                "copy '{name}' from {} to {}",
                source_dir.display(),
                dest_dir.display()
            ),
            GraphicsAction::Delete { name, dir } => {
                write!(f, "delete '{name}' in {}", dir.display())
            }
        }
    }
}

/// Ordered buffer of deferred graphics actions. No deduplication happens
/// here; if two calls enqueue the same name, both actions replay in order.
#[derive(Debug, Default)]
pub struct ActionQueue {
    actions: Vec<GraphicsAction>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_copy(&mut self, name: &str, source_dir: &Path, dest_dir: &Path, expect_exists: bool) {
        self.actions.push(GraphicsAction::Copy {
            name: name.to_string(),
            source_dir: source_dir.to_path_buf(),
            dest_dir: dest_dir.to_path_buf(),
            expect_exists,
        });
    }

    pub fn push_delete(&mut self, name: &str, dir: &Path) {
        self.actions.push(GraphicsAction::Delete {
            name: name.to_string(),
            dir: dir.to_path_buf(),
        });
    }

    pub fn actions(&self) -> &[GraphicsAction] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Replay every queued action, in order, against `manager`. The queue is
    /// emptied even when an action fails partway through.
    pub fn drain(&mut self, manager: &dyn GraphicsManager) -> Result<()> {
        for action in std::mem::take(&mut self.actions) {
            match action {
                GraphicsAction::Copy {
                    name,
                    source_dir,
                    dest_dir,
                    expect_exists,
                } => manager.copy_graphics(&name, &source_dir, &dest_dir, expect_exists)?,
                GraphicsAction::Delete { name, dir } => manager.delete_graphics(&name, &dir)?,
            }
        }
        Ok(())
    }
}
