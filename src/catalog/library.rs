//! The fixed set of catalogs an asset root carries.
//!
//! Editors work against one root directory holding a `Tiles` and a `Props`
//! catalog (colored headers) and, in newer installs, a `Surfaces` catalog
//! (plain headers). Graphics files sit in the same directory as their
//! catalog.

use std::path::Path;

use crate::catalog::line::HeaderStyle;
use crate::catalog::store::Catalog;
use crate::error::Result;

pub struct AssetLibrary {
    tiles: Catalog,
    props: Catalog,
    surfaces: Option<Catalog>,
}

impl AssetLibrary {
    /// Open every catalog under `root`. Missing tile and prop catalogs load
    /// as empty stores; a missing surfaces catalog loads as `None` since old
    /// installs predate it.
    pub fn open(root: &Path) -> Result<Self> {
        let tiles = Catalog::open(
            &root.join("Tiles").join("catalog.txt"),
            HeaderStyle::Colored,
        )?;
        let props = Catalog::open(
            &root.join("Props").join("catalog.txt"),
            HeaderStyle::Colored,
        )?;

        let surfaces_path = root.join("Surfaces").join("catalog.txt");
        let surfaces = if surfaces_path.exists() {
            Some(Catalog::open(&surfaces_path, HeaderStyle::Plain)?)
        } else {
            log::info!("no surfaces catalog under {}", root.display());
            None
        };

        Ok(Self {
            tiles,
            props,
            surfaces,
        })
    }

    pub fn tiles(&self) -> &Catalog {
        &self.tiles
    }

    pub fn tiles_mut(&mut self) -> &mut Catalog {
        &mut self.tiles
    }

    pub fn props(&self) -> &Catalog {
        &self.props
    }

    pub fn props_mut(&mut self) -> &mut Catalog {
        &mut self.props
    }

    pub fn surfaces(&self) -> Option<&Catalog> {
        self.surfaces.as_ref()
    }

    pub fn surfaces_mut(&mut self) -> Option<&mut Catalog> {
        self.surfaces.as_mut()
    }

    /// Commit every catalog that still has a backing file.
    pub fn commit_all(&self) -> Result<()> {
        self.tiles.commit()?;
        self.props.commit()?;
        if let Some(surfaces) = &self.surfaces {
            surfaces.commit()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::store::Item;
    use pretty_assertions::assert_eq;

    fn seed(root: &Path, sub: &str, text: &str) {
        let dir = root.join(sub);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("catalog.txt"), text).unwrap();
    }

    #[test]
    fn test_open_full_library() {
        let root = tempfile::tempdir().unwrap();
        seed(root.path(), "Tiles", "-[\"A\", color(1,2,3)]\r[#nm:\"x\"]");
        seed(root.path(), "Props", "-[\"P\", color(4,5,6)]");
        seed(root.path(), "Surfaces", "-Rock\r[#nm:\"s\"]");

        let library = AssetLibrary::open(root.path()).unwrap();

        assert_eq!(library.tiles().category_count(), 1);
        assert_eq!(library.props().category_count(), 1);
        let surfaces = library.surfaces().unwrap();
        assert_eq!(surfaces.category_count(), 1);
        assert_eq!(surfaces.style(), HeaderStyle::Plain);
    }

    #[test]
    fn test_missing_surfaces_tolerated() {
        let root = tempfile::tempdir().unwrap();
        seed(root.path(), "Tiles", "-[\"A\", color(1,2,3)]");
        seed(root.path(), "Props", "");

        let library = AssetLibrary::open(root.path()).unwrap();

        assert!(library.surfaces().is_none());
        assert_eq!(library.tiles().category_count(), 1);
        assert_eq!(library.props().category_count(), 0);
    }

    #[test]
    fn test_commit_all_writes_back() {
        let root = tempfile::tempdir().unwrap();
        seed(root.path(), "Tiles", "-[\"A\", color(1,2,3)]");
        seed(root.path(), "Props", "");

        let mut library = AssetLibrary::open(root.path()).unwrap();
        let a = library.tiles().category_by_name("A").unwrap();
        library
            .tiles_mut()
            .add_item(a, &Item::from_line("[#nm:\"x\"]").unwrap())
            .unwrap();
        library.commit_all().unwrap();

        assert_eq!(
            std::fs::read_to_string(root.path().join("Tiles").join("catalog.txt")).unwrap(),
            "-[\"A\", color(1,2,3)]\r[#nm:\"x\"]"
        );
    }
}
