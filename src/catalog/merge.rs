//! Cross-catalog merge strategies.
//!
//! Both strategies run a purely structural pass over a pair of [`Catalog`]s
//! and record the graphics-file work they imply in an [`ActionQueue`]; the
//! caller drains the queue (and commits the destination) once the pass has
//! succeeded.

use std::collections::{HashMap, HashSet};

use crate::catalog::graphics::ActionQueue;
use crate::catalog::store::Catalog;
use crate::error::{Result, ShelfError};
use crate::notation::Color;

/// A user's decision for one item-overwrite conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictChoice {
    Overwrite,
    Skip,
    OverwriteAll,
    SkipAll,
}

/// Extension seam for interactive conflict resolution. The shipped strategies
/// resolve every conflict deterministically (`replace` clears the destination
/// first, `append` keeps what is already there) and never consult a prompt.
pub trait ConflictPrompt {
    fn resolve(&mut self, item: &str, category: &str) -> ConflictChoice;
}

fn check_compatible(dest: &Catalog, src: &Catalog) -> Result<()> {
    if dest.style() != src.style() {
        return Err(ShelfError::Merge {
            message: format!(
                "{} and {} use incompatible header styles",
                dest.path().display(),
                src.path().display()
            ),
            help: Some("colored catalogs only merge with colored catalogs".into()),
        });
    }
    Ok(())
}

/// Replace the whole content of `dest` with the content of `src`.
///
/// Every current category and item of `dest` is deleted, then `src`'s
/// categories and items are recreated in `src`'s order. Graphics actions:
/// one delete per item name that vanished (present before, absent in `src`),
/// then one copy per name `src` ships, with the source expected to exist.
pub fn replace(dest: &mut Catalog, src: &Catalog, queue: &mut ActionQueue) -> Result<()> {
    check_compatible(dest, src)?;

    let mut deleted: Vec<String> = Vec::new();
    let mut deleted_set: HashSet<String> = HashSet::new();
    for (_, category) in dest.categories() {
        for id in category.items() {
            if let Some(item) = dest.item(*id) {
                if deleted_set.insert(item.name().to_string()) {
                    deleted.push(item.name().to_string());
                }
            }
        }
    }

    let doomed: Vec<_> = dest.categories().map(|(id, _)| id).collect();
    for id in doomed {
        dest.delete_category(id)?;
    }

    let mut copied: Vec<String> = Vec::new();
    let mut copied_set: HashSet<String> = HashSet::new();
    for (_, src_cat) in src.categories() {
        // duplicate names in src fold into the first occurrence
        let target = match dest.category_by_name(src_cat.name()) {
            Some(id) => id,
            None => dest.add_category(src_cat.name(), src_cat.color(), usize::MAX)?,
        };
        for id in src_cat.items() {
            if let Some(item) = src.item(*id) {
                dest.add_item(target, item)?;
                if copied_set.insert(item.name().to_string()) {
                    copied.push(item.name().to_string());
                }
            }
        }
    }

    for name in &deleted {
        if !copied_set.contains(name) {
            queue.push_delete(name, dest.dir());
        }
    }
    for name in &copied {
        queue.push_copy(name, src.dir(), dest.dir(), true);
    }
    Ok(())
}

/// Add `src`'s content on top of what `dest` already holds.
///
/// Categories are matched by name and reused when present; a reused category
/// whose color differs from `src`'s is an error, raised before `dest` is
/// touched. Items add idempotently. Every `src` item gets a copy action;
/// `expect_exists` is true only for items actually added, so an item that was
/// already present has its graphics refreshed only if the source ships them.
pub fn append(dest: &mut Catalog, src: &Catalog, queue: &mut ActionQueue) -> Result<()> {
    check_compatible(dest, src)?;

    // same-name categories fold into one; any disagreement on color is an
    // error, whether against dest or between two src occurrences
    let mut seen: HashMap<&str, Option<Color>> = HashMap::new();
    for (_, src_cat) in src.categories() {
        let expected = match seen.get(src_cat.name()) {
            Some(color) => Some(*color),
            None => dest
                .category_by_name(src_cat.name())
                .and_then(|id| dest.category(id))
                .map(|cat| cat.color()),
        };
        if let Some(expected) = expected {
            if expected != src_cat.color() {
                return Err(ShelfError::Merge {
                    message: format!(
                        "category '{}' already exists with a different color",
                        src_cat.name()
                    ),
                    help: Some(
                        "delete the destination category first, or use the replace strategy"
                            .into(),
                    ),
                });
            }
        }
        seen.insert(src_cat.name(), src_cat.color());
    }

    for (_, src_cat) in src.categories() {
        let target = match dest.category_by_name(src_cat.name()) {
            Some(id) => id,
            None => dest.add_category(src_cat.name(), src_cat.color(), usize::MAX)?,
        };
        for id in src_cat.items() {
            if let Some(item) = src.item(*id) {
                let fresh = dest.find_item(target, item.name()).is_none();
                dest.add_item(target, item)?;
                queue.push_copy(item.name(), src.dir(), dest.dir(), fresh);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::graphics::GraphicsAction;
    use crate::catalog::line::HeaderStyle;
    use pretty_assertions::assert_eq;
    use std::path::{Path, PathBuf};

    fn catalog(path: &str, text: &str) -> Catalog {
        Catalog::from_text(Path::new(path), HeaderStyle::Colored, text).unwrap()
    }

    #[test]
    fn test_replace_swaps_content_and_queues_diff() {
        let mut dest = catalog(
            "Tiles/catalog.txt",
            "-[\"A\", color(1,2,3)]\r[#nm:\"x\"]\r[#nm:\"y\"]",
        );
        let src = catalog(
            "incoming/catalog.txt",
            "-[\"A\", color(1,2,3)]\r[#nm:\"y\"]\r[#nm:\"z\"]",
        );
        let mut queue = ActionQueue::new();

        replace(&mut dest, &src, &mut queue).unwrap();

        assert_eq!(
            dest.to_text(),
            "-[\"A\", color(1,2,3)]\r[#nm:\"y\"]\r[#nm:\"z\"]"
        );
        assert_eq!(
            queue.actions(),
            &[
                GraphicsAction::Delete {
                    name: "x".into(),
                    dir: PathBuf::from("Tiles"),
                },
                GraphicsAction::Copy {
                    name: "y".into(),
                    source_dir: PathBuf::from("incoming"),
                    dest_dir: PathBuf::from("Tiles"),
                    expect_exists: true,
                },
                GraphicsAction::Copy {
                    name: "z".into(),
                    source_dir: PathBuf::from("incoming"),
                    dest_dir: PathBuf::from("Tiles"),
                    expect_exists: true,
                },
            ]
        );
    }

    #[test]
    fn test_replace_keeps_preamble_lines() {
        let mut dest = catalog(
            "Tiles/catalog.txt",
            "legacy preamble\r-[\"A\", color(1,2,3)]\r[#nm:\"x\"]",
        );
        let src = catalog("incoming/catalog.txt", "-[\"A\", color(1,2,3)]\r[#nm:\"y\"]");
        let mut queue = ActionQueue::new();

        replace(&mut dest, &src, &mut queue).unwrap();

        assert_eq!(
            dest.to_text(),
            "legacy preamble\r\r-[\"A\", color(1,2,3)]\r[#nm:\"y\"]"
        );
    }

    #[test]
    fn test_replace_folds_duplicate_src_categories() {
        let mut dest = catalog("Tiles/catalog.txt", "");
        let src = catalog(
            "incoming/catalog.txt",
            "-[\"A\", color(1,2,3)]\r[#nm:\"m\"]\r-[\"A\", color(9,9,9)]\r[#nm:\"n\"]",
        );
        let mut queue = ActionQueue::new();

        replace(&mut dest, &src, &mut queue).unwrap();

        assert_eq!(dest.category_count(), 1);
        assert_eq!(
            dest.to_text(),
            "-[\"A\", color(1,2,3)]\r[#nm:\"m\"]\r[#nm:\"n\"]"
        );
    }

    #[test]
    fn test_append_adds_new_items_only() {
        let mut dest = catalog("Tiles/catalog.txt", "-[\"A\", color(1,2,3)]\r[#nm:\"x\"]");
        let src = catalog("incoming/catalog.txt", "-[\"A\", color(1,2,3)]\r[#nm:\"y\"]");
        let mut queue = ActionQueue::new();

        append(&mut dest, &src, &mut queue).unwrap();

        assert_eq!(
            dest.to_text(),
            "-[\"A\", color(1,2,3)]\r[#nm:\"x\"]\r[#nm:\"y\"]"
        );
        assert_eq!(
            queue.actions(),
            &[GraphicsAction::Copy {
                name: "y".into(),
                source_dir: PathBuf::from("incoming"),
                dest_dir: PathBuf::from("Tiles"),
                expect_exists: true,
            }]
        );
    }

    #[test]
    fn test_append_duplicate_item_refreshes_without_expectation() {
        let mut dest = catalog("Tiles/catalog.txt", "-[\"A\", color(1,2,3)]\r[#nm:\"x\"]");
        let src = catalog(
            "incoming/catalog.txt",
            "-[\"A\", color(1,2,3)]\r[#nm:\"x\"]\r[#nm:\"y\"]",
        );
        let mut queue = ActionQueue::new();

        append(&mut dest, &src, &mut queue).unwrap();

        assert_eq!(
            dest.to_text(),
            "-[\"A\", color(1,2,3)]\r[#nm:\"x\"]\r[#nm:\"y\"]"
        );
        let expectations: Vec<_> = queue
            .actions()
            .iter()
            .map(|action| match action {
                GraphicsAction::Copy {
                    name,
                    expect_exists,
                    ..
                } => (name.as_str(), *expect_exists),
                GraphicsAction::Delete { .. } => panic!("append never deletes"),
            })
            .collect();
        assert_eq!(expectations, vec![("x", false), ("y", true)]);
    }

    #[test]
    fn test_append_creates_missing_category() {
        let mut dest = catalog("Tiles/catalog.txt", "-[\"A\", color(1,2,3)]\r[#nm:\"x\"]");
        let src = catalog("incoming/catalog.txt", "-[\"B\", color(4,5,6)]\r[#nm:\"z\"]");
        let mut queue = ActionQueue::new();

        append(&mut dest, &src, &mut queue).unwrap();

        assert_eq!(
            dest.to_text(),
            "-[\"A\", color(1,2,3)]\r[#nm:\"x\"]\r\r-[\"B\", color(4,5,6)]\r[#nm:\"z\"]"
        );
    }

    #[test]
    fn test_append_color_mismatch_fails_before_mutation() {
        let mut dest = catalog("Tiles/catalog.txt", "-[\"A\", color(1,2,3)]\r[#nm:\"x\"]");
        let before = dest.to_text();
        let src = catalog(
            "incoming/catalog.txt",
            "-[\"B\", color(4,5,6)]\r[#nm:\"z\"]\r-[\"A\", color(9,9,9)]",
        );
        let mut queue = ActionQueue::new();

        let err = append(&mut dest, &src, &mut queue).unwrap_err();

        assert!(err.to_string().contains("different color"), "{err}");
        assert_eq!(dest.to_text(), before);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_append_src_internal_color_mismatch_fails() {
        let mut dest = catalog("Tiles/catalog.txt", "");
        let src = catalog(
            "incoming/catalog.txt",
            "-[\"A\", color(1,2,3)]\r[#nm:\"m\"]\r-[\"A\", color(9,9,9)]\r[#nm:\"n\"]",
        );
        let mut queue = ActionQueue::new();

        let err = append(&mut dest, &src, &mut queue).unwrap_err();

        assert!(err.to_string().contains("different color"), "{err}");
        assert_eq!(dest.category_count(), 0);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_append_folds_duplicate_src_categories_with_matching_color() {
        let mut dest = catalog("Tiles/catalog.txt", "");
        let src = catalog(
            "incoming/catalog.txt",
            "-[\"A\", color(1,2,3)]\r[#nm:\"m\"]\r-[\"A\", color(1,2,3)]\r[#nm:\"n\"]",
        );
        let mut queue = ActionQueue::new();

        append(&mut dest, &src, &mut queue).unwrap();

        assert_eq!(dest.category_count(), 1);
        assert_eq!(
            dest.to_text(),
            "-[\"A\", color(1,2,3)]\r[#nm:\"m\"]\r[#nm:\"n\"]"
        );
    }

    #[test]
    fn test_style_mismatch_is_incompatible() {
        let mut dest = catalog("Tiles/catalog.txt", "-[\"A\", color(1,2,3)]");
        let src = Catalog::from_text(
            Path::new("incoming/catalog.txt"),
            HeaderStyle::Plain,
            "-A",
        )
        .unwrap();
        let mut queue = ActionQueue::new();

        let err = replace(&mut dest, &src, &mut queue).unwrap_err();
        assert!(err.to_string().contains("incompatible"), "{err}");

        let err = append(&mut dest, &src, &mut queue).unwrap_err();
        assert!(err.to_string().contains("incompatible"), "{err}");
        assert!(queue.is_empty());
    }
}
