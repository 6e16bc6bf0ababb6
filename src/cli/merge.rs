//! Merge command implementation.
//!
//! Runs a merge strategy over two catalogs, replays the queued graphics
//! actions, and commits the destination. `--dry-run` stops after the
//! structural pass and prints what would have happened.

use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::catalog::{
    append, replace, ActionQueue, Catalog, HeaderStyle, SpriteGraphics, VariantGraphics,
};
use crate::error::Result;
use crate::output::{display_path, plural, Printer};

/// Merge a source catalog into a destination catalog
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Destination catalog file, modified in place
    pub dest: PathBuf,

    /// Source catalog file
    pub src: PathBuf,

    /// How the destination absorbs the source
    #[arg(long, value_enum)]
    pub strategy: Strategy,

    /// Read plain headers instead of colored ones
    #[arg(long)]
    pub plain: bool,

    /// Graphics-file naming convention beside the catalogs
    #[arg(long, value_enum, default_value_t = Graphics::Sprite)]
    pub graphics: Graphics,

    /// Print the queued graphics actions without running them or saving
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Strategy {
    /// Clear the destination, then recreate it from the source
    Replace,
    /// Add the source on top of what the destination holds
    Append,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Graphics {
    /// One `{name}.png` per item
    Sprite,
    /// Suffixed variants per item, e.g. `{name}Texture.png`
    Variants,
}

pub fn run(args: MergeArgs) -> Result<()> {
    let printer = Printer::new();
    let style = if args.plain {
        HeaderStyle::Plain
    } else {
        HeaderStyle::Colored
    };

    let mut dest = Catalog::open(&args.dest, style)?;
    let src = Catalog::open(&args.src, style)?;
    let mut queue = ActionQueue::new();

    printer.status(
        "Merging",
        &format!(
            "{} into {}",
            display_path(&args.src),
            display_path(&args.dest)
        ),
    );
    match args.strategy {
        Strategy::Replace => replace(&mut dest, &src, &mut queue)?,
        Strategy::Append => append(&mut dest, &src, &mut queue)?,
    }

    if args.dry_run {
        for action in queue.actions() {
            printer.info("Queued", &action.to_string());
        }
        printer.success(
            "Previewed",
            &format!(
                "{}, {}, nothing written",
                plural(dest.category_count(), "category", "categories"),
                plural(queue.len(), "graphics action", "graphics actions")
            ),
        );
        return Ok(());
    }

    let actions = queue.len();
    match args.graphics {
        Graphics::Sprite => queue.drain(&SpriteGraphics)?,
        Graphics::Variants => queue.drain(&VariantGraphics::standard())?,
    }
    dest.commit()?;

    printer.success(
        "Merged",
        &format!(
            "{} now holds {} ({} replayed)",
            display_path(&args.dest),
            plural(dest.category_count(), "category", "categories"),
            plural(actions, "graphics action", "graphics actions")
        ),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_catalog(dir: &Path, text: &str) -> PathBuf {
        std::fs::create_dir_all(dir).unwrap();
        let path = dir.join("catalog.txt");
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_dry_run_leaves_everything_untouched() {
        let root = tempdir().unwrap();
        let dest = write_catalog(
            &root.path().join("Tiles"),
            "-[\"A\", color(1,2,3)]\r[#nm:\"x\"]",
        );
        let src = write_catalog(
            &root.path().join("incoming"),
            "-[\"A\", color(1,2,3)]\r[#nm:\"y\"]",
        );
        std::fs::write(root.path().join("incoming").join("y.png"), b"img").unwrap();
        let before = std::fs::read_to_string(&dest).unwrap();

        let args = MergeArgs {
            dest: dest.clone(),
            src,
            strategy: Strategy::Append,
            plain: false,
            graphics: Graphics::Sprite,
            dry_run: true,
        };

        run(args).unwrap();

        assert_eq!(std::fs::read_to_string(&dest).unwrap(), before);
        assert!(!root.path().join("Tiles").join("y.png").exists());
    }

    #[test]
    fn test_append_commits_and_copies_graphics() {
        let root = tempdir().unwrap();
        let dest = write_catalog(
            &root.path().join("Tiles"),
            "-[\"A\", color(1,2,3)]\r[#nm:\"x\"]",
        );
        let src = write_catalog(
            &root.path().join("incoming"),
            "-[\"A\", color(1,2,3)]\r[#nm:\"y\"]",
        );
        std::fs::write(root.path().join("incoming").join("y.png"), b"img").unwrap();

        let args = MergeArgs {
            dest: dest.clone(),
            src,
            strategy: Strategy::Append,
            plain: false,
            graphics: Graphics::Sprite,
            dry_run: false,
        };

        run(args).unwrap();

        assert_eq!(
            std::fs::read_to_string(&dest).unwrap(),
            "-[\"A\", color(1,2,3)]\r[#nm:\"x\"]\r[#nm:\"y\"]"
        );
        assert_eq!(
            std::fs::read(root.path().join("Tiles").join("y.png")).unwrap(),
            b"img"
        );
    }
}
