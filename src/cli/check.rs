//! Check command implementation.
//!
//! Reads catalogs the way the editor would and reports every line the reader
//! had to keep verbatim without understanding it.

use std::path::PathBuf;

use clap::Args;

use crate::catalog::{Catalog, HeaderStyle};
use crate::error::{Result, ShelfError};
use crate::output::{display_path, plural, Printer};

/// Parse catalogs and report lines the reader keeps verbatim
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Catalog files to check
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Read plain headers instead of colored ones
    #[arg(long)]
    pub plain: bool,
}

pub fn run(args: CheckArgs) -> Result<()> {
    let printer = Printer::new();
    let style = if args.plain {
        HeaderStyle::Plain
    } else {
        HeaderStyle::Colored
    };

    let mut unopened = 0usize;
    for path in &args.paths {
        if !path.exists() {
            printer.error("Missing", &display_path(path));
            unopened += 1;
            continue;
        }
        let catalog = match Catalog::open(path, style) {
            Ok(catalog) => catalog,
            Err(err) => {
                printer.error("Unreadable", &format!("{}: {err}", display_path(path)));
                unopened += 1;
                continue;
            }
        };

        let mut kept = 0usize;
        for (number, text) in catalog.unclassified_lines() {
            printer.warning("Verbatim", &format!("{}:{number}: {text}", display_path(path)));
            kept += 1;
        }

        let summary = format!(
            "{} ({}, {})",
            display_path(path),
            plural(catalog.category_count(), "category", "categories"),
            plural(catalog.line_count(), "line", "lines")
        );
        if kept == 0 {
            printer.success("Checked", &summary);
        } else {
            printer.warning(
                "Checked",
                &format!("{summary}, {} kept verbatim", plural(kept, "line", "lines")),
            );
        }
    }

    if unopened > 0 {
        return Err(ShelfError::Catalog {
            message: format!("{} could not be read", plural(unopened, "catalog", "catalogs")),
            help: None,
        });
    }
    Ok(())
}
