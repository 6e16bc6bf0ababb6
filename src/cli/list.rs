//! List command implementation.
//!
//! Prints a catalog's categories with their colors and item counts, or a
//! JSON summary for tooling.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::catalog::{Catalog, HeaderStyle, ItemId};
use crate::error::{Result, ShelfError};
use crate::notation::Color;
use crate::output::{display_path, plural, Printer};

/// Print the categories and items of a catalog
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Catalog file to read
    pub path: PathBuf,

    /// Read plain headers instead of colored ones
    #[arg(long)]
    pub plain: bool,

    /// Emit a JSON summary on stdout
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct CategorySummary {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<Color>,
    items: Vec<String>,
}

pub fn run(args: ListArgs) -> Result<()> {
    let style = if args.plain {
        HeaderStyle::Plain
    } else {
        HeaderStyle::Colored
    };
    let catalog = Catalog::open(&args.path, style)?;

    if args.json {
        let summary: Vec<CategorySummary> = catalog
            .categories()
            .map(|(_, category)| CategorySummary {
                name: category.name().to_string(),
                color: category.color(),
                items: item_names(&catalog, category.items()),
            })
            .collect();
        let json = serde_json::to_string_pretty(&summary).map_err(|e| ShelfError::Catalog {
            message: format!("could not serialize the inventory: {e}"),
            help: None,
        })?;
        println!("{json}");
        return Ok(());
    }

    let printer = Printer::new();
    for (_, category) in catalog.categories() {
        let count = plural(category.items().len(), "item", "items");
        let detail = match category.color() {
            Some(color) => format!(
                "{} {} ({count})",
                category.name(),
                printer.dim(&color.to_string())
            ),
            None => format!("{} ({count})", category.name()),
        };
        printer.info("Category", &detail);
    }

    printer.success(
        "Listed",
        &format!(
            "{} in {}",
            plural(catalog.category_count(), "category", "categories"),
            display_path(&args.path)
        ),
    );
    Ok(())
}

fn item_names(catalog: &Catalog, items: &[ItemId]) -> Vec<String> {
    items
        .iter()
        .filter_map(|id| catalog.item(*id).map(|item| item.name().to_string()))
        .collect()
}
