//! Parse command implementation.
//!
//! Runs the literal notation parser over ad hoc input and prints the value
//! trees, one table per hyphen-delimited group.

use std::path::PathBuf;

use clap::Args;

use crate::error::{Result, ShelfError};
use crate::notation::parse_table_stream;

/// Parse a standalone literal and print its value trees
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Literal text, e.g. '[#nm:"Thing", #sz:point(2,2)]'
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    pub literal: Option<String>,

    /// Read the literal text from a file instead
    #[arg(long)]
    pub file: Option<PathBuf>,
}

pub fn run(args: ParseArgs) -> Result<()> {
    let text = if let Some(path) = &args.file {
        std::fs::read_to_string(path).map_err(|e| ShelfError::Io {
            path: path.clone(),
            message: e.to_string(),
        })?
    } else {
        args.literal.clone().unwrap_or_default()
    };

    let tables = parse_table_stream(&text)?;
    let many = tables.len() > 1;
    for (index, table) in tables.iter().enumerate() {
        if many {
            println!("table {index}:");
        }
        for value in table {
            println!("{value}");
        }
    }
    Ok(())
}
