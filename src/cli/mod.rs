pub mod check;
pub mod completions;
pub mod list;
pub mod merge;
pub mod parse;

use clap::{Parser, Subcommand};
use flexi_logger::LoggerHandle;

/// shelf - reader, editor, and merger for legacy asset catalogs
#[derive(Parser, Debug)]
#[command(name = "shelf")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the categories and items of a catalog
    List(list::ListArgs),

    /// Parse catalogs and report lines the reader keeps verbatim
    Check(check::CheckArgs),

    /// Parse a standalone literal and print its value trees
    Parse(parse::ParseArgs),

    /// Merge a source catalog into a destination catalog
    Merge(merge::MergeArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Start the stderr logger. `RUST_LOG` overrides the verbosity flag.
/// Keep the returned handle alive for the life of the process.
pub fn init_logging(verbose: u8) -> Option<LoggerHandle> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    flexi_logger::Logger::try_with_env_or_str(level)
        .and_then(|logger| logger.start())
        .map_err(|e| eprintln!("logging disabled: {e}"))
        .ok()
}
