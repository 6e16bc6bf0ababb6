use clap::Parser;
use miette::Result;
use shelf::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logger = shelf::cli::init_logging(cli.verbose);

    match cli.command {
        Commands::List(args) => shelf::cli::list::run(args)?,
        Commands::Check(args) => shelf::cli::check::run(args)?,
        Commands::Parse(args) => shelf::cli::parse::run(args)?,
        Commands::Merge(args) => shelf::cli::merge::run(args)?,
        Commands::Completions(args) => shelf::cli::completions::run(args)?,
    }

    Ok(())
}
