use artgrid::cli::{Cli, Commands};
use artgrid::output::Printer;
use clap::Parser;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Grid(args) => artgrid::cli::grid::run(args, &printer)?,
        Commands::Characters(args) => artgrid::cli::characters::run(args, &printer)?,
        Commands::Palettes(args) => artgrid::cli::palettes::run(args, &printer)?,
        Commands::Completions(args) => artgrid::cli::completions::run(args)?,
    }

    Ok(())
}
