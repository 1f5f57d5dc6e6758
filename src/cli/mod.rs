pub mod characters;
pub mod completions;
pub mod grid;
pub mod palettes;

use clap::{Parser, Subcommand};

/// artgrid - Seeded procedural art grids
#[derive(Parser, Debug)]
#[command(name = "artgrid")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate an art grid as PNG or SVG
    Grid(grid::GridArgs),

    /// Generate an animated SVG sheet of humanoid characters
    Characters(characters::CharactersArgs),

    /// List the available colour palettes
    Palettes(palettes::PalettesArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
