//! artgrid - Seeded procedural art grids
//!
//! Fills a grid of square cells with geometric motifs drawn from a colour
//! palette, overlays enlarged "big block" cells, and renders the result as a
//! raster image or an SVG document. A fixed seed reproduces the same artwork.

pub mod character;
pub mod cli;
pub mod config;
pub mod derive;
pub mod diagnostics;
pub mod error;
pub mod grid;
pub mod output;
pub mod render;
pub mod sequencer;
pub mod shapes;
pub mod types;

pub use character::{generate_characters, CharacterSpec};
pub use config::{ArtConfig, OutputFormat};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{ArtError, Result};
pub use grid::{generate, render_png, render_svg, Artwork, GridRequest};
pub use render::{
    write_png, BitmapFont, Document, LetterFont, OutlineFont, RasterSurface, Surface, SvgSurface,
};
pub use sequencer::Sequencer;
pub use types::{
    BigBlockSpec, Chaos, Colour, GridSpec, Palette, PaletteStore, Seed, Style, StyleSet,
};
