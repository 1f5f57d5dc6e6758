//! Core domain types for artgrid.
//!
//! - `Colour` - RGBA colour values
//! - `Palette` / `PaletteStore` - hex colour lists addressed by index
//! - `Style` / `StyleSet` - the twelve cell motifs
//! - `GridSpec`, `BigBlockSpec`, `Seed`, `Chaos` - generation parameters

mod colour;
mod grid;
mod palette;
mod style;

pub use colour::Colour;
pub use grid::{BigBlockSpec, Chaos, GridSpec, Seed};
pub use palette::{triadic_palettes, Palette, PaletteStore};
pub use style::{Style, StyleSet};
