//! The grid compositor.
//!
//! Lays out cells row by row, picks a colour pair and a style for each,
//! then overlays any big blocks. Drawing goes through a [`Surface`], so the
//! same run produces either a raster image or an SVG document.

use image::RgbImage;

use crate::derive::{derive_background, pick_colour_pair};
use crate::diagnostics::{self, Diagnostic, Diagnostics};
use crate::error::Result;
use crate::render::{Document, Group, RasterSurface, Rect, Surface, SvgSurface};
use crate::sequencer::Sequencer;
use crate::shapes::{draw_style, Cell};
use crate::types::{BigBlockSpec, Chaos, GridSpec, PaletteStore, Seed, StyleSet};

/// Id of the group holding every regular cell.
pub const GRID_GROUP_ID: &str = "grid_elements";

/// Smallest background inset, in pixels.
const MIN_INSET: f64 = 10.0;

/// Everything that determines an artwork.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRequest {
    pub grid: GridSpec,
    /// Palette index; out-of-range values fall back to palette 0.
    pub palette: i64,
    /// Style names; unknown names are dropped, none means all.
    pub styles: Vec<String>,
    pub chaos: Chaos,
    pub seed: Seed,
    pub big_block: BigBlockSpec,
}

impl Default for GridRequest {
    fn default() -> Self {
        Self {
            grid: GridSpec::new(6, 6, 100),
            palette: 0,
            styles: Vec::new(),
            chaos: Chaos::new(0.3),
            seed: Seed::fixed(0),
            big_block: BigBlockSpec::default(),
        }
    }
}

/// A finished artifact with the warnings raised while producing it.
#[derive(Debug)]
pub struct Artwork<T> {
    pub artifact: T,
    pub diagnostics: Diagnostics,
}

/// Margin between the outer and inner background tones.
pub fn background_inset(width: u32, height: u32) -> f64 {
    (0.1 * width.min(height) as f64).trunc().max(MIN_INSET)
}

/// Generate an artwork onto `surface`.
pub fn generate<S: Surface>(
    request: &GridRequest,
    store: &PaletteStore,
    mut surface: S,
) -> Result<Artwork<S::Output>> {
    let grid = request.grid;
    grid.validate()?;

    let mut diagnostics = Diagnostics::new();
    let mut rng = Sequencer::new(request.seed);
    let chaos = request.chaos;

    let palette = store.resolve(request.palette, &mut diagnostics);
    let colours = palette.valid_colours();
    let styles = StyleSet::resolve(&request.styles, &mut diagnostics);

    let (width, height) = (grid.width(), grid.height());
    surface.fill_background(derive_background(palette), background_inset(width, height));

    surface.push_group(Group::named(
        GRID_GROUP_ID,
        Rect::new(0.0, 0.0, width as f64, height as f64),
    ));
    for row in 0..grid.rows {
        for col in 0..grid.cols {
            let pair = pick_colour_pair(&colours, chaos, &mut rng);
            let style = *rng.choose(styles.as_slice());
            let cell = Cell::new(col * grid.cell_size, row * grid.cell_size, grid.cell_size);

            surface.push_group(Group::named(format!("cell_{}_{}", col, row), cell.rect()));
            draw_style(style, &mut surface, cell, pair, chaos, &mut rng);
            surface.pop_group();
        }
    }
    surface.pop_group();

    let big = request.big_block;
    if big.enabled {
        for i in 0..big.count {
            if big.multiplier == 0 || !big.fits(&grid) {
                diagnostics.push(
                    Diagnostic::warning(
                        diagnostics::BIG_BLOCK_SKIPPED,
                        format!(
                            "Skipping big block {}: {}x{} grid is too small for a {}x{} block",
                            i, grid.rows, grid.cols, big.multiplier, big.multiplier
                        ),
                    )
                    .with_help("Lower the big block multiplier or enlarge the grid"),
                );
                continue;
            }

            let m = big.multiplier;
            let col = rng.randint(0, (grid.cols - m) as i64) as u32;
            let row = rng.randint(0, (grid.rows - m) as i64) as u32;
            let pair = pick_colour_pair(&colours, chaos, &mut rng);
            let style = *rng.choose(styles.as_slice());
            let cell = Cell::new(
                col * grid.cell_size,
                row * grid.cell_size,
                m * grid.cell_size,
            );

            surface.push_group(Group::named(format!("big_block_{}", i), cell.rect()));
            draw_style(style, &mut surface, cell, pair, chaos, &mut rng);
            surface.pop_group();
        }
    }

    let artifact = surface.finish()?;
    Ok(Artwork {
        artifact,
        diagnostics,
    })
}

/// Generate a raster artwork with the built-in glyph font.
pub fn render_png(request: &GridRequest, store: &PaletteStore) -> Result<Artwork<RgbImage>> {
    request.grid.validate()?;
    let surface = RasterSurface::new(request.grid.width(), request.grid.height())?;
    generate(request, store, surface)
}

/// Generate an SVG document.
pub fn render_svg(request: &GridRequest, store: &PaletteStore) -> Result<Artwork<Document>> {
    request.grid.validate()?;
    let surface = SvgSurface::new(request.grid.width(), request.grid.height());
    generate(request, store, surface)
}
