//! Grid command implementation.
//!
//! Merges artgrid.yaml with command-line overrides, generates the artwork
//! and writes it as PNG or SVG.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::{ArtConfig, OutputFormat};
use crate::diagnostics::{self, Diagnostic, Diagnostics};
use crate::error::Result;
use crate::grid::{generate, render_svg};
use crate::output::{display_path, plural, Printer};
use crate::render::{write_png, LetterFont, RasterSurface};
use crate::shapes::LETTER_GLYPHS;
use crate::types::{Chaos, Seed};

/// Default PNG output path when none is configured.
const DEFAULT_PNG: &str = "artgrid.png";

/// Generate an art grid
#[derive(Args, Debug)]
pub struct GridArgs {
    /// Config file (default: ./artgrid.yaml if present)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Number of rows
    #[arg(long)]
    pub rows: Option<u32>,

    /// Number of columns
    #[arg(long)]
    pub cols: Option<u32>,

    /// Cell size in pixels
    #[arg(long)]
    pub cell_size: Option<u32>,

    /// Palette index (out-of-range falls back to 0)
    #[arg(long, allow_hyphen_values = true)]
    pub palette: Option<i64>,

    /// Comma-separated style names
    #[arg(long, value_delimiter = ',')]
    pub styles: Option<Vec<String>>,

    /// Irregularity from 0 to 1
    #[arg(long)]
    pub chaos: Option<f64>,

    /// Seed; blank or non-numeric means random
    #[arg(long, allow_hyphen_values = true)]
    pub seed: Option<String>,

    /// Disable big blocks
    #[arg(long)]
    pub no_big_block: bool,

    /// Big block side length in cells
    #[arg(long)]
    pub big_block_multiplier: Option<u32>,

    /// Number of big blocks
    #[arg(long)]
    pub big_block_count: Option<u32>,

    /// JSON palette file
    #[arg(long)]
    pub palettes: Option<PathBuf>,

    /// Letter block font (.ttf/.otf, or a .yaml bitmap font)
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Output file (SVG goes to stdout when omitted)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Output format (default: from the output extension, else png)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Integer scale factor for PNG output
    #[arg(long)]
    pub scale: Option<u32>,
}

impl GridArgs {
    /// Override config values with the flags that were given.
    pub fn apply(&self, config: &mut ArtConfig, diagnostics: &mut Diagnostics) {
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }
        if let Some(palette) = self.palette {
            config.palette = palette;
        }
        if let Some(styles) = &self.styles {
            config.styles = styles.clone();
        }
        if let Some(chaos) = self.chaos {
            config.chaos = Chaos::new(chaos);
        }
        if let Some(seed) = &self.seed {
            config.seed = Seed::parse(seed, diagnostics);
        }
        if self.no_big_block {
            config.big_block.enabled = false;
        }
        if let Some(multiplier) = self.big_block_multiplier {
            config.big_block.multiplier = multiplier;
        }
        if let Some(count) = self.big_block_count {
            config.big_block.count = count;
        }
        if let Some(path) = &self.palettes {
            config.palettes = Some(path.clone());
        }
        if let Some(path) = &self.font {
            config.font = Some(path.clone());
        }
        if let Some(path) = &self.output {
            config.output = Some(path.clone());
        }
        if let Some(format) = self.format {
            config.format = Some(format);
        }
        if let Some(scale) = self.scale {
            config.scale = scale;
        }
    }
}

/// The configured letter font, or the built-in one.
///
/// Load failures and uncovered letters become warnings.
fn letter_font(config: &ArtConfig, diagnostics: &mut Diagnostics) -> LetterFont {
    let Some(mut font) = config.load_font(diagnostics) else {
        return LetterFont::default();
    };
    let missing = font.missing(LETTER_GLYPHS);
    if !missing.is_empty() {
        let chars: String = missing.iter().collect();
        diagnostics.push(
            Diagnostic::warning(
                diagnostics::MISSING_GLYPH,
                format!("Font has no glyphs for '{}'", chars),
            )
            .with_help("Missing glyphs are drawn with the built-in font"),
        );
    }
    font
}

pub fn run(args: GridArgs, printer: &Printer) -> Result<()> {
    let mut config = ArtConfig::discover(args.config.as_deref(), Path::new("."))?;
    let mut diagnostics = Diagnostics::new();
    args.apply(&mut config, &mut diagnostics);

    let store = config.load_palettes()?;
    let request = config.to_request();
    request.grid.validate()?;
    let (width, height) = (request.grid.width(), request.grid.height());

    printer.status(
        "Generating",
        &format!(
            "{}x{} grid ({}x{}, {})",
            request.grid.rows,
            request.grid.cols,
            width,
            height,
            config.effective_format()
        ),
    );

    match config.effective_format() {
        OutputFormat::Png => {
            let font = letter_font(&config, &mut diagnostics);
            let surface = RasterSurface::with_font(width, height, font)?;

            let artwork = generate(&request, &store, surface)?;
            diagnostics.merge(artwork.diagnostics);

            let path = config
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PNG));
            let scale = config.effective_scale();
            write_png(&artwork.artifact, &path, scale)?;
            printer.status(
                "Wrote",
                &format!("{} ({}x)", printer.cyan(&display_path(&path)), scale),
            );
        }
        OutputFormat::Svg => {
            let artwork = render_svg(&request, &store)?;
            diagnostics.merge(artwork.diagnostics);

            match &config.output {
                Some(path) => {
                    artwork.artifact.write(path)?;
                    printer.status("Wrote", &printer.cyan(&display_path(path)));
                }
                None => print!("{}", artwork.artifact),
            }
        }
    }

    printer.report(&diagnostics);
    if diagnostics.has_warnings() {
        printer.warning(
            "Finished",
            &format!(
                "with {}",
                plural(diagnostics.warning_count(), "warning", "warnings")
            ),
        );
    }

    Ok(())
}
