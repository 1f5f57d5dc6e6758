//! Project configuration (artgrid.yaml).
//!
//! Every field is optional; missing fields take the defaults below and
//! command-line flags override whatever the file sets.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::character::CharacterSpec;
use crate::diagnostics::{self, Diagnostic, Diagnostics};
use crate::error::{ArtError, Result};
use crate::grid::GridRequest;
use crate::render::LetterFont;
use crate::types::{BigBlockSpec, Chaos, GridSpec, PaletteStore, Seed};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "artgrid.yaml";

/// Artifact format of a grid run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Svg,
}

impl OutputFormat {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "svg" => Some(Self::Svg),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Configuration loaded from artgrid.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtConfig {
    pub rows: u32,
    pub cols: u32,
    pub cell_size: u32,

    /// Palette index into the resolved palette store.
    pub palette: i64,

    /// Style names; empty means every style.
    pub styles: Vec<String>,

    pub chaos: Chaos,

    /// `null` selects a random seed.
    pub seed: Seed,

    pub big_block: BigBlockSpec,

    /// JSON palette file replacing the built-in palettes.
    pub palettes: Option<PathBuf>,

    /// Letter block font: a .ttf/.otf file or a .yaml bitmap font.
    pub font: Option<PathBuf>,

    /// Output file; SVG goes to stdout when unset.
    pub output: Option<PathBuf>,

    /// Artifact format; inferred from `output` when unset.
    pub format: Option<OutputFormat>,

    /// Integer upscaling for PNG output.
    pub scale: u32,

    /// Settings for the character sheet command.
    pub characters: CharacterSpec,
}

impl Default for ArtConfig {
    fn default() -> Self {
        Self {
            rows: 6,
            cols: 6,
            cell_size: 100,
            palette: 0,
            styles: Vec::new(),
            chaos: Chaos::new(0.3),
            seed: Seed::fixed(0),
            big_block: BigBlockSpec::default(),
            palettes: None,
            font: None,
            output: None,
            format: None,
            scale: 1,
            characters: CharacterSpec::default(),
        }
    }
}

impl ArtConfig {
    /// Load config from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ArtError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse config from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| ArtError::Parse {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILE)),
        })
    }

    /// Load the given file, or `artgrid.yaml` in `dir` if present, or defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    pub fn grid(&self) -> GridSpec {
        GridSpec::new(self.rows, self.cols, self.cell_size)
    }

    /// The generation request this config describes.
    pub fn to_request(&self) -> GridRequest {
        GridRequest {
            grid: self.grid(),
            palette: self.palette,
            styles: self.styles.clone(),
            chaos: self.chaos,
            seed: self.seed,
            big_block: self.big_block,
        }
    }

    /// Explicit format, else the output extension, else PNG.
    pub fn effective_format(&self) -> OutputFormat {
        self.format
            .or_else(|| self.output.as_deref().and_then(OutputFormat::from_path))
            .unwrap_or(OutputFormat::Png)
    }

    pub fn effective_scale(&self) -> u32 {
        self.scale.max(1)
    }

    /// Palettes from the configured JSON file, or the built-in set.
    pub fn load_palettes(&self) -> Result<PaletteStore> {
        let Some(path) = &self.palettes else {
            return Ok(PaletteStore::builtin());
        };
        let source = std::fs::read_to_string(path).map_err(|e| ArtError::Io {
            path: path.clone(),
            message: format!("Failed to read palettes: {}", e),
        })?;
        PaletteStore::from_json(&source)
    }

    /// The configured letter font, if any.
    ///
    /// A font that cannot be loaded is not fatal: the failure is recorded
    /// as a warning and `None` is returned so the built-in font is used.
    pub fn load_font(&self, diagnostics: &mut Diagnostics) -> Option<LetterFont> {
        let path = self.font.as_deref()?;
        match LetterFont::load(path) {
            Ok(font) => Some(font),
            Err(e) => {
                diagnostics.push(
                    Diagnostic::warning(diagnostics::FONT_UNAVAILABLE, e.to_string())
                        .with_help("Letter blocks are drawn with the built-in font"),
                );
                None
            }
        }
    }
}
