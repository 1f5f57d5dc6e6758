//! Characters command implementation.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::character::generate_characters;
use crate::config::ArtConfig;
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::types::Seed;

/// Generate an animated SVG sheet of humanoid characters
#[derive(Args, Debug)]
pub struct CharactersArgs {
    /// Config file (default: ./artgrid.yaml if present)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Number of characters
    #[arg(long)]
    pub count: Option<u32>,

    /// Character cell size in pixels
    #[arg(long)]
    pub size: Option<u32>,

    /// Head size as a fraction of the character size
    #[arg(long)]
    pub head_size: Option<f64>,

    /// Arm length as a fraction of the character size
    #[arg(long)]
    pub arm_length: Option<f64>,

    /// Leg length as a fraction of the character size
    #[arg(long)]
    pub leg_length: Option<f64>,

    /// Torso width as a fraction of the character size
    #[arg(long)]
    pub torso_width: Option<f64>,

    /// Torso height as a fraction of the character size
    #[arg(long)]
    pub torso_height: Option<f64>,

    /// Seed; blank or non-numeric means random
    #[arg(long, allow_hyphen_values = true)]
    pub seed: Option<String>,

    /// Output SVG file (stdout when omitted)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub fn run(args: CharactersArgs, printer: &Printer) -> Result<()> {
    let config = ArtConfig::discover(args.config.as_deref(), Path::new("."))?;
    let mut diagnostics = Diagnostics::new();

    let mut spec = config.characters;
    if let Some(count) = args.count {
        spec.count = count;
    }
    if let Some(size) = args.size {
        spec.character_size = size;
    }
    let ratios = [
        (args.head_size, &mut spec.head_size),
        (args.arm_length, &mut spec.arm_length),
        (args.leg_length, &mut spec.leg_length),
        (args.torso_width, &mut spec.torso_width),
        (args.torso_height, &mut spec.torso_height),
    ];
    for (flag, field) in ratios {
        if let Some(value) = flag {
            *field = value;
        }
    }

    let seed = match &args.seed {
        Some(text) => Seed::parse(text, &mut diagnostics),
        None => config.seed,
    };

    let document = generate_characters(&spec, seed)?;
    printer.status(
        "Generated",
        &format!(
            "{} ({}x{})",
            plural(spec.count as usize, "character", "characters"),
            document.width(),
            document.height()
        ),
    );

    match args.output.as_ref().or(config.output.as_ref()) {
        Some(path) => {
            document.write(path)?;
            printer.status("Wrote", &printer.cyan(&display_path(path)));
        }
        None => print!("{}", document),
    }

    printer.report(&diagnostics);
    Ok(())
}
