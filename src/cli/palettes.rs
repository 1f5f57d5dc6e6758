//! Palettes command implementation.
//!
//! Prints one palette per line to stdout as `index: entries`.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::ArtConfig;
use crate::error::Result;
use crate::output::{plural, Printer};
use crate::types::PaletteStore;

/// List the available colour palettes
#[derive(Args, Debug)]
pub struct PalettesArgs {
    /// Config file (default: ./artgrid.yaml if present)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// JSON palette file to list instead of the configured one
    #[arg(long)]
    pub palettes: Option<PathBuf>,
}

pub fn run(args: PalettesArgs, printer: &Printer) -> Result<()> {
    let mut config = ArtConfig::discover(args.config.as_deref(), Path::new("."))?;
    if let Some(path) = args.palettes {
        config.palettes = Some(path);
    }

    let store = config.load_palettes()?;
    printer.info("Listing", &plural(store.len(), "palette", "palettes"));
    for line in listing(&store) {
        println!("{}", line);
    }

    let invalid: usize = store.iter().map(|p| p.invalid_entries().count()).sum();
    if invalid > 0 {
        printer.warning(
            "Found",
            &format!("{} (ignored when drawing)", plural(invalid, "invalid entry", "invalid entries")),
        );
    }

    Ok(())
}

fn listing(store: &PaletteStore) -> Vec<String> {
    store
        .iter()
        .enumerate()
        .map(|(i, palette)| format!("{}: {}", i, palette.entries().join(" ")))
        .collect()
}
