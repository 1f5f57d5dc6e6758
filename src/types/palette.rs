//! Palettes and the palette store.
//!
//! A palette is an ordered list of hex strings. Entries that fail hex
//! validation are kept as written but never used for drawing.

use crate::diagnostics::{self, Diagnostics};
use crate::error::{ArtError, Result};

use super::Colour;

/// The four hand-picked palettes that ship with the tool.
const DEFAULT_PALETTES: [[&str; 5]; 4] = [
    ["#FF6B6B", "#FFD166", "#06D6A0", "#118AB2", "#073B4C"],
    ["#FAD02C", "#F2A104", "#E87007", "#D53903", "#A01F02"],
    ["#22223B", "#4A4E69", "#9A8C98", "#C9ADA7", "#F2E9E4"],
    ["#003049", "#D62828", "#F77F00", "#FCBF49", "#EAE2B7"],
];

/// An ordered collection of hex colour entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<String>,
}

impl Palette {
    /// Create a palette from raw hex entries.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// Raw entries as written.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Valid colours in palette order.
    ///
    /// Repeated colours are kept: they weight random picks and take part
    /// in the background average like any other entry.
    pub fn valid_colours(&self) -> Vec<Colour> {
        self.entries
            .iter()
            .filter_map(|e| Colour::from_palette_entry(e))
            .collect()
    }

    /// Entries that fail hex validation.
    pub fn invalid_entries(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .map(|e| e.as_str())
            .filter(|e| Colour::from_palette_entry(e).is_none())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Candidate palettes, addressed by index.
#[derive(Debug, Clone)]
pub struct PaletteStore {
    palettes: Vec<Palette>,
}

impl PaletteStore {
    /// Create a store from explicit palettes.
    ///
    /// An empty list falls back to the builtin palettes so that index 0 is
    /// always resolvable.
    pub fn new(palettes: Vec<Palette>) -> Self {
        if palettes.is_empty() {
            return Self::builtin();
        }
        Self { palettes }
    }

    /// The default palettes followed by the generated triadic set.
    pub fn builtin() -> Self {
        let mut palettes: Vec<Palette> = DEFAULT_PALETTES
            .iter()
            .map(|p| Palette::new(p.iter().copied()))
            .collect();
        palettes.extend(triadic_palettes());
        Self { palettes }
    }

    /// Parse palettes from a JSON array of hex-string arrays.
    pub fn from_json(source: &str) -> Result<Self> {
        let raw: Vec<Vec<String>> = serde_json::from_str(source).map_err(|e| ArtError::Parse {
            message: format!("Invalid palette file: {}", e),
            help: Some(r##"Expected a JSON array of arrays, e.g. [["#FF0000", "#00FF00"]]"##.to_string()),
        })?;

        Ok(Self::new(raw.into_iter().map(Palette::new).collect()))
    }

    /// Resolve an index to a palette.
    ///
    /// Out-of-range indices (including negatives) resolve to palette 0 and
    /// record a warning. Invalid entries in the resolved palette are reported.
    pub fn resolve(&self, index: i64, diagnostics: &mut Diagnostics) -> &Palette {
        let palette = match usize::try_from(index).ok().and_then(|i| self.palettes.get(i)) {
            Some(palette) => palette,
            None => {
                diagnostics.warning(
                    diagnostics::PALETTE_INDEX,
                    format!(
                        "Palette index {} is out of range (0..{}); using palette 0",
                        index,
                        self.palettes.len()
                    ),
                );
                &self.palettes[0]
            }
        };

        let invalid: Vec<&str> = palette.invalid_entries().collect();
        if !invalid.is_empty() {
            diagnostics.warning(
                diagnostics::PALETTE_ENTRY,
                format!("Ignoring invalid palette entries: {}", invalid.join(", ")),
            );
        }

        palette
    }

    pub fn get(&self, index: usize) -> Option<&Palette> {
        self.palettes.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Palette> {
        self.palettes.iter()
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }
}

impl Default for PaletteStore {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Triadic palettes over a coarse RGB lattice (steps of 64 per channel).
///
/// Each palette is the base colour plus its two channel-rotated complements
/// shifted by half the channel range.
pub fn triadic_palettes() -> Vec<Palette> {
    const STEPS: [u8; 4] = [0, 64, 128, 192];

    let mut palettes = Vec::with_capacity(STEPS.len().pow(3));
    for r in STEPS {
        for g in STEPS {
            for b in STEPS {
                let first = Colour::rgb(g.wrapping_add(128), b.wrapping_add(128), r.wrapping_add(128));
                let second = Colour::rgb(b.wrapping_add(128), r.wrapping_add(128), g.wrapping_add(128));
                palettes.push(Palette::new([
                    Colour::rgb(r, g, b).to_string(),
                    first.to_string(),
                    second.to_string(),
                ]));
            }
        }
    }
    palettes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_store_size() {
        let store = PaletteStore::builtin();
        assert_eq!(store.len(), 4 + 64);
        assert_eq!(store.get(0).unwrap().entries()[0], "#FF6B6B");
    }

    #[test]
    fn test_triadic_rotation() {
        let palettes = triadic_palettes();
        // r=0, g=64, b=128
        let p = &palettes[2 + 4];
        assert_eq!(p.entries(), ["#004080", "#C00080", "#0080C0"]);
    }

    #[test]
    fn test_valid_colours_drop_invalid_keep_repeats() {
        let palette = Palette::new(["#FFF", "nope", "#FFFFFF", "#12345", "#000"]);
        assert_eq!(
            palette.valid_colours(),
            vec![Colour::WHITE, Colour::WHITE, Colour::BLACK]
        );
        assert_eq!(palette.invalid_entries().collect::<Vec<_>>(), ["nope", "#12345"]);
    }

    #[test]
    fn test_resolve_clamps_out_of_range() {
        let store = PaletteStore::builtin();
        let first = store.get(0).unwrap().clone();

        let mut diagnostics = Diagnostics::new();
        assert_eq!(store.resolve(-1, &mut diagnostics), &first);
        assert_eq!(store.resolve(store.len() as i64, &mut diagnostics), &first);
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics.contains(diagnostics::PALETTE_INDEX));
    }

    #[test]
    fn test_resolve_in_range_is_silent() {
        let store = PaletteStore::builtin();
        let mut diagnostics = Diagnostics::new();
        let palette = store.resolve(3, &mut diagnostics);
        assert_eq!(palette.entries()[0], "#003049");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_from_json() {
        let store = PaletteStore::from_json(r##"[["#111", "#222222"], ["bad"]]"##).unwrap();
        assert_eq!(store.len(), 2);

        let mut diagnostics = Diagnostics::new();
        let palette = store.resolve(1, &mut diagnostics);
        assert!(palette.valid_colours().is_empty());
        assert!(diagnostics.contains(diagnostics::PALETTE_ENTRY));
    }

    #[test]
    fn test_from_json_empty_falls_back_to_builtin() {
        let store = PaletteStore::from_json("[]").unwrap();
        assert_eq!(store.len(), PaletteStore::builtin().len());
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(PaletteStore::from_json("{\"not\": \"a list\"}").is_err());
    }
}
