//! Grid geometry, big-block overlays, seeds and the chaos dial.

use serde::{Deserialize, Serialize};

use crate::diagnostics::{self, Diagnostics};
use crate::error::{ArtError, Result};

/// Rows, columns and cell size of the art grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    pub rows: u32,
    pub cols: u32,
    pub cell_size: u32,
}

impl GridSpec {
    pub fn new(rows: u32, cols: u32, cell_size: u32) -> Self {
        Self {
            rows,
            cols,
            cell_size,
        }
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.cols * self.cell_size
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.rows * self.cell_size
    }

    /// Reject zero-sized grids.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 || self.cell_size == 0 {
            return Err(ArtError::Validation {
                message: format!(
                    "Grid must be at least 1x1 with a positive cell size (got {}x{}, cell {})",
                    self.rows, self.cols, self.cell_size
                ),
                help: Some("Set rows, cols and cell size to 1 or more".to_string()),
            });
        }

        if self.cols.checked_mul(self.cell_size).is_none()
            || self.rows.checked_mul(self.cell_size).is_none()
        {
            return Err(ArtError::Validation {
                message: "Grid dimensions overflow the canvas size".to_string(),
                help: None,
            });
        }

        Ok(())
    }
}

/// Enlarged motifs overlaid on the finished grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BigBlockSpec {
    pub enabled: bool,
    /// Side length of a big block, in cells.
    pub multiplier: u32,
    pub count: u32,
}

impl BigBlockSpec {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Whether a block of this size fits inside the grid.
    pub fn fits(&self, grid: &GridSpec) -> bool {
        grid.rows >= self.multiplier && grid.cols >= self.multiplier
    }
}

impl Default for BigBlockSpec {
    fn default() -> Self {
        Self {
            enabled: true,
            multiplier: 2,
            count: 1,
        }
    }
}

/// Seed for the random sequence.
///
/// `None` or a negative value selects a non-reproducible entropy seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Seed(pub Option<i64>);

impl Seed {
    pub fn fixed(value: i64) -> Self {
        Self(Some(value))
    }

    pub fn random() -> Self {
        Self(None)
    }

    /// The deterministic seed value, if there is one.
    pub fn value(self) -> Option<u64> {
        self.0.and_then(|v| u64::try_from(v).ok())
    }

    /// Parse seed text.
    ///
    /// Blank text is a random seed. Text that is not an integer is also a
    /// random seed, with a warning.
    pub fn parse(text: &str, diagnostics: &mut Diagnostics) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return Self::random();
        }
        match text.parse::<i64>() {
            Ok(value) => Self::fixed(value),
            Err(_) => {
                diagnostics.warning(
                    diagnostics::INVALID_SEED,
                    format!("Invalid seed value '{}'; using a random seed", text),
                );
                Self::random()
            }
        }
    }
}

impl From<Option<i64>> for Seed {
    fn from(value: Option<i64>) -> Self {
        Self(value)
    }
}

/// Irregularity dial in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Chaos(f64);

impl Chaos {
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl From<f64> for Chaos {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Chaos> for f64 {
    fn from(chaos: Chaos) -> Self {
        chaos.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_dimensions() {
        let grid = GridSpec::new(4, 6, 80);
        assert_eq!(grid.width(), 480);
        assert_eq!(grid.height(), 320);
        assert!(grid.validate().is_ok());
    }

    #[test]
    fn test_grid_rejects_zero() {
        assert!(GridSpec::new(0, 4, 80).validate().is_err());
        assert!(GridSpec::new(4, 4, 0).validate().is_err());
    }

    #[test]
    fn test_grid_rejects_overflow() {
        assert!(GridSpec::new(1, u32::MAX, 2).validate().is_err());
    }

    #[test]
    fn test_big_block_fits() {
        let block = BigBlockSpec {
            enabled: true,
            multiplier: 3,
            count: 1,
        };
        assert!(!block.fits(&GridSpec::new(2, 2, 10)));
        assert!(!block.fits(&GridSpec::new(3, 2, 10)));
        assert!(block.fits(&GridSpec::new(3, 3, 10)));
    }

    #[test]
    fn test_seed_value() {
        assert_eq!(Seed::fixed(42).value(), Some(42));
        assert_eq!(Seed::fixed(-1).value(), None);
        assert_eq!(Seed::random().value(), None);
    }

    #[test]
    fn test_seed_parse() {
        let mut diagnostics = Diagnostics::new();
        assert_eq!(Seed::parse(" 7 ", &mut diagnostics), Seed::fixed(7));
        assert_eq!(Seed::parse("", &mut diagnostics), Seed::random());
        assert!(diagnostics.is_empty());

        assert_eq!(Seed::parse("abc", &mut diagnostics), Seed::random());
        assert!(diagnostics.contains(diagnostics::INVALID_SEED));
    }

    #[test]
    fn test_chaos_clamps() {
        assert_eq!(Chaos::new(1.7).get(), 1.0);
        assert_eq!(Chaos::new(-0.2).get(), 0.0);
        assert_eq!(Chaos::new(f64::NAN).get(), 0.0);
        assert_eq!(Chaos::new(0.3).get(), 0.3);
    }
}
