//! Colour type and hex parsing.

use std::fmt;
use std::str::FromStr;

use crate::error::{ArtError, Result};

/// An RGBA colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Fully transparent colour.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Parse a hex colour string.
    ///
    /// Accepts `#RGB`, `#RGBA`, `#RRGGBB` and `#RRGGBBAA`, with or without
    /// the leading `#`.
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        if !hex.is_ascii() {
            return Err(invalid_hex(s));
        }

        match hex.len() {
            3 | 4 => {
                let mut channels = [255u8; 4];
                for (slot, c) in channels.iter_mut().zip(hex.chars()) {
                    let d = parse_hex_digit(c)?;
                    *slot = d << 4 | d;
                }
                let [r, g, b, a] = channels;
                Ok(Self::new(r, g, b, a))
            }
            6 | 8 => {
                let mut channels = [255u8; 4];
                for (i, slot) in channels.iter_mut().enumerate().take(hex.len() / 2) {
                    *slot = parse_hex_byte(&hex[i * 2..i * 2 + 2])?;
                }
                let [r, g, b, a] = channels;
                Ok(Self::new(r, g, b, a))
            }
            _ => Err(invalid_hex(s)),
        }
    }

    /// Parse a palette entry.
    ///
    /// Palette entries are stricter than general hex colours: they must be
    /// `#`-prefixed with exactly 3 or 6 hex digits. Anything else is `None`.
    pub fn from_palette_entry(entry: &str) -> Option<Self> {
        let hex = entry.strip_prefix('#')?;
        match hex.len() {
            3 | 6 => Self::from_hex(hex).ok(),
            _ => None,
        }
    }

    /// The same colour with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Compare RGB channels, ignoring alpha.
    pub fn same_rgb(self, other: Colour) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b
    }

    /// Convert to RGBA array.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Lowercase `#rrggbb` form, alpha dropped (used for SVG paint values).
    pub fn to_rgb_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha as a fraction in [0, 1].
    pub fn opacity(self) -> f64 {
        self.a as f64 / 255.0
    }

    /// Check if the colour is fully opaque.
    pub fn is_opaque(self) -> bool {
        self.a == 255
    }
}

impl FromStr for Colour {
    type Err = ArtError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

fn invalid_hex(s: &str) -> ArtError {
    ArtError::Parse {
        message: format!("Invalid hex colour: {}", s),
        help: Some("Use #RGB, #RGBA, #RRGGBB, or #RRGGBBAA format".to_string()),
    }
}

fn parse_hex_digit(c: char) -> Result<u8> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or_else(|| ArtError::Parse {
            message: format!("Invalid hex digit: {}", c),
            help: None,
        })
}

fn parse_hex_byte(s: &str) -> Result<u8> {
    u8::from_str_radix(s, 16).map_err(|_| ArtError::Parse {
        message: format!("Invalid hex byte: {}", s),
        help: None,
    })
}
