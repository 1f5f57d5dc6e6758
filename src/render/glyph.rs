//! Bitmap fonts for letter blocks.
//!
//! Glyphs are small on/off grids drawn as filled squares. The built-in set
//! is the fallback whenever an outline font is missing or lacks a glyph.
//! Custom bitmap fonts are YAML maps from a single character to its rows,
//! `#` for ink and `.` for blank:
//!
//! ```yaml
//! A:
//!   - ".#."
//!   - "#.#"
//!   - "###"
//! "7":
//!   - "###"
//!   - "..#"
//!   - ".#."
//! ```
//!
//! Digit keys must be quoted so YAML reads them as strings.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::error::{ArtError, Result};

/// A single glyph bitmap (row-major).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    width: usize,
    height: usize,
    bits: Vec<bool>,
}

impl Glyph {
    /// Parse glyph rows. Rows must be non-empty and equally wide.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let width = rows.first().map_or(0, |r| r.as_ref().chars().count());
        if width == 0 {
            return Err(ArtError::Parse {
                message: "glyph has no pixels".to_string(),
                help: Some("give each glyph at least one row of '#' and '.'".to_string()),
            });
        }

        let mut bits = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() != width {
                return Err(ArtError::Parse {
                    message: format!(
                        "glyph row {} is {} wide, expected {}",
                        y + 1,
                        row.chars().count(),
                        width
                    ),
                    help: None,
                });
            }
            for c in row.chars() {
                match c {
                    '#' => bits.push(true),
                    '.' | ' ' => bits.push(false),
                    other => {
                        return Err(ArtError::Parse {
                            message: format!("unexpected '{}' in glyph row {}", other, y + 1),
                            help: Some("use '#' for ink and '.' for blank".to_string()),
                        })
                    }
                }
            }
        }

        Ok(Self {
            width,
            height: rows.len(),
            bits,
        })
    }

    fn from_static(rows: &[&str; 7]) -> Self {
        Self {
            width: 5,
            height: rows.len(),
            bits: rows
                .iter()
                .flat_map(|row| row.bytes().map(|b| b == b'#'))
                .collect(),
        }
    }

    /// A filled box, drawn for characters no font knows.
    fn tofu() -> Self {
        Self {
            width: 5,
            height: 7,
            bits: vec![true; 35],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_set(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.bits[y * self.width + x]
    }

    /// Inked cells as `(x, y)` pairs.
    pub fn ink(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| (x, y)))
            .filter(|&(x, y)| self.is_set(x, y))
    }
}

/// A character to glyph mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitmapFont {
    glyphs: HashMap<char, Glyph>,
    tofu: Glyph,
}

impl BitmapFont {
    /// The built-in 5x7 font covering the letter block charset.
    pub fn builtin() -> Self {
        let glyphs = BUILTIN
            .iter()
            .map(|(c, rows)| (*c, Glyph::from_static(rows)))
            .collect();
        Self {
            glyphs,
            tofu: Glyph::tofu(),
        }
    }

    /// Parse a YAML font definition.
    pub fn parse(source: &str) -> Result<Self> {
        let raw: BTreeMap<String, Vec<String>> =
            serde_yaml::from_str(source).map_err(|e| ArtError::Parse {
                message: format!("Invalid font: {}", e),
                help: Some("a font maps single characters to lists of rows".to_string()),
            })?;

        let mut glyphs = HashMap::with_capacity(raw.len());
        for (key, rows) in raw {
            let mut chars = key.chars();
            let (Some(c), None) = (chars.next(), chars.next()) else {
                return Err(ArtError::Parse {
                    message: format!("font key '{}' is not a single character", key),
                    help: None,
                });
            };
            let glyph = Glyph::from_rows(&rows).map_err(|e| ArtError::Parse {
                message: format!("glyph '{}': {}", c, e),
                help: None,
            })?;
            glyphs.insert(c, glyph);
        }

        Ok(Self {
            glyphs,
            tofu: Glyph::tofu(),
        })
    }

    /// Load a YAML font definition from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| ArtError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&source)
    }

    /// Characters from `charset` this font does not define.
    pub fn missing(&self, charset: &[char]) -> Vec<char> {
        charset
            .iter()
            .copied()
            .filter(|c| !self.glyphs.contains_key(c))
            .collect()
    }

    /// Fill gaps in this font with glyphs from `fallback`.
    pub fn with_fallback(mut self, fallback: &BitmapFont) -> Self {
        for (c, glyph) in &fallback.glyphs {
            self.glyphs.entry(*c).or_insert_with(|| glyph.clone());
        }
        self
    }

    pub fn get(&self, c: char) -> Option<&Glyph> {
        self.glyphs.get(&c)
    }

    /// The glyph for `c`, or a filled box when the font lacks it.
    pub fn glyph_or_tofu(&self, c: char) -> &Glyph {
        self.glyphs.get(&c).unwrap_or(&self.tofu)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl Default for BitmapFont {
    fn default() -> Self {
        Self::builtin()
    }
}

#[rustfmt::skip]
const BUILTIN: &[(char, [&str; 7])] = &[
    ('A', [".###.", "#...#", "#...#", "#####", "#...#", "#...#", "#...#"]),
    ('B', ["####.", "#...#", "#...#", "####.", "#...#", "#...#", "####."]),
    ('C', [".###.", "#...#", "#....", "#....", "#....", "#...#", ".###."]),
    ('D', ["####.", "#...#", "#...#", "#...#", "#...#", "#...#", "####."]),
    ('E', ["#####", "#....", "#....", "####.", "#....", "#....", "#####"]),
    ('F', ["#####", "#....", "#....", "####.", "#....", "#....", "#...."]),
    ('G', [".###.", "#...#", "#....", "#.###", "#...#", "#...#", ".####"]),
    ('H', ["#...#", "#...#", "#...#", "#####", "#...#", "#...#", "#...#"]),
    ('I', [".###.", "..#..", "..#..", "..#..", "..#..", "..#..", ".###."]),
    ('J', ["..###", "...#.", "...#.", "...#.", "...#.", "#..#.", ".##.."]),
    ('K', ["#...#", "#..#.", "#.#..", "##...", "#.#..", "#..#.", "#...#"]),
    ('L', ["#....", "#....", "#....", "#....", "#....", "#....", "#####"]),
    ('M', ["#...#", "##.##", "#.#.#", "#.#.#", "#...#", "#...#", "#...#"]),
    ('N', ["#...#", "#...#", "##..#", "#.#.#", "#..##", "#...#", "#...#"]),
    ('O', [".###.", "#...#", "#...#", "#...#", "#...#", "#...#", ".###."]),
    ('P', ["####.", "#...#", "#...#", "####.", "#....", "#....", "#...."]),
    ('Q', [".###.", "#...#", "#...#", "#...#", "#.#.#", "#..#.", ".##.#"]),
    ('R', ["####.", "#...#", "#...#", "####.", "#.#..", "#..#.", "#...#"]),
    ('S', [".####", "#....", "#....", ".###.", "....#", "....#", "####."]),
    ('T', ["#####", "..#..", "..#..", "..#..", "..#..", "..#..", "..#.."]),
    ('U', ["#...#", "#...#", "#...#", "#...#", "#...#", "#...#", ".###."]),
    ('V', ["#...#", "#...#", "#...#", "#...#", "#...#", ".#.#.", "..#.."]),
    ('W', ["#...#", "#...#", "#...#", "#.#.#", "#.#.#", "#.#.#", ".#.#."]),
    ('X', ["#...#", "#...#", ".#.#.", "..#..", ".#.#.", "#...#", "#...#"]),
    ('Y', ["#...#", "#...#", ".#.#.", "..#..", "..#..", "..#..", "..#.."]),
    ('Z', ["#####", "....#", "...#.", "..#..", ".#...", "#....", "#####"]),
    ('0', [".###.", "#...#", "#..##", "#.#.#", "##..#", "#...#", ".###."]),
    ('1', ["..#..", ".##..", "..#..", "..#..", "..#..", "..#..", ".###."]),
    ('2', [".###.", "#...#", "....#", "...#.", "..#..", ".#...", "#####"]),
    ('3', ["#####", "...#.", "..#..", "...#.", "....#", "#...#", ".###."]),
    ('4', ["...#.", "..##.", ".#.#.", "#..#.", "#####", "...#.", "...#."]),
    ('5', ["#####", "#....", "####.", "....#", "....#", "#...#", ".###."]),
    ('6', ["..##.", ".#...", "#....", "####.", "#...#", "#...#", ".###."]),
    ('7', ["#####", "....#", "...#.", "..#..", ".#...", ".#...", ".#..."]),
    ('8', [".###.", "#...#", "#...#", ".###.", "#...#", "#...#", ".###."]),
    ('9', [".###.", "#...#", "#...#", ".####", "....#", "...#.", ".##.."]),
    ('+', [".....", "..#..", "..#..", "#####", "..#..", "..#..", "....."]),
    ('-', [".....", ".....", ".....", "#####", ".....", ".....", "....."]),
    ('*', [".....", "#.#.#", ".###.", "#####", ".###.", "#.#.#", "....."]),
    ('/', [".....", "....#", "...#.", "..#..", ".#...", "#....", "....."]),
    ('=', [".....", ".....", "#####", ".....", "#####", ".....", "....."]),
    ('#', [".#.#.", ".#.#.", "#####", ".#.#.", "#####", ".#.#.", ".#.#."]),
    ('@', [".###.", "#...#", "#.###", "#.#.#", "#.###", "#....", ".####"]),
    ('&', [".##..", "#..#.", "#.#..", ".#...", "#.#.#", "#..#.", ".##.#"]),
    ('%', ["##...", "##..#", "...#.", "..#..", ".#...", "#..##", "...##"]),
    ('$', ["..#..", ".####", "#.#..", ".###.", "..#.#", "####.", "..#.."]),
    ('!', ["..#..", "..#..", "..#..", "..#..", "..#..", ".....", "..#.."]),
    ('?', [".###.", "#...#", "....#", "...#.", "..#..", ".....", "..#.."]),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::LETTER_GLYPHS;

    #[test]
    fn test_builtin_covers_letter_glyphs() {
        let font = BitmapFont::builtin();
        assert_eq!(font.len(), 48);
        assert!(font.missing(LETTER_GLYPHS).is_empty());
    }

    #[test]
    fn test_builtin_glyphs_are_5x7() {
        for (c, rows) in BUILTIN {
            assert!(rows.iter().all(|r| r.len() == 5), "glyph {c}");
        }
        let a = BitmapFont::builtin();
        let a = a.get('A').unwrap();
        assert_eq!((a.width(), a.height()), (5, 7));
        assert!(!a.is_set(0, 0));
        assert!(a.is_set(1, 0));
    }

    #[test]
    fn test_parse_custom_font() {
        let font = BitmapFont::parse("A:\n  - \".#.\"\n  - \"#.#\"\n  - \"###\"\n").unwrap();
        let a = font.get('A').unwrap();
        assert_eq!((a.width(), a.height()), (3, 3));
        assert_eq!(a.ink().count(), 6);
        assert_eq!(font.missing(&['A', 'B']), vec!['B']);
    }

    #[test]
    fn test_parse_rejects_multi_char_key() {
        let err = BitmapFont::parse("AB:\n  - \"#\"\n").unwrap_err();
        assert!(err.to_string().contains("single character"));
    }

    #[test]
    fn test_parse_rejects_ragged_rows() {
        let err = BitmapFont::parse("A:\n  - \"##\"\n  - \"#\"\n").unwrap_err();
        assert!(err.to_string().contains("expected 2"));
    }

    #[test]
    fn test_fallback_fills_gaps_only() {
        let custom = BitmapFont::parse("A:\n  - \"#\"\n").unwrap();
        let font = custom.with_fallback(&BitmapFont::builtin());
        assert_eq!(font.get('A').unwrap().width(), 1);
        assert_eq!(font.get('B').unwrap().width(), 5);
        assert_eq!(font.len(), 48);
    }

    #[test]
    fn test_unknown_char_draws_tofu() {
        let font = BitmapFont::builtin();
        assert!(font.get('~').is_none());
        assert_eq!(font.glyph_or_tofu('~').ink().count(), 35);
    }
}
