//! Outline fonts for letter blocks.
//!
//! TrueType and OpenType files are shaped with `parley` and drawn through
//! `vello_cpu` glyph runs. Bitmap fonts remain the fallback for any glyph
//! an outline font cannot supply.

use std::borrow::Cow;
use std::fmt;
use std::path::Path;

use parley::layout::PositionedLayoutItem;
use parley::style::{FontStack, StyleProperty};

use crate::error::{ArtError, Result};

use super::glyph::BitmapFont;

/// Size used when checking coverage; any positive size shapes the same ids.
const COVERAGE_SIZE: f32 = 32.0;

/// A single character shaped at a given size.
///
/// Glyph positions are relative to the top-left of the layout box.
#[derive(Debug, Clone)]
pub(crate) struct ShapedGlyph {
    pub glyphs: Vec<vello_cpu::Glyph>,
    pub font_size: f32,
    pub width: f64,
    pub height: f64,
}

/// A TrueType or OpenType font.
pub struct OutlineFont {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    family: String,
    data: vello_cpu::peniko::FontData,
}

impl fmt::Debug for OutlineFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutlineFont")
            .field("family", &self.family)
            .finish_non_exhaustive()
    }
}

impl OutlineFont {
    /// Register the font in `bytes` (the first face of a collection).
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| ArtError::Parse {
            message: "no font faces found in font data".to_string(),
            help: Some("letter fonts are .ttf/.otf files or .yaml bitmap fonts".to_string()),
        })?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ArtError::Parse {
                message: "font family has no name".to_string(),
                help: None,
            })?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
            data: vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0),
        })
    }

    /// Load a font file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| ArtError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_bytes(bytes).map_err(|e| match e {
            ArtError::Parse { message, help } => ArtError::Parse {
                message: format!("{}: {}", path.display(), message),
                help,
            },
            other => other,
        })
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub(crate) fn data(&self) -> &vello_cpu::peniko::FontData {
        &self.data
    }

    /// Shape `c` at `size` pixels. `None` when the font has no glyph for it.
    pub(crate) fn shape(&mut self, c: char, size: f32) -> Option<ShapedGlyph> {
        let mut buf = [0u8; 4];
        let text: &str = c.encode_utf8(&mut buf);

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(StyleProperty::FontStack(FontStack::Source(Cow::Owned(
            self.family.clone(),
        ))));
        builder.push_default(StyleProperty::FontSize(size));
        let mut layout = builder.build(text);
        layout.break_all_lines(None);

        let mut glyphs = Vec::new();
        let mut font_size = size;
        for line in layout.lines() {
            for item in line.items() {
                let PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                font_size = run.run().font_size();
                glyphs.extend(run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                }));
            }
        }

        // Glyph 0 is .notdef.
        if glyphs.is_empty() || glyphs.iter().any(|g| g.id == 0) {
            return None;
        }
        Some(ShapedGlyph {
            glyphs,
            font_size,
            width: layout.width() as f64,
            height: layout.height() as f64,
        })
    }

    /// Characters from `charset` this font cannot draw.
    pub fn missing(&mut self, charset: &[char]) -> Vec<char> {
        charset
            .iter()
            .copied()
            .filter(|&c| self.shape(c, COVERAGE_SIZE).is_none())
            .collect()
    }
}

/// The font letter blocks are drawn with.
#[derive(Debug)]
pub enum LetterFont {
    Bitmap(BitmapFont),
    Outline(OutlineFont),
}

impl LetterFont {
    /// Load a font, picking the format by extension.
    ///
    /// `.yaml` and `.yml` files are bitmap fonts; anything else is read as
    /// TrueType/OpenType.
    pub fn load(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("yaml" | "yml") => BitmapFont::load(path).map(Self::Bitmap),
            _ => OutlineFont::load(path).map(Self::Outline),
        }
    }

    /// Characters from `charset` this font does not cover.
    pub fn missing(&mut self, charset: &[char]) -> Vec<char> {
        match self {
            Self::Bitmap(font) => font.missing(charset),
            Self::Outline(font) => font.missing(charset),
        }
    }

    /// Short description for status output.
    pub fn describe(&self) -> String {
        match self {
            Self::Bitmap(font) => format!("bitmap font, {} glyphs", font.len()),
            Self::Outline(font) => format!("outline font '{}'", font.family()),
        }
    }
}

impl Default for LetterFont {
    fn default() -> Self {
        Self::Bitmap(BitmapFont::builtin())
    }
}

impl From<BitmapFont> for LetterFont {
    fn from(font: BitmapFont) -> Self {
        Self::Bitmap(font)
    }
}

impl From<OutlineFont> for LetterFont {
    fn from(font: OutlineFont) -> Self {
        Self::Outline(font)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Common locations of a TrueType font on CI machines and desktops.
    const SYSTEM_FONTS: &[&str] = &[
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
        "/Library/Fonts/Arial.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ];

    /// The first system font that loads, if any.
    pub(crate) fn system_font() -> Option<OutlineFont> {
        SYSTEM_FONTS
            .iter()
            .map(Path::new)
            .filter(|p| p.exists())
            .find_map(|p| OutlineFont::load(p).ok())
    }

    #[test]
    fn test_yaml_extension_loads_bitmap_font() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.YML");
        std::fs::write(&path, "A:\n  - \"#\"\n").unwrap();

        let mut font = LetterFont::load(&path).unwrap();
        assert!(matches!(font, LetterFont::Bitmap(_)));
        assert_eq!(font.missing(&['A', 'B']), ['B']);
    }

    #[test]
    fn test_missing_font_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = LetterFont::load(&dir.path().join("absent.ttf")).unwrap_err();
        assert!(matches!(err, ArtError::Io { .. }));
    }

    #[test]
    fn test_garbage_font_bytes_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"definitely not a font").unwrap();

        let err = LetterFont::load(&path).unwrap_err();
        assert!(matches!(err, ArtError::Parse { .. }));
        assert!(err.to_string().contains("broken.ttf"));
    }

    #[test]
    fn test_outline_font_shapes_letters() {
        let Some(mut font) = system_font() else {
            return;
        };
        let shaped = font.shape('A', 40.0).unwrap();
        assert_eq!(shaped.glyphs.len(), 1);
        assert!(shaped.width > 0.0 && shaped.height > 0.0);
        assert!(font.missing(&['A', 'Z', '0']).is_empty());
    }
}
