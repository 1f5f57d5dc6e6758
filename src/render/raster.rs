//! Raster backend.
//!
//! Shapes become `kurbo` paths rendered by `vello_cpu`. Groups push their
//! rotation onto a transform stack (clockwise on screen, as in SVG) and
//! their opacity as a compositing layer. The finished pixmap is flattened
//! against white into an RGB image.

use image::{Rgb, RgbImage};
use vello_cpu::kurbo::{self, Affine, BezPath, CircleSegment, Shape};
use vello_cpu::peniko::Color;
use vello_cpu::{Pixmap, RenderContext};

use crate::derive::Background;
use crate::error::{ArtError, Result};
use crate::types::Colour;

use super::font::{LetterFont, OutlineFont};
use super::glyph::BitmapFont;
use super::{Ellipse, Group, Pie, Point, Rect, Surface, GLYPH_INK_RATIO};

/// Flattening tolerance for curves, in pixels.
const TOLERANCE: f64 = 0.1;

struct Layer {
    transform: Affine,
    faded: bool,
}

/// Pixel canvas implementing [`Surface`].
pub struct RasterSurface {
    width: u16,
    height: u16,
    ctx: RenderContext,
    layers: Vec<Layer>,
    bitmap: BitmapFont,
    outline: Option<OutlineFont>,
    unbalanced: bool,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::with_font(width, height, LetterFont::default())
    }

    /// A canvas drawing letter blocks with `font`.
    ///
    /// Glyphs the font lacks are drawn from the built-in bitmap font.
    pub fn with_font(width: u32, height: u32, font: LetterFont) -> Result<Self> {
        let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
            return Err(ArtError::canvas_too_large(width, height));
        };
        if w == 0 || h == 0 {
            return Err(ArtError::Validation {
                message: format!("a {}x{} canvas has no pixels", width, height),
                help: Some("rows, cols and cell size must all be at least 1".to_string()),
            });
        }

        let builtin = BitmapFont::builtin();
        let (bitmap, outline) = match font {
            LetterFont::Bitmap(font) => (font.with_fallback(&builtin), None),
            LetterFont::Outline(font) => (builtin, Some(font)),
        };

        Ok(Self {
            width: w,
            height: h,
            ctx: RenderContext::new(w, h),
            layers: Vec::new(),
            bitmap,
            outline,
            unbalanced: false,
        })
    }

    pub fn width(&self) -> u32 {
        self.width as u32
    }

    pub fn height(&self) -> u32 {
        self.height as u32
    }

    fn transform(&self) -> Affine {
        self.layers
            .last()
            .map_or(Affine::IDENTITY, |layer| layer.transform)
    }

    fn paint(&mut self, colour: Colour) {
        let transform = self.transform();
        self.ctx.set_transform(transform);
        self.ctx
            .set_paint(Color::from_rgba8(colour.r, colour.g, colour.b, colour.a));
    }

    fn fill(&mut self, path: &BezPath, colour: Colour) {
        if colour.a == 0 {
            return;
        }
        self.paint(colour);
        self.ctx.fill_path(path);
    }

    fn fill_box(&mut self, rect: Rect, colour: Colour) {
        if rect.width <= 0.0 || rect.height <= 0.0 || colour.a == 0 {
            return;
        }
        self.paint(colour);
        self.ctx.fill_rect(&to_kurbo(rect));
    }

    /// Draw `glyph` from the outline font. False when it has no such glyph.
    fn draw_outline_glyph(&mut self, glyph: char, centre: Point, size: f64, colour: Colour) -> bool {
        let base = self.transform();
        let Some(font) = self.outline.as_mut() else {
            return false;
        };
        let Some(shaped) = font.shape(glyph, size as f32) else {
            return false;
        };

        let origin = Affine::translate((
            centre.x - shaped.width / 2.0,
            centre.y - shaped.height / 2.0,
        ));
        self.ctx.set_transform(base * origin);
        self.ctx
            .set_paint(Color::from_rgba8(colour.r, colour.g, colour.b, colour.a));
        self.ctx
            .glyph_run(font.data())
            .font_size(shaped.font_size)
            .fill_glyphs(shaped.glyphs.into_iter());
        true
    }

    /// Draw `glyph` as bitmap squares, merged into one path so neighbouring
    /// squares leave no seams.
    fn draw_bitmap_glyph(&mut self, glyph: char, centre: Point, size: f64, colour: Colour) {
        let glyph = self.bitmap.glyph_or_tofu(glyph);
        if glyph.height() == 0 {
            return;
        }
        let ink = size * GLYPH_INK_RATIO;
        let px = ink / glyph.height() as f64;
        let left = centre.x - glyph.width() as f64 * px / 2.0;
        let top = centre.y - ink / 2.0;

        let mut path = BezPath::new();
        for (x, y) in glyph.ink() {
            let x0 = left + x as f64 * px;
            let y0 = top + y as f64 * px;
            for el in kurbo::Rect::new(x0, y0, x0 + px, y0 + px).path_elements(TOLERANCE) {
                path.push(el);
            }
        }
        self.fill(&path, colour);
    }
}

fn to_kurbo(rect: Rect) -> kurbo::Rect {
    kurbo::Rect::new(rect.x, rect.y, rect.right(), rect.bottom())
}

fn to_point(p: Point) -> kurbo::Point {
    kurbo::Point::new(p.x, p.y)
}

impl Surface for RasterSurface {
    type Output = RgbImage;

    fn fill_background(&mut self, background: Background, inset: f64) {
        let (w, h) = (self.width as f64, self.height as f64);
        self.fill_box(Rect::new(0.0, 0.0, w, h), background.outer);
        if w > 2.0 * inset && h > 2.0 * inset {
            self.fill_box(
                Rect::from_corners(inset, inset, w - inset, h - inset),
                background.inner,
            );
        }
    }

    fn fill_rect(&mut self, rect: Rect, colour: Colour) {
        self.fill_box(rect, colour);
    }

    fn fill_ellipse(&mut self, ellipse: Ellipse, colour: Colour) {
        let Ellipse { cx, cy, rx, ry } = ellipse;
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        let path = kurbo::Ellipse::new((cx, cy), (rx, ry), 0.0).to_path(TOLERANCE);
        self.fill(&path, colour);
    }

    fn fill_polygon(&mut self, points: &[Point], colour: Colour) {
        let [first, rest @ ..] = points else {
            return;
        };
        if rest.len() < 2 {
            return;
        }
        let mut path = BezPath::new();
        path.move_to(to_point(*first));
        for p in rest {
            path.line_to(to_point(*p));
        }
        path.close_path();
        self.fill(&path, colour);
    }

    fn fill_pie(&mut self, pie: Pie, colour: Colour) {
        if pie.radius <= 0.0 {
            return;
        }
        let sweep = pie.end - pie.start;
        if sweep >= 360.0 {
            self.fill_ellipse(Ellipse::circle(pie.cx, pie.cy, pie.radius), colour);
            return;
        }
        let path = CircleSegment::new(
            (pie.cx, pie.cy),
            pie.radius,
            0.0,
            pie.start.to_radians(),
            sweep.to_radians(),
        )
        .to_path(TOLERANCE);
        self.fill(&path, colour);
    }

    fn stroke_polyline(&mut self, points: &[Point], width: f64, colour: Colour) {
        let half = (width / 2.0).max(0.5);
        match points {
            [] => {}
            // A lone point strokes to nothing; its round cap is a dot.
            [p] => self.fill_ellipse(Ellipse::circle(p.x, p.y, half), colour),
            [first, rest @ ..] => {
                if colour.a == 0 {
                    return;
                }
                let mut path = BezPath::new();
                path.move_to(to_point(*first));
                for p in rest {
                    path.line_to(to_point(*p));
                }
                self.paint(colour);
                self.ctx.set_stroke(
                    kurbo::Stroke::new(half * 2.0)
                        .with_join(kurbo::Join::Round)
                        .with_caps(kurbo::Cap::Round),
                );
                self.ctx.stroke_path(&path);
            }
        }
    }

    fn draw_glyph(&mut self, glyph: char, centre: Point, size: f64, colour: Colour) {
        if size <= 0.0 || colour.a == 0 {
            return;
        }
        if !self.draw_outline_glyph(glyph, centre, size, colour) {
            self.draw_bitmap_glyph(glyph, centre, size, colour);
        }
    }

    fn push_group(&mut self, group: Group) {
        let mut transform = self.transform();
        if let Some(rotation) = group.rotation {
            transform = transform
                * Affine::rotate_about(rotation.degrees.to_radians(), to_point(rotation.pivot));
        }
        let faded = match group.opacity {
            Some(opacity) => {
                self.ctx.set_transform(Affine::IDENTITY);
                self.ctx.push_opacity_layer(opacity as f32);
                true
            }
            None => false,
        };
        self.layers.push(Layer { transform, faded });
    }

    fn pop_group(&mut self) {
        match self.layers.pop() {
            Some(layer) if layer.faded => self.ctx.pop_layer(),
            Some(_) => {}
            None => self.unbalanced = true,
        }
    }

    fn finish(mut self) -> Result<RgbImage> {
        if self.unbalanced || !self.layers.is_empty() {
            return Err(ArtError::unbalanced_groups());
        }

        self.ctx.flush();
        let mut pixmap = Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);

        // Premultiplied RGBA over white: c + (255 - a).
        let mut image = RgbImage::new(self.width as u32, self.height as u32);
        for (pixel, rgba) in image
            .pixels_mut()
            .zip(pixmap.data_as_u8_slice().chunks_exact(4))
        {
            let uncovered = 255 - rgba[3];
            *pixel = Rgb([
                rgba[0].saturating_add(uncovered),
                rgba[1].saturating_add(uncovered),
                rgba[2].saturating_add(uncovered),
            ]);
        }
        Ok(image)
    }
}
