//! Rendering backends.
//!
//! Style generators draw through the [`Surface`] trait. The raster backend
//! realizes shapes as anti-aliased pixels through `vello_cpu`, the SVG
//! backend as elements in a document tree. Both receive identical geometry;
//! they differ only in how a shape is realized.

mod font;
mod glyph;
mod png;
mod raster;
mod svg;

pub use font::{LetterFont, OutlineFont};
pub use glyph::{BitmapFont, Glyph};
pub use png::{upscale, write_png};
pub use raster::RasterSurface;
pub use svg::{
    Definition, Document, Element, Paint, PathCommand, Stroke, SvgGroup, SvgSurface, Transform,
    BACKGROUND_GRADIENT_ID,
};

use crate::derive::Background;
use crate::error::Result;
use crate::types::Colour;

/// Height of a glyph's ink relative to its font size.
pub const GLYPH_INK_RATIO: f64 = 0.75;

/// A point in canvas coordinates (pixels, y down).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle spanning two corners.
    pub fn from_corners(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::new(x0.min(x1), y0.min(y1), (x1 - x0).abs(), (y1 - y0).abs())
    }

    /// A square cell.
    pub const fn square(x: f64, y: f64, size: f64) -> Self {
        Self::new(x, y, size, size)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn centre(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// An axis-aligned ellipse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
}

impl Ellipse {
    pub const fn new(cx: f64, cy: f64, rx: f64, ry: f64) -> Self {
        Self { cx, cy, rx, ry }
    }

    pub const fn circle(cx: f64, cy: f64, r: f64) -> Self {
        Self::new(cx, cy, r, r)
    }
}

/// A circular sector.
///
/// Angles are in degrees, measured clockwise on screen from the +x axis;
/// the sector runs from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pie {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub start: f64,
    pub end: f64,
}

/// Rotation about a pivot, in degrees clockwise on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub degrees: f64,
    pub pivot: Point,
}

/// A drawing group.
///
/// Groups structure the SVG output (`<g id=...>`). A rotation turns the
/// group's contents about the pivot; an opacity composites them as one
/// layer, so overlapping children do not darken where they meet.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub id: Option<String>,
    pub bounds: Rect,
    pub rotation: Option<Rotation>,
    /// Layer opacity in `0..1`; `None` is fully opaque.
    pub opacity: Option<f64>,
}

impl Group {
    /// A named, unrotated group.
    pub fn named(id: impl Into<String>, bounds: Rect) -> Self {
        Self {
            id: Some(id.into()),
            bounds,
            rotation: None,
            opacity: None,
        }
    }

    /// Composite the group at `opacity`. Values of 1 or more clear it.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = (opacity < 1.0).then_some(opacity.max(0.0));
        self
    }

    /// An anonymous group rotated about the centre of `bounds`.
    ///
    /// A zero angle yields no rotation at all.
    pub fn rotated(bounds: Rect, degrees: i32) -> Self {
        let rotation = (degrees != 0).then(|| Rotation {
            degrees: degrees as f64,
            pivot: bounds.centre(),
        });
        Self {
            id: None,
            bounds,
            rotation,
            opacity: None,
        }
    }
}

/// Drawing target for the style generators.
///
/// Calls must keep painter's order: later calls draw over earlier ones.
pub trait Surface {
    /// The finished artifact.
    type Output;

    /// Paint the background behind the whole canvas.
    ///
    /// `inset` is the margin at which the raster backend switches from the
    /// outer to the inner tone.
    fn fill_background(&mut self, background: Background, inset: f64);

    fn fill_rect(&mut self, rect: Rect, colour: Colour);

    fn fill_ellipse(&mut self, ellipse: Ellipse, colour: Colour);

    fn fill_polygon(&mut self, points: &[Point], colour: Colour);

    fn fill_pie(&mut self, pie: Pie, colour: Colour);

    /// Stroke an open polyline with round joins and caps.
    fn stroke_polyline(&mut self, points: &[Point], width: f64, colour: Colour);

    /// Draw a single glyph centred on `centre` at font size `size`.
    ///
    /// Ink is [`GLYPH_INK_RATIO`] of the font size tall.
    fn draw_glyph(&mut self, glyph: char, centre: Point, size: f64, colour: Colour);

    fn push_group(&mut self, group: Group);

    fn pop_group(&mut self);

    /// Finalize the artifact.
    fn finish(self) -> Result<Self::Output>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_from_corners_normalizes() {
        let r = Rect::from_corners(10.0, 8.0, 2.0, 4.0);
        assert_eq!(r, Rect::new(2.0, 4.0, 8.0, 4.0));
        assert_eq!(r.right(), 10.0);
        assert_eq!(r.bottom(), 8.0);
    }

    #[test]
    fn test_rotated_group_pivots_on_centre() {
        let group = Group::rotated(Rect::square(20.0, 40.0, 10.0), 45);
        let rotation = group.rotation.unwrap();
        assert_eq!(rotation.pivot, Point::new(25.0, 45.0));
        assert_eq!(rotation.degrees, 45.0);
    }

    #[test]
    fn test_zero_rotation_is_plain_group() {
        let group = Group::rotated(Rect::square(0.0, 0.0, 10.0), 0);
        assert!(group.rotation.is_none());
        assert!(group.opacity.is_none());
    }

    #[test]
    fn test_full_opacity_is_cleared() {
        let bounds = Rect::square(0.0, 0.0, 10.0);
        assert_eq!(Group::rotated(bounds, 0).with_opacity(1.0).opacity, None);
        assert_eq!(Group::rotated(bounds, 0).with_opacity(0.6).opacity, Some(0.6));
    }
}
