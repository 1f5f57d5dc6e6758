//! The cell motif library.
//!
//! Every generator first fills its cell with the pair's background, then
//! draws its motif in the foreground. Generators differ only in geometry
//! and in the random draws they make; the draw order of each is fixed so a
//! seed reproduces the same artwork.

mod blocks;
mod circles;
mod letters;
mod lines;

use crate::derive::ColourPair;
use crate::render::{Group, Rect, Surface};
use crate::sequencer::Sequencer;
use crate::types::{Chaos, Colour, Style};

/// Characters a letter block may show.
pub const LETTER_GLYPHS: &[char] = &[
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '+', '-',
    '*', '/', '=', '#', '@', '&', '%', '$', '!', '?',
];

/// A square area of the canvas, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

impl Cell {
    pub fn new(x: u32, y: u32, size: u32) -> Self {
        Self {
            x: x as f64,
            y: y as f64,
            size: size as f64,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.x, self.y, self.size)
    }

    pub fn centre_x(&self) -> f64 {
        self.x + self.size / 2.0
    }

    pub fn centre_y(&self) -> f64 {
        self.y + self.size / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Orientation {
    Horizontal,
    Vertical,
}

const ORIENTATIONS: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];

/// Run `draw` inside a group rotated about the cell centre.
fn rotated<S: Surface>(surface: &mut S, cell: Cell, degrees: i32, draw: impl FnOnce(&mut S)) {
    if degrees == 0 {
        draw(surface);
        return;
    }
    surface.push_group(Group::rotated(cell.rect(), degrees));
    draw(surface);
    surface.pop_group();
}

/// Like [`rotated`], but the colour's alpha moves onto the group.
///
/// `draw` receives the colour made opaque, so a motif built from several
/// overlapping shapes fades as one.
fn layered<S: Surface>(
    surface: &mut S,
    cell: Cell,
    degrees: i32,
    colour: Colour,
    draw: impl FnOnce(&mut S, Colour),
) {
    if colour.is_opaque() {
        rotated(surface, cell, degrees, |surface| draw(surface, colour));
        return;
    }
    surface.push_group(Group::rotated(cell.rect(), degrees).with_opacity(colour.opacity()));
    draw(surface, colour.with_alpha(255));
    surface.pop_group();
}

/// Draw one cell in the given style.
pub fn draw_style<S: Surface>(
    style: Style,
    surface: &mut S,
    cell: Cell,
    pair: ColourPair,
    chaos: Chaos,
    rng: &mut Sequencer,
) {
    surface.fill_rect(cell.rect(), pair.background);

    let c = chaos.get();
    match style {
        Style::Circle => circles::circle(surface, cell, pair, c, rng),
        Style::OppositeCircles => circles::opposite_circles(surface, cell, pair, rng),
        Style::Cross => blocks::cross(surface, cell, pair, c, rng),
        Style::HalfSquare => blocks::half_square(surface, cell, pair, rng),
        Style::DiagonalSquare => blocks::diagonal_square(surface, cell, pair, c, rng),
        Style::QuarterCircle => blocks::quarter_circle(surface, cell, pair, rng),
        Style::Dots => circles::dots(surface, cell, pair, c, rng),
        Style::LetterBlock => letters::letter_block(surface, cell, pair, c, rng),
        Style::ConcentricCircles => circles::concentric_circles(surface, cell, pair, chaos, rng),
        Style::Stripes => lines::stripes(surface, cell, pair, chaos, rng),
        Style::RotatedShape => blocks::rotated_shape(surface, cell, pair, c, rng),
        Style::WavyLines => lines::wavy_lines(surface, cell, pair, c, rng),
    }
}

#[cfg(test)]
pub(crate) mod recorder {
    //! A surface that records calls instead of drawing.

    use crate::derive::Background;
    use crate::error::Result;
    use crate::render::{Ellipse, Group, Pie, Point, Rect, Surface};
    use crate::types::Colour;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Op {
        Background(Background, f64),
        Rect(Rect, Colour),
        Ellipse(Ellipse, Colour),
        Polygon(Vec<Point>, Colour),
        Pie(Pie, Colour),
        Polyline(Vec<Point>, f64, Colour),
        Glyph(char, Point, f64, Colour),
        Push(Group),
        Pop,
    }

    #[derive(Debug, Default)]
    pub struct Recorder {
        pub ops: Vec<Op>,
    }

    impl Surface for Recorder {
        type Output = Vec<Op>;

        fn fill_background(&mut self, background: Background, inset: f64) {
            self.ops.push(Op::Background(background, inset));
        }

        fn fill_rect(&mut self, rect: Rect, colour: Colour) {
            self.ops.push(Op::Rect(rect, colour));
        }

        fn fill_ellipse(&mut self, ellipse: Ellipse, colour: Colour) {
            self.ops.push(Op::Ellipse(ellipse, colour));
        }

        fn fill_polygon(&mut self, points: &[Point], colour: Colour) {
            self.ops.push(Op::Polygon(points.to_vec(), colour));
        }

        fn fill_pie(&mut self, pie: Pie, colour: Colour) {
            self.ops.push(Op::Pie(pie, colour));
        }

        fn stroke_polyline(&mut self, points: &[Point], width: f64, colour: Colour) {
            self.ops.push(Op::Polyline(points.to_vec(), width, colour));
        }

        fn draw_glyph(&mut self, glyph: char, centre: Point, size: f64, colour: Colour) {
            self.ops.push(Op::Glyph(glyph, centre, size, colour));
        }

        fn push_group(&mut self, group: Group) {
            self.ops.push(Op::Push(group));
        }

        fn pop_group(&mut self) {
            self.ops.push(Op::Pop);
        }

        fn finish(self) -> Result<Vec<Op>> {
            Ok(self.ops)
        }
    }
}
