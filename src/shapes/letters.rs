use crate::derive::{random_rotation, ColourPair};
use crate::render::{Point, Surface};
use crate::sequencer::Sequencer;

use super::{rotated, Cell, LETTER_GLYPHS};

/// Smallest font size a letter block is drawn at.
const MIN_FONT_SIZE: f64 = 10.0;

/// A single centred glyph, optionally rotated.
pub(super) fn letter_block<S: Surface>(
    surface: &mut S,
    cell: Cell,
    pair: ColourPair,
    c: f64,
    rng: &mut Sequencer,
) {
    let glyph = *rng.choose(LETTER_GLYPHS);
    let font_size = (cell.size * rng.uniform(0.6 - c * 0.1, 0.9 + c * 0.1))
        .trunc()
        .max(MIN_FONT_SIZE);
    let angle = random_rotation(c * 0.8, rng);

    let centre = Point::new(cell.centre_x(), cell.centre_y());
    rotated(surface, cell, angle, |surface| {
        surface.draw_glyph(glyph, centre, font_size, pair.foreground);
    });
}
