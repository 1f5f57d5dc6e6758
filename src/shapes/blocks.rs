//! Angular motifs: crosses, half and diagonal squares, quarter discs and
//! rotated primitives.

use crate::derive::{random_rotation, ColourPair};
use crate::render::{Ellipse, Pie, Point, Rect, Surface};
use crate::sequencer::Sequencer;

use super::{layered, Cell};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Primitive {
    Rect,
    Circle,
    Ellipse,
}

/// A plus or an X, optionally rotated.
pub(super) fn cross<S: Surface>(
    surface: &mut S,
    cell: Cell,
    pair: ColourPair,
    c: f64,
    rng: &mut Sequencer,
) {
    let s = cell.size;
    let is_plus = rng.random() < 0.5;
    let thickness = (s * rng.uniform(0.25 - c * 0.1, 0.4 + c * 0.1)).trunc();
    let angle = random_rotation(c / 2.0, rng);

    layered(surface, cell, angle, pair.foreground, |surface, ink| {
        if is_plus {
            let near = ((s - thickness) / 2.0).floor();
            let far = ((s + thickness) / 2.0).floor();
            surface.fill_rect(
                Rect::from_corners(cell.x, cell.y + near, cell.x + s, cell.y + far),
                ink,
            );
            surface.fill_rect(
                Rect::from_corners(cell.x + near, cell.y, cell.x + far, cell.y + s),
                ink,
            );
        } else {
            let width = (thickness * 0.8).trunc().max(1.0);
            let (x0, y0, x1, y1) = (cell.x, cell.y, cell.x + s, cell.y + s);
            surface.fill_polygon(
                &thick_segment(Point::new(x0, y0), Point::new(x1, y1), width),
                ink,
            );
            surface.fill_polygon(
                &thick_segment(Point::new(x1, y0), Point::new(x0, y1), width),
                ink,
            );
        }
    });
}

/// The quad covering a straight segment of the given width.
fn thick_segment(a: Point, b: Point, width: f64) -> [Point; 4] {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len = (dx * dx + dy * dy).sqrt().max(f64::EPSILON);
    let (nx, ny) = (-dy / len * width / 2.0, dx / len * width / 2.0);
    [
        Point::new(a.x + nx, a.y + ny),
        Point::new(b.x + nx, b.y + ny),
        Point::new(b.x - nx, b.y - ny),
        Point::new(a.x - nx, a.y - ny),
    ]
}

/// One half of the cell in the foreground.
pub(super) fn half_square<S: Surface>(
    surface: &mut S,
    cell: Cell,
    pair: ColourPair,
    rng: &mut Sequencer,
) {
    let (x, y, s) = (cell.x, cell.y, cell.size);
    let half = s / 2.0;
    let rect = match rng.choose(&[Side::Top, Side::Right, Side::Bottom, Side::Left]) {
        Side::Top => Rect::new(x, y, s, half),
        Side::Right => Rect::new(x + half, y, half, s),
        Side::Bottom => Rect::new(x, y + half, s, half),
        Side::Left => Rect::new(x, y, half, s),
    };
    surface.fill_rect(rect, pair.foreground);
}

/// A triangle on one side of a diagonal, one vertex sometimes nudged.
pub(super) fn diagonal_square<S: Surface>(
    surface: &mut S,
    cell: Cell,
    pair: ColourPair,
    c: f64,
    rng: &mut Sequencer,
) {
    let (x, y, s) = (cell.x, cell.y, cell.size);
    let mut points = if rng.random() < 0.5 {
        [
            Point::new(x, y),
            Point::new(x + s, y + s),
            Point::new(x, y + s),
        ]
    } else {
        [
            Point::new(x + s, y),
            Point::new(x + s, y + s),
            Point::new(x, y),
        ]
    };

    if rng.chance(c * 0.5) {
        let vertex = rng.randint(0, 2) as usize;
        points[vertex].x += (rng.random() - 0.5) * s * 0.1 * c;
        points[vertex].y += (rng.random() - 0.5) * s * 0.1 * c;
    }

    surface.fill_polygon(&points, pair.foreground);
}

/// A quarter disc of radius `size` anchored in one corner.
pub(super) fn quarter_circle<S: Surface>(
    surface: &mut S,
    cell: Cell,
    pair: ColourPair,
    rng: &mut Sequencer,
) {
    let (x, y, s) = (cell.x, cell.y, cell.size);
    let corners = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];
    let (cx, cy, start) = match rng.choose(&corners) {
        Corner::TopLeft => (x, y, 0.0),
        Corner::TopRight => (x + s, y, 90.0),
        Corner::BottomRight => (x + s, y + s, 180.0),
        Corner::BottomLeft => (x, y + s, 270.0),
    };
    surface.fill_pie(
        Pie {
            cx,
            cy,
            radius: s,
            start,
            end: start + 90.0,
        },
        pair.foreground,
    );
}

/// A centred rectangle, circle or ellipse, optionally rotated.
pub(super) fn rotated_shape<S: Surface>(
    surface: &mut S,
    cell: Cell,
    pair: ColourPair,
    c: f64,
    rng: &mut Sequencer,
) {
    let s = cell.size;
    let primitive = *rng.choose(&[Primitive::Rect, Primitive::Circle, Primitive::Ellipse]);
    let inner = s * rng.uniform(0.5 - c * 0.1, 0.8 + c * 0.1);
    let (cx, cy) = (cell.centre_x(), cell.centre_y());

    let (rx, ry) = match primitive {
        Primitive::Rect => {
            let w = (inner * rng.uniform(0.7, 1.3)).min(s * 0.9).max(1.0);
            let h = (inner * rng.uniform(0.7, 1.3)).min(s * 0.9).max(1.0);
            (w / 2.0, h / 2.0)
        }
        Primitive::Circle | Primitive::Ellipse => {
            let hi = if primitive == Primitive::Ellipse { 1.3 } else { 1.0 };
            let rx = (inner / 2.0 * rng.uniform(0.7, hi)).max(1.0);
            let ry = (inner / 2.0 * rng.uniform(0.7, hi)).max(1.0);
            (rx, ry)
        }
    };

    let angle = random_rotation(c * 1.5, rng);
    layered(surface, cell, angle, pair.foreground, |surface, ink| match primitive {
        Primitive::Rect => {
            surface.fill_rect(Rect::new(cx - rx, cy - ry, rx * 2.0, ry * 2.0), ink)
        }
        Primitive::Circle | Primitive::Ellipse => {
            surface.fill_ellipse(Ellipse::new(cx, cy, rx, ry), ink)
        }
    });
}

#[cfg(test)]
mod tests {
    use super::super::recorder::{Op, Recorder};
    use super::super::test_support::*;
    use super::*;
    use crate::types::Style;

    #[test]
    fn test_cross_plus_is_centred_bars() {
        let ops = (0..50)
            .map(|seed| record(Style::Cross, 0.0, seed))
            .find(|ops| matches!(ops[1], Op::Rect(..)))
            .unwrap();
        let (Op::Rect(h, _), Op::Rect(v, _)) = (&ops[1], &ops[2]) else {
            panic!("expected two bars");
        };
        assert_eq!(h.width, 100.0);
        assert_eq!(v.height, 100.0);
        assert_eq!(h.height, v.width);
        assert!((25.0..=40.0).contains(&h.height));
    }

    #[test]
    fn test_cross_x_arms_meet_corners() {
        let ops = (0..50)
            .map(|seed| record(Style::Cross, 0.0, seed))
            .find(|ops| matches!(ops[1], Op::Polygon(..)))
            .unwrap();
        let arms: Vec<_> = ops
            .iter()
            .filter(|op| matches!(op, Op::Polygon(..)))
            .collect();
        assert_eq!(arms.len(), 2);
    }

    #[test]
    fn test_thick_segment_width() {
        let quad = thick_segment(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 4.0);
        assert_eq!(quad[0], Point::new(0.0, 2.0));
        assert_eq!(quad[2], Point::new(10.0, -2.0));
    }

    #[test]
    fn test_half_square_covers_half() {
        for seed in 0..20 {
            let ops = record(Style::HalfSquare, 0.5, seed);
            let Op::Rect(rect, colour) = &ops[1] else {
                panic!("expected rect");
            };
            assert_eq!(*colour, FG);
            assert_eq!(rect.width * rect.height, 5000.0);
        }
    }

    #[test]
    fn test_diagonal_without_chaos_uses_cell_corners() {
        for seed in 0..20 {
            let ops = record(Style::DiagonalSquare, 0.0, seed);
            let Op::Polygon(points, _) = &ops[1] else {
                panic!("expected polygon");
            };
            for p in points {
                assert!(p.x == 100.0 || p.x == 200.0);
                assert!(p.y == 200.0 || p.y == 300.0);
            }
        }
    }

    #[test]
    fn test_quarter_circle_anchored_in_corner() {
        for seed in 0..20 {
            let ops = record(Style::QuarterCircle, 0.0, seed);
            let Op::Pie(pie, _) = &ops[1] else {
                panic!("expected pie");
            };
            assert_eq!(pie.radius, 100.0);
            assert_eq!(pie.end - pie.start, 90.0);
            assert!(pie.cx == 100.0 || pie.cx == 200.0);
            assert!(pie.cy == 200.0 || pie.cy == 300.0);
            // The sector opens into the cell.
            let mid = (pie.start + 45.0).to_radians();
            let inside_x = pie.cx + mid.cos() * 10.0;
            let inside_y = pie.cy + mid.sin() * 10.0;
            assert!((100.0..=200.0).contains(&inside_x));
            assert!((200.0..=300.0).contains(&inside_y));
        }
    }

    #[test]
    fn test_translucent_cross_fades_as_one_group() {
        let faded = ColourPair {
            foreground: FG.with_alpha(153),
            background: BG,
        };
        for seed in 0..20 {
            let mut surface = Recorder::default();
            let mut rng = Sequencer::seeded(seed);
            cross(&mut surface, Cell::new(100, 200, 100), faded, 0.0, &mut rng);

            let Op::Push(group) = &surface.ops[0] else {
                panic!("expected a group around the cross");
            };
            assert_eq!(group.opacity, Some(0.6));
            assert!(surface.ops[1..surface.ops.len() - 1].iter().all(|op| match op {
                Op::Rect(_, c) | Op::Polygon(_, c) => *c == FG,
                _ => false,
            }));
            assert_eq!(surface.ops.last(), Some(&Op::Pop));
        }
    }

    #[test]
    fn test_opaque_unrotated_shape_needs_no_group() {
        let ops = record(Style::RotatedShape, 0.0, 1);
        assert!(!ops.iter().any(|op| matches!(op, Op::Push(_))));
    }

    #[test]
    fn test_rotated_shape_fits_cell() {
        for seed in 0..50 {
            for op in record(Style::RotatedShape, 1.0, seed) {
                match op {
                    Op::Rect(r, c) if c == FG => {
                        assert!(r.width <= 90.0 && r.height <= 90.0);
                        assert!(r.width >= 1.0 && r.height >= 1.0);
                    }
                    Op::Ellipse(e, _) => {
                        assert!(e.rx >= 1.0 && e.ry >= 1.0);
                        assert!(e.rx <= 100.0 * 0.9 / 2.0 * 1.3);
                    }
                    _ => {}
                }
            }
        }
    }
}
