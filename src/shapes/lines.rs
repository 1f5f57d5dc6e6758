//! Linear motifs: stripes and wavy lines.

use std::f64::consts::PI;

use crate::derive::{random_alpha, ColourPair};
use crate::render::{Point, Rect, Surface};
use crate::sequencer::Sequencer;
use crate::types::Chaos;

use super::{Cell, Orientation, ORIENTATIONS};

/// Parallel bands across the cell, alternating colours.
pub(super) fn stripes<S: Surface>(
    surface: &mut S,
    cell: Cell,
    pair: ColourPair,
    chaos: Chaos,
    rng: &mut Sequencer,
) {
    let c = chaos.get();
    let s = cell.size;
    let count = rng.randint(3 + (c * 2.0) as i64, 7 + (c * 4.0) as i64);
    let orientation = *rng.choose(&ORIENTATIONS);
    let base = s / count as f64;

    for i in 0..count {
        let colour = if i % 2 == 0 || rng.chance(c * 0.3) {
            pair.foreground
        } else {
            pair.background
        };
        let colour = colour.with_alpha(colour.a.min(random_alpha(chaos, rng)));

        if colour == pair.background && rng.chance(c * 0.6) {
            continue;
        }

        let thickness = (base * rng.uniform(0.7 - c * 0.2, 1.3 + c * 0.2))
            .max(1.0)
            .trunc();
        let rect = match orientation {
            Orientation::Horizontal => {
                let top = (cell.y + i as f64 * base).trunc();
                Rect::new(cell.x, top, s, thickness)
            }
            Orientation::Vertical => {
                let left = (cell.x + i as f64 * base).trunc();
                Rect::new(left, cell.y, thickness, s)
            }
        };
        surface.fill_rect(rect, colour);
    }
}

/// Sinusoidal polylines across the cell.
pub(super) fn wavy_lines<S: Surface>(
    surface: &mut S,
    cell: Cell,
    pair: ColourPair,
    c: f64,
    rng: &mut Sequencer,
) {
    let s = cell.size;
    let count = rng.randint(2 + (c * 2.0) as i64, 5 + (c * 3.0) as i64);
    let orientation = *rng.choose(&ORIENTATIONS);
    let width = (s * rng.uniform(0.02, 0.05 + c * 0.05)).max(1.0).trunc();

    for i in 0..count {
        let amplitude = s * rng.uniform(0.05, 0.2 + c * 0.1);
        let frequency = rng.uniform(0.5, 2.0 + c);
        let segments = rng.randint(10, 20);
        let offset = s / (count + 1) as f64 * (i + 1) as f64;

        let mut points = Vec::with_capacity(segments as usize + 1);
        for j in 0..=segments {
            let along = s / segments as f64 * j as f64;
            let phase = rng.random() * c;
            let wave = amplitude * (j as f64 * PI * frequency / segments as f64 + phase).sin();

            let (mut px, mut py) = match orientation {
                Orientation::Horizontal => (cell.x + along, cell.y + offset + wave),
                Orientation::Vertical => (cell.x + offset + wave, cell.y + along),
            };
            px += (rng.random() - 0.5) * s * 0.01 * c;
            py += (rng.random() - 0.5) * s * 0.01 * c;
            points.push(Point::new(px.trunc(), py.trunc()));
        }

        if points.len() > 1 {
            surface.stroke_polyline(&points, width, pair.foreground);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::recorder::Op;
    use super::super::test_support::*;
    use crate::types::Style;

    #[test]
    fn test_stripes_without_chaos_alternate() {
        for seed in 0..20 {
            let ops = record(Style::Stripes, 0.0, seed);
            let bands: Vec<_> = ops[1..]
                .iter()
                .map(|op| match op {
                    Op::Rect(r, c) => (*r, *c),
                    other => panic!("unexpected {other:?}"),
                })
                .collect();
            assert!((3..=7).contains(&bands.len()));
            for (i, (rect, colour)) in bands.iter().enumerate() {
                assert_eq!(*colour, if i % 2 == 0 { FG } else { BG });
                assert!(rect.width >= 1.0 && rect.height >= 1.0);
                assert!(rect.width == 100.0 || rect.height == 100.0);
            }
        }
    }

    #[test]
    fn test_stripes_full_chaos_keeps_first_band() {
        for seed in 0..20 {
            let ops = record(Style::Stripes, 1.0, seed);
            let Op::Rect(_, colour) = &ops[1] else {
                panic!("expected a band");
            };
            assert!(colour.same_rgb(FG));
        }
    }

    #[test]
    fn test_wavy_lines_integer_points() {
        for seed in 0..10 {
            let ops = record(Style::WavyLines, 0.8, seed);
            let lines: Vec<_> = ops
                .iter()
                .filter_map(|op| match op {
                    Op::Polyline(points, width, _) => Some((points, *width)),
                    _ => None,
                })
                .collect();
            assert!((3..=7).contains(&lines.len()));
            for (points, width) in lines {
                assert!((11..=21).contains(&points.len()));
                assert!(width >= 2.0);
                assert!(points.iter().all(|p| p.x.fract() == 0.0 && p.y.fract() == 0.0));
            }
        }
    }
}
