//! Round motifs: circle, opposite circles, concentric rings and dots.

use crate::derive::{random_alpha, ColourPair};
use crate::render::{Ellipse, Surface};
use crate::sequencer::Sequencer;
use crate::types::Chaos;

use super::Cell;

/// A centred disc, sometimes hollowed by a background-coloured inner disc
/// with an optional foreground dot in its middle.
pub(super) fn circle<S: Surface>(
    surface: &mut S,
    cell: Cell,
    pair: ColourPair,
    c: f64,
    rng: &mut Sequencer,
) {
    let (cx, cy) = (cell.centre_x(), cell.centre_y());
    let half = cell.size / 2.0;

    let r = half * rng.uniform(0.8 - c * 0.2, 1.0);
    surface.fill_ellipse(Ellipse::circle(cx, cy, r), pair.foreground);

    if rng.chance(0.3 + c * 0.3) {
        let inner = half * rng.uniform(0.2, 0.5);
        let hollow = pair.background.with_alpha(pair.foreground.a);
        surface.fill_ellipse(Ellipse::circle(cx, cy, inner), hollow);

        if rng.chance(c * 0.5) {
            surface.fill_ellipse(Ellipse::circle(cx, cy, inner * 0.5), pair.foreground);
        }
    }
}

/// Two discs on the cell's diagonal quarter points.
pub(super) fn opposite_circles<S: Surface>(
    surface: &mut S,
    cell: Cell,
    pair: ColourPair,
    rng: &mut Sequencer,
) {
    // A spread factor is drawn and discarded; the radius draw follows it.
    let _ = rng.uniform(0.4, 0.6);
    let q = cell.size / 4.0;
    let r = q * rng.uniform(0.8, 1.2);
    surface.fill_ellipse(
        Ellipse::circle(cell.x + q, cell.y + q, r),
        pair.foreground,
    );
    surface.fill_ellipse(
        Ellipse::circle(cell.x + 3.0 * q, cell.y + 3.0 * q, r),
        pair.foreground,
    );
}

/// Nested rings from the outside in, alternating foreground and background.
pub(super) fn concentric_circles<S: Surface>(
    surface: &mut S,
    cell: Cell,
    pair: ColourPair,
    chaos: Chaos,
    rng: &mut Sequencer,
) {
    let c = chaos.get();
    let s = cell.size;
    let count = rng.randint(2 + (c * 2.0) as i64, 5 + (c * 3.0) as i64);
    let max_r = s / 2.0 * rng.uniform(0.85, 1.0);

    let mut use_foreground = true;
    for i in (1..=count).rev() {
        let r = max_r * (i as f64 / count as f64);
        if r < 1.0 {
            continue;
        }

        let base = if use_foreground {
            pair.foreground
        } else {
            pair.background
        };
        let alpha = base.a.min(random_alpha(chaos, rng));
        let dx = (rng.random() - 0.5) * s * 0.05 * c;
        let dy = (rng.random() - 0.5) * s * 0.05 * c;

        surface.fill_ellipse(
            Ellipse::circle(cell.centre_x() + dx, cell.centre_y() + dy, r),
            base.with_alpha(alpha),
        );
        use_foreground = !use_foreground;
    }
}

/// A k-by-k lattice of small discs.
pub(super) fn dots<S: Surface>(
    surface: &mut S,
    cell: Cell,
    pair: ColourPair,
    c: f64,
    rng: &mut Sequencer,
) {
    let counts = [4, 9, 16, if c > 0.5 { 25 } else { 16 }];
    let k = match *rng.choose(&counts) {
        4 => 2,
        9 => 3,
        16 => 4,
        _ => 5,
    };
    let pitch = cell.size / k as f64;

    for i in 0..k {
        for j in 0..k {
            if rng.chance(c * 0.2) {
                continue;
            }
            let r = (pitch * rng.uniform(0.2, 0.4 + c * 0.1) / 2.0).max(1.0);
            let cx = cell.x + (i as f64 + 0.5) * pitch + (rng.random() - 0.5) * pitch * 0.2 * c;
            let cy = cell.y + (j as f64 + 0.5) * pitch + (rng.random() - 0.5) * pitch * 0.2 * c;
            surface.fill_ellipse(Ellipse::circle(cx, cy, r), pair.foreground);
        }
    }
}
