//! Colour derivation: background tones, per-cell colour pairs, random
//! alpha and discrete rotation angles.

use palette::{Hsl, IntoColor, Srgb};

use crate::sequencer::Sequencer;
use crate::types::{Chaos, Colour, Palette};

/// Background used when a palette has fewer than two valid colours.
pub const FALLBACK_BACKGROUND: Background = Background {
    inner: Colour::rgb(0xEE, 0xEE, 0xEE),
    outer: Colour::rgb(0xDD, 0xDD, 0xDD),
};

/// Foreground used when a palette has no valid colours.
pub const FALLBACK_FOREGROUND: Colour = Colour::rgb(0x33, 0x33, 0x33);

/// Cell background used when a palette has no valid colours.
pub const FALLBACK_CELL_BACKGROUND: Colour = Colour::rgb(0xCC, 0xCC, 0xCC);

/// Angles available to rotated motifs, in degrees (positive is clockwise).
pub const ROTATION_ANGLES: [i32; 12] = [0, 15, 30, 45, 60, 75, 90, -15, -30, -45, -60, -75];

/// Light/dark pair used behind the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Background {
    pub inner: Colour,
    pub outer: Colour,
}

/// Foreground and background of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColourPair {
    pub foreground: Colour,
    pub background: Colour,
}

/// Derive the background tones from the first two valid palette colours.
///
/// Repeated entries count, so `["#808080", "#808080"]` mixes grey with grey.
///
/// The colours are averaged, desaturated by 0.1, then lightened and
/// darkened by 0.1 in HSL space. Channels are truncated after each
/// conversion back to RGB.
pub fn derive_background(palette: &Palette) -> Background {
    let colours = palette.valid_colours();
    let [first, second, ..] = colours.as_slice() else {
        return FALLBACK_BACKGROUND;
    };

    let mixed = Colour::rgb(
        average(first.r, second.r),
        average(first.g, second.g),
        average(first.b, second.b),
    );

    let mut hsl = to_hsl(mixed);
    hsl.saturation = (hsl.saturation - 0.1).max(0.0);
    let desaturated = from_hsl(hsl);

    let base = to_hsl(desaturated);
    let mut light = base;
    light.lightness = (base.lightness + 0.1).min(1.0);
    let mut dark = base;
    dark.lightness = (base.lightness - 0.1).max(0.0);

    Background {
        inner: from_hsl(light),
        outer: from_hsl(dark),
    }
}

/// Pick a cell's colour pair from the valid palette colours.
///
/// Draw order: the foreground alpha, the background (over every valid
/// entry, repeats included), then the foreground from the colours whose
/// RGB differs from the background. With no such colour the first valid
/// entry is reused without a draw.
pub fn pick_colour_pair(colours: &[Colour], chaos: Chaos, rng: &mut Sequencer) -> ColourPair {
    let alpha = random_alpha(chaos, rng);

    let Some(&first) = colours.first() else {
        return ColourPair {
            foreground: FALLBACK_FOREGROUND.with_alpha(alpha),
            background: FALLBACK_CELL_BACKGROUND,
        };
    };

    let background = *rng.choose(colours);
    let remaining: Vec<Colour> = colours
        .iter()
        .copied()
        .filter(|c| !c.same_rgb(background))
        .collect();
    let foreground = if remaining.is_empty() {
        first
    } else {
        *rng.choose(&remaining)
    };

    ColourPair {
        foreground: foreground.with_alpha(alpha),
        background: background.with_alpha(255),
    }
}

/// Alpha for a chaotic fill: mostly opaque, occasionally 150..=240.
pub fn random_alpha(chaos: Chaos, rng: &mut Sequencer) -> u8 {
    if rng.chance(chaos.get() * 0.5) {
        rng.randint(150, 240) as u8
    } else {
        255
    }
}

/// A discrete rotation, applied with probability `probability`.
pub fn random_rotation(probability: f64, rng: &mut Sequencer) -> i32 {
    if rng.chance(probability) {
        *rng.choose(&ROTATION_ANGLES)
    } else {
        0
    }
}

fn average(a: u8, b: u8) -> u8 {
    ((a as u16 + b as u16) / 2) as u8
}

fn to_hsl(colour: Colour) -> Hsl {
    let rgb: Srgb<f32> = Srgb::new(
        colour.r as f32 / 255.0,
        colour.g as f32 / 255.0,
        colour.b as f32 / 255.0,
    );
    rgb.into_color()
}

fn from_hsl(hsl: Hsl) -> Colour {
    let rgb: Srgb<f32> = hsl.into_color();
    Colour::rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_fallback_for_single_colour() {
        let palette = Palette::new(["#FF0000", "oops"]);
        assert_eq!(derive_background(&palette), FALLBACK_BACKGROUND);
        assert_eq!(FALLBACK_BACKGROUND.inner.to_string(), "#EEEEEE");
        assert_eq!(FALLBACK_BACKGROUND.outer.to_string(), "#DDDDDD");
    }

    #[test]
    fn test_background_grey_mix_stays_grey() {
        // Greys have zero saturation, so only lightness moves.
        let palette = Palette::new(["#808080", "#000000"]);
        let bg = derive_background(&palette);
        assert_eq!(bg.inner.r, bg.inner.g);
        assert_eq!(bg.inner.g, bg.inner.b);
        assert_eq!(bg.outer.r, bg.outer.b);
        assert!(bg.inner.r > bg.outer.r);
    }

    #[test]
    fn test_background_repeated_entry_mixes_with_itself() {
        let repeated = derive_background(&Palette::new(["#808080", "#808080", "#000000"]));
        assert_ne!(repeated, FALLBACK_BACKGROUND);

        // Entries 0 and 1 are both #808080, so the trailing black is ignored.
        let alone = derive_background(&Palette::new(["#808080", "#808080"]));
        assert_eq!(repeated, alone);
        assert_ne!(repeated, derive_background(&Palette::new(["#808080", "#000000"])));
    }

    #[test]
    fn test_background_light_and_dark_straddle_mix() {
        let palette = Palette::new(["#FF6B6B", "#FFD166"]);
        let bg = derive_background(&palette);
        let lum = |c: Colour| c.r as u32 + c.g as u32 + c.b as u32;
        assert!(lum(bg.inner) > lum(bg.outer));
        assert!(bg.inner.is_opaque() && bg.outer.is_opaque());
    }

    #[test]
    fn test_colour_pair_distinct_for_any_chaos() {
        let colours = Palette::new(["#FF6B6B", "#FFD166", "#06D6A0"]).valid_colours();
        let mut rng = Sequencer::seeded(5);
        for step in 0..=10 {
            let chaos = Chaos::new(step as f64 / 10.0);
            for _ in 0..50 {
                let pair = pick_colour_pair(&colours, chaos, &mut rng);
                assert!(!pair.foreground.same_rgb(pair.background));
                assert!(pair.background.is_opaque());
            }
        }
    }

    #[test]
    fn test_colour_pair_single_colour_repeats() {
        let colours = [Colour::rgb(1, 2, 3)];
        let mut rng = Sequencer::seeded(5);
        let pair = pick_colour_pair(&colours, Chaos::new(0.0), &mut rng);
        assert!(pair.foreground.same_rgb(pair.background));
    }

    #[test]
    fn test_colour_pair_same_rgb_entries_reuse_first() {
        // Both entries are white, so no distinct foreground exists.
        let colours = Palette::new(["#FFF", "#FFFFFF"]).valid_colours();
        assert_eq!(colours.len(), 2);
        let mut rng = Sequencer::seeded(9);
        let pair = pick_colour_pair(&colours, Chaos::new(0.0), &mut rng);
        assert_eq!(pair.foreground, Colour::WHITE);
        assert_eq!(pair.background, Colour::WHITE);
    }

    #[test]
    fn test_colour_pair_draws_alpha_first() {
        let colours = Palette::new(["#FF6B6B", "#FFD166", "#06D6A0", "#FF6B6B"]).valid_colours();
        for seed in 0..20 {
            let chaos = Chaos::new(1.0);
            let mut rng = Sequencer::seeded(seed);
            let pair = pick_colour_pair(&colours, chaos, &mut rng);

            let mut replay = Sequencer::seeded(seed);
            let alpha = random_alpha(chaos, &mut replay);
            let background = *replay.choose(&colours);
            let remaining: Vec<Colour> = colours
                .iter()
                .copied()
                .filter(|c| !c.same_rgb(background))
                .collect();
            let foreground = *replay.choose(&remaining);

            assert_eq!(pair.background, background);
            assert_eq!(pair.foreground, foreground.with_alpha(alpha));
            assert_eq!(rng.random(), replay.random());
        }
    }

    #[test]
    fn test_colour_pair_empty_palette_draws_alpha() {
        let mut rng = Sequencer::seeded(21);
        let mut replay = Sequencer::seeded(21);
        let pair = pick_colour_pair(&[], Chaos::new(1.0), &mut rng);
        let alpha = random_alpha(Chaos::new(1.0), &mut replay);
        assert_eq!(pair.foreground, FALLBACK_FOREGROUND.with_alpha(alpha));
        assert_eq!(rng.random(), replay.random());
    }

    #[test]
    fn test_colour_pair_empty_palette_fallback() {
        let mut rng = Sequencer::seeded(5);
        let pair = pick_colour_pair(&[], Chaos::new(0.0), &mut rng);
        assert_eq!(pair.foreground, FALLBACK_FOREGROUND);
        assert_eq!(pair.background, FALLBACK_CELL_BACKGROUND);
    }

    #[test]
    fn test_random_alpha_band() {
        let mut rng = Sequencer::seeded(13);
        assert_eq!(random_alpha(Chaos::new(0.0), &mut rng), 255);
        let mut translucent = 0;
        for _ in 0..500 {
            let a = random_alpha(Chaos::new(1.0), &mut rng);
            assert!(a == 255 || (150..=240).contains(&a));
            if a != 255 {
                translucent += 1;
            }
        }
        assert!(translucent > 0);
    }

    #[test]
    fn test_random_rotation_zero_probability() {
        let mut rng = Sequencer::seeded(17);
        for _ in 0..50 {
            assert_eq!(random_rotation(0.0, &mut rng), 0);
        }
        for _ in 0..50 {
            assert!(ROTATION_ANGLES.contains(&random_rotation(1.0, &mut rng)));
        }
    }
}
