//! Humanoid character sheets.
//!
//! Lays out simple block figures on a grid, each with a head, neck, torso,
//! arms and legs. The upper body of every figure sits in its own group and
//! gets a breathing animation appended to the document.

use serde::{Deserialize, Serialize};

use crate::error::{ArtError, Result};
use crate::render::{Definition, Document, Element, Paint, Rect, Stroke, SvgGroup};
use crate::sequencer::Sequencer;
use crate::types::{Colour, Seed};

const SKIN: [Colour; 3] = [
    Colour::rgb(0xFA, 0xD0, 0x2C),
    Colour::rgb(0xE8, 0x70, 0x07),
    Colour::rgb(0xF2, 0xE9, 0xE4),
];

const SHIRT: [Colour; 3] = [
    Colour::rgb(0x11, 0x8A, 0xB2),
    Colour::rgb(0xFF, 0xD1, 0x66),
    Colour::rgb(0x06, 0xD6, 0xA0),
];

const PANTS: [Colour; 3] = [
    Colour::rgb(0x07, 0x3B, 0x4C),
    Colour::rgb(0x4A, 0x4E, 0x69),
    Colour::rgb(0x9A, 0x8C, 0x98),
];

const OUTLINE: Stroke = Stroke {
    colour: Colour::BLACK,
    width: 2.0,
};

/// Size, count and body proportions of a character sheet.
///
/// Proportions are fractions of `character_size`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterSpec {
    pub character_size: u32,
    pub count: u32,
    pub head_size: f64,
    pub arm_length: f64,
    pub leg_length: f64,
    pub torso_width: f64,
    pub torso_height: f64,
}

impl Default for CharacterSpec {
    fn default() -> Self {
        Self {
            character_size: 150,
            count: 1,
            head_size: 0.4,
            arm_length: 0.6,
            leg_length: 0.7,
            torso_width: 0.5,
            torso_height: 0.8,
        }
    }
}

impl CharacterSpec {
    pub fn validate(&self) -> Result<()> {
        if self.character_size == 0 || self.count == 0 {
            return Err(ArtError::Validation {
                message: format!(
                    "Character size and count must be positive (got size {}, count {})",
                    self.character_size, self.count
                ),
                help: None,
            });
        }

        let ratios = [
            ("head_size", self.head_size),
            ("arm_length", self.arm_length),
            ("leg_length", self.leg_length),
            ("torso_width", self.torso_width),
            ("torso_height", self.torso_height),
        ];
        for (name, value) in ratios {
            if !(value.is_finite() && value > 0.0) {
                return Err(ArtError::Validation {
                    message: format!("Body ratio {} must be positive, got {}", name, value),
                    help: Some("Body ratios are fractions of the character size".to_string()),
                });
            }
        }

        Ok(())
    }

    /// Sheet columns and rows.
    pub fn layout(&self) -> (u32, u32) {
        let cols = ((self.count as f64).sqrt() as u32).max(1);
        let rows = self.count.div_ceil(cols);
        (cols, rows)
    }
}

#[derive(Debug, Clone, Copy)]
struct Outfit {
    skin: Colour,
    shirt: Colour,
    pants: Colour,
}

/// Generate a sheet of humanoid figures.
pub fn generate_characters(spec: &CharacterSpec, seed: Seed) -> Result<Document> {
    spec.validate()?;

    let size = spec.character_size;
    let (cols, rows) = spec.layout();
    let pad_top = size / 2;
    let pad_sides = size / 2;
    let pad_bottom = size;

    let width = cols
        .checked_mul(size)
        .and_then(|w| w.checked_add(2 * pad_sides));
    let height = rows
        .checked_mul(size)
        .and_then(|h| h.checked_add(pad_top + pad_bottom));
    let (Some(width), Some(height)) = (width, height) else {
        return Err(ArtError::Validation {
            message: "Character sheet dimensions overflow".to_string(),
            help: None,
        });
    };

    let mut document = Document::new(width, height);
    document.add_definition(Definition::Style(
        "svg * { shape-rendering: crispEdges; }".to_string(),
    ));

    let mut rng = Sequencer::new(seed);
    for i in 0..spec.count {
        let (col, row) = (i % cols, i / cols);
        let x = (col * size + pad_sides + size / 2) as f64;
        let y = (row * size + pad_top + size / 2) as f64;

        let outfit = Outfit {
            skin: *rng.choose(&SKIN),
            shirt: *rng.choose(&SHIRT),
            pants: *rng.choose(&PANTS),
        };

        document.push(Element::Group(humanoid(i, x, y, spec, outfit)));
        document.append_raw(format!(
            r##"<animateTransform attributeName="transform" type="translate" from="0,0" to="0,5" dur="1s" repeatCount="indefinite" xlink:href="#upper_body_{}"/>"##,
            i
        ));
    }

    Ok(document)
}

fn outlined_rect(x: f64, y: f64, width: f64, height: f64, fill: Colour) -> Element {
    Element::Rect {
        rect: Rect::new(x, y, width, height),
        fill: Paint::Colour(fill),
        stroke: Some(OUTLINE),
    }
}

fn disc(cx: f64, cy: f64, r: f64, fill: Colour) -> Element {
    Element::Circle {
        cx,
        cy,
        r,
        fill: Paint::Colour(fill),
        stroke: None,
    }
}

/// One figure whose torso top is centred on `(x, y)`.
fn humanoid(index: u32, x: f64, y: f64, spec: &CharacterSpec, outfit: Outfit) -> SvgGroup {
    let size = spec.character_size as f64;
    let torso_w = size * spec.torso_width;
    let torso_h = size * spec.torso_height;
    let arm_len = size * spec.arm_length;
    let arm_t = size * 0.1;
    let leg_len = size * spec.leg_length;
    let leg_t = size * 0.15;
    let neck_w = torso_w * 0.3;
    let neck_h = size * 0.1;

    let neck_top = y - neck_h;
    let head_y = neck_top - neck_h;

    let mut figure = SvgGroup::named(format!("humanoid_{}", index));
    figure.push(outlined_rect(
        x - torso_w / 4.0 - leg_t / 2.0,
        y + torso_h,
        leg_t,
        leg_len,
        outfit.pants,
    ));
    figure.push(outlined_rect(
        x + torso_w / 4.0 - leg_t / 2.0,
        y + torso_h,
        leg_t,
        leg_len,
        outfit.pants,
    ));

    let mut upper = SvgGroup::named(format!("upper_body_{}", index));
    upper.push(outlined_rect(
        x - torso_w / 2.0,
        y,
        torso_w,
        torso_h,
        outfit.shirt,
    ));
    upper.push(outlined_rect(
        x - neck_w / 2.0,
        neck_top,
        neck_w,
        neck_h,
        outfit.skin,
    ));

    let head_r = size * spec.head_size * 0.4;
    upper.push(Element::Circle {
        cx: x,
        cy: head_y,
        r: head_r,
        fill: Paint::Colour(outfit.skin),
        stroke: Some(OUTLINE),
    });
    let eye_offset = head_r * 0.4;
    let eye_r = head_r * 0.1;
    let eye_y = head_y - eye_offset * 0.5;
    upper.push(disc(x - eye_offset, eye_y, eye_r, Colour::WHITE));
    upper.push(disc(x + eye_offset, eye_y, eye_r, Colour::WHITE));
    upper.push(disc(x - eye_offset, eye_y, eye_r * 0.5, Colour::BLACK));
    upper.push(disc(x + eye_offset, eye_y, eye_r * 0.5, Colour::BLACK));
    let mouth_w = head_r * 0.6;
    upper.push(Element::Rect {
        rect: Rect::new(x - mouth_w / 2.0, head_y + head_r * 0.3, mouth_w, head_r * 0.1),
        fill: Paint::Colour(Colour::BLACK),
        stroke: None,
    });

    upper.push(outlined_rect(
        x - torso_w / 2.0 - arm_t / 2.0,
        y,
        arm_t,
        arm_len,
        outfit.skin,
    ));
    upper.push(outlined_rect(
        x + torso_w / 2.0 - arm_t / 2.0,
        y,
        arm_t,
        arm_len,
        outfit.skin,
    ));

    figure.push(Element::Group(upper));
    figure
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_layout() {
        let spec = |count| CharacterSpec {
            count,
            ..CharacterSpec::default()
        };
        assert_eq!(spec(1).layout(), (1, 1));
        assert_eq!(spec(3).layout(), (1, 3));
        assert_eq!(spec(4).layout(), (2, 2));
        assert_eq!(spec(5).layout(), (2, 3));
        assert_eq!(spec(10).layout(), (3, 4));
    }

    #[test]
    fn test_canvas_padding() {
        let spec = CharacterSpec {
            character_size: 100,
            count: 4,
            ..CharacterSpec::default()
        };
        let doc = generate_characters(&spec, Seed::fixed(1)).unwrap();
        assert_eq!(doc.width(), 2 * 100 + 100);
        assert_eq!(doc.height(), 2 * 100 + 50 + 100);
    }

    #[test]
    fn test_groups_and_animations_per_character() {
        let spec = CharacterSpec {
            count: 3,
            ..CharacterSpec::default()
        };
        let doc = generate_characters(&spec, Seed::fixed(7)).unwrap();
        for i in 0..3 {
            let figure = doc.find_group(&format!("humanoid_{i}")).unwrap();
            // Two legs, then the upper body group.
            assert_eq!(figure.children.len(), 3);
            let upper = doc.find_group(&format!("upper_body_{i}")).unwrap();
            assert_eq!(upper.children.len(), 10);
        }
        let svg = doc.to_string();
        assert_eq!(svg.matches("<animateTransform").count(), 3);
        assert!(svg.contains(r##"xlink:href="#upper_body_2""##));
        assert!(svg.contains("xmlns:xlink"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_same_seed_same_sheet() {
        let spec = CharacterSpec {
            count: 6,
            ..CharacterSpec::default()
        };
        let a = generate_characters(&spec, Seed::fixed(11)).unwrap();
        let b = generate_characters(&spec, Seed::fixed(11)).unwrap();
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_colours_come_from_fixed_lists() {
        let doc = generate_characters(&CharacterSpec::default(), Seed::fixed(3)).unwrap();
        let upper = doc.find_group("upper_body_0").unwrap();
        let Element::Rect {
            fill: Paint::Colour(shirt),
            ..
        } = &upper.children[0]
        else {
            panic!("torso first");
        };
        assert!(SHIRT.contains(shirt));
    }

    #[test]
    fn test_non_positive_ratio_rejected() {
        let spec = CharacterSpec {
            head_size: 0.0,
            ..CharacterSpec::default()
        };
        let err = generate_characters(&spec, Seed::fixed(0)).unwrap_err();
        assert!(err.to_string().contains("head_size"));

        let spec = CharacterSpec {
            count: 0,
            ..CharacterSpec::default()
        };
        assert!(generate_characters(&spec, Seed::fixed(0)).is_err());
    }
}
