//! Block style names and active-set resolution.

use std::fmt;
use std::str::FromStr;

use crate::diagnostics::{self, Diagnostics};
use crate::error::{ArtError, Result};

/// One of the twelve cell motifs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Circle,
    OppositeCircles,
    Cross,
    HalfSquare,
    DiagonalSquare,
    QuarterCircle,
    Dots,
    LetterBlock,
    ConcentricCircles,
    Stripes,
    RotatedShape,
    WavyLines,
}

impl Style {
    /// Every style, in canonical order.
    pub const ALL: [Style; 12] = [
        Style::Circle,
        Style::OppositeCircles,
        Style::Cross,
        Style::HalfSquare,
        Style::DiagonalSquare,
        Style::QuarterCircle,
        Style::Dots,
        Style::LetterBlock,
        Style::ConcentricCircles,
        Style::Stripes,
        Style::RotatedShape,
        Style::WavyLines,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Style::Circle => "circle",
            Style::OppositeCircles => "opposite_circles",
            Style::Cross => "cross",
            Style::HalfSquare => "half_square",
            Style::DiagonalSquare => "diagonal_square",
            Style::QuarterCircle => "quarter_circle",
            Style::Dots => "dots",
            Style::LetterBlock => "letter_block",
            Style::ConcentricCircles => "concentric_circles",
            Style::Stripes => "stripes",
            Style::RotatedShape => "rotated_shape",
            Style::WavyLines => "wavy_lines",
        }
    }

    /// Comma-separated list of every style name.
    pub fn all_names() -> String {
        Self::ALL.map(Style::name).join(",")
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Style {
    type Err = ArtError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Style::ALL
            .into_iter()
            .find(|style| style.name() == s)
            .ok_or_else(|| ArtError::Parse {
                message: format!("Unknown style: {}", s),
                help: Some(format!("Available styles: {}", Style::all_names())),
            })
    }
}

/// The styles a generation run may choose from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSet {
    styles: Vec<Style>,
}

impl StyleSet {
    /// Every style, in canonical order.
    pub fn all() -> Self {
        Self {
            styles: Style::ALL.to_vec(),
        }
    }

    /// Intersect requested names with the known styles.
    ///
    /// Request order is kept and duplicates removed. Unknown names are
    /// dropped with a warning. An empty result means every style.
    pub fn resolve<S: AsRef<str>>(names: &[S], diagnostics: &mut Diagnostics) -> Self {
        let mut styles = Vec::new();
        let mut unknown = Vec::new();

        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            match name.parse::<Style>() {
                Ok(style) if !styles.contains(&style) => styles.push(style),
                Ok(_) => {}
                Err(_) => unknown.push(name.to_string()),
            }
        }

        if !unknown.is_empty() {
            diagnostics.push(
                diagnostics::Diagnostic::warning(
                    diagnostics::UNKNOWN_STYLE,
                    format!("Ignoring unknown styles: {}", unknown.join(", ")),
                )
                .with_help(format!("Available styles: {}", Style::all_names())),
            );
        }

        if styles.is_empty() {
            return Self::all();
        }
        Self { styles }
    }

    /// Parse a comma-separated style list.
    pub fn parse_list(list: &str, diagnostics: &mut Diagnostics) -> Self {
        let names: Vec<&str> = list.split(',').collect();
        Self::resolve(&names, diagnostics)
    }

    pub fn as_slice(&self) -> &[Style] {
        &self.styles
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip_through_parse() {
        for style in Style::ALL {
            assert_eq!(style.name().parse::<Style>().unwrap(), style);
        }
    }

    #[test]
    fn test_resolve_keeps_request_order() {
        let mut diagnostics = Diagnostics::new();
        let set = StyleSet::resolve(&["stripes", "circle", "stripes"], &mut diagnostics);
        assert_eq!(set.as_slice(), [Style::Stripes, Style::Circle]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_resolve_unknown_falls_back_to_all() {
        let mut diagnostics = Diagnostics::new();
        let set = StyleSet::resolve(&["not_a_style"], &mut diagnostics);
        assert_eq!(set, StyleSet::all());
        assert!(diagnostics.contains(diagnostics::UNKNOWN_STYLE));
    }

    #[test]
    fn test_resolve_empty_is_all_without_warning() {
        let mut diagnostics = Diagnostics::new();
        let set = StyleSet::resolve::<&str>(&[], &mut diagnostics);
        assert_eq!(set.len(), 12);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_parse_list_trims_whitespace() {
        let mut diagnostics = Diagnostics::new();
        let set = StyleSet::parse_list(" dots , wavy_lines,, bogus", &mut diagnostics);
        assert_eq!(set.as_slice(), [Style::Dots, Style::WavyLines]);
        assert_eq!(diagnostics.warning_count(), 1);
    }
}
