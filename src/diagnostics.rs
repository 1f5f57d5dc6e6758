//! Non-fatal diagnostics collected while generating artwork.
//!
//! Generation never fails on recoverable input problems (bad palette index,
//! unknown style names, big blocks that do not fit). Those are recorded here
//! and handed back alongside the artifact.

use std::fmt;

/// Palette index was out of range and clamped to 0.
pub const PALETTE_INDEX: &str = "artgrid::palette-index";
/// Palette entries failed hex validation and were dropped.
pub const PALETTE_ENTRY: &str = "artgrid::palette-entry";
/// Requested style names were not recognised.
pub const UNKNOWN_STYLE: &str = "artgrid::unknown-style";
/// A big block did not fit the grid and was skipped.
pub const BIG_BLOCK_SKIPPED: &str = "artgrid::big-block-skipped";
/// Seed text could not be parsed; a random seed was used.
pub const INVALID_SEED: &str = "artgrid::seed";
/// A custom font lacked glyphs; the built-in font covers them.
pub const MISSING_GLYPH: &str = "artgrid::glyph";
/// A custom font could not be loaded; the built-in font was used.
pub const FONT_UNAVAILABLE: &str = "artgrid::font";

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Machine-readable code (e.g. "artgrid::big-block-skipped").
    pub code: String,
    pub message: String,
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code: code.into(),
            message: message.into(),
            help: None,
        }
    }

    /// Create a warning diagnostic.
    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code: code.into(),
            message: message.into(),
            help: None,
        }
    }

    /// Add help text to this diagnostic.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)
    }
}

/// Collects diagnostics over one generation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    diagnostics: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Add a warning diagnostic.
    pub fn warning(&mut self, code: impl Into<String>, message: impl Into<String>) {
        self.push(Diagnostic::warning(code, message));
    }

    /// Add an error diagnostic.
    pub fn error(&mut self, code: impl Into<String>, message: impl Into<String>) {
        self.push(Diagnostic::error(code, message));
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Warning)
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// Check whether any diagnostic carries the given code.
    pub fn contains(&self, code: &str) -> bool {
        self.diagnostics.iter().any(|d| d.code == code)
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Merge another collection into this one.
    pub fn merge(&mut self, other: Diagnostics) {
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }
}
