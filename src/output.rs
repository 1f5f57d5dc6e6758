//! Terminal output for the artgrid CLI.
//!
//! Status lines go to stderr with right-aligned coloured verbs, Cargo style.
//! Stdout is reserved for artifacts and listings.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use crate::diagnostics::{Diagnostic, Diagnostics, Severity};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Width of the right-aligned verb column.
const VERB_WIDTH: usize = 12;

/// Terminal-aware status printer.
///
/// Colour is on only when stderr is a terminal.
pub struct Printer {
    color: bool,
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// Printer that never emits escape codes.
    pub fn plain() -> Self {
        Self { color: false }
    }

    /// e.g. "  Generating 6x6 grid (600x600)"
    pub fn status(&self, verb: &str, message: &str) {
        self.print_line(GREEN, verb, message);
    }

    pub fn info(&self, verb: &str, message: &str) {
        self.print_line(CYAN, verb, message);
    }

    pub fn warning(&self, verb: &str, message: &str) {
        self.print_line(YELLOW, verb, message);
    }

    pub fn error(&self, verb: &str, message: &str) {
        self.print_line(RED, verb, message);
    }

    pub fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    pub fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }

    /// Print one diagnostic, with its help on a dimmed follow-up line.
    pub fn diagnostic(&self, diagnostic: &Diagnostic) {
        let message = format!("{} {}", diagnostic.message, self.dim(&diagnostic.code));
        match diagnostic.severity {
            Severity::Error => self.error("error", &message),
            Severity::Warning => self.warning("warning", &message),
        }
        if let Some(help) = &diagnostic.help {
            self.print_line(DIM, "help", &self.dim(help));
        }
    }

    /// Print every collected diagnostic.
    pub fn report(&self, diagnostics: &Diagnostics) {
        for diagnostic in diagnostics.iter() {
            self.diagnostic(diagnostic);
        }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn print_line(&self, color: &str, verb: &str, message: &str) {
        let mut stderr = io::stderr().lock();
        if self.color {
            let _ = writeln!(stderr, "{BOLD}{color}{verb:>VERB_WIDTH$}{RESET} {message}");
        } else {
            let _ = writeln!(stderr, "{verb:>VERB_WIDTH$} {message}");
        }
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

/// Pluralize a count: `plural(1, "warning", "warnings")` gives "1 warning".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, pluralized)
    }
}

/// Relative display path when possible, absolute otherwise.
pub fn display_path(path: &Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(relative) = path.strip_prefix(&cwd) {
            let s = relative.display().to_string();
            if s.is_empty() {
                return ".".to_string();
            }
            return s;
        }
    }
    path.display().to_string()
}
