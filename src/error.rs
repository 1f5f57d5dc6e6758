use miette::Diagnostic;
use thiserror::Error;

/// Everything that can stop an artwork from being generated
#[derive(Error, Diagnostic, Debug)]
pub enum ArtError {
    #[error("I/O error: {0}")]
    #[diagnostic(
        code(artgrid::io),
        help("check that the output directory exists and is writable")
    )]
    IoError(#[from] std::io::Error),

    #[error("Cannot access {path}: {message}")]
    #[diagnostic(
        code(artgrid::io),
        help("relative paths in artgrid.yaml and on the command line are resolved from the working directory")
    )]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Could not parse input: {message}")]
    #[diagnostic(code(artgrid::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Invalid artwork settings: {message}")]
    #[diagnostic(code(artgrid::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Could not render artwork: {message}")]
    #[diagnostic(code(artgrid::render))]
    Render {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl ArtError {
    /// A style generator left its drawing groups open or closed one too many.
    pub(crate) fn unbalanced_groups() -> Self {
        Self::Render {
            message: "drawing groups were not balanced".to_string(),
            help: Some(
                "a cell style pushed a group it never popped; rerun with the same --seed and report the style"
                    .to_string(),
            ),
        }
    }

    /// The canvas is larger than the raster backend can address.
    pub(crate) fn canvas_too_large(width: u32, height: u32) -> Self {
        Self::Validation {
            message: format!(
                "a {}x{} canvas is too large to rasterize (at most {} px per side)",
                width,
                height,
                u16::MAX
            ),
            help: Some("lower --rows, --cols or --cell-size, or write SVG with --format svg".to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ArtError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_name_the_failing_stage() {
        let render = ArtError::unbalanced_groups();
        assert_eq!(render.code().unwrap().to_string(), "artgrid::render");
        assert!(render.to_string().starts_with("Could not render artwork"));
        assert!(render.help().unwrap().to_string().contains("--seed"));

        let io = ArtError::Io {
            path: "palettes.json".into(),
            message: "not found".to_string(),
        };
        assert_eq!(io.to_string(), "Cannot access palettes.json: not found");
        assert!(io.help().unwrap().to_string().contains("artgrid.yaml"));
    }

    #[test]
    fn test_oversized_canvas_suggests_svg() {
        let err = ArtError::canvas_too_large(70_000, 10);
        assert_eq!(err.code().unwrap().to_string(), "artgrid::validate");
        assert!(err.help().unwrap().to_string().contains("--format svg"));
    }
}
