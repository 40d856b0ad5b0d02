/// Configuration subsystem - matching and output options for a run
///
/// Options are resolved once, before any command is parsed, from rc-file
/// defaults and command-line flags. The core only ever reads them.

pub mod rc;

// Re-export public interface
pub use rc::{RcConfig, RcLoader};

/// Options that change how patterns are compiled and how much a
/// substitution may rewrite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchOptions {
    pub ignore_case: bool,
    pub dot_matches_newline: bool,
    pub line_anchored_multiline: bool,
    pub fixed_string: bool,
    pub ascii_classes: bool,
    /// Cap on rewrites inside a single line. `None` is unbounded.
    pub max_substitutions_per_line: Option<usize>,
    /// Cap on rewrites made by one command across the whole document.
    pub max_substitutions: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputOptions {
    pub line_terminator: String,
    pub normalize_trailing_terminator: bool,
    pub force_no_trailing_terminator: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            line_terminator: LineEnding::Unix.as_str().to_string(),
            normalize_trailing_terminator: false,
            force_no_trailing_terminator: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Unix,    // \n (LF)
    Windows, // \r\n (CRLF)
    Mac,     // \r (CR)
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Unix => "\n",
            LineEnding::Windows => "\r\n",
            LineEnding::Mac => "\r",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "unix" | "linux" | "lf" => Some(LineEnding::Unix),
            "dos" | "win" | "crlf" => Some(LineEnding::Windows),
            "mac" | "cr" => Some(LineEnding::Mac),
            _ => None,
        }
    }
}
