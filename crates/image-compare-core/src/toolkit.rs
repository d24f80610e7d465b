use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Metric line printed by `gm compare -metric mse`, e.g. `Total: 0.1234`
static GM_TOTAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"Total: (\d+\.?\d*)").unwrap());

/// Normalized metric in ImageMagick output, e.g. `12.00 (0.004567)`.
/// The parenthesized value may use exponential notation.
static IM_NORMALIZED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\((\d+\.?[\d\-+e]*)\)").unwrap());

/// External toolkit used to perform the comparison.
///
/// Each variant fully owns its invocation convention: binary name, argument
/// ordering, exit-code meaning, and output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Toolkit {
    /// GraphicsMagick, invoked as `gm compare`
    GraphicsMagick,

    /// ImageMagick 6 and earlier, invoked as a standalone `compare`
    ImageMagick,

    /// ImageMagick 7 and later, invoked as `magick compare`
    ImageMagick7,
}

/// What an exit status means for the captured output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitAction {
    /// Images are identical; there is nothing to parse
    Identical,

    /// Successful run, metric line is on standard output
    ParseStdout,

    /// Images differ and this toolkit writes its metric line to standard error
    ParseStderr,

    /// Unexpected exit code, treat as a process failure
    Unexpected,
}

impl Toolkit {
    /// Name of the executable to invoke, before any configured prefix
    pub fn binary(self) -> &'static str {
        match self {
            Self::GraphicsMagick => "gm",
            Self::ImageMagick => "compare",
            Self::ImageMagick7 => "magick",
        }
    }

    /// Leading subcommand, for toolkits whose compare mode is a subcommand
    pub fn subcommand(self) -> Option<&'static str> {
        match self {
            Self::GraphicsMagick | Self::ImageMagick7 => Some("compare"),
            Self::ImageMagick => None,
        }
    }

    /// Whether the toolkit understands the `-highlight-*` flags
    pub fn supports_highlight(self) -> bool {
        matches!(self, Self::GraphicsMagick)
    }

    /// ImageMagick requires a diff-target argument even when no diff is wanted
    pub fn requires_diff_target(self) -> bool {
        !matches!(self, Self::GraphicsMagick)
    }

    /// Flag introducing the diff output path; ImageMagick takes the bare path
    pub fn diff_file_flag(self) -> Option<&'static str> {
        match self {
            Self::GraphicsMagick => Some("-file"),
            Self::ImageMagick | Self::ImageMagick7 => None,
        }
    }

    /// Classify an exit code into what to do with the captured streams.
    /// A `None` code (killed by a signal) is always unexpected.
    pub fn exit_action(self, code: Option<i32>) -> ExitAction {
        match self {
            Self::GraphicsMagick => match code {
                Some(0) => ExitAction::ParseStdout,
                _ => ExitAction::Unexpected,
            },
            // ImageMagick: 0 = identical, 1 = dissimilar, anything else = error
            Self::ImageMagick | Self::ImageMagick7 => match code {
                Some(0) => ExitAction::Identical,
                Some(1) => ExitAction::ParseStderr,
                _ => ExitAction::Unexpected,
            },
        }
    }

    /// Extract the equality metric from the tool output
    pub fn parse_equality(self, output: &str) -> Option<f64> {
        let pattern = match self {
            Self::GraphicsMagick => &GM_TOTAL,
            Self::ImageMagick | Self::ImageMagick7 => &IM_NORMALIZED,
        };

        pattern
            .captures(output)
            .and_then(|captures| captures.get(1))
            .and_then(|metric| metric.as_str().parse().ok())
    }
}

// -- Tests --

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_and_subcommand() {
        assert_eq!(Toolkit::GraphicsMagick.binary(), "gm");
        assert_eq!(Toolkit::ImageMagick.binary(), "compare");
        assert_eq!(Toolkit::ImageMagick7.binary(), "magick");

        assert_eq!(Toolkit::GraphicsMagick.subcommand(), Some("compare"));
        assert_eq!(Toolkit::ImageMagick.subcommand(), None);
        assert_eq!(Toolkit::ImageMagick7.subcommand(), Some("compare"));
    }

    #[test]
    fn test_graphicsmagick_exit_actions() {
        assert_eq!(
            Toolkit::GraphicsMagick.exit_action(Some(0)),
            ExitAction::ParseStdout
        );
        assert_eq!(
            Toolkit::GraphicsMagick.exit_action(Some(1)),
            ExitAction::Unexpected
        );
        assert_eq!(
            Toolkit::GraphicsMagick.exit_action(None),
            ExitAction::Unexpected
        );
    }

    #[test]
    fn test_imagemagick_exit_actions() {
        for toolkit in [Toolkit::ImageMagick, Toolkit::ImageMagick7] {
            assert_eq!(toolkit.exit_action(Some(0)), ExitAction::Identical);
            assert_eq!(toolkit.exit_action(Some(1)), ExitAction::ParseStderr);
            assert_eq!(toolkit.exit_action(Some(2)), ExitAction::Unexpected);
            assert_eq!(toolkit.exit_action(None), ExitAction::Unexpected);
        }
    }

    #[test]
    fn test_parse_graphicsmagick_total() {
        let output = "Image Difference (MeanSquaredError):\n  Total: 0.1234 red\n";
        assert_eq!(Toolkit::GraphicsMagick.parse_equality(output), Some(0.1234));
    }

    #[test]
    fn test_parse_imagemagick_normalized() {
        assert_eq!(
            Toolkit::ImageMagick.parse_equality("12.00 (0.004567)"),
            Some(0.004567)
        );
    }

    #[test]
    fn test_parse_imagemagick_exponential_notation() {
        assert_eq!(
            Toolkit::ImageMagick7.parse_equality("1.2 (4.5e-07)"),
            Some(4.5e-7)
        );
    }

    #[test]
    fn test_parse_rejects_unrecognized_output() {
        assert_eq!(Toolkit::GraphicsMagick.parse_equality("no metric here"), None);
        assert_eq!(Toolkit::ImageMagick.parse_equality("no metric here"), None);
    }
}
