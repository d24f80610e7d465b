use serde::Serialize;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Difference tolerated before two images are reported unequal
pub const DEFAULT_TOLERANCE: f64 = 0.4;

/// Options accepted by a single comparison
#[derive(Debug, Clone)]
pub struct CompareOptions {
    /// Maximum equality score at which the images still count as equal
    pub tolerance: f64,

    /// Where to write a visual diff image, if one is wanted
    pub diff_file: Option<PathBuf>,

    /// Color used to mark differing pixels in the diff image
    pub highlight_color: Option<String>,

    /// Style used to mark differing pixels in the diff image
    pub highlight_style: Option<String>,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            diff_file: None,
            highlight_color: None,
            highlight_style: None,
        }
    }
}

impl From<f64> for CompareOptions {
    /// Tolerance-only shorthand
    fn from(tolerance: f64) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }
}

impl CompareOptions {
    /// Reject option values the external tool would misbehave on.
    /// Runs before any process is spawned.
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() {
            return Err(Error::InvalidOption(
                "the tolerance value should be a finite number".to_string(),
            ));
        }

        if let Some(diff_file) = &self.diff_file {
            if diff_file.as_os_str().is_empty() {
                return Err(Error::InvalidOption(
                    "the path for the diff output is invalid".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Outcome of one comparison
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResult {
    /// Whether the equality score was at or below the tolerance
    pub equal: bool,

    /// Dissimilarity reported by the tool; 0 means identical
    pub equality: f64,

    /// Text the metric was read from, kept verbatim
    pub raw_output: String,

    /// First image path, as given
    pub orig_path: PathBuf,

    /// Second image path, as given
    pub compare_to_path: PathBuf,
}

// -- Tests --

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tolerance_shorthand() {
        let options = CompareOptions::from(0.1);
        assert_eq!(options.tolerance, 0.1);
        assert!(options.diff_file.is_none());
        assert!(options.highlight_color.is_none());
    }

    #[test]
    fn test_default_tolerance() {
        assert_eq!(CompareOptions::default().tolerance, DEFAULT_TOLERANCE);
    }

    #[test]
    fn test_validate_rejects_non_finite_tolerance() {
        for tolerance in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let options = CompareOptions::from(tolerance);
            assert!(matches!(
                options.validate(),
                Err(Error::InvalidOption(_))
            ));
        }
    }

    #[test]
    fn test_validate_rejects_empty_diff_path() {
        let options = CompareOptions {
            diff_file: Some(PathBuf::new()),
            ..CompareOptions::default()
        };
        assert!(matches!(options.validate(), Err(Error::InvalidOption(_))));
    }

    #[test]
    fn test_validate_accepts_negative_tolerance() {
        // Negative tolerance is legal: it just means nothing ever matches
        assert!(CompareOptions::from(-1.0).validate().is_ok());
    }
}
