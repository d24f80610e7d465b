//! Core functionality for comparing two images with an external toolkit.
//!
//! All pixel-level work is delegated to GraphicsMagick or ImageMagick; this
//! library only orchestrates the external `compare` command:
//! - Toolkit-specific argument construction
//! - Child process execution and output capture
//! - Exit-code interpretation and metric parsing

// -- Standard Library --

use std::path::Path;

// -- Internal Modules --
mod error;

// -- Public Re-exports --
pub use config::*;
pub use error::{Error, Result};
pub use toolkit::Toolkit;
pub use types::*;

// -- Public Modules --
pub mod compare;
pub mod config;
pub mod logging;
pub mod toolkit;
pub mod types;
pub mod utils;

/// Main entry point for image comparison
pub struct Comparator {
    config: Config,
}

impl Comparator {
    /// Create a new Comparator with the provided configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Compare two images and report whether they match within tolerance.
    ///
    /// `options` is either a full [`CompareOptions`] or a bare tolerance;
    /// see [`compare::compare`] for the behavior of each toolkit.
    pub fn compare(
        &self,
        orig: impl AsRef<Path>,
        compare_to: impl AsRef<Path>,
        options: impl Into<CompareOptions>,
    ) -> Result<ComparisonResult> {
        compare::compare(&self.config, orig, compare_to, options)
    }

    /// The active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
