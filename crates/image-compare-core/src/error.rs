use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Custom error types for the image-compare library
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Comparison option rejected before the external tool is run
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// The external tool exited with an unexpected status
    #[error("Compare command failed: {stderr}")]
    ProcessFailure {
        /// Exit code, if the process exited normally
        code: Option<i32>,
        /// Captured standard-error text
        stderr: String,
    },

    /// The tool output did not contain a recognizable metric
    #[error("Unable to parse output: {output}")]
    ParseFailure {
        /// The raw captured text, kept verbatim for diagnosis
        output: String,
    },

    /// Invalid configuration error
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}
