use std::path::Path;
use std::process::Command;

use log::{debug, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::toolkit::{ExitAction, Toolkit};
use crate::types::{CompareOptions, ComparisonResult};
use crate::utils;

/// Compare two images with the configured external toolkit.
///
/// Builds the toolkit-specific argument list, runs the tool to completion,
/// and turns its exit status and textual output into a [`ComparisonResult`].
/// The paths are handed to the tool unchecked; a missing file surfaces as a
/// process failure from the tool itself.
///
/// `options` is either a full [`CompareOptions`] or a bare tolerance:
///
/// ```no_run
/// use image_compare_core::{compare, Config};
///
/// let result = compare::compare(&Config::default(), "a.png", "b.png", 0.1)?;
/// println!("equal: {} (equality {})", result.equal, result.equality);
/// # Ok::<(), image_compare_core::Error>(())
/// ```
pub fn compare(
    config: &Config,
    orig: impl AsRef<Path>,
    compare_to: impl AsRef<Path>,
    options: impl Into<CompareOptions>,
) -> Result<ComparisonResult> {
    let options = options.into();
    options.validate()?;

    let orig = orig.as_ref();
    let compare_to = compare_to.as_ref();
    let toolkit = config.toolkit;

    let bin = config.executable();
    let args = build_args(toolkit, orig, compare_to, &options);

    debug!("{}", utils::command_line(&bin, &args));

    // The child inherits the full environment of this process, unchanged
    let output = Command::new(&bin).args(&args).output()?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    let code = output.status.code();

    let text = match toolkit.exit_action(code) {
        ExitAction::Identical => {
            // Identical images exit 0 with no metric line to parse
            return Ok(build_result(orig, compare_to, 0.0, stdout, &options));
        }
        ExitAction::ParseStdout => stdout,
        ExitAction::ParseStderr => stderr,
        ExitAction::Unexpected => {
            return Err(Error::ProcessFailure { code, stderr });
        }
    };

    match toolkit.parse_equality(&text) {
        Some(equality) => Ok(build_result(orig, compare_to, equality, text, &options)),
        None => Err(Error::ParseFailure { output: text }),
    }
}

fn build_result(
    orig: &Path,
    compare_to: &Path,
    equality: f64,
    raw_output: String,
    options: &CompareOptions,
) -> ComparisonResult {
    ComparisonResult {
        equal: equality <= options.tolerance,
        equality,
        raw_output,
        orig_path: orig.to_path_buf(),
        compare_to_path: compare_to.to_path_buf(),
    }
}

/// Build the argument vector for the configured toolkit
fn build_args(
    toolkit: Toolkit,
    orig: &Path,
    compare_to: &Path,
    options: &CompareOptions,
) -> Vec<String> {
    let mut args = Vec::new();

    if let Some(subcommand) = toolkit.subcommand() {
        args.push(subcommand.to_string());
    }

    args.push("-metric".to_string());
    args.push("mse".to_string());
    args.push(orig.to_string_lossy().into_owned());
    args.push(compare_to.to_string_lossy().into_owned());

    if let Some(diff_file) = &options.diff_file {
        if toolkit.supports_highlight() {
            if let Some(color) = &options.highlight_color {
                args.push("-highlight-color".to_string());
                args.push(quote_highlight_color(color));
            }
            if let Some(style) = &options.highlight_style {
                args.push("-highlight-style".to_string());
                args.push(style.clone());
            }
        } else if options.highlight_color.is_some() || options.highlight_style.is_some() {
            warn!(
                "highlight options are not supported by {:?}, ignoring",
                toolkit
            );
        }

        if let Some(flag) = toolkit.diff_file_flag() {
            args.push(flag.to_string());
        }
        args.push(diff_file.to_string_lossy().into_owned());
    } else if toolkit.requires_diff_target() {
        // ImageMagick insists on a diff target even when none is wanted
        args.push("null:".to_string());
    }

    args
}

/// Multi-word colors like "light blue" are quoted for the tool unless the
/// caller already quoted them
fn quote_highlight_color(color: &str) -> String {
    if color.contains(char::is_whitespace) && !color.contains('"') {
        format!("\"{}\"", color)
    } else {
        color.to_string()
    }
}

// -- Tests --
