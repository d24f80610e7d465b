use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use std::path::PathBuf;

use image_compare_core::{
    logging, CompareOptions, Comparator, Config, LogLevel, Toolkit, DEFAULT_TOLERANCE,
};

#[derive(Parser)]
#[command(name = "image-compare")]
#[command(about = "Compare two images with GraphicsMagick or ImageMagick")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Toolkit choice as exposed on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ToolkitArg {
    /// GraphicsMagick `gm compare`
    Gm,

    /// ImageMagick 6 and earlier `compare`
    Im,

    /// ImageMagick 7 and later `magick compare`
    Im7,
}

impl From<ToolkitArg> for Toolkit {
    fn from(arg: ToolkitArg) -> Self {
        match arg {
            ToolkitArg::Gm => Toolkit::GraphicsMagick,
            ToolkitArg::Im => Toolkit::ImageMagick,
            ToolkitArg::Im7 => Toolkit::ImageMagick7,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two images and report their similarity
    Compare {
        /// Path to the reference image
        orig: PathBuf,

        /// Path to the image to compare against the reference
        compare_to: PathBuf,

        /// Maximum difference tolerated before the images count as unequal
        #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
        tolerance: f64,

        /// Write a visual diff image to this path
        #[arg(long)]
        diff_file: Option<PathBuf>,

        /// Color for differing pixels in the diff image (GraphicsMagick only)
        #[arg(long)]
        highlight_color: Option<String>,

        /// Style for differing pixels in the diff image (GraphicsMagick only)
        #[arg(long)]
        highlight_style: Option<String>,

        /// Which external toolkit to invoke
        #[arg(long, value_enum)]
        toolkit: Option<ToolkitArg>,

        /// Prefix for locating the toolkit executable, e.g. /opt/local/bin/
        #[arg(long)]
        app_path: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Verbosity level
        #[arg(short, long, action = clap::ArgAction::Count)]
        verbose: u8,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write logs to rotating files in this directory instead of stderr
        #[arg(long)]
        log_dir: Option<String>,
    },

    /// Generate default configuration file
    GenerateConfig {
        /// Path to save configuration file
        #[arg(default_value = "image-compare.json")]
        path: PathBuf,
    },
}

fn main() -> Result<(), anyhow::Error> {
    // Parse command line arguments
    let cli = Cli::parse();

    match cli.command {
        Commands::Compare {
            orig,
            compare_to,
            tolerance,
            diff_file,
            highlight_color,
            highlight_style,
            toolkit,
            app_path,
            json,
            verbose,
            config,
            log_dir,
        } => {
            // Set up configuration
            let mut config = if let Some(config_path) = config {
                // Load config from file
                Config::from_file(&config_path)?
            } else {
                Config::default()
            };

            // Override config with command line arguments
            if let Some(toolkit) = toolkit {
                config.toolkit = toolkit.into();
            }
            if let Some(app_path) = app_path {
                config.app_path = Some(app_path);
            }

            // Set log level based on verbosity
            config.log_level = match verbose {
                0 => LogLevel::Info,
                1 => LogLevel::Debug,
                _ => LogLevel::Trace,
            };

            // Initialize logger: rotating files when requested, stderr otherwise
            if let Some(log_dir) = log_dir {
                logging::init_logger(&log_dir)
                    .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
            } else {
                env_logger::Builder::from_default_env()
                    .filter_level(config.log_level.to_level_filter())
                    .init();
            }

            // Validate configuration
            config.validate()?;

            let options = CompareOptions {
                tolerance,
                diff_file,
                highlight_color,
                highlight_style,
            };

            let comparator = Comparator::new(config);
            info!(
                "Comparing {} with {}",
                orig.display(),
                compare_to.display()
            );

            match comparator.compare(&orig, &compare_to, options) {
                Ok(result) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&result)?);
                    } else {
                        println!(
                            "{}: {} vs {} (equality {})",
                            if result.equal { "equal" } else { "not equal" },
                            result.orig_path.display(),
                            result.compare_to_path.display(),
                            result.equality,
                        );
                    }

                    // Diff-tool convention: nonzero exit when the images differ
                    if !result.equal {
                        std::process::exit(1);
                    }
                    Ok(())
                }
                Err(e) => {
                    logging::log_compare_error(&orig, &compare_to, &e);
                    Err(e).context("Comparison failed")
                }
            }
        }

        Commands::GenerateConfig { path } => {
            let config = Config::default();
            config.save_to_file(&path)?;
            println!("Configuration file generated at: {}", path.display());
            Ok(())
        }
    }
}
