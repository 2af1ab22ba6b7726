//! Command-line argument definitions for the Figura CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the output directory and format, filter
//! the diagrams to generate, pick a configuration file and set logging
//! verbosity.

use clap::Parser;

use figura::config::OutputFormat;

/// Command-line arguments for the Figura diagram generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory the images are written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: String,

    /// Output format (png or svg). Defaults to the configured format
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Generate only this built-in diagram (repeatable)
    #[arg(short, long = "diagram", value_name = "NAME")]
    pub diagrams: Vec<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
