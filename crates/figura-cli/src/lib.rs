//! Figura CLI library
//!
//! This module contains the core CLI logic for the Figura diagram generator.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;
pub use error_adapter::ErrorAdapter;

use std::{fs, path::Path};

use log::info;

use figura::{DiagramBuilder, FiguraError, GeneratedDiagram};

/// Run the Figura CLI application
///
/// Generates the built-in diagrams selected by `args` into the output
/// directory, creating it if needed.
///
/// # Errors
///
/// Returns `FiguraError` for:
/// - Configuration loading errors
/// - Unknown diagram names
/// - Description errors
/// - Rendering and file I/O errors
pub fn run(args: &Args) -> Result<Vec<GeneratedDiagram>, FiguraError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let format = args.format.unwrap_or(app_config.render().format());

    info!(
        output_dir = args.output_dir,
        format:% = format,
        diagrams:? = args.diagrams;
        "Generating diagrams"
    );

    let out_dir = Path::new(&args.output_dir);
    fs::create_dir_all(out_dir)?;

    let builder = DiagramBuilder::new(app_config)?;
    builder.generate_all(out_dir, &args.diagrams, format)
}

/// Completion report listing each generated file with its summary.
pub fn completion_message(generated: &[GeneratedDiagram]) -> String {
    let mut message = String::from("Generated files:");
    for (idx, diagram) in generated.iter().enumerate() {
        let file_name = diagram
            .image()
            .path()
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();
        message.push_str(&format!("\n{}. {} - {}", idx + 1, file_name, diagram.summary()));
    }
    message
}
