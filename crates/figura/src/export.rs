//! Export functionality for Figura diagrams.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! turning a composed node list into image bytes, and [`write_image`] which
//! puts those bytes on disk. It is the final stage in the Figura pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Description (TOML)
//!     ↓ parse
//! DiagramDescription
//!     ↓ compose
//! Diagram (ordered ShapeNodes) + Canvas
//!     ↓ export (this module)
//! Output File
//! ```
//!
//! # Available Backends
//!
//! - [`svg::SvgExporter`]: SVG text built with the `svg` crate
//! - [`png::PngExporter`]: the same SVG rasterized with `resvg`
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering rendering failures, raster
//! failures and I/O errors. [`Error`] converts into [`FiguraError::Export`]
//! at the crate boundary.
//!
//! [`FiguraError::Export`]: crate::FiguraError::Export

/// PNG export backend.
pub mod png;
/// SVG export backend.
pub mod svg;

use std::{fs, path::Path};

use log::{error, info};

use crate::{canvas::Canvas, config::OutputFormat, diagram::ShapeNode};

/// Abstraction for diagram export backends.
///
/// Implementors paint the nodes in order (later nodes over earlier ones)
/// onto the canvas and return the encoded image.
pub trait Exporter {
    /// Exports an ordered node list to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the nodes cannot be drawn on the canvas,
    /// or [`Error::Raster`] if rasterizing or encoding fails.
    fn export(&mut self, nodes: &[ShapeNode], canvas: &Canvas) -> Result<Vec<u8>, Error>;

    /// The format this backend produces.
    fn format(&self) -> OutputFormat;
}

/// Creates the exporter for `format`.
pub fn exporter_for(format: OutputFormat) -> Box<dyn Exporter> {
    match format {
        OutputFormat::Png => Box::new(png::PngExporter::new()),
        OutputFormat::Svg => Box::new(svg::SvgExporter::new()),
    }
}

/// Writes encoded image bytes to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be written.
pub fn write_image(bytes: &[u8], path: &Path) -> Result<(), Error> {
    info!(path:? = path, bytes = bytes.len(); "Creating image file");

    if let Err(err) = fs::write(path, bytes) {
        error!(path:? = path, err:err; "Failed to write image file");
        return Err(Error::Io(err));
    }

    Ok(())
}

/// Errors that can occur during diagram export.
///
/// This type is converted into [`FiguraError::Export`] at the crate
/// boundary via the [`From`] implementation in [`crate::FiguraError`].
///
/// [`FiguraError::Export`]: crate::FiguraError::Export
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// Rasterizing or encoding the rendered document failed.
    Raster(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Raster(msg) => write!(f, "Raster error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) | Self::Raster(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
