//! Figura - A declarative diagram composer and renderer.
//!
//! Diagrams are ordered lists of boxes, circles, arrows, polygons and text
//! placed in data coordinates. They are built through a [`Composer`], either
//! directly or from TOML descriptions, and rendered to PNG or SVG with the
//! painter's algorithm.

pub mod canvas;
pub mod catalog;
pub mod config;
pub mod description;
pub mod diagram;
pub mod export;

mod composer;
mod error;
mod theme;

pub use figura_core::{color, draw, geometry};

pub use composer::{Composer, RenderedImage};
pub use error::FiguraError;
pub use theme::Theme;

use std::path::Path;

use log::{debug, info};

use canvas::Canvas;
use config::{AppConfig, OutputFormat};
use description::DiagramDescription;

/// Outcome of generating one diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDiagram {
    name: String,
    title: String,
    summary: String,
    image: RenderedImage,
}

impl GeneratedDiagram {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// One-line summary of the diagram content.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn image(&self) -> &RenderedImage {
        &self.image
    }
}

/// Builder for composing and rendering Figura diagrams.
///
/// Holds the configuration and the theme resolved from it, and drives
/// descriptions through parsing, composition and rendering.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
///
/// use figura::{DiagramBuilder, config::{AppConfig, OutputFormat}};
///
/// let builder = DiagramBuilder::new(AppConfig::default())
///     .expect("Invalid configuration");
///
/// // Render every built-in diagram into the current directory
/// let generated = builder
///     .generate_all(Path::new("."), &[], OutputFormat::Png)
///     .expect("Failed to generate");
///
/// for diagram in &generated {
///     println!("{} - {}", diagram.image().path().display(), diagram.summary());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DiagramBuilder {
    config: AppConfig,
    theme: Theme,
}

impl Default for DiagramBuilder {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            theme: Theme::default(),
        }
    }
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FiguraError::Config`] if a configured color does not parse.
    pub fn new(config: AppConfig) -> Result<Self, FiguraError> {
        let theme = Theme::from_config(&config)?;
        Ok(Self { config, theme })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Parse a TOML description. `name` labels the source in errors.
    ///
    /// # Errors
    ///
    /// Returns [`FiguraError::Description`] for malformed descriptions.
    pub fn parse(&self, name: &str, source: &str) -> Result<DiagramDescription, FiguraError> {
        debug!(name = name; "Parsing description");
        DiagramDescription::parse(name, source)
    }

    /// Compose a parsed description with the builder theme and render settings.
    ///
    /// # Errors
    ///
    /// Returns [`FiguraError::Config`] if the configured background is not a
    /// color, or [`FiguraError::Description`] if a record does not resolve.
    pub fn compose(
        &self,
        description: &DiagramDescription,
    ) -> Result<(Composer, Canvas), FiguraError> {
        let render = self.config.render();
        let background = render
            .background()
            .map_err(|err| FiguraError::Config(format!("render.background: {err}")))?;
        description.compose(&self.theme, render.dpi(), background)
    }

    /// Render built-in diagrams into `out_dir`, one file per diagram.
    ///
    /// With an empty `filter` every built-in diagram is generated, otherwise
    /// only the named ones, still in catalog order. Existing files are
    /// overwritten. The first failure aborts the run.
    ///
    /// # Errors
    ///
    /// Returns [`FiguraError::Config`] for an unknown diagram name, or any
    /// description or export error of the diagram being generated.
    pub fn generate_all(
        &self,
        out_dir: &Path,
        filter: &[String],
        format: OutputFormat,
    ) -> Result<Vec<GeneratedDiagram>, FiguraError> {
        if let Some(unknown) = filter
            .iter()
            .find(|name| catalog::find(name.as_str()).is_none())
        {
            let available: Vec<&str> = catalog::builtin().iter().map(|entry| entry.name()).collect();
            return Err(FiguraError::Config(format!(
                "unknown diagram `{unknown}`, available: {}",
                available.join(", ")
            )));
        }

        let entries = catalog::builtin()
            .iter()
            .filter(|entry| filter.is_empty() || filter.iter().any(|name| name == entry.name()));

        let mut exporter = export::exporter_for(format);
        let mut generated = Vec::new();
        for entry in entries {
            let description = self.parse(entry.name(), entry.source())?;
            let (composer, canvas) = self.compose(&description)?;

            let path = out_dir.join(format!("{}.{}", description.file_name(), format.extension()));
            let image = composer.render_with(exporter.as_mut(), &canvas, &path)?;

            generated.push(GeneratedDiagram {
                name: description.name().to_string(),
                title: description.title().to_string(),
                summary: description.summary().to_string(),
                image,
            });
        }

        info!(count = generated.len(), out_dir:? = out_dir; "Generated diagrams");
        Ok(generated)
    }
}
