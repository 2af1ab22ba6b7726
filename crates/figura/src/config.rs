//! Configuration types for Figura diagram rendering.
//!
//! This module provides configuration structures that control how diagrams
//! are rasterized and styled. All types implement [`serde::Deserialize`] for
//! loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining render, style and palette settings.
//! - [`RenderConfig`] - Resolution, background and output format.
//! - [`StyleConfig`] - Defaults used when a description leaves a style unset.
//!
//! # Example
//!
//! ```
//! # use figura::config::AppConfig;
//! let config: AppConfig = toml::from_str(r##"
//!     [render]
//!     dpi = 150
//!
//!     [palette]
//!     field_work = "#e74c3c"
//! "##).unwrap();
//!
//! assert_eq!(config.render().dpi(), 150.0);
//! assert_eq!(config.style().font_family(), "DejaVu Sans");
//! assert_eq!(config.palette().len(), 1);
//! ```

use std::{fmt, path::Path, str::FromStr};

use indexmap::IndexMap;
use serde::Deserialize;

use figura_core::color::Color;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Render configuration section.
    #[serde(default)]
    render: RenderConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Named colors shared by every diagram, in declaration order.
    #[serde(default)]
    palette: IndexMap<String, String>,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(render: RenderConfig, style: StyleConfig, palette: IndexMap<String, String>) -> Self {
        Self {
            render,
            style,
            palette,
        }
    }

    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the configured palette as unparsed color strings.
    pub fn palette(&self) -> &IndexMap<String, String> {
        &self.palette
    }
}

/// Image format written by the exporters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
}

impl OutputFormat {
    /// File extension for this format, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }

    /// Picks the format from a path's extension. Anything but `.svg` is PNG.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => Self::Svg,
            _ => Self::Png,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            _ => Err(format!("invalid output format `{s}`, valid values: png, svg")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Raster output settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Pixels per inch of figure size.
    dpi: f32,

    /// Canvas background as a color string, `"none"` for transparent.
    background: String,

    /// Default output format.
    format: OutputFormat,
}

impl RenderConfig {
    pub fn dpi(&self) -> f32 {
        self.dpi
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Returns the parsed background [`Color`], or `None` for a transparent canvas.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background(&self) -> Result<Option<Color>, String> {
        if self.background.eq_ignore_ascii_case("none") {
            return Ok(None);
        }
        Color::new(&self.background)
            .map(Some)
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            dpi: 300.0,
            background: "white".to_string(),
            format: OutputFormat::default(),
        }
    }
}

/// Visual defaults applied when a description leaves a style unset.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    font_family: String,
    text_color: String,
    border_color: String,
    /// Box outline width in points.
    line_width: f32,
    /// Rounded box padding and corner radius, in data units.
    corner_pad: f32,
}

impl StyleConfig {
    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn text_color(&self) -> &str {
        &self.text_color
    }

    pub fn border_color(&self) -> &str {
        &self.border_color
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    pub fn corner_pad(&self) -> f32 {
        self.corner_pad
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_family: "DejaVu Sans".to_string(),
            text_color: "black".to_string(),
            border_color: "black".to_string(),
            line_width: 2.0,
            corner_pad: 0.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_approx_eq!(f32, config.render().dpi(), 300.0);
        assert_eq!(config.render().format(), OutputFormat::Png);
        assert!(config.render().background().unwrap().is_some());
        assert_approx_eq!(f32, config.style().line_width(), 2.0);
        assert!(config.palette().is_empty());
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [render]
            format = "svg"
            background = "none"

            [style]
            corner_pad = 0.2
            "#,
        )
        .unwrap();

        assert_eq!(config.render().format(), OutputFormat::Svg);
        assert_approx_eq!(f32, config.render().dpi(), 300.0);
        assert!(config.render().background().unwrap().is_none());
        assert_approx_eq!(f32, config.style().corner_pad(), 0.2);
        assert_eq!(config.style().text_color(), "black");
    }

    #[test]
    fn test_palette_keeps_order() {
        let config: AppConfig = toml::from_str(
            r#"
            [palette]
            zeta = "red"
            alpha = "blue"
            "#,
        )
        .unwrap();

        let keys: Vec<_> = config.palette().keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha"]);
    }

    #[test]
    fn test_invalid_background() {
        let config: AppConfig = toml::from_str("[render]\nbackground = \"nope\"").unwrap();
        assert!(config.render().background().is_err());
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::from_str("SVG").unwrap(), OutputFormat::Svg);
        assert!(OutputFormat::from_str("gif").is_err());
        assert_eq!(OutputFormat::from_path(Path::new("a/b.svg")), OutputFormat::Svg);
        assert_eq!(OutputFormat::from_path(Path::new("a/b.png")), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("a/b")), OutputFormat::Png);
        assert_eq!(OutputFormat::Svg.to_string(), "svg");
    }
}
