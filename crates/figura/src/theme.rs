//! Resolved colors and style defaults shared by every diagram of a run.

use indexmap::IndexMap;

use figura_core::color::Color;

use crate::{FiguraError, config::AppConfig};

/// Named palette plus the style defaults a [`Composer`](crate::Composer) falls back to.
///
/// Color references resolve against the palette first, then as CSS colors.
///
/// # Examples
///
/// ```
/// use figura::{Theme, config::AppConfig};
///
/// let config: AppConfig = toml::from_str("[palette]\nred = \"#e74c3c\"").unwrap();
/// let theme = Theme::from_config(&config).unwrap();
///
/// // Palette names shadow CSS names
/// assert_eq!(theme.color("red").unwrap().to_svg_value(), "#e74c3c");
/// assert_eq!(theme.color("blue").unwrap().to_svg_value(), "#0000ff");
/// assert!(theme.color("not-a-color").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Theme {
    palette: IndexMap<String, Color>,
    font_family: String,
    text_color: Color,
    border_color: Color,
    line_width: f32,
    corner_pad: f32,
}

impl Theme {
    /// Builds a theme from configuration, parsing every palette entry up front.
    ///
    /// # Errors
    ///
    /// Returns [`FiguraError::Config`] naming the first color that fails to parse.
    pub fn from_config(config: &AppConfig) -> Result<Self, FiguraError> {
        let style = config.style();
        let mut theme = Self {
            palette: IndexMap::new(),
            font_family: style.font_family().to_string(),
            text_color: Color::default(),
            border_color: Color::default(),
            line_width: style.line_width(),
            corner_pad: style.corner_pad(),
        };

        theme.palette = theme
            .parse_palette(config.palette())
            .map_err(FiguraError::Config)?;
        theme.text_color = theme
            .color(style.text_color())
            .map_err(|err| FiguraError::Config(format!("style.text_color: {err}")))?;
        theme.border_color = theme
            .color(style.border_color())
            .map_err(|err| FiguraError::Config(format!("style.border_color: {err}")))?;

        Ok(theme)
    }

    /// Returns a copy of this theme with `palette` merged over its own.
    ///
    /// Entries may refer to names already in the palette.
    pub fn with_overrides(&self, palette: &IndexMap<String, String>) -> Result<Self, String> {
        let mut theme = self.clone();
        let parsed = theme.parse_palette(palette)?;
        theme.palette.extend(parsed);
        Ok(theme)
    }

    fn parse_palette(&self, entries: &IndexMap<String, String>) -> Result<IndexMap<String, Color>, String> {
        let mut parsed = IndexMap::with_capacity(entries.len());
        for (name, value) in entries {
            let color = parsed
                .get(value)
                .copied()
                .map(Ok)
                .unwrap_or_else(|| self.color(value))
                .map_err(|err| format!("palette entry `{name}`: {err}"))?;
            parsed.insert(name.clone(), color);
        }
        Ok(parsed)
    }

    /// Resolves a color reference: palette name first, then CSS color syntax.
    pub fn color(&self, reference: &str) -> Result<Color, String> {
        match self.palette.get(reference) {
            Some(color) => Ok(*color),
            None => Color::new(reference),
        }
    }

    pub fn palette(&self) -> &IndexMap<String, Color> {
        &self.palette
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn text_color(&self) -> Color {
        self.text_color
    }

    pub fn border_color(&self) -> Color {
        self.border_color
    }

    /// Default box outline width in points.
    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    /// Default rounded box padding in data units.
    pub fn corner_pad(&self) -> f32 {
        self.corner_pad
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&AppConfig::default()).expect("default style colors are valid CSS colors")
    }
}
