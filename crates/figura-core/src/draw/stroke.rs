//! Outline strokes for shapes and arrows.
//!
//! A [`StrokeDefinition`] carries color, width and [`StrokeStyle`].
//! [`apply_stroke!`](crate::apply_stroke!) writes it onto any SVG element.
//!
//! Dash lengths are multiples of the line width, so a 3px dashed border
//! keeps the rhythm of a 1px one. Widths under one pixel use the bare
//! pattern.

use std::str::FromStr;

use crate::color::Color;

/// Line pattern of a stroke.
///
/// Accepts the plotting shorthands `-`, `--`, `:` and `-.` as well as the
/// spelled-out names, or a comma-separated dash list such as `"4, 2"`.
///
/// ```
/// # use std::str::FromStr;
/// # use figura_core::draw::StrokeStyle;
/// assert_eq!(StrokeStyle::from_str("--"), Ok(StrokeStyle::Dashed));
/// assert_eq!(StrokeStyle::Dashed.dasharray(2.0).as_deref(), Some("7.4,3.2"));
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
    /// Alternating dash and gap lengths, in line widths.
    Custom(Vec<f32>),
}

impl StrokeStyle {
    fn pattern(&self) -> &[f32] {
        match self {
            Self::Solid => &[],
            Self::Dashed => &[3.7, 1.6],
            Self::Dotted => &[1.0, 1.65],
            Self::DashDot => &[6.4, 1.6, 1.0, 1.6],
            Self::Custom(pattern) => pattern,
        }
    }

    /// `stroke-dasharray` value at `width`, `None` when the line is solid.
    pub fn dasharray(&self, width: f32) -> Option<String> {
        let pattern = self.pattern();
        if pattern.is_empty() {
            return None;
        }

        let unit = width.max(1.0);
        let lengths: Vec<String> = pattern.iter().map(|len| (len * unit).to_string()).collect();
        Some(lengths.join(","))
    }
}

impl FromStr for StrokeStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "solid" | "-" => Ok(Self::Solid),
            "dashed" | "--" => Ok(Self::Dashed),
            "dotted" | ":" => Ok(Self::Dotted),
            "dash-dot" | "dashdot" | "-." => Ok(Self::DashDot),
            other => other
                .split(',')
                .map(|len| len.trim().parse::<f32>())
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Custom)
                .map_err(|_| {
                    format!("invalid line style `{s}`, expected solid, dashed, dotted, dash-dot or a dash list")
                }),
        }
    }
}

/// Color, width (pixels) and pattern of an outline.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
}

impl StrokeDefinition {
    /// Solid stroke.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
        }
    }

    pub fn solid(color: Color, width: f32) -> Self {
        Self::new(color, width)
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn dasharray(&self) -> Option<String> {
        self.style.dasharray(self.width)
    }

    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::new(Color::default(), 1.0)
    }
}

/// Sets `stroke`, `stroke-opacity`, `stroke-width` and, for patterned lines,
/// `stroke-dasharray` on an SVG element.
///
/// ```
/// use figura_core::{color::Color, draw::StrokeDefinition};
/// use svg::node::element as svg_element;
///
/// let stroke = StrokeDefinition::solid(Color::new("black").unwrap(), 2.0);
/// let rect = svg_element::Rectangle::new().set("width", 100).set("height", 50);
/// let rect = figura_core::apply_stroke!(rect, &stroke);
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let stroke = $stroke;
        let mut elem = $element
            .set("stroke", stroke.color().to_svg_value())
            .set("stroke-opacity", stroke.color().alpha())
            .set("stroke-width", stroke.width());

        if let Some(dasharray) = stroke.dasharray() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_thin_black_solid() {
        let stroke = StrokeDefinition::default();
        assert_eq!(stroke.width(), 1.0);
        assert_eq!(stroke.color().to_svg_value(), "#000000");
        assert!(stroke.dasharray().is_none());
    }

    #[test]
    fn test_dasharray_follows_width() {
        let mut stroke = StrokeDefinition::new(Color::new("gray").unwrap(), 3.0);
        stroke.set_style(StrokeStyle::Custom(vec![4.0, 2.0]));
        assert_eq!(stroke.dasharray().as_deref(), Some("12,6"));

        // Hairlines keep the unscaled pattern
        assert_eq!(StrokeStyle::Dotted.dasharray(0.5).as_deref(), Some("1,1.65"));
        assert_eq!(StrokeStyle::Custom(Vec::new()).dasharray(2.0), None);
    }

    #[test]
    fn test_line_style_shorthands() {
        assert_eq!("-".parse::<StrokeStyle>(), Ok(StrokeStyle::Solid));
        assert_eq!(":".parse::<StrokeStyle>(), Ok(StrokeStyle::Dotted));
        assert_eq!(" -. ".parse::<StrokeStyle>(), Ok(StrokeStyle::DashDot));
        assert_eq!("dashed".parse::<StrokeStyle>(), Ok(StrokeStyle::Dashed));
        assert_eq!(
            "10, 5".parse::<StrokeStyle>(),
            Ok(StrokeStyle::Custom(vec![10.0, 5.0]))
        );
    }

    #[test]
    fn test_unknown_line_style() {
        let err = "wavy".parse::<StrokeStyle>().unwrap_err();
        assert!(err.contains("invalid line style `wavy`"));
    }

    #[test]
    fn test_apply_stroke_sets_attributes() {
        use svg::node::element as svg_element;

        let mut stroke = StrokeDefinition::new(Color::new("red").unwrap().with_alpha(0.5), 2.0);
        stroke.set_style(StrokeStyle::Dashed);
        let line = crate::apply_stroke!(svg_element::Line::new(), &stroke).to_string();

        assert!(line.contains("stroke=\"#ff0000\""));
        assert!(line.contains("stroke-opacity=\"0.5\""));
        assert!(line.contains("stroke-dasharray=\"7.4,3.2\""));
    }
}
