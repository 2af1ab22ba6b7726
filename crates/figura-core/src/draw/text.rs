//! Labels and multi-line text.
//!
//! A [`TextDefinition`] is the font, color, alignment and optional background
//! shared by any number of [`Text`] values. Each [`Text`] renders as one SVG
//! `<text>` with a `<tspan>` per line, measured with cosmic-text so that
//! backgrounds and alignment fit the shaped glyphs.
//!
//! # Example
//!
//! ```
//! # use figura_core::draw::{TextAnchor, TextDefinition, Text};
//! let mut style = TextDefinition::new();
//! style.set_font_family("DejaVu Sans");
//! style.set_font_size(14.0);
//! style.set_anchor(TextAnchor::Middle);
//!
//! let text = Text::new(&style, "Soil sampling\nPhase 2");
//! assert!(text.calculate_size().width() > 0.0);
//! ```
//!
//! # Anchoring
//!
//! The position handed to [`Drawable::render_to_layers`] is the text anchor:
//! [`TextAnchor`] picks which horizontal edge of each line sits on it and
//! [`TextBaseline`] picks which vertical reference of the whole block does.
//! Rotation turns the block counter-clockwise around that same point.

use std::{
    str::FromStr,
    sync::{Arc, Mutex, OnceLock},
};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Style, Weight};
use log::{info, warn};
use svg::{self, node::Text as SvgText, node::element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::{Bounds, Insets, Point, Size},
};

/// Share of the font size above the baseline.
const ASCENT: f32 = 0.8;
/// Share of the font size below the baseline.
const DESCENT: f32 = 0.2;

// =============================================================================
// Type Definitions
// =============================================================================

/// Font weight of a text element.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FromStr for FontWeight {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Self::Normal),
            "bold" => Ok(Self::Bold),
            _ => Err(format!(
                "invalid font weight `{s}`, valid values: normal, bold"
            )),
        }
    }
}

/// Font slant of a text element.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FontSlant {
    #[default]
    Normal,
    Italic,
}

impl FromStr for FontSlant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Self::Normal),
            "italic" => Ok(Self::Italic),
            _ => Err(format!(
                "invalid font style `{s}`, valid values: normal, italic"
            )),
        }
    }
}

/// Horizontal alignment of each line relative to the anchor point.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    /// The line starts at the anchor
    #[default]
    Start,
    /// The line is centered on the anchor
    Middle,
    /// The line ends at the anchor
    End,
}

impl TextAnchor {
    /// Returns the SVG text-anchor value
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }

    /// Offset of the line's left edge from the anchor, for a line of `width`.
    fn left_offset(self, width: f32) -> f32 {
        match self {
            Self::Start => 0.0,
            Self::Middle => -width / 2.0,
            Self::End => -width,
        }
    }
}

impl FromStr for TextAnchor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" | "start" => Ok(Self::Start),
            "center" | "middle" => Ok(Self::Middle),
            "right" | "end" => Ok(Self::End),
            _ => Err(format!(
                "invalid text alignment `{s}`, valid values: left, center, right"
            )),
        }
    }
}

/// Vertical reference of a text block that sits on the anchor point.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    /// Baseline of the first line
    #[default]
    Baseline,
    /// Middle of the whole block
    Center,
    /// Top of the first line
    Top,
    /// Bottom of the last line
    Bottom,
}

impl FromStr for TextBaseline {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "baseline" => Ok(Self::Baseline),
            "center" | "middle" => Ok(Self::Center),
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            _ => Err(format!(
                "invalid vertical alignment `{s}`, valid values: baseline, center, top, bottom"
            )),
        }
    }
}

/// Defines the visual style for text elements in diagrams.
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"DejaVu Sans"` |
/// | Font size | `15` px |
/// | Weight / slant | normal |
/// | Text color | `None` (SVG default, black) |
/// | Background color | `None` |
/// | Padding | Zero on all sides |
/// | Anchor | start, baseline |
/// | Line spacing | `1.2` × font size |
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_family: String,
    font_size: f32,
    weight: FontWeight,
    slant: FontSlant,
    color: Option<Color>,
    background_color: Option<Color>,
    padding: Insets,
    anchor: TextAnchor,
    baseline: TextBaseline,
    rotation: f32,
    line_spacing: f32,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font size in pixels.
    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    /// Sets the font family for the text.
    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    /// Sets the font weight.
    pub fn set_weight(&mut self, weight: FontWeight) {
        self.weight = weight;
    }

    /// Sets the font slant.
    pub fn set_slant(&mut self, slant: FontSlant) {
        self.slant = slant;
    }

    /// Sets the text color. `None` falls back to the SVG default (black).
    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    /// Sets the background color for the text.
    ///
    /// When set, the text block is drawn over a rounded rectangle grown by
    /// the padding on every side.
    pub fn set_background_color(&mut self, color: Option<Color>) {
        self.background_color = color;
    }

    /// Sets the padding between the text block and its background edges.
    pub fn set_padding(&mut self, padding: Insets) {
        self.padding = padding;
    }

    /// Sets the horizontal anchor.
    pub fn set_anchor(&mut self, anchor: TextAnchor) {
        self.anchor = anchor;
    }

    /// Sets the vertical anchor.
    pub fn set_baseline(&mut self, baseline: TextBaseline) {
        self.baseline = baseline;
    }

    /// Sets the rotation in degrees, counter-clockwise.
    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees;
    }

    /// Returns the font size in pixels.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Returns the font family.
    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// Returns the font weight.
    pub fn weight(&self) -> FontWeight {
        self.weight
    }

    /// Returns the font slant.
    pub fn slant(&self) -> FontSlant {
        self.slant
    }

    /// Returns a reference to the text color, if set.
    pub fn color(&self) -> Option<&Color> {
        self.color.as_ref()
    }

    /// Returns a reference to the background color, if set.
    pub fn background_color(&self) -> Option<&Color> {
        self.background_color.as_ref()
    }

    /// Returns the current padding configuration.
    pub fn padding(&self) -> Insets {
        self.padding
    }

    /// Returns the horizontal anchor.
    pub fn anchor(&self) -> TextAnchor {
        self.anchor
    }

    /// Returns the vertical anchor.
    pub fn baseline(&self) -> TextBaseline {
        self.baseline
    }

    /// Returns the rotation in degrees, counter-clockwise.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Distance between consecutive baselines, in pixels.
    pub fn line_height(&self) -> f32 {
        self.font_size * self.line_spacing
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: "DejaVu Sans".to_string(),
            font_size: 15.0,
            weight: FontWeight::default(),
            slant: FontSlant::default(),
            color: None,
            background_color: None,
            padding: Insets::default(),
            anchor: TextAnchor::default(),
            baseline: TextBaseline::default(),
            rotation: 0.0,
            line_spacing: 1.2,
        }
    }
}

/// A renderable text element combining content with styling.
///
/// # Examples
///
/// ```
/// # use figura_core::draw::{TextDefinition, Text};
/// let style = TextDefinition::new();
/// let text = Text::new(&style, "IMPACT\nZONE");
///
/// assert_eq!(text.line_count(), 2);
/// assert_eq!(text.content(), "IMPACT\nZONE");
/// ```
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    content: &'a str,
}

impl<'a> Text<'a> {
    /// Creates a new text element with the given definition and content.
    pub fn new(definition: &'a TextDefinition, content: &'a str) -> Self {
        Self {
            definition,
            content,
        }
    }

    /// Returns the text content of this element.
    pub fn content(&self) -> &str {
        self.content
    }

    /// Returns the number of rendered lines. Empty content has none.
    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }

    /// Calculate the total size required to display this text, including padding.
    pub fn calculate_size(&self) -> Size {
        let padding = self.definition.padding();
        self.calculate_size_without_padding().add_padding(padding)
    }

    /// Calculate the size of the text block without padding.
    ///
    /// Width comes from shaping each line with the configured font; height
    /// spans from the top of the first line to the bottom of the last.
    fn calculate_size_without_padding(&self) -> Size {
        let lines = self.line_count();
        if lines == 0 {
            return Size::default();
        }
        let width = TEXT_MANAGER
            .get_or_init(TextManager::new)
            .measure_width(self.content, self.definition);
        Size::new(width, self.block_height())
    }

    /// From the ascent of the first line to the descent of the last.
    fn block_height(&self) -> f32 {
        let extra_lines = self.line_count().saturating_sub(1) as f32;
        extra_lines * self.definition.line_height() + (ASCENT + DESCENT) * self.definition.font_size()
    }

    /// Baseline of the first line, relative to the anchor's y coordinate.
    fn first_baseline_offset(&self) -> f32 {
        let size = self.definition.font_size();
        let block_height = self.block_height();
        match self.definition.baseline() {
            TextBaseline::Baseline => 0.0,
            TextBaseline::Top => ASCENT * size,
            TextBaseline::Center => -block_height / 2.0 + ASCENT * size,
            TextBaseline::Bottom => -block_height + ASCENT * size,
        }
    }

    /// Bounds of the unrotated text block when anchored at `position`.
    fn block_bounds(&self, position: Point) -> Bounds {
        let size = self.calculate_size_without_padding();
        let top = position.y() + self.first_baseline_offset() - ASCENT * self.definition.font_size();
        let left = position.x() + self.definition.anchor().left_offset(size.width());
        Bounds::new_from_top_left(Point::new(left, top), size)
    }
}

impl<'a> Drawable for Text<'a> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        if self.line_count() == 0 {
            return output;
        }

        let definition = self.definition;
        let baseline_y = position.y() + self.first_baseline_offset();

        let mut rendered_text = svg_element::Text::new("")
            .set("x", position.x())
            .set("y", baseline_y)
            .set("text-anchor", definition.anchor().to_svg_value())
            .set("font-family", definition.font_family())
            .set("font-size", definition.font_size());

        if definition.weight() == FontWeight::Bold {
            rendered_text = rendered_text.set("font-weight", "bold");
        }
        if definition.slant() == FontSlant::Italic {
            rendered_text = rendered_text.set("font-style", "italic");
        }
        if let Some(color) = definition.color() {
            rendered_text = rendered_text
                .set("fill", color.to_svg_value())
                .set("fill-opacity", color.alpha());
        }

        for (idx, line) in self.content.lines().enumerate() {
            let dy = if idx == 0 { 0.0 } else { definition.line_height() };
            let tspan = svg_element::TSpan::new("")
                .set("x", position.x())
                .set("dy", dy)
                .add(SvgText::new(line));
            rendered_text = rendered_text.add(tspan);
        }

        let rotation = (definition.rotation() != 0.0).then(|| {
            format!(
                "rotate({} {} {})",
                -definition.rotation(),
                position.x(),
                position.y()
            )
        });

        if let Some(bg_color) = definition.background_color() {
            let padding = definition.padding();
            let bg_bounds = self.block_bounds(position).add_padding(padding);
            let radius = padding.top().min(padding.left());

            let mut bg = svg_element::Rectangle::new()
                .set("x", bg_bounds.min_x())
                .set("y", bg_bounds.min_y())
                .set("width", bg_bounds.width())
                .set("height", bg_bounds.height())
                .set("fill", bg_color.to_svg_value())
                .set("fill-opacity", bg_color.alpha())
                .set("rx", radius);
            if let Some(transform) = &rotation {
                bg = bg.set("transform", transform.clone());
            }

            output.add_to_layer(RenderLayer::Background, Box::new(bg));
        }

        if let Some(transform) = rotation {
            rendered_text = rendered_text.set("transform", transform);
        }

        output.add_to_layer(RenderLayer::Text, Box::new(rendered_text));
        output
    }

    fn size(&self) -> Size {
        self.calculate_size()
    }
}

/// Process-wide cosmic-text font system, loaded on first measurement.
struct TextManager {
    font_system: Arc<Mutex<FontSystem>>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Arc::new(Mutex::new(FontSystem::new())),
        }
    }

    /// Width in pixels of the widest line of `text`, shaped with cosmic-text.
    ///
    /// Falls back to an estimate from the character count when no font is
    /// available for shaping.
    fn measure_width(&self, text: &str, text_def: &TextDefinition) -> f32 {
        let font_size = text_def.font_size();
        let estimate = text
            .lines()
            .map(|line| line.chars().count() as f32 * font_size * 0.55)
            .fold(0.0, f32::max);

        let Ok(mut font_system) = self.font_system.lock() else {
            warn!("FontSystem lock poisoned, estimating text width");
            return estimate;
        };

        let metrics = Metrics::new(font_size, text_def.line_height());
        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let weight = match text_def.weight() {
            FontWeight::Normal => Weight::NORMAL,
            FontWeight::Bold => Weight::BOLD,
        };
        let style = match text_def.slant() {
            FontSlant::Normal => Style::Normal,
            FontSlant::Italic => Style::Italic,
        };
        let attrs = Attrs::new()
            .family(Family::Name(text_def.font_family()))
            .weight(weight)
            .style(style);

        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let max_width = buffer
            .layout_runs()
            .filter_map(|run| run.glyphs.last().map(|last| last.x + last.w))
            .fold(0.0, f32::max);

        if max_width > 0.0 { max_width } else { estimate }
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn rendered(text: &Text, position: Point) -> String {
        text.render_to_layers(position)
            .render()
            .iter()
            .map(|node| node.to_string())
            .collect()
    }

    #[test]
    fn test_text_definition_defaults() {
        let def = TextDefinition::new();
        assert_approx_eq!(f32, def.font_size(), 15.0);
        assert_eq!(def.font_family(), "DejaVu Sans");
        assert_eq!(def.weight(), FontWeight::Normal);
        assert_eq!(def.anchor(), TextAnchor::Start);
        assert_eq!(def.baseline(), TextBaseline::Baseline);
        assert!(def.color().is_none());
        assert!(def.background_color().is_none());
        assert_approx_eq!(f32, def.line_height(), 18.0);
    }

    #[test]
    fn test_anchor_and_baseline_from_str() {
        assert_eq!(TextAnchor::from_str("center").unwrap(), TextAnchor::Middle);
        assert_eq!(TextAnchor::from_str("right").unwrap(), TextAnchor::End);
        assert!(TextAnchor::from_str("justify").is_err());

        assert_eq!(TextBaseline::from_str("center").unwrap(), TextBaseline::Center);
        assert!(TextBaseline::from_str("hanging").is_err());

        assert_eq!(FontWeight::from_str("bold").unwrap(), FontWeight::Bold);
        assert_eq!(FontSlant::from_str("italic").unwrap(), FontSlant::Italic);
    }

    #[test]
    fn test_text_calculate_size_empty() {
        let def = TextDefinition::new();
        let text = Text::new(&def, "");
        let size = text.calculate_size();
        assert_approx_eq!(f32, size.width(), 0.0);
        assert_approx_eq!(f32, size.height(), 0.0);
    }

    #[test]
    fn test_text_calculate_size_multiline_height() {
        let mut def = TextDefinition::new();
        def.set_font_size(10.0);
        let multi = Text::new(&def, "Line 1\nLine 2\nLine 3");

        // Two line gaps plus one font size
        assert_approx_eq!(f32, multi.calculate_size().height(), 34.0);
        assert!(multi.calculate_size().width() > 0.0);
    }

    #[test]
    fn test_text_calculate_size_includes_padding() {
        let mut def_no_padding = TextDefinition::new();
        def_no_padding.set_padding(Insets::uniform(0.0));
        let size_no_padding = Text::new(&def_no_padding, "Test").calculate_size();

        let mut def_with_padding = TextDefinition::new();
        def_with_padding.set_padding(Insets::uniform(20.0));
        let size_with_padding = Text::new(&def_with_padding, "Test").calculate_size();

        assert_approx_eq!(
            f32,
            size_with_padding.width() - size_no_padding.width(),
            40.0
        );
        assert_approx_eq!(
            f32,
            size_with_padding.height() - size_no_padding.height(),
            40.0
        );
    }

    #[test]
    fn test_first_baseline_offsets() {
        let mut def = TextDefinition::new();
        def.set_font_size(10.0);
        let text = Text::new(&def, "A\nB");

        assert_approx_eq!(f32, text.first_baseline_offset(), 0.0);

        def.set_baseline(TextBaseline::Top);
        let text = Text::new(&def, "A\nB");
        assert_approx_eq!(f32, text.first_baseline_offset(), 8.0);

        // Block is 22px tall: centered block starts 11px above the anchor
        def.set_baseline(TextBaseline::Center);
        let text = Text::new(&def, "A\nB");
        assert_approx_eq!(f32, text.first_baseline_offset(), -3.0);

        def.set_baseline(TextBaseline::Bottom);
        let text = Text::new(&def, "A\nB");
        assert_approx_eq!(f32, text.first_baseline_offset(), -14.0);
    }

    #[test]
    fn test_text_render_attributes() {
        let mut def = TextDefinition::new();
        def.set_weight(FontWeight::Bold);
        def.set_slant(FontSlant::Italic);
        def.set_anchor(TextAnchor::Middle);
        def.set_color(Some(Color::new("white").unwrap()));
        let text = Text::new(&def, "PHASE I\nFIELD");

        let svg = rendered(&text, Point::new(50.0, 40.0));
        assert!(svg.contains("font-weight=\"bold\""));
        assert!(svg.contains("font-style=\"italic\""));
        assert!(svg.contains("text-anchor=\"middle\""));
        assert!(svg.contains("fill=\"#ffffff\""));
        assert_eq!(svg.matches("<tspan").count(), 2);
        assert!(!svg.contains("transform"));
    }

    #[test]
    fn test_text_render_rotation() {
        let mut def = TextDefinition::new();
        def.set_rotation(90.0);
        let text = Text::new(&def, "Feedback");

        let svg = rendered(&text, Point::new(10.0, 20.0));
        assert!(svg.contains("rotate(-90 10 20)"));
    }

    #[test]
    fn test_text_render_with_background_adds_layer() {
        let mut def = TextDefinition::new();
        def.set_background_color(Some(Color::new("yellow").unwrap()));
        def.set_padding(Insets::uniform(3.0));
        let text = Text::new(&def, "With Background");

        let nodes = text.render_to_layers(Point::new(0.0, 0.0)).render();
        assert_eq!(nodes.len(), 2);
        assert!(nodes[0].to_string().contains("data-layer=\"background\""));
    }

    #[test]
    fn test_background_spans_ascent_and_descent() {
        let mut def = TextDefinition::new();
        def.set_font_size(10.0);
        def.set_background_color(Some(Color::new("white").unwrap()));
        let text = Text::new(&def, "Zone");

        // Baseline at y=50: 8px above it, 2px below
        let bounds = text.block_bounds(Point::new(0.0, 50.0));
        assert_approx_eq!(f32, bounds.min_y(), 42.0);
        assert_approx_eq!(f32, bounds.max_y(), 52.0);

        let svg = rendered(&text, Point::new(0.0, 50.0));
        assert!(svg.contains("y=\"42\""));
        assert!(svg.contains("height=\"10\""));
    }

    #[test]
    fn test_text_render_empty_is_empty() {
        let def = TextDefinition::new();
        let text = Text::new(&def, "");
        assert!(text.render_to_layers(Point::default()).is_empty());
    }
}
