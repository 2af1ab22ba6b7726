//! The composed diagram model.
//!
//! A [`Diagram`] is an ordered list of [`ShapeNode`]s in data-space
//! coordinates. Order is paint order: later nodes are drawn over earlier
//! ones. Nodes carry resolved colors and no geometry validation is applied.

use figura_core::{
    color::Color,
    draw::{ArrowDirection, BlockArrowHead, FontSlant, FontWeight, StrokeStyle, TextAnchor, TextBaseline},
    geometry::{Point, Size},
};

/// One drawable element of a diagram.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeNode {
    Box(BoxNode),
    Circle(CircleNode),
    Arrow(ArrowNode),
    Text(TextLine),
    Polygon(PolygonNode),
}

impl ShapeNode {
    /// Short lowercase name of the node kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Box(_) => "box",
            Self::Circle(_) => "circle",
            Self::Arrow(_) => "arrow",
            Self::Text(_) => "text",
            Self::Polygon(_) => "polygon",
        }
    }
}

/// How the corners of a box are drawn.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum CornerStyle {
    #[default]
    Square,
    /// The box grows by `pad` on every side and rounds its corners with radius `pad`.
    Round { pad: f32 },
}

/// Fill, outline and corner style of a box.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStyle {
    fill: Option<Color>,
    border: Option<Color>,
    /// Outline width in points.
    line_width: f32,
    alpha: f32,
    corner: CornerStyle,
}

impl BoxStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fill(mut self, fill: Option<Color>) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_border(mut self, border: Option<Color>) -> Self {
        self.border = border;
        self
    }

    pub fn with_line_width(mut self, line_width: f32) -> Self {
        self.line_width = line_width;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_corner(mut self, corner: CornerStyle) -> Self {
        self.corner = corner;
        self
    }

    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    pub fn border(&self) -> Option<Color> {
        self.border
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn corner(&self) -> CornerStyle {
        self.corner
    }
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            fill: None,
            border: Some(Color::default()),
            line_width: 1.0,
            alpha: 1.0,
            corner: CornerStyle::default(),
        }
    }
}

/// A rectangle anchored at its lower-left corner, with text children.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxNode {
    position: Point,
    size: Size,
    style: BoxStyle,
    lines: Vec<TextLine>,
}

impl BoxNode {
    pub fn new(position: Point, size: Size, lines: Vec<TextLine>, style: BoxStyle) -> Self {
        Self {
            position,
            size,
            style,
            lines,
        }
    }

    /// Lower-left corner in data space.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn style(&self) -> &BoxStyle {
        &self.style
    }

    /// Text drawn over the box, in data-space coordinates.
    pub fn lines(&self) -> &[TextLine] {
        &self.lines
    }
}

/// Fill and outline of a circle.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleStyle {
    fill: Option<Color>,
    edge: Option<Color>,
    /// Outline width in points.
    line_width: f32,
    line_style: StrokeStyle,
    alpha: f32,
}

impl CircleStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fill(mut self, fill: Option<Color>) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_edge(mut self, edge: Option<Color>) -> Self {
        self.edge = edge;
        self
    }

    pub fn with_line_width(mut self, line_width: f32) -> Self {
        self.line_width = line_width;
        self
    }

    pub fn with_line_style(mut self, line_style: StrokeStyle) -> Self {
        self.line_style = line_style;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    pub fn edge(&self) -> Option<Color> {
        self.edge
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    pub fn line_style(&self) -> &StrokeStyle {
        &self.line_style
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }
}

impl Default for CircleStyle {
    fn default() -> Self {
        Self {
            fill: Some(Color::default()),
            edge: None,
            line_width: 1.0,
            line_style: StrokeStyle::Solid,
            alpha: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CircleNode {
    center: Point,
    radius: f32,
    style: CircleStyle,
    label: Option<TextLine>,
}

impl CircleNode {
    pub fn new(center: Point, radius: f32, label: Option<TextLine>, style: CircleStyle) -> Self {
        Self {
            center,
            radius,
            style,
            label,
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn style(&self) -> &CircleStyle {
        &self.style
    }

    pub fn label(&self) -> Option<&TextLine> {
        self.label.as_ref()
    }
}

/// How an arrow is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArrowHead {
    /// Filled block arrow. Dimensions are in data units.
    Filled(BlockArrowHead),
    /// Stroked segment with marker heads. Width is in points.
    Line {
        direction: ArrowDirection,
        width: f32,
        dashed: bool,
    },
}

impl Default for ArrowHead {
    fn default() -> Self {
        Self::Filled(BlockArrowHead::with_default_head(0.05))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrowStyle {
    color: Color,
    alpha: f32,
    head: ArrowHead,
}

impl ArrowStyle {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_head(mut self, head: ArrowHead) -> Self {
        self.head = head;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn head(&self) -> ArrowHead {
        self.head
    }
}

impl Default for ArrowStyle {
    fn default() -> Self {
        Self {
            color: Color::default(),
            alpha: 1.0,
            head: ArrowHead::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrowNode {
    start: Point,
    end: Point,
    style: ArrowStyle,
}

impl ArrowNode {
    pub fn new(start: Point, end: Point, style: ArrowStyle) -> Self {
        Self { start, end, style }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn style(&self) -> &ArrowStyle {
        &self.style
    }
}

/// Rounded box drawn behind a text block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBackground {
    color: Color,
    /// Padding as a multiple of the font size.
    pad: f32,
    alpha: f32,
}

impl TextBackground {
    pub fn new(color: Color, pad: f32, alpha: f32) -> Self {
        Self { color, pad, alpha }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn pad(&self) -> f32 {
        self.pad
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }
}

/// Typography of a text line.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    font_family: String,
    /// Font size in points.
    size: f32,
    weight: FontWeight,
    slant: FontSlant,
    color: Color,
    align: TextAnchor,
    valign: TextBaseline,
    /// Degrees, counter-clockwise.
    rotation: f32,
    background: Option<TextBackground>,
}

impl TextStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_slant(mut self, slant: FontSlant) -> Self {
        self.slant = slant;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_align(mut self, align: TextAnchor) -> Self {
        self.align = align;
        self
    }

    pub fn with_valign(mut self, valign: TextBaseline) -> Self {
        self.valign = valign;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_background(mut self, background: Option<TextBackground>) -> Self {
        self.background = background;
        self
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn weight(&self) -> FontWeight {
        self.weight
    }

    pub fn slant(&self) -> FontSlant {
        self.slant
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn align(&self) -> TextAnchor {
        self.align
    }

    pub fn valign(&self) -> TextBaseline {
        self.valign
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn background(&self) -> Option<&TextBackground> {
        self.background.as_ref()
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: "DejaVu Sans".to_string(),
            size: 10.0,
            weight: FontWeight::Normal,
            slant: FontSlant::Normal,
            color: Color::default(),
            align: TextAnchor::Start,
            valign: TextBaseline::Baseline,
            rotation: 0.0,
            background: None,
        }
    }
}

/// A positioned, possibly multi-line piece of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    position: Point,
    content: String,
    style: TextStyle,
}

impl TextLine {
    pub fn new(position: Point, content: impl Into<String>, style: TextStyle) -> Self {
        Self {
            position,
            content: content.into(),
            style,
        }
    }

    /// Anchor point in data space.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }
}

/// Fill and outline of a polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonStyle {
    fill: Option<Color>,
    edge: Option<Color>,
    /// Outline width in points.
    line_width: f32,
    alpha: f32,
}

impl PolygonStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fill(mut self, fill: Option<Color>) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_edge(mut self, edge: Option<Color>) -> Self {
        self.edge = edge;
        self
    }

    pub fn with_line_width(mut self, line_width: f32) -> Self {
        self.line_width = line_width;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    pub fn edge(&self) -> Option<Color> {
        self.edge
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }
}

impl Default for PolygonStyle {
    fn default() -> Self {
        Self {
            fill: Some(Color::default()),
            edge: None,
            line_width: 1.0,
            alpha: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolygonNode {
    points: Vec<Point>,
    style: PolygonStyle,
}

impl PolygonNode {
    pub fn new(points: Vec<Point>, style: PolygonStyle) -> Self {
        Self { points, style }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn style(&self) -> &PolygonStyle {
        &self.style
    }
}

/// A named, ordered collection of shape nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagram {
    name: String,
    title: String,
    file_name: String,
    nodes: Vec<ShapeNode>,
}

impl Diagram {
    /// Creates an empty diagram. `file_name` is the output file stem.
    pub fn new(name: impl Into<String>, title: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            file_name: file_name.into(),
            nodes: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn nodes(&self) -> &[ShapeNode] {
        &self.nodes
    }

    pub(crate) fn push(&mut self, node: ShapeNode) {
        self.nodes.push(node);
    }
}
