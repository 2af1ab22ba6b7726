//! Incremental construction and rendering of a single diagram.

use std::path::{Path, PathBuf};

use log::{debug, info};

use figura_core::geometry::{Point, Size};

use crate::{
    FiguraError,
    canvas::Canvas,
    config::OutputFormat,
    diagram::{
        ArrowNode, ArrowStyle, BoxNode, BoxStyle, CircleNode, CircleStyle, CornerStyle, Diagram,
        PolygonNode, PolygonStyle, ShapeNode, TextLine, TextStyle,
    },
    export::{self, Exporter},
    theme::Theme,
};

/// Result of rendering a diagram to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    path: PathBuf,
    width: u32,
    height: u32,
    byte_len: usize,
}

impl RenderedImage {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Size of the written file in bytes.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }
}

/// Builds an ordered list of shape nodes and renders it.
///
/// Every `add_*` call appends exactly one node. Nodes are painted in the
/// order they were added, later ones over earlier ones.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
///
/// use figura::{Composer, Theme, canvas::Canvas};
/// use figura::geometry::{Point, Size};
///
/// let theme = Theme::default();
/// let mut composer = Composer::new(theme, "sketch", "Sketch", "Sketch");
///
/// let style = composer.box_style();
/// composer.add_box(Point::new(0.0, 0.0), Size::new(2.0, 2.0), Vec::new(), style);
/// let arrow = composer.arrow_style();
/// composer.add_arrow(Point::new(0.0, 0.0), Point::new(2.0, 2.0), arrow);
///
/// let canvas = Canvas::new(Size::new(10.0, 10.0));
/// let image = composer.render(&canvas, Path::new("sketch.png")).expect("Failed to render");
/// assert!(image.byte_len() > 0);
/// ```
#[derive(Debug, Clone)]
pub struct Composer {
    theme: Theme,
    diagram: Diagram,
}

impl Composer {
    /// Creates a composer for an empty diagram. `file_name` is the output file stem.
    pub fn new(
        theme: Theme,
        name: impl Into<String>,
        title: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            theme,
            diagram: Diagram::new(name, title, file_name),
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Box style seeded from the theme: themed border and rounded corners.
    pub fn box_style(&self) -> BoxStyle {
        BoxStyle::new()
            .with_border(Some(self.theme.border_color()))
            .with_line_width(self.theme.line_width())
            .with_corner(CornerStyle::Round {
                pad: self.theme.corner_pad(),
            })
    }

    /// Text style seeded from the theme font family and text color.
    pub fn text_style(&self) -> TextStyle {
        TextStyle::new()
            .with_font_family(self.theme.font_family())
            .with_color(self.theme.text_color())
    }

    /// Circle style with a themed outline and no fill.
    pub fn circle_style(&self) -> CircleStyle {
        CircleStyle::new()
            .with_fill(None)
            .with_edge(Some(self.theme.border_color()))
    }

    /// Polygon style with a themed outline and no fill.
    pub fn polygon_style(&self) -> PolygonStyle {
        PolygonStyle::new()
            .with_fill(None)
            .with_edge(Some(self.theme.border_color()))
    }

    /// Filled arrow in the theme border color.
    pub fn arrow_style(&self) -> ArrowStyle {
        ArrowStyle::new(self.theme.border_color())
    }

    /// Appends a box anchored at its lower-left corner.
    pub fn add_box(&mut self, position: Point, size: Size, lines: Vec<TextLine>, style: BoxStyle) -> &mut Self {
        self.push(ShapeNode::Box(BoxNode::new(position, size, lines, style)))
    }

    /// Appends an arrow from `from` to `to`.
    pub fn add_arrow(&mut self, from: Point, to: Point, style: ArrowStyle) -> &mut Self {
        self.push(ShapeNode::Arrow(ArrowNode::new(from, to, style)))
    }

    /// Appends an arrow from `from` to `from + delta`.
    pub fn add_arrow_delta(&mut self, from: Point, delta: Point, style: ArrowStyle) -> &mut Self {
        self.add_arrow(from, from.add_point(delta), style)
    }

    /// Appends a circle, optionally with a label.
    pub fn add_circle(&mut self, center: Point, radius: f32, label: Option<TextLine>, style: CircleStyle) -> &mut Self {
        self.push(ShapeNode::Circle(CircleNode::new(center, radius, label, style)))
    }

    /// Appends a free-standing text line.
    pub fn add_text(&mut self, line: TextLine) -> &mut Self {
        self.push(ShapeNode::Text(line))
    }

    /// Appends a closed polygon.
    pub fn add_polygon(&mut self, points: Vec<Point>, style: PolygonStyle) -> &mut Self {
        self.push(ShapeNode::Polygon(PolygonNode::new(points, style)))
    }

    fn push(&mut self, node: ShapeNode) -> &mut Self {
        debug!(diagram = self.diagram.name(), kind = node.kind(); "Adding node");
        self.diagram.push(node);
        self
    }

    /// Nodes added so far, in paint order.
    pub fn shapes(&self) -> &[ShapeNode] {
        self.diagram.nodes()
    }

    pub fn len(&self) -> usize {
        self.diagram.nodes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagram.nodes().is_empty()
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn into_diagram(self) -> Diagram {
        self.diagram
    }

    /// Renders all nodes onto `canvas` and writes the image to `path`.
    ///
    /// The format follows the path extension: `.svg` writes SVG, anything
    /// else PNG.
    ///
    /// # Errors
    ///
    /// Returns [`FiguraError::Export`] if rendering or writing fails.
    pub fn render(&self, canvas: &Canvas, path: &Path) -> Result<RenderedImage, FiguraError> {
        let mut exporter = export::exporter_for(OutputFormat::from_path(path));
        self.render_with(exporter.as_mut(), canvas, path)
    }

    /// Renders with a caller-provided exporter, so one exporter can serve many diagrams.
    pub fn render_with(
        &self,
        exporter: &mut dyn Exporter,
        canvas: &Canvas,
        path: &Path,
    ) -> Result<RenderedImage, FiguraError> {
        info!(
            diagram = self.diagram.name(),
            nodes = self.len(),
            format:% = exporter.format();
            "Rendering diagram"
        );

        let bytes = exporter.export(self.diagram.nodes(), canvas)?;
        export::write_image(&bytes, path)?;

        let (width, height) = canvas.pixel_size();
        Ok(RenderedImage {
            path: path.to_path_buf(),
            width,
            height,
            byte_len: bytes.len(),
        })
    }
}
