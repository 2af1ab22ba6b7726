//! SVG rendering of composed diagrams.
//!
//! Each node becomes one `<g data-node="i">` group, appended in insertion
//! order so that SVG document order gives the painter's algorithm. Node
//! geometry is mapped from data space to pixels through the [`Canvas`].

use std::rc::Rc;

use log::debug;
use svg::{self, Document, node::element as svg_element};

use figura_core::{
    draw::{
        Arrow, ArrowDefinition, ArrowDrawer, BlockArrow, Drawable, OvalDefinition,
        PolygonDefinition, PositionedDrawable, RectangleDefinition, Shape, ShapeDefinition,
        StrokeDefinition, StrokeStyle, SvgNode, Text, TextDefinition,
    },
    geometry::{Insets, Point, Size},
};

use crate::{
    canvas::Canvas,
    config::OutputFormat,
    diagram::{ArrowHead, ArrowNode, BoxNode, CircleNode, CornerStyle, PolygonNode, ShapeNode, TextLine},
    export::{self, Exporter},
};

/// Renders diagrams to SVG documents.
#[derive(Debug, Default)]
pub struct SvgExporter {
    arrow_drawer: ArrowDrawer,
}

impl SvgExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders `nodes` onto `canvas` as an SVG document sized to the canvas in pixels.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] if the canvas bounds have no extent.
    pub fn render_document(&mut self, nodes: &[ShapeNode], canvas: &Canvas) -> Result<Document, export::Error> {
        let bounds = canvas.bounds();
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return Err(export::Error::Render(format!(
                "canvas bounds must have a positive extent, got {} x {}",
                bounds.width(),
                bounds.height()
            )));
        }

        self.arrow_drawer = ArrowDrawer::default();
        let (width, height) = canvas.pixel_size();

        let mut doc = Document::new()
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("width", width)
            .set("height", height);

        if let Some(background) = canvas.background() {
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", width)
                    .set("height", height)
                    .set("fill", background.to_svg_value())
                    .set("fill-opacity", background.alpha()),
            );
        }

        let groups: Vec<_> = nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| {
                let mut group = svg_element::Group::new()
                    .set("data-node", idx.to_string())
                    .set("data-kind", node.kind());
                for svg_node in self.render_node(node, canvas) {
                    group = group.add(svg_node);
                }
                group
            })
            .collect();

        // Markers are known only after every line arrow is drawn
        if !self.arrow_drawer.is_empty() {
            doc = doc.add(self.arrow_drawer.draw_marker_definitions());
        }

        for group in groups {
            doc = doc.add(group);
        }

        debug!(nodes = nodes.len(), width = width, height = height; "SVG document rendered");
        Ok(doc)
    }

    fn render_node(&mut self, node: &ShapeNode, canvas: &Canvas) -> Vec<SvgNode> {
        match node {
            ShapeNode::Box(node) => self.render_box(node, canvas),
            ShapeNode::Circle(node) => self.render_circle(node, canvas),
            ShapeNode::Arrow(node) => self.render_arrow(node, canvas),
            ShapeNode::Text(line) => Self::render_text(line, canvas),
            ShapeNode::Polygon(node) => Self::render_polygon(node, canvas),
        }
    }

    fn render_box(&self, node: &BoxNode, canvas: &Canvas) -> Vec<SvgNode> {
        let style = node.style();

        // Rounded boxes grow by their pad on every side
        let (lower_left, size, radius) = match style.corner() {
            CornerStyle::Square => (node.position(), node.size(), Size::default()),
            CornerStyle::Round { pad } => (
                node.position().sub_point(Point::new(pad, pad)),
                Size::new(node.size().width() + 2.0 * pad, node.size().height() + 2.0 * pad),
                Size::new(pad, pad),
            ),
        };
        let center = lower_left.add_point(Point::new(size.width() / 2.0, size.height() / 2.0));

        let mut definition =
            RectangleDefinition::new().with_corner_radius(canvas.to_pixel_size(radius));
        definition.set_fill_color(style.fill().map(|c| c.with_alpha(style.alpha())));
        definition.set_stroke(style.border().map(|c| {
            StrokeDefinition::solid(
                c.with_alpha(style.alpha()),
                canvas.points_to_pixels(style.line_width()),
            )
        }));

        let definition: Rc<Box<dyn ShapeDefinition>> = Rc::new(Box::new(definition));
        let shape = Shape::new(definition, canvas.to_pixel_size(size));

        let mut nodes = PositionedDrawable::new(shape)
            .with_position(canvas.to_pixel(center))
            .render_to_layers()
            .render();
        for line in node.lines() {
            nodes.extend(Self::render_text(line, canvas));
        }
        nodes
    }

    fn render_circle(&self, node: &CircleNode, canvas: &Canvas) -> Vec<SvgNode> {
        let style = node.style();
        let diameter = 2.0 * node.radius();

        let mut definition = OvalDefinition::new();
        definition.set_fill_color(style.fill().map(|c| c.with_alpha(style.alpha())));
        definition.set_stroke(style.edge().map(|c| {
            let mut stroke = StrokeDefinition::new(
                c.with_alpha(style.alpha()),
                canvas.points_to_pixels(style.line_width()),
            );
            stroke.set_style(style.line_style().clone());
            stroke
        }));

        let definition: Rc<Box<dyn ShapeDefinition>> = Rc::new(Box::new(definition));
        let shape = Shape::new(definition, canvas.to_pixel_size(Size::new(diameter, diameter)));

        let mut nodes = PositionedDrawable::new(shape)
            .with_position(canvas.to_pixel(node.center()))
            .render_to_layers()
            .render();
        if let Some(label) = node.label() {
            nodes.extend(Self::render_text(label, canvas));
        }
        nodes
    }

    fn render_arrow(&mut self, node: &ArrowNode, canvas: &Canvas) -> Vec<SvgNode> {
        let style = node.style();
        let color = style.color().with_alpha(style.alpha());

        match style.head() {
            ArrowHead::Filled(head) => {
                // Outline is built in data space so the head keeps its data proportions
                let outline = head
                    .outline(node.start(), node.end())
                    .into_iter()
                    .map(|p| canvas.to_pixel(p))
                    .collect();
                BlockArrow::new(color, outline)
                    .render_to_layers(Point::default())
                    .render()
            }
            ArrowHead::Line {
                direction,
                width,
                dashed,
            } => {
                let mut stroke = StrokeDefinition::new(color, canvas.points_to_pixels(width));
                if dashed {
                    stroke.set_style(StrokeStyle::Dashed);
                }
                let definition = Rc::new(ArrowDefinition::new(Rc::new(stroke)));
                let arrow = Arrow::new(definition, direction);
                self.arrow_drawer
                    .draw_arrow(&arrow, canvas.to_pixel(node.start()), canvas.to_pixel(node.end()))
                    .render()
            }
        }
    }

    fn render_text(line: &TextLine, canvas: &Canvas) -> Vec<SvgNode> {
        let style = line.style();
        let font_size = canvas.points_to_pixels(style.size());

        let mut definition = TextDefinition::new();
        definition.set_font_family(style.font_family());
        definition.set_font_size(font_size);
        definition.set_weight(style.weight());
        definition.set_slant(style.slant());
        definition.set_color(Some(style.color()));
        definition.set_anchor(style.align());
        definition.set_baseline(style.valign());
        definition.set_rotation(style.rotation());
        if let Some(background) = style.background() {
            definition.set_background_color(Some(background.color().with_alpha(background.alpha())));
            definition.set_padding(Insets::uniform(background.pad() * font_size));
        }

        Text::new(&definition, line.content())
            .render_to_layers(canvas.to_pixel(line.position()))
            .render()
    }

    fn render_polygon(node: &PolygonNode, canvas: &Canvas) -> Vec<SvgNode> {
        let style = node.style();
        let points: Vec<Point> = node.points().iter().map(|p| canvas.to_pixel(*p)).collect();

        let (mut definition, center) = PolygonDefinition::from_absolute(&points);
        definition.set_fill_color(style.fill().map(|c| c.with_alpha(style.alpha())));
        definition.set_stroke(style.edge().map(|c| {
            StrokeDefinition::solid(
                c.with_alpha(style.alpha()),
                canvas.points_to_pixels(style.line_width()),
            )
        }));
        let size = definition.size();

        let definition: Rc<Box<dyn ShapeDefinition>> = Rc::new(Box::new(definition));
        PositionedDrawable::new(Shape::new(definition, size))
            .with_position(center)
            .render_to_layers()
            .render()
    }
}

impl Exporter for SvgExporter {
    fn export(&mut self, nodes: &[ShapeNode], canvas: &Canvas) -> Result<Vec<u8>, export::Error> {
        let doc = self.render_document(nodes, canvas)?;
        Ok(doc.to_string().into_bytes())
    }

    fn format(&self) -> OutputFormat {
        OutputFormat::Svg
    }
}
