//! Arrow drawable types and SVG marker generation.
//!
//! Two kinds of arrows are provided:
//!
//! - [`Arrow`]: a stroked line whose ends carry SVG markers, drawn through an
//!   [`ArrowDrawer`] that collects the marker definitions it needs.
//! - [`BlockArrow`]: a filled polygon made of a shaft and a triangular head,
//!   outlined by a [`BlockArrowHead`].

use std::{collections::HashMap, fmt, rc::Rc, str};

use svg::{self, node::element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::{Bounds, Point, Size},
};

/// Line look of a marker-headed arrow. The marker takes the stroke color.
#[derive(Debug, Clone, Default)]
pub struct ArrowDefinition {
    stroke: Rc<StrokeDefinition>,
}

impl ArrowDefinition {
    pub fn new(stroke: Rc<StrokeDefinition>) -> Self {
        Self { stroke }
    }

    pub fn stroke(&self) -> &Rc<StrokeDefinition> {
        &self.stroke
    }
}

/// Which ends of a line arrow carry a head.
///
/// Parsed from `->`, `<-`, `<->` and `-`, or from the words `forward`,
/// `backward`, `both` and `none`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ArrowDirection {
    #[default]
    Forward, // ->
    Backward,      // <-
    Bidirectional, // <->
    Plain,         // -
}

impl ArrowDirection {
    fn to_str(self) -> &'static str {
        match self {
            Self::Forward => "->",
            Self::Backward => "<-",
            Self::Bidirectional => "<->",
            Self::Plain => "-",
        }
    }
}

impl str::FromStr for ArrowDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "->" | "forward" => Ok(Self::Forward),
            "<-" | "backward" => Ok(Self::Backward),
            "<->" | "both" => Ok(Self::Bidirectional),
            "-" | "none" => Ok(Self::Plain),
            _ => Err(format!(
                "invalid arrow direction `{s}`, valid values: ->, <-, <->, -"
            )),
        }
    }
}

impl fmt::Display for ArrowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

/// A stroked line arrow with direction markers.
#[derive(Debug, Clone)]
pub struct Arrow {
    definition: Rc<ArrowDefinition>,
    direction: ArrowDirection,
}

impl Arrow {
    /// Creates a new Arrow
    pub fn new(definition: Rc<ArrowDefinition>, direction: ArrowDirection) -> Self {
        Self {
            definition,
            direction,
        }
    }

    pub fn direction(&self) -> ArrowDirection {
        self.direction
    }

    fn render_to_svg(&self, start: Point, end: Point) -> Box<dyn svg::Node> {
        let path = svg_element::Path::new()
            .set("d", Self::create_path_data_from_points(start, end))
            .set("fill", "none");

        let mut path = crate::apply_stroke!(path, self.definition.stroke());

        let color = self.definition.stroke().color();
        let (start_marker, end_marker) = Self::get_markers(self.direction, color);

        if let Some(marker) = start_marker {
            path = path.set("marker-start", marker);
        }

        if let Some(marker) = end_marker {
            path = path.set("marker-end", marker);
        }

        Box::new(path)
    }

    fn marker_left_id(color: Color) -> String {
        format!("arrow-left-{}", color.to_id_safe_string())
    }

    fn marker_right_id(color: Color) -> String {
        format!("arrow-right-{}", color.to_id_safe_string())
    }

    /// Get marker references for a direction and color
    fn get_markers(direction: ArrowDirection, color: Color) -> (Option<String>, Option<String>) {
        match direction {
            ArrowDirection::Forward => (
                None,
                Some(format!("url(#{})", Self::marker_right_id(color))),
            ),
            ArrowDirection::Backward => {
                (Some(format!("url(#{})", Self::marker_left_id(color))), None)
            }
            ArrowDirection::Bidirectional => (
                Some(format!("url(#{})", Self::marker_left_id(color))),
                Some(format!("url(#{})", Self::marker_right_id(color))),
            ),
            ArrowDirection::Plain => (None, None),
        }
    }

    /// Create a path data string from two points
    pub fn create_path_data_from_points(start: Point, end: Point) -> String {
        format!("M {} {} L {} {}", start.x(), start.y(), end.x(), end.y())
    }

    fn create_arrow_right(color: Color) -> svg_element::Marker {
        svg_element::Marker::new()
            .set("id", Self::marker_right_id(color))
            .set("viewBox", "0 0 10 10")
            .set("refX", 9)
            .set("refY", 5)
            .set("markerWidth", 6)
            .set("markerHeight", 6)
            .set("orient", "auto")
            .add(
                svg_element::Path::new()
                    .set("d", "M 0 0 L 10 5 L 0 10 z")
                    .set("fill", color.to_svg_value())
                    .set("fill-opacity", color.alpha()),
            )
    }

    fn create_arrow_left(color: Color) -> svg_element::Marker {
        svg_element::Marker::new()
            .set("id", Self::marker_left_id(color))
            .set("viewBox", "0 0 10 10")
            .set("refX", 1)
            .set("refY", 5)
            .set("markerWidth", 6)
            .set("markerHeight", 6)
            .set("orient", "auto")
            .add(
                svg_element::Path::new()
                    .set("d", "M 10 0 L 0 5 L 10 10 z")
                    .set("fill", color.to_svg_value())
                    .set("fill-opacity", color.alpha()),
            )
    }
}

/// Manages line arrow rendering and SVG marker generation.
///
/// The ArrowDrawer collects color information from arrows so that each
/// marker definition is emitted once, however many arrows reference it.
#[derive(Debug, Default)]
pub struct ArrowDrawer {
    heads: HashMap<String, Color>,
    tails: HashMap<String, Color>,
}

impl ArrowDrawer {
    /// Draws an arrow and collects its color for marker generation
    pub fn draw_arrow(&mut self, arrow: &Arrow, start: Point, end: Point) -> LayeredOutput {
        self.register_arrow_markers(arrow);
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Arrow, arrow.render_to_svg(start, end));
        output
    }

    /// Returns `true` when no arrow so far needed a marker.
    pub fn is_empty(&self) -> bool {
        self.heads.is_empty() && self.tails.is_empty()
    }

    /// Generates SVG marker definitions for all collected colors
    pub fn draw_marker_definitions(&self) -> Box<dyn svg::Node> {
        let mut defs = svg_element::Definitions::new();
        // Sorted so repeated renders produce identical documents
        let mut heads: Vec<_> = self.heads.values().collect();
        heads.sort_by_key(|c| c.to_id_safe_string());
        let mut tails: Vec<_> = self.tails.values().collect();
        tails.sort_by_key(|c| c.to_id_safe_string());

        for color in heads {
            defs = defs.add(Arrow::create_arrow_left(*color));
        }
        for color in tails {
            defs = defs.add(Arrow::create_arrow_right(*color));
        }
        defs.into()
    }

    fn register_arrow_markers(&mut self, arrow: &Arrow) {
        let color = arrow.definition.stroke().color();
        let (head, tail) = Arrow::get_markers(arrow.direction, color);
        if let Some(head) = head {
            self.heads.insert(head, color);
        }
        if let Some(tail) = tail {
            self.tails.insert(tail, color);
        }
    }
}

/// Geometry of a block arrow: shaft width plus head width and length.
///
/// The shaft starts at the start point and the head is appended after the
/// end point, so the tip lies `head_length` beyond the end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockArrowHead {
    width: f32,
    head_width: f32,
    head_length: f32,
}

impl BlockArrowHead {
    pub fn new(width: f32, head_width: f32, head_length: f32) -> Self {
        Self {
            width,
            head_width,
            head_length,
        }
    }

    /// Head three times as wide as the shaft and one and a half times as long as wide.
    pub fn with_default_head(width: f32) -> Self {
        let head_width = 3.0 * width;
        Self::new(width, head_width, 1.5 * head_width)
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn head_width(&self) -> f32 {
        self.head_width
    }

    pub fn head_length(&self) -> f32 {
        self.head_length
    }

    /// Computes the closed outline of an arrow from `start` to `end`.
    ///
    /// The seven vertices run from the tip down one side of the head and the
    /// shaft, across the tail and back up the other side. Returns an empty
    /// outline when `start` and `end` coincide.
    pub fn outline(&self, start: Point, end: Point) -> Vec<Point> {
        let delta = end.sub_point(start);
        let Some(direction) = delta.normalize() else {
            return Vec::new();
        };
        let distance = delta.hypot();
        let across = direction.perpendicular();

        let at = |along: f32, side: f32| {
            start
                .add_point(direction.scale(along))
                .add_point(across.scale(side))
        };

        let half_shaft = self.width / 2.0;
        let half_head = self.head_width / 2.0;
        vec![
            at(distance + self.head_length, 0.0),
            at(distance, -half_head),
            at(distance, -half_shaft),
            at(0.0, -half_shaft),
            at(0.0, half_shaft),
            at(distance, half_shaft),
            at(distance, half_head),
        ]
    }
}

/// A filled block arrow given by its outline.
#[derive(Debug, Clone)]
pub struct BlockArrow {
    fill: Color,
    outline: Vec<Point>,
}

impl BlockArrow {
    /// Creates a block arrow from an outline, usually one computed by
    /// [`BlockArrowHead::outline`] and mapped into pixel space.
    pub fn new(fill: Color, outline: Vec<Point>) -> Self {
        Self { fill, outline }
    }

    pub fn outline(&self) -> &[Point] {
        &self.outline
    }

    fn bounds(&self) -> Option<Bounds> {
        let (first, rest) = self.outline.split_first()?;
        Some(rest.iter().fold(first.to_bounds(Size::default()), |acc, p| {
            acc.merge(&p.to_bounds(Size::default()))
        }))
    }
}

impl Drawable for BlockArrow {
    /// Renders the outline translated by `position`.
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let Some((first, rest)) = self.outline.split_first() else {
            return output;
        };

        let first = first.add_point(position);
        let mut data = format!("M {} {}", first.x(), first.y());
        for point in rest {
            let p = point.add_point(position);
            data.push_str(&format!(" L {} {}", p.x(), p.y()));
        }
        data.push_str(" Z");

        let path = svg_element::Path::new()
            .set("d", data)
            .set("fill", self.fill.to_svg_value())
            .set("fill-opacity", self.fill.alpha());

        output.add_to_layer(RenderLayer::Arrow, Box::new(path));
        output
    }

    fn size(&self) -> Size {
        self.bounds().map(|b| b.to_size()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn render_nodes(output: LayeredOutput) -> String {
        output.render().iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_arrow_direction_from_str_valid() {
        let forward: ArrowDirection = "->".parse().unwrap();
        assert_eq!(forward, ArrowDirection::Forward);

        let backward: ArrowDirection = "<-".parse().unwrap();
        assert_eq!(backward, ArrowDirection::Backward);

        let bidirectional: ArrowDirection = "<->".parse().unwrap();
        assert_eq!(bidirectional, ArrowDirection::Bidirectional);

        let plain: ArrowDirection = "none".parse().unwrap();
        assert_eq!(plain, ArrowDirection::Plain);
    }

    #[test]
    fn test_arrow_direction_from_str_invalid() {
        let result: Result<ArrowDirection, _> = ">>".parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_arrow_direction_display() {
        assert_eq!(format!("{}", ArrowDirection::Forward), "->");
        assert_eq!(format!("{}", ArrowDirection::Bidirectional), "<->");
        assert_eq!(format!("{}", ArrowDirection::Plain), "-");
    }

    #[test]
    fn test_create_path_data_from_points() {
        let path = Arrow::create_path_data_from_points(Point::new(10.0, 20.0), Point::new(100.0, 50.0));
        assert_eq!(path, "M 10 20 L 100 50");
    }

    #[test]
    fn test_arrow_drawer_collects_markers_once() {
        let stroke = Rc::new(StrokeDefinition::solid(Color::new("gray").unwrap(), 2.0));
        let arrow = Arrow::new(Rc::new(ArrowDefinition::new(stroke)), ArrowDirection::Forward);

        let mut drawer = ArrowDrawer::default();
        assert!(drawer.is_empty());

        let first = render_nodes(drawer.draw_arrow(&arrow, Point::new(0.0, 0.0), Point::new(10.0, 0.0)));
        drawer.draw_arrow(&arrow, Point::new(0.0, 5.0), Point::new(10.0, 5.0));

        assert!(first.contains("marker-end=\"url(#arrow-right-hex_808080ff)\""));
        assert!(!first.contains("marker-start"));

        let defs = drawer.draw_marker_definitions().to_string();
        assert_eq!(defs.matches("<marker").count(), 1);
    }

    #[test]
    fn test_plain_arrow_has_no_markers() {
        let arrow = Arrow::new(Rc::new(ArrowDefinition::default()), ArrowDirection::Plain);
        let mut drawer = ArrowDrawer::default();

        let svg = render_nodes(drawer.draw_arrow(&arrow, Point::new(0.0, 0.0), Point::new(0.0, 10.0)));

        assert!(!svg.contains("marker"));
        assert!(drawer.is_empty());
    }

    #[test]
    fn test_block_arrow_outline_horizontal() {
        let head = BlockArrowHead::new(0.2, 0.6, 0.5);
        let outline = head.outline(Point::new(0.0, 0.0), Point::new(2.0, 0.0));

        assert_eq!(outline.len(), 7);
        // Tip overshoots the end point by the head length
        assert_approx_eq!(f32, outline[0].x(), 2.5);
        assert_approx_eq!(f32, outline[0].y(), 0.0);
        assert_approx_eq!(f32, outline[1].x(), 2.0);
        assert_approx_eq!(f32, outline[1].y().abs(), 0.3);
        assert_approx_eq!(f32, outline[3].x(), 0.0);
        assert_approx_eq!(f32, outline[3].y().abs(), 0.1);
        assert_approx_eq!(f32, outline[3].y(), -outline[4].y());
    }

    #[test]
    fn test_block_arrow_outline_vertical_direction() {
        let head = BlockArrowHead::new(0.1, 0.2, 0.3);
        let outline = head.outline(Point::new(7.0, 7.7), Point::new(7.0, 3.2));

        assert_approx_eq!(f32, outline[0].x(), 7.0);
        assert_approx_eq!(f32, outline[0].y(), 2.9, epsilon = 0.0001);
    }

    #[test]
    fn test_block_arrow_outline_degenerate() {
        let head = BlockArrowHead::with_default_head(0.1);
        assert!(head.outline(Point::new(1.0, 1.0), Point::new(1.0, 1.0)).is_empty());
        assert_approx_eq!(f32, head.head_width(), 0.3, epsilon = 0.0001);
        assert_approx_eq!(f32, head.head_length(), 0.45, epsilon = 0.0001);
    }

    #[test]
    fn test_block_arrow_render_closed_path() {
        let head = BlockArrowHead::new(2.0, 6.0, 4.0);
        let outline = head.outline(Point::new(0.0, 10.0), Point::new(20.0, 10.0));
        let arrow = BlockArrow::new(Color::new("black").unwrap().with_alpha(0.7), outline);

        let svg = render_nodes(arrow.render_to_layers(Point::default()));
        assert!(svg.contains("data-layer=\"arrow\""));
        assert!(svg.contains("M 24 10"));
        assert!(svg.contains(" Z"));
        assert!(svg.contains("fill-opacity=\"0.7\""));
        assert_approx_eq!(f32, arrow.size().width(), 24.0);
        assert_approx_eq!(f32, arrow.size().height(), 6.0);
    }

    #[test]
    fn test_block_arrow_empty_renders_nothing() {
        let arrow = BlockArrow::new(Color::default(), Vec::new());
        assert!(arrow.render_to_layers(Point::default()).is_empty());
        assert!(arrow.size().is_zero());
    }
}
