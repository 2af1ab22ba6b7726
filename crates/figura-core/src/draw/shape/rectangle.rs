use svg::{self, node::element as svg_element};

use super::{ShapeDefinition, apply_fill};
use crate::{
    apply_stroke,
    color::Color,
    draw::StrokeDefinition,
    geometry::{Point, Size},
};

/// Rectangle shape definition, optionally with rounded corners.
///
/// Corner radii are kept per axis so a corner stays round under a
/// non-uniform data to pixel scale.
#[derive(Debug, Clone, Default)]
pub struct RectangleDefinition {
    fill_color: Option<Color>,
    stroke: Option<StrokeDefinition>,
    corner_radius: Size,
}

impl RectangleDefinition {
    /// Create a new rectangle definition with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the corner radii, horizontal and vertical, in pixels (builder style).
    pub fn with_corner_radius(mut self, radius: Size) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn corner_radius(&self) -> Size {
        self.corner_radius
    }
}

impl ShapeDefinition for RectangleDefinition {
    fn clone_box(&self) -> Box<dyn ShapeDefinition> {
        Box::new(self.clone())
    }

    fn fill_color(&self) -> Option<Color> {
        self.fill_color
    }

    fn stroke(&self) -> Option<&StrokeDefinition> {
        self.stroke.as_ref()
    }

    fn set_fill_color(&mut self, color: Option<Color>) {
        self.fill_color = color;
    }

    fn set_stroke(&mut self, stroke: Option<StrokeDefinition>) {
        self.stroke = stroke;
    }

    fn set_corner_radius(&mut self, radius: Size) -> Result<(), &'static str> {
        self.corner_radius = radius;
        Ok(())
    }

    fn render_to_svg(&self, size: Size, position: Point) -> Box<dyn svg::Node> {
        // Position is the center of the rectangle
        let bounds = position.to_bounds(size);

        let mut rect = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", size.width())
            .set("height", size.height());

        if !self.corner_radius.is_zero() {
            rect = rect
                .set("rx", self.corner_radius.width())
                .set("ry", self.corner_radius.height());
        }

        rect = apply_fill!(rect, self.fill_color);

        if let Some(stroke) = &self.stroke {
            rect = apply_stroke!(rect, stroke);
        }

        rect.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_render_position_and_fill() {
        let mut rect = RectangleDefinition::new();
        rect.set_fill_color(Some(Color::new("#3498db").unwrap().with_alpha(0.5)));

        let svg = rect
            .render_to_svg(Size::new(20.0, 10.0), Point::new(50.0, 50.0))
            .to_string();

        assert!(svg.contains("x=\"40\""));
        assert!(svg.contains("y=\"45\""));
        assert!(svg.contains("fill=\"#3498db\""));
        assert!(svg.contains("fill-opacity=\"0.5\""));
        assert!(!svg.contains("stroke="));
        assert!(!svg.contains("rx="));
    }

    #[test]
    fn test_rectangle_render_rounded_with_stroke() {
        let mut rect = RectangleDefinition::new();
        rect.set_stroke(Some(StrokeDefinition::solid(Color::default(), 2.0)));
        rect.set_corner_radius(Size::new(4.0, 3.0)).unwrap();

        let svg = rect
            .render_to_svg(Size::new(20.0, 10.0), Point::new(50.0, 50.0))
            .to_string();

        assert!(svg.contains("rx=\"4\""));
        assert!(svg.contains("ry=\"3\""));
        assert!(svg.contains("fill=\"none\""));
        assert!(svg.contains("stroke=\"#000000\""));
        assert!(svg.contains("stroke-width=\"2\""));
    }
}
