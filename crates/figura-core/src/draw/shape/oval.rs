use svg::{self, node::element as svg_element};

use super::{ShapeDefinition, apply_fill};
use crate::{
    apply_stroke,
    color::Color,
    draw::StrokeDefinition,
    geometry::{Point, Size},
};

/// Oval shape definition. Equal width and height gives a circle.
#[derive(Debug, Clone, Default)]
pub struct OvalDefinition {
    fill_color: Option<Color>,
    stroke: Option<StrokeDefinition>,
}

impl OvalDefinition {
    /// Create a new oval definition with default values
    pub fn new() -> Self {
        Self::default()
    }
}

impl ShapeDefinition for OvalDefinition {
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

    fn render_to_svg(&self, size: Size, position: Point) -> Box<dyn svg::Node> {
        let mut ellipse = svg_element::Ellipse::new()
            .set("cx", position.x())
            .set("cy", position.y())
            .set("rx", size.width() / 2.0)
            .set("ry", size.height() / 2.0);

        ellipse = apply_fill!(ellipse, self.fill_color);

        if let Some(stroke) = &self.stroke {
            ellipse = apply_stroke!(ellipse, stroke);
        }

        ellipse.into()
    }
}
