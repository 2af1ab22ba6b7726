//! Closed outlines: rectangles, ovals and polygons.
//!
//! A [`ShapeDefinition`] holds the look of a shape (fill, outline, corner
//! rounding). A [`Shape`] pairs a shared definition with the pixel size to
//! draw it at.

use std::rc::Rc;

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::{Point, Size},
};

mod oval;
mod polygon;
mod rectangle;

pub use oval::OvalDefinition;
pub use polygon::PolygonDefinition;
pub use rectangle::RectangleDefinition;

/// Appearance of a closed shape, independent of where and how large it is drawn.
pub trait ShapeDefinition: std::fmt::Debug {
    /// SVG element for the shape at `size`, centered on `position`.
    fn render_to_svg(&self, size: Size, position: Point) -> Box<dyn svg::Node>;

    fn clone_box(&self) -> Box<dyn ShapeDefinition>;

    /// Returns the fill color, `None` for an unfilled shape.
    fn fill_color(&self) -> Option<Color>;

    /// Returns the outline, `None` for a shape drawn without one.
    fn stroke(&self) -> Option<&StrokeDefinition>;

    /// Set the fill color for the shape
    fn set_fill_color(&mut self, color: Option<Color>);

    /// Set the outline for the shape
    fn set_stroke(&mut self, stroke: Option<StrokeDefinition>);

    /// Set the corner radii, horizontal and vertical, in pixels
    fn set_corner_radius(&mut self, _radius: Size) -> Result<(), &'static str> {
        Err("rounded corners are not supported for this shape")
    }
}

// Needed by `Rc::make_mut` on shared definitions.
impl Clone for Box<dyn ShapeDefinition> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Applies the fill of a definition to an SVG element. No fill renders as `none`.
macro_rules! apply_fill {
    ($element:expr, $fill:expr) => {{
        match $fill {
            Some(color) => $element
                .set("fill", color.to_svg_value())
                .set("fill-opacity", color.alpha()),
            None => $element.set("fill", "none"),
        }
    }};
}
pub(crate) use apply_fill;

/// A shape instance that combines a definition with its rendered size.
#[derive(Debug, Clone)]
pub struct Shape {
    definition: Rc<Box<dyn ShapeDefinition>>,
    size: Size,
}

impl Shape {
    pub fn new(definition: Rc<Box<dyn ShapeDefinition>>, size: Size) -> Self {
        Self { definition, size }
    }

    pub fn definition(&self) -> &dyn ShapeDefinition {
        self.definition.as_ref().as_ref()
    }
}

impl Drawable for Shape {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let node = self.definition.render_to_svg(self.size, position);
        output.add_to_layer(RenderLayer::Shape, node);
        output
    }

    fn size(&self) -> Size {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(shape: &Shape, position: Point) -> String {
        shape
            .render_to_layers(position)
            .render()
            .iter()
            .map(|n| n.to_string())
            .collect()
    }

    #[test]
    fn test_shape_renders_on_shape_layer() {
        let def: Rc<Box<dyn ShapeDefinition>> = Rc::new(Box::new(RectangleDefinition::new()));
        let shape = Shape::new(def, Size::new(40.0, 20.0));

        let svg = render(&shape, Point::new(50.0, 50.0));
        assert!(svg.contains("data-layer=\"shape\""));
        assert!(svg.contains("<rect"));
        assert_eq!(shape.size(), Size::new(40.0, 20.0));
    }

    #[test]
    fn test_shape_definition_clone_via_rc_make_mut() {
        let mut def: Rc<Box<dyn ShapeDefinition>> = Rc::new(Box::new(OvalDefinition::new()));
        let shared = Rc::clone(&def);

        Rc::make_mut(&mut def).set_fill_color(Some(Color::new("red").unwrap()));

        assert!(def.fill_color().is_some());
        assert!(shared.fill_color().is_none());
    }

    #[test]
    fn test_corner_radius_unsupported_on_oval() {
        let mut oval = OvalDefinition::new();
        assert!(oval.set_corner_radius(Size::new(2.0, 2.0)).is_err());

        let mut rect = RectangleDefinition::new();
        assert!(rect.set_corner_radius(Size::new(2.0, 2.0)).is_ok());
    }
}
