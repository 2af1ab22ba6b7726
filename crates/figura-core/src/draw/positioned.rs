//! Anchoring a drawable at a pixel position.

use crate::{
    draw::{Drawable, LayeredOutput},
    geometry::{Bounds, Point},
};

/// A drawable placed with its center at `position`.
///
/// Shapes are described by size alone; the exporter computes where each one
/// sits on the canvas and wraps it here before rendering.
#[derive(Debug, Clone)]
pub struct PositionedDrawable<D: Drawable> {
    drawable: D,
    position: Point,
}

impl<D: Drawable> PositionedDrawable<D> {
    /// Wraps `drawable` at the origin.
    pub fn new(drawable: D) -> Self {
        Self {
            drawable,
            position: Point::default(),
        }
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Pixel area the drawable covers.
    pub fn bounds(&self) -> Bounds {
        self.position.to_bounds(self.drawable.size())
    }

    pub fn render_to_layers(&self) -> LayeredOutput {
        self.drawable.render_to_layers(self.position)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::{
        color::Color,
        draw::{OvalDefinition, Shape, ShapeDefinition},
        geometry::Size,
    };

    fn disc(diameter: f32) -> Shape {
        let mut definition = OvalDefinition::new();
        definition.set_fill_color(Some(Color::new("teal").unwrap()));
        let definition: Rc<Box<dyn ShapeDefinition>> = Rc::new(Box::new(definition));
        Shape::new(definition, Size::new(diameter, diameter))
    }

    #[test]
    fn test_defaults_to_origin() {
        let positioned = PositionedDrawable::new(disc(10.0));
        assert_eq!(positioned.position(), Point::default());
        assert_approx_eq!(f32, positioned.bounds().min_x(), -5.0);
    }

    #[test]
    fn test_bounds_centered_on_position() {
        let positioned = PositionedDrawable::new(disc(40.0)).with_position(Point::new(100.0, 50.0));
        let bounds = positioned.bounds();

        assert_approx_eq!(f32, bounds.min_x(), 80.0);
        assert_approx_eq!(f32, bounds.max_y(), 70.0);
    }

    #[test]
    fn test_renders_at_stored_position() {
        let svg: String = PositionedDrawable::new(disc(20.0))
            .with_position(Point::new(30.0, 60.0))
            .render_to_layers()
            .render()
            .iter()
            .map(|node| node.to_string())
            .collect();

        assert!(svg.contains("cx=\"30\""));
        assert!(svg.contains("cy=\"60\""));
    }
}
