use svg::{self, node::element as svg_element};

use super::{ShapeDefinition, apply_fill};
use crate::{
    apply_stroke,
    color::Color,
    draw::StrokeDefinition,
    geometry::{Bounds, Point, Size},
};

/// Closed polygon shape definition.
///
/// Vertices are offsets from the shape center, in pixels. The size handed to
/// [`ShapeDefinition::render_to_svg`] is ignored since the vertices already
/// carry the extent; use [`PolygonDefinition::size`] to get it.
#[derive(Debug, Clone, Default)]
pub struct PolygonDefinition {
    fill_color: Option<Color>,
    stroke: Option<StrokeDefinition>,
    vertices: Vec<Point>,
}

impl PolygonDefinition {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self {
            vertices,
            ..Self::default()
        }
    }

    /// Builds a definition from absolute vertices, returning it with their centroid.
    pub fn from_absolute(vertices: &[Point]) -> (Self, Point) {
        let center = Self::bounds_of(vertices)
            .map(|b| b.center())
            .unwrap_or_default();
        let relative = vertices.iter().map(|v| v.sub_point(center)).collect();
        (Self::new(relative), center)
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Size of the box enclosing all vertices.
    pub fn size(&self) -> Size {
        Self::bounds_of(&self.vertices)
            .map(|b| b.to_size())
            .unwrap_or_default()
    }

    fn bounds_of(vertices: &[Point]) -> Option<Bounds> {
        let (first, rest) = vertices.split_first()?;
        Some(rest.iter().fold(first.to_bounds(Size::default()), |acc, v| {
            acc.merge(&v.to_bounds(Size::default()))
        }))
    }
}

impl ShapeDefinition for PolygonDefinition {
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

    fn render_to_svg(&self, _size: Size, position: Point) -> Box<dyn svg::Node> {
        let points = self
            .vertices
            .iter()
            .map(|v| {
                let p = position.add_point(*v);
                format!("{},{}", p.x(), p.y())
            })
            .collect::<Vec<_>>()
            .join(" ");

        let mut polygon = svg_element::Polygon::new().set("points", points);

        polygon = apply_fill!(polygon, self.fill_color);

        if let Some(stroke) = &self.stroke {
            polygon = apply_stroke!(polygon, stroke);
        }

        polygon.into()
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_polygon_from_absolute_centers_vertices() {
        let diamond = [
            Point::new(10.0, 20.0),
            Point::new(20.0, 10.0),
            Point::new(30.0, 20.0),
            Point::new(20.0, 30.0),
        ];
        let (def, center) = PolygonDefinition::from_absolute(&diamond);

        assert_approx_eq!(f32, center.x(), 20.0);
        assert_approx_eq!(f32, center.y(), 20.0);
        assert_approx_eq!(f32, def.size().width(), 20.0);
        assert_approx_eq!(f32, def.size().height(), 20.0);
        assert_approx_eq!(f32, def.vertices()[0].x(), -10.0);
    }

    #[test]
    fn test_polygon_render_points() {
        let def = PolygonDefinition::new(vec![
            Point::new(-1.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 2.0),
        ]);

        let svg = def
            .render_to_svg(Size::default(), Point::new(5.0, 5.0))
            .to_string();

        assert!(svg.contains("points=\"4,5 6,5 5,7\""));
        assert!(svg.contains("fill=\"none\""));
    }

    #[test]
    fn test_polygon_empty_has_zero_size() {
        let def = PolygonDefinition::new(Vec::new());
        assert!(def.size().is_zero());
    }
}
