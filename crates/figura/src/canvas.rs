//! The drawing surface a diagram is rendered onto.
//!
//! A [`Canvas`] couples a physical figure size with the data-space bounds
//! its contents are described in. Data space follows plotting conventions:
//! y grows upward. Pixel space follows SVG conventions: y grows downward.
//! The two axes scale independently, so a data-space circle on a canvas
//! whose aspect differs from its bounds renders as an ellipse.

use figura_core::{
    color::Color,
    geometry::{Bounds, Point, Size},
};

/// Resolution used when none is configured.
pub const DEFAULT_DPI: f32 = 100.0;

/// Figure size, resolution and coordinate bounds of a rendered diagram.
///
/// # Examples
///
/// ```
/// use figura::canvas::Canvas;
/// use figura::geometry::{Point, Size};
///
/// let canvas = Canvas::new(Size::new(10.0, 10.0));
/// assert_eq!(canvas.pixel_size(), (1000, 1000));
///
/// // The top-left corner of data space maps to the pixel origin
/// let origin = canvas.to_pixel(Point::new(0.0, 10.0));
/// assert_eq!(origin, Point::new(0.0, 0.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    figure: Size,
    bounds: Bounds,
    dpi: f32,
    background: Option<Color>,
}

impl Canvas {
    /// Creates a canvas of `size` inches whose data bounds are `[0, w] × [0, h]`.
    pub fn new(size: Size) -> Self {
        Self {
            figure: size,
            bounds: Bounds::new_from_corners(
                Point::default(),
                Point::new(size.width(), size.height()),
            ),
            dpi: DEFAULT_DPI,
            background: None,
        }
    }

    /// Sets the data-space ranges covered by the canvas.
    pub fn with_bounds(mut self, x_range: (f32, f32), y_range: (f32, f32)) -> Self {
        self.bounds = Bounds::new_from_corners(
            Point::new(x_range.0, y_range.0),
            Point::new(x_range.1, y_range.1),
        );
        self
    }

    /// Sets the resolution in pixels per inch.
    pub fn with_dpi(mut self, dpi: f32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Sets the color painted under every shape. `None` leaves it transparent.
    pub fn with_background(mut self, background: Option<Color>) -> Self {
        self.background = background;
        self
    }

    pub fn figure(&self) -> Size {
        self.figure
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn dpi(&self) -> f32 {
        self.dpi
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    /// Output image size in whole pixels, never smaller than one.
    pub fn pixel_size(&self) -> (u32, u32) {
        let to_px = |inches: f32| (inches * self.dpi).round().max(1.0) as u32;
        (to_px(self.figure.width()), to_px(self.figure.height()))
    }

    /// Pixels per data unit along x.
    pub fn scale_x(&self) -> f32 {
        let (width, _) = self.pixel_size();
        width as f32 / self.bounds.width()
    }

    /// Pixels per data unit along y.
    pub fn scale_y(&self) -> f32 {
        let (_, height) = self.pixel_size();
        height as f32 / self.bounds.height()
    }

    /// Maps a data-space point to pixel space, flipping the y axis.
    pub fn to_pixel(&self, point: Point) -> Point {
        Point::new(
            (point.x() - self.bounds.min_x()) * self.scale_x(),
            (self.bounds.max_y() - point.y()) * self.scale_y(),
        )
    }

    /// Maps a data-space extent to pixel space.
    pub fn to_pixel_size(&self, size: Size) -> Size {
        Size::new(size.width() * self.scale_x(), size.height() * self.scale_y())
    }

    /// Converts a typographic length in points to pixels.
    pub fn points_to_pixels(&self, points: f32) -> f32 {
        points * self.dpi / 72.0
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_canvas_new_defaults() {
        let canvas = Canvas::new(Size::new(4.0, 3.0));
        assert_approx_eq!(f32, canvas.dpi(), DEFAULT_DPI);
        assert_eq!(canvas.pixel_size(), (400, 300));
        assert!(canvas.background().is_none());
        assert_approx_eq!(f32, canvas.bounds().max_x(), 4.0);
        assert_approx_eq!(f32, canvas.bounds().max_y(), 3.0);
    }

    #[test]
    fn test_to_pixel_maps_corners_with_flipped_y() {
        let canvas = Canvas::new(Size::new(18.0, 14.0))
            .with_bounds((0.0, 14.0), (0.0, 12.0))
            .with_dpi(300.0);
        let (width, height) = canvas.pixel_size();

        let bottom_left = canvas.to_pixel(Point::new(0.0, 0.0));
        assert_approx_eq!(f32, bottom_left.x(), 0.0);
        assert_approx_eq!(f32, bottom_left.y(), height as f32);

        let top_right = canvas.to_pixel(Point::new(14.0, 12.0));
        assert_approx_eq!(f32, top_right.x(), width as f32, epsilon = 0.01);
        assert_approx_eq!(f32, top_right.y(), 0.0, epsilon = 0.01);
    }

    #[test]
    fn test_non_uniform_scale() {
        let canvas = Canvas::new(Size::new(16.0, 12.0))
            .with_bounds((0.0, 12.0), (0.0, 10.0))
            .with_dpi(100.0);

        assert_approx_eq!(f32, canvas.scale_x(), 1600.0 / 12.0);
        assert_approx_eq!(f32, canvas.scale_y(), 120.0);

        let circle = canvas.to_pixel_size(Size::new(2.0, 2.0));
        assert!(circle.width() > circle.height());
    }

    #[test]
    fn test_points_to_pixels() {
        let canvas = Canvas::new(Size::new(1.0, 1.0)).with_dpi(144.0);
        assert_approx_eq!(f32, canvas.points_to_pixels(10.0), 20.0);
    }

    #[test]
    fn test_pixel_size_never_zero() {
        let canvas = Canvas::new(Size::new(0.0, 0.001)).with_dpi(10.0);
        assert_eq!(canvas.pixel_size(), (1, 1));
    }
}
