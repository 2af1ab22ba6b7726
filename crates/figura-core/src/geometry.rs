//! Pixel-space geometry for drawables.
//!
//! Everything here lives in SVG space: x grows to the right and y grows
//! downward. Descriptions place shapes in data space with y pointing up, and
//! the canvas converts before any drawable sees a coordinate.
//!
//! - [`Point`] doubles as a 2D vector for arrow construction.
//! - [`Size`] is a width and height pair.
//! - [`Bounds`] is an axis-aligned box kept as min/max corners.
//! - [`Insets`] is per-side padding.

/// A position (or direction) in pixel space.
///
/// # Examples
///
/// ```
/// # use figura_core::geometry::Point;
/// let tail = Point::new(10.0, 20.0);
/// let tip = tail.add_point(Point::new(3.0, 4.0));
///
/// assert_eq!(tip.sub_point(tail).hypot(), 5.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    pub fn add_point(self, other: Point) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub_point(self, other: Point) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    /// Length of the vector from the origin to this point.
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Unit vector with the same direction. `None` for a (near) zero vector.
    pub fn normalize(self) -> Option<Self> {
        let length = self.hypot();
        (length >= f32::EPSILON).then(|| self.scale(1.0 / length))
    }

    /// The vector turned a quarter turn.
    pub fn perpendicular(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Bounds of `size` centered on this point.
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_center(self, size)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }

    /// Grows the size by the insets on every side.
    pub fn add_padding(self, insets: Insets) -> Self {
        Self::new(
            self.width + insets.left + insets.right,
            self.height + insets.top + insets.bottom,
        )
    }

    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// Axis-aligned rectangle. `min_y` is the top edge in pixel space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half = Point::new(size.width / 2.0, size.height / 2.0);
        Self::new_from_corners(center.sub_point(half), center.add_point(half))
    }

    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self::new_from_corners(top_left, top_left.add_point(Point::new(size.width, size.height)))
    }

    /// Smallest bounds holding both corners, whichever order they come in.
    ///
    /// # Examples
    ///
    /// ```
    /// # use figura_core::geometry::{Bounds, Point};
    /// let bounds = Bounds::new_from_corners(Point::new(4.0, 1.0), Point::new(0.0, 3.0));
    ///
    /// assert_eq!(bounds.min_x(), 0.0);
    /// assert_eq!(bounds.max_y(), 3.0);
    /// assert_eq!(bounds.width(), 4.0);
    /// ```
    pub fn new_from_corners(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn to_size(self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Smallest bounds covering both `self` and `other`.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn add_padding(&self, insets: Insets) -> Self {
        Self {
            min_x: self.min_x - insets.left,
            min_y: self.min_y - insets.top,
            max_x: self.max_x + insets.right,
            max_y: self.max_y + insets.bottom,
        }
    }
}

/// Padding around a text block.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// The same padding on all four sides.
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn top(self) -> f32 {
        self.top
    }

    pub fn right(self) -> f32 {
        self.right
    }

    pub fn bottom(self) -> f32 {
        self.bottom
    }

    pub fn left(self) -> f32 {
        self.left
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let p = Point::new(1.5, -2.0).add_point(Point::new(0.5, 4.0));
        assert_eq!(p, Point::new(2.0, 2.0));
        assert_eq!(p.sub_point(Point::new(2.0, 0.0)), Point::new(0.0, 2.0));
        assert_eq!(p.scale(-0.5), Point::new(-1.0, -1.0));
    }

    #[test]
    fn test_zero_vector_has_no_direction() {
        assert_eq!(Point::default().normalize(), None);
        assert_eq!(Point::new(0.0, -3.0).normalize(), Some(Point::new(0.0, -1.0)));
    }

    #[test]
    fn test_perpendicular_quarter_turn() {
        assert_eq!(Point::new(1.0, 0.0).perpendicular(), Point::new(-0.0, 1.0));
        assert_eq!(Point::new(0.0, 1.0).perpendicular(), Point::new(-1.0, 0.0));
    }

    #[test]
    fn test_to_bounds_is_centered() {
        let bounds = Point::new(50.0, 20.0).to_bounds(Size::new(40.0, 10.0));
        assert_eq!(bounds.min_x(), 30.0);
        assert_eq!(bounds.min_y(), 15.0);
        assert_eq!(bounds.to_size(), Size::new(40.0, 10.0));
        assert_eq!(bounds.center(), Point::new(50.0, 20.0));
    }

    #[test]
    fn test_top_left_bounds() {
        let bounds = Bounds::new_from_top_left(Point::new(5.0, 5.0), Size::new(10.0, 2.0));
        assert_eq!(bounds.max_x(), 15.0);
        assert_eq!(bounds.max_y(), 7.0);
    }

    #[test]
    fn test_padding_grows_bounds_and_size() {
        let insets = Insets::uniform(2.5);
        let bounds = Bounds::new_from_corners(Point::new(0.0, 0.0), Point::new(10.0, 4.0))
            .add_padding(insets);

        assert_approx_eq!(f32, bounds.min_x(), -2.5);
        assert_approx_eq!(f32, bounds.height(), 9.0);
        assert_eq!(Size::new(10.0, 4.0).add_padding(insets), Size::new(15.0, 9.0));
    }

    #[test]
    fn test_size_is_zero() {
        assert!(Size::default().is_zero());
        assert!(!Size::new(0.0, 1.0).is_zero());
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn coord() -> impl Strategy<Value = f32> {
        -1000.0f32..1000.0
    }

    fn point() -> impl Strategy<Value = Point> {
        (coord(), coord()).prop_map(|(x, y)| Point::new(x, y))
    }

    fn bounds() -> impl Strategy<Value = Bounds> {
        (point(), point()).prop_map(|(a, b)| Bounds::new_from_corners(a, b))
    }

    proptest! {
        #[test]
        fn normalized_vectors_have_unit_length(p in point()) {
            prop_assume!(p.hypot() > 0.01);
            let unit = p.normalize().unwrap();
            prop_assert!((unit.hypot() - 1.0).abs() < 1e-4);
        }

        #[test]
        fn perpendicular_has_zero_dot_product(p in point()) {
            let q = p.perpendicular();
            prop_assert!((p.x() * q.x() + p.y() * q.y()).abs() < 1e-2);
            prop_assert!((p.hypot() - q.hypot()).abs() < 1e-3);
        }

        #[test]
        fn corners_order_does_not_matter(a in point(), b in point()) {
            prop_assert_eq!(Bounds::new_from_corners(a, b), Bounds::new_from_corners(b, a));
        }

        #[test]
        fn merge_covers_both(b1 in bounds(), b2 in bounds()) {
            let merged = b1.merge(&b2);
            for b in [b1, b2] {
                prop_assert!(merged.min_x() <= b.min_x() && merged.max_x() >= b.max_x());
                prop_assert!(merged.min_y() <= b.min_y() && merged.max_y() >= b.max_y());
            }
        }
    }
}
