//! Drawable Components for Diagram Rendering
//!
//! This module provides drawable abstractions for the primitives a Figura
//! diagram is made of. All drawable components implement the [`Drawable`]
//! trait, which renders to layered SVG output in pixel space.
//!
//! # Layer-Based Rendering
//!
//! A drawable may split its output across several [`RenderLayer`]s (a text
//! background below the text, a fill below its outline). Layers only order
//! the parts of one drawable; separate drawables are painted in the order
//! the caller renders them.

mod arrow;
mod layer;
mod positioned;
mod shape;
mod stroke;
mod text;

pub use arrow::{Arrow, ArrowDefinition, ArrowDirection, ArrowDrawer, BlockArrow, BlockArrowHead};
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use positioned::PositionedDrawable;
pub use shape::{OvalDefinition, PolygonDefinition, RectangleDefinition, Shape, ShapeDefinition};
pub use stroke::{StrokeDefinition, StrokeStyle};
pub use text::{FontSlant, FontWeight, Text, TextAnchor, TextBaseline, TextDefinition};

use crate::geometry::{Point, Size};

/// Trait for drawable diagram elements that can be rendered to SVG layers.
pub trait Drawable: std::fmt::Debug {
    /// Renders this drawable to one or more layers.
    ///
    /// # Arguments
    ///
    /// * `position` - The anchor position of this drawable, in pixels. Each
    ///   drawable documents what its anchor means (center, text anchor, ...).
    fn render_to_layers(&self, position: Point) -> LayeredOutput;

    /// Returns the size of this drawable.
    fn size(&self) -> Size;
}
