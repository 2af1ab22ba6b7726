//! Figura Core Types and Definitions
//!
//! This crate provides the drawing primitives shared by the Figura diagram
//! renderer. It includes:
//!
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types in pixel space ([`geometry`] module)
//! - **Draw**: Drawable shapes, arrows and text emitting SVG nodes ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
