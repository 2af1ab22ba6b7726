//! PNG rendering through `resvg`.
//!
//! The diagram is first rendered to SVG at its final pixel size, so the
//! rasterizer draws it at scale one onto a pixmap of exactly the canvas size.

use log::{debug, info};

use crate::{
    canvas::Canvas,
    config::OutputFormat,
    diagram::ShapeNode,
    export::{self, Exporter, svg::SvgExporter},
};

/// Renders diagrams to PNG images.
///
/// The system font database is loaded once, when the exporter is created,
/// and reused for every diagram it renders.
pub struct PngExporter {
    options: usvg::Options<'static>,
    svg: SvgExporter,
}

impl PngExporter {
    pub fn new() -> Self {
        let mut options = usvg::Options::default();
        options.fontdb_mut().load_system_fonts();
        info!(faces = options.fontdb.len(); "Loaded system fonts for rasterization");

        Self {
            options,
            svg: SvgExporter::new(),
        }
    }
}

impl Default for PngExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PngExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PngExporter").finish_non_exhaustive()
    }
}

impl Exporter for PngExporter {
    fn export(&mut self, nodes: &[ShapeNode], canvas: &Canvas) -> Result<Vec<u8>, export::Error> {
        let document = self.svg.render_document(nodes, canvas)?.to_string();

        let tree = usvg::Tree::from_str(&document, &self.options)
            .map_err(|err| export::Error::Raster(format!("failed to parse rendered SVG: {err}")))?;

        let (width, height) = canvas.pixel_size();
        let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
            export::Error::Raster(format!("failed to allocate a {width}x{height} pixmap"))
        })?;

        if let Some(background) = canvas.background() {
            let [r, g, b, a] = background.to_rgba8();
            pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));
        }

        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
        debug!(width = width, height = height; "Diagram rasterized");

        pixmap
            .encode_png()
            .map_err(|err| export::Error::Raster(format!("failed to encode PNG: {err}")))
    }

    fn format(&self) -> OutputFormat {
        OutputFormat::Png
    }
}

#[cfg(test)]
mod tests {
    use figura_core::{color::Color, geometry::Size};

    use super::*;

    #[test]
    fn test_png_has_canvas_dimensions() {
        let canvas = Canvas::new(Size::new(2.0, 1.0))
            .with_dpi(50.0)
            .with_background(Some(Color::new("white").unwrap()));

        let bytes = PngExporter::new().export(&[], &canvas).unwrap();

        // PNG signature followed by the IHDR chunk
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        let width = u32::from_be_bytes(bytes[16..20].try_into().unwrap());
        let height = u32::from_be_bytes(bytes[20..24].try_into().unwrap());
        assert_eq!((width, height), (100, 50));
    }
}
