//! Per-drawable paint order.
//!
//! A single drawable can produce several SVG nodes that must stack in a fixed
//! order regardless of how they were emitted: a text background under its
//! glyphs, an arrow shaft under the label next to it. [`LayeredOutput`]
//! collects the nodes with their [`RenderLayer`] and [`LayeredOutput::render`]
//! emits one `<g data-layer="...">` group per layer, lowest first.
//!
//! Layers never reorder separate nodes of a diagram. Those are painted in
//! insertion order by the exporter.
//!
//! ```
//! # use figura_core::draw::{LayeredOutput, RenderLayer};
//! let mut output = LayeredOutput::new();
//! output.add_to_layer(RenderLayer::Text, Box::new(svg::node::element::Text::new("label")));
//! output.add_to_layer(RenderLayer::Background, Box::new(svg::node::element::Rectangle::new()));
//!
//! let groups = output.render();
//! assert!(groups[0].to_string().contains("data-layer=\"background\""));
//! ```

use svg::node::element as svg_element;

pub type SvgNode = Box<dyn svg::Node>;

/// Stacking slot within one drawable, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    Background,
    Shape,
    Arrow,
    Text,
}

impl RenderLayer {
    /// Value of the group's `data-layer` attribute.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Shape => "shape",
            Self::Arrow => "arrow",
            Self::Text => "text",
        }
    }
}

/// SVG nodes tagged with the layer they paint on.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `node` on `layer`, after nodes already there.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Appends everything from `other`.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// One `<g data-layer>` group per non-empty layer, lowest layer first.
    pub fn render(mut self) -> Vec<SvgNode> {
        if self.is_empty() {
            return Vec::new();
        }

        // Stable sort keeps insertion order inside a layer
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result = Vec::new();
        let mut current_layer = self.items[0].0;
        let mut current_group = svg_element::Group::new().set("data-layer", current_layer.name());

        for (layer, node) in self.items {
            if layer != current_layer {
                result.push(Box::new(current_group) as SvgNode);

                current_layer = layer;
                current_group = svg_element::Group::new().set("data-layer", layer.name());
            }

            current_group = current_group.add(node);
        }

        result.push(Box::new(current_group) as SvgNode);

        result
    }
}

#[cfg(test)]
mod tests {
    use svg::node::element::{Circle, Rectangle};

    use super::*;

    fn layer_names(nodes: &[SvgNode]) -> Vec<String> {
        nodes
            .iter()
            .map(|node| {
                let svg = node.to_string();
                let start = svg.find("data-layer=\"").unwrap() + "data-layer=\"".len();
                let end = start + svg[start..].find('"').unwrap();
                svg[start..end].to_string()
            })
            .collect()
    }

    #[test]
    fn test_empty_output_renders_nothing() {
        let output = LayeredOutput::new();
        assert!(output.is_empty());
        assert!(output.render().is_empty());
    }

    #[test]
    fn test_layers_sorted_bottom_up() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Text, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Arrow, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Background, Box::new(Rectangle::new()));

        assert_eq!(layer_names(&output.render()), ["background", "arrow", "text"]);
    }

    #[test]
    fn test_merge_joins_shared_layers() {
        let mut first = LayeredOutput::new();
        first.add_to_layer(RenderLayer::Shape, Box::new(Rectangle::new().set("id", "a")));

        let mut second = LayeredOutput::new();
        second.add_to_layer(RenderLayer::Shape, Box::new(Circle::new().set("id", "b")));
        second.add_to_layer(RenderLayer::Text, Box::new(Rectangle::new()));

        first.merge(second);
        let nodes = first.render();

        assert_eq!(layer_names(&nodes), ["shape", "text"]);
        let shape_group = nodes[0].to_string();
        assert!(shape_group.find("id=\"a\"").unwrap() < shape_group.find("id=\"b\"").unwrap());
    }
}
