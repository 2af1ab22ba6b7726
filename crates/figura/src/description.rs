//! TOML diagram descriptions.
//!
//! A description carries all literal content of one diagram: canvas extents,
//! palette additions and an ordered list of shape records. [`DiagramDescription::compose`]
//! is the single routine turning any description into a [`Composer`] ready to render.
//!
//! # Example
//!
//! ```toml
//! name = "sketch"
//! title = "Sketch"
//! file_name = "Sketch"
//!
//! [canvas]
//! figure = [4.0, 3.0]
//!
//! [[shapes]]
//! kind = "box"
//! at = [0.5, 0.5]
//! size = [3.0, 2.0]
//! fill = "steelblue"
//! lines = [{ at = [2.0, 1.5], content = "Hello", align = "center" }]
//! ```

use std::str::FromStr;

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use toml::Spanned;

use figura_core::{
    color::Color,
    draw::{
        ArrowDirection, BlockArrowHead, FontSlant, FontWeight, StrokeStyle, TextAnchor,
        TextBaseline,
    },
    geometry::{Point, Size},
};

use crate::{
    FiguraError,
    canvas::Canvas,
    composer::Composer,
    diagram::{ArrowHead, CornerStyle, TextBackground, TextLine},
    theme::Theme,
};

/// Font size in points used when a text record does not set one.
const DEFAULT_FONT_SIZE: f32 = 10.0;

/// Shaft width in data units of filled arrows without an explicit width.
const DEFAULT_ARROW_WIDTH: f32 = 0.05;

/// Line width in points of line arrows without an explicit width.
const DEFAULT_LINE_ARROW_WIDTH: f32 = 1.5;

/// A parsed diagram description.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagramDescription {
    name: String,
    title: String,
    file_name: String,
    #[serde(default)]
    summary: String,
    canvas: CanvasRecord,
    #[serde(default)]
    palette: IndexMap<String, String>,
    #[serde(default)]
    shapes: Vec<Spanned<ShapeRecord>>,
    #[serde(skip)]
    source: String,
}

impl DiagramDescription {
    /// Parses a description from TOML source.
    ///
    /// `name` identifies the source in error messages, usually a file or
    /// catalog name.
    ///
    /// # Errors
    ///
    /// Returns [`FiguraError::Description`] with the TOML span of the problem
    /// when the source is malformed or has unknown fields or shape kinds.
    pub fn parse(name: &str, source: &str) -> Result<Self, FiguraError> {
        let mut description: Self = toml::from_str(source).map_err(|err| {
            FiguraError::new_description_error(name, source, err.message(), err.span())
        })?;
        description.source = source.to_string();
        Ok(description)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Output file stem, without extension.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// One-line summary printed after generation.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Number of shape records. Ring records may expand to several nodes.
    pub fn record_count(&self) -> usize {
        self.shapes.len()
    }

    /// Builds the canvas and feeds every shape record through a [`Composer`].
    ///
    /// The description palette is merged over the theme palette before any
    /// record is resolved. A canvas background set in the description wins
    /// over `background`.
    ///
    /// # Errors
    ///
    /// Returns [`FiguraError::Description`] pointing at the offending record
    /// when a color does not resolve, an enum value is unknown or a record is
    /// inconsistent (for example an arrow with both `to` and `delta`).
    pub fn compose(
        &self,
        theme: &Theme,
        dpi: f32,
        background: Option<Color>,
    ) -> Result<(Composer, Canvas), FiguraError> {
        let theme = theme
            .with_overrides(&self.palette)
            .map_err(|err| self.error(format!("palette: {err}"), None))?;

        let canvas = self.canvas.to_canvas(&theme, dpi, background).map_err(|err| {
            self.error(format!("canvas: {err}"), None)
        })?;

        let mut composer = Composer::new(theme, &self.name, &self.title, &self.file_name);
        for record in &self.shapes {
            record
                .get_ref()
                .add_to(&mut composer)
                .map_err(|err| self.error(err, Some(record.span())))?;
        }

        debug!(
            diagram = self.name.as_str(),
            records = self.shapes.len(),
            nodes = composer.len();
            "Composed description"
        );
        Ok((composer, canvas))
    }

    fn error(&self, message: String, span: Option<std::ops::Range<usize>>) -> FiguraError {
        FiguraError::new_description_error(&self.name, &self.source, message, span)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct CanvasRecord {
    figure: [f32; 2],
    x: Option<[f32; 2]>,
    y: Option<[f32; 2]>,
    background: Option<String>,
}

impl CanvasRecord {
    fn to_canvas(
        &self,
        theme: &Theme,
        dpi: f32,
        background: Option<Color>,
    ) -> Result<Canvas, String> {
        let [width, height] = self.figure;
        if width <= 0.0 || height <= 0.0 {
            return Err(format!("figure size must be positive, got {width}x{height}"));
        }
        let [x0, x1] = self.x.unwrap_or([0.0, width]);
        let [y0, y1] = self.y.unwrap_or([0.0, height]);

        let background = match &self.background {
            Some(value) => optional_color(theme, value)?,
            None => background,
        };

        Ok(Canvas::new(Size::new(width, height))
            .with_bounds((x0, x1), (y0, y1))
            .with_dpi(dpi)
            .with_background(background))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ShapeRecord {
    Box(BoxRecord),
    Circle(CircleRecord),
    Arrow(ArrowRecord),
    Text(TextRecord),
    Polygon(PolygonRecord),
    Ring(RingRecord),
}

impl ShapeRecord {
    fn add_to(&self, composer: &mut Composer) -> Result<(), String> {
        match self {
            Self::Box(record) => record.add_to(composer),
            Self::Circle(record) => record.add_to(composer),
            Self::Arrow(record) => record.add_to(composer),
            Self::Text(record) => {
                let defaults = TextDefaults::from_theme(composer.theme());
                let line = record.to_line(composer, &defaults)?;
                composer.add_text(line);
                Ok(())
            }
            Self::Polygon(record) => record.add_to(composer),
            Self::Ring(record) => record.add_to(composer),
        }
    }
}

/// Text attributes a record falls back to when it leaves them unset.
struct TextDefaults {
    color: Color,
    size: f32,
    align: TextAnchor,
    valign: TextBaseline,
}

impl TextDefaults {
    fn from_theme(theme: &Theme) -> Self {
        Self {
            color: theme.text_color(),
            size: DEFAULT_FONT_SIZE,
            align: TextAnchor::Start,
            valign: TextBaseline::Baseline,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct BackgroundRecord {
    color: String,
    #[serde(default = "default_background_pad")]
    pad: f32,
    #[serde(default = "default_alpha")]
    alpha: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct TextRecord {
    at: [f32; 2],
    content: String,
    size: Option<f32>,
    weight: Option<String>,
    style: Option<String>,
    color: Option<String>,
    align: Option<String>,
    valign: Option<String>,
    #[serde(default)]
    rotation: f32,
    background: Option<BackgroundRecord>,
}

impl TextRecord {
    fn to_line(&self, composer: &Composer, defaults: &TextDefaults) -> Result<TextLine, String> {
        let theme = composer.theme();
        let color = match &self.color {
            Some(value) => theme.color(value)?,
            None => defaults.color,
        };
        let background = self
            .background
            .as_ref()
            .map(|bg| {
                theme
                    .color(&bg.color)
                    .map(|color| TextBackground::new(color, bg.pad, bg.alpha))
            })
            .transpose()?;

        let style = composer
            .text_style()
            .with_size(self.size.unwrap_or(defaults.size))
            .with_weight(parse_or(self.weight.as_deref(), FontWeight::Normal)?)
            .with_slant(parse_or(self.style.as_deref(), FontSlant::Normal)?)
            .with_color(color)
            .with_align(parse_or(self.align.as_deref(), defaults.align)?)
            .with_valign(parse_or(self.valign.as_deref(), defaults.valign)?)
            .with_rotation(self.rotation)
            .with_background(background);

        Ok(TextLine::new(point(self.at), self.content.as_str(), style))
    }
}

/// Which stacked lines are drawn bold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum HeaderRule {
    #[default]
    None,
    /// Every line not starting with a bullet.
    NonBullet,
    /// Every line ending with a colon.
    Colon,
}

impl HeaderRule {
    fn is_header(self, line: &str) -> bool {
        let line = line.trim();
        match self {
            Self::None => false,
            Self::NonBullet => !line.starts_with('•'),
            Self::Colon => line.ends_with(':'),
        }
    }
}

/// Lines laid out top-down from `at`, `spacing` apart.
///
/// An empty line draws nothing and advances by `blank`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct StackRecord {
    at: [f32; 2],
    spacing: f32,
    blank: Option<f32>,
    size: Option<f32>,
    header_size: Option<f32>,
    align: Option<String>,
    valign: Option<String>,
    color: Option<String>,
    #[serde(default)]
    headers: HeaderRule,
    lines: Vec<String>,
}

impl StackRecord {
    fn to_lines(&self, composer: &Composer, defaults: &TextDefaults) -> Result<Vec<TextLine>, String> {
        let color = match &self.color {
            Some(value) => composer.theme().color(value)?,
            None => defaults.color,
        };
        let size = self.size.unwrap_or(defaults.size);
        let base = composer
            .text_style()
            .with_color(color)
            .with_size(size)
            .with_align(parse_or(self.align.as_deref(), defaults.align)?)
            .with_valign(parse_or(self.valign.as_deref(), TextBaseline::Center)?);

        let [x, mut y] = self.at;
        let mut lines = Vec::with_capacity(self.lines.len());
        for content in &self.lines {
            if content.trim().is_empty() {
                y -= self.blank.unwrap_or(self.spacing);
                continue;
            }

            let style = if self.headers.is_header(content) {
                base.clone()
                    .with_weight(FontWeight::Bold)
                    .with_size(self.header_size.unwrap_or(size))
            } else {
                base.clone()
            };
            lines.push(TextLine::new(Point::new(x, y), content.as_str(), style));
            y -= self.spacing;
        }
        Ok(lines)
    }
}

/// `"square"`, `"round"` (theme pad) or a rounding pad in data units.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum CornerRecord {
    Pad(f32),
    Named(String),
}

impl CornerRecord {
    fn to_style(&self, theme: &Theme) -> Result<CornerStyle, String> {
        match self {
            Self::Pad(pad) if *pad > 0.0 => Ok(CornerStyle::Round { pad: *pad }),
            Self::Pad(_) => Ok(CornerStyle::Square),
            Self::Named(name) => match name.as_str() {
                "square" => Ok(CornerStyle::Square),
                "round" => Ok(CornerStyle::Round {
                    pad: theme.corner_pad(),
                }),
                other => Err(format!(
                    "invalid corner `{other}`, valid values: square, round or a pad number"
                )),
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct BoxRecord {
    at: [f32; 2],
    size: [f32; 2],
    fill: Option<String>,
    border: Option<String>,
    alpha: Option<f32>,
    line_width: Option<f32>,
    corner: Option<CornerRecord>,
    /// Color of `lines` and `stack` entries that set none.
    text_color: Option<String>,
    /// Alignment of `lines` and `stack` entries that set none.
    text_align: Option<String>,
    #[serde(default)]
    lines: Vec<TextRecord>,
    #[serde(default)]
    stack: Vec<StackRecord>,
}

impl BoxRecord {
    fn add_to(&self, composer: &mut Composer) -> Result<(), String> {
        let [width, height] = self.size;
        if width <= 0.0 || height <= 0.0 {
            return Err(format!("box size must be positive, got {width}x{height}"));
        }

        let theme = composer.theme();
        let mut style = composer.box_style();
        if let Some(fill) = &self.fill {
            style = style.with_fill(optional_color(theme, fill)?);
        }
        if let Some(border) = &self.border {
            style = style.with_border(optional_color(theme, border)?);
        }
        if let Some(alpha) = self.alpha {
            style = style.with_alpha(alpha);
        }
        if let Some(line_width) = self.line_width {
            style = style.with_line_width(line_width);
        }
        if let Some(corner) = &self.corner {
            style = style.with_corner(corner.to_style(theme)?);
        }

        let mut defaults = TextDefaults::from_theme(theme);
        if let Some(color) = &self.text_color {
            defaults.color = theme.color(color)?;
        }
        defaults.align = parse_or(self.text_align.as_deref(), defaults.align)?;

        let mut lines = self
            .lines
            .iter()
            .map(|line| line.to_line(composer, &defaults))
            .collect::<Result<Vec<_>, _>>()?;
        for stack in &self.stack {
            lines.extend(stack.to_lines(composer, &defaults)?);
        }

        composer.add_box(point(self.at), Size::new(width, height), lines, style);
        Ok(())
    }
}

/// Text drawn on a circle, centered on it unless moved by `offset`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct LabelRecord {
    content: String,
    #[serde(default)]
    offset: [f32; 2],
    size: Option<f32>,
    weight: Option<String>,
    style: Option<String>,
    color: Option<String>,
    align: Option<String>,
    valign: Option<String>,
}

impl LabelRecord {
    fn to_line(&self, composer: &Composer, center: Point) -> Result<TextLine, String> {
        let defaults = TextDefaults {
            align: TextAnchor::Middle,
            valign: TextBaseline::Center,
            ..TextDefaults::from_theme(composer.theme())
        };
        let [dx, dy] = self.offset;
        let record = TextRecord {
            at: [center.x() + dx, center.y() + dy],
            content: self.content.clone(),
            size: self.size,
            weight: self.weight.clone(),
            style: self.style.clone(),
            color: self.color.clone(),
            align: self.align.clone(),
            valign: self.valign.clone(),
            rotation: 0.0,
            background: None,
        };
        record.to_line(composer, &defaults)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct CircleRecord {
    center: [f32; 2],
    radius: f32,
    fill: Option<String>,
    edge: Option<String>,
    line_width: Option<f32>,
    line: Option<String>,
    alpha: Option<f32>,
    label: Option<LabelRecord>,
}

impl CircleRecord {
    fn add_to(&self, composer: &mut Composer) -> Result<(), String> {
        if self.radius <= 0.0 {
            return Err(format!("circle radius must be positive, got {}", self.radius));
        }

        let theme = composer.theme();
        let mut style = composer.circle_style();
        if let Some(fill) = &self.fill {
            style = style.with_fill(optional_color(theme, fill)?);
        }
        if let Some(edge) = &self.edge {
            style = style.with_edge(optional_color(theme, edge)?);
        }
        if let Some(line_width) = self.line_width {
            style = style.with_line_width(line_width);
        }
        if let Some(line) = &self.line {
            style = style.with_line_style(StrokeStyle::from_str(line)?);
        }
        if let Some(alpha) = self.alpha {
            style = style.with_alpha(alpha);
        }

        let center = point(self.center);
        let label = self
            .label
            .as_ref()
            .map(|label| label.to_line(composer, center))
            .transpose()?;

        composer.add_circle(center, self.radius, label, style);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum HeadKind {
    #[default]
    Filled,
    Line,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ArrowRecord {
    from: [f32; 2],
    to: Option<[f32; 2]>,
    delta: Option<[f32; 2]>,
    color: Option<String>,
    alpha: Option<f32>,
    #[serde(default)]
    head: HeadKind,
    width: Option<f32>,
    head_width: Option<f32>,
    head_length: Option<f32>,
    direction: Option<String>,
    #[serde(default)]
    dashed: bool,
}

impl ArrowRecord {
    fn head(&self) -> Result<ArrowHead, String> {
        match self.head {
            HeadKind::Filled => {
                if self.direction.is_some() || self.dashed {
                    return Err("`direction` and `dashed` only apply to line arrows".to_string());
                }
                let default = BlockArrowHead::with_default_head(self.width.unwrap_or(DEFAULT_ARROW_WIDTH));
                let head_width = self.head_width.unwrap_or(default.head_width());
                let head_length = self.head_length.unwrap_or(1.5 * head_width);
                Ok(ArrowHead::Filled(BlockArrowHead::new(
                    default.width(),
                    head_width,
                    head_length,
                )))
            }
            HeadKind::Line => {
                if self.head_width.is_some() || self.head_length.is_some() {
                    return Err("`head_width` and `head_length` only apply to filled arrows".to_string());
                }
                Ok(ArrowHead::Line {
                    direction: parse_or(self.direction.as_deref(), ArrowDirection::Forward)?,
                    width: self.width.unwrap_or(DEFAULT_LINE_ARROW_WIDTH),
                    dashed: self.dashed,
                })
            }
        }
    }

    fn add_to(&self, composer: &mut Composer) -> Result<(), String> {
        let theme = composer.theme();
        let mut style = composer.arrow_style().with_head(self.head()?);
        if let Some(color) = &self.color {
            style = style.with_color(theme.color(color)?);
        }
        if let Some(alpha) = self.alpha {
            style = style.with_alpha(alpha);
        }

        let from = point(self.from);
        match (self.to, self.delta) {
            (Some(to), None) => {
                let to = point(to);
                if to == from {
                    return Err("arrow start and end must differ".to_string());
                }
                composer.add_arrow(from, to, style);
            }
            (None, Some(delta)) => {
                let delta = point(delta);
                if delta == Point::default() {
                    return Err("arrow `delta` must be non-zero".to_string());
                }
                composer.add_arrow_delta(from, delta, style);
            }
            _ => return Err("arrow needs exactly one of `to` or `delta`".to_string()),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct PolygonRecord {
    points: Vec<[f32; 2]>,
    fill: Option<String>,
    edge: Option<String>,
    line_width: Option<f32>,
    alpha: Option<f32>,
}

impl PolygonRecord {
    fn add_to(&self, composer: &mut Composer) -> Result<(), String> {
        if self.points.len() < 3 {
            return Err(format!(
                "polygon needs at least 3 points, got {}",
                self.points.len()
            ));
        }

        let theme = composer.theme();
        let mut style = composer.polygon_style();
        if let Some(fill) = &self.fill {
            style = style.with_fill(optional_color(theme, fill)?);
        }
        if let Some(edge) = &self.edge {
            style = style.with_edge(optional_color(theme, edge)?);
        }
        if let Some(line_width) = self.line_width {
            style = style.with_line_width(line_width);
        }
        if let Some(alpha) = self.alpha {
            style = style.with_alpha(alpha);
        }

        let points = self.points.iter().copied().map(point).collect();
        composer.add_polygon(points, style);
        Ok(())
    }
}

/// Sample markers spread over a circle.
///
/// Each kept angle adds one marker circle and, with a `label`, one text
/// node offset from the marker.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct RingRecord {
    center: [f32; 2],
    radius: f32,
    /// Marker angles in degrees, counter-clockwise from the positive x axis.
    angles: Vec<f32>,
    /// `[x_min, x_max, y_min, y_max]`, inclusive. Markers outside are skipped.
    within: Option<[f32; 4]>,
    marker_radius: f32,
    fill: String,
    edge: Option<String>,
    line_width: Option<f32>,
    label: Option<String>,
    #[serde(default = "default_label_offset")]
    label_offset: [f32; 2],
    label_size: Option<f32>,
    label_weight: Option<String>,
}

impl RingRecord {
    fn markers(&self) -> impl Iterator<Item = Point> + '_ {
        let center = point(self.center);
        self.angles
            .iter()
            .map(move |angle| {
                let rad = angle.to_radians();
                center.add_point(Point::new(self.radius * rad.cos(), self.radius * rad.sin()))
            })
            .filter(move |p| {
                self.within.is_none_or(|[x0, x1, y0, y1]| {
                    (x0..=x1).contains(&p.x()) && (y0..=y1).contains(&p.y())
                })
            })
    }

    fn add_to(&self, composer: &mut Composer) -> Result<(), String> {
        if self.marker_radius <= 0.0 {
            return Err(format!(
                "marker radius must be positive, got {}",
                self.marker_radius
            ));
        }

        let theme = composer.theme();
        let mut style = composer
            .circle_style()
            .with_fill(Some(theme.color(&self.fill)?));
        if let Some(edge) = &self.edge {
            style = style.with_edge(optional_color(theme, edge)?);
        }
        if let Some(line_width) = self.line_width {
            style = style.with_line_width(line_width);
        }

        let label_style = match &self.label {
            Some(_) => Some(
                composer
                    .text_style()
                    .with_size(self.label_size.unwrap_or(DEFAULT_FONT_SIZE))
                    .with_weight(parse_or(self.label_weight.as_deref(), FontWeight::Normal)?),
            ),
            None => None,
        };

        let markers: Vec<Point> = self.markers().collect();
        let [dx, dy] = self.label_offset;
        for marker in markers {
            composer.add_circle(marker, self.marker_radius, None, style.clone());
            if let (Some(label), Some(label_style)) = (&self.label, &label_style) {
                let at = marker.add_point(Point::new(dx, dy));
                composer.add_text(TextLine::new(at, label.as_str(), label_style.clone()));
            }
        }
        Ok(())
    }
}

fn point([x, y]: [f32; 2]) -> Point {
    Point::new(x, y)
}

/// Resolves a color reference, treating `"none"` as no color.
fn optional_color(theme: &Theme, value: &str) -> Result<Option<Color>, String> {
    if value.eq_ignore_ascii_case("none") {
        Ok(None)
    } else {
        theme.color(value).map(Some)
    }
}

fn parse_or<T>(value: Option<&str>, default: T) -> Result<T, String>
where
    T: FromStr<Err = String>,
{
    value.map_or(Ok(default), T::from_str)
}

fn default_alpha() -> f32 {
    1.0
}

fn default_background_pad() -> f32 {
    0.3
}

fn default_label_offset() -> [f32; 2] {
    [0.1, 0.1]
}
