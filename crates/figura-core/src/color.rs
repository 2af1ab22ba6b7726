//! CSS colors with opacity.
//!
//! [`Color`] parses anything CSS accepts (`"tan"`, `"#2c3e50"`,
//! `"rgb(52 152 219 / 50%)"`). SVG output always gets the opaque `#rrggbb`
//! value plus a separate opacity attribute, since `resvg` and most viewers
//! handle that pair more consistently than CSS color functions.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{DynamicColor, Srgb};

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_rgba8().hash(state);
    }
}

impl Color {
    /// Parses a CSS color.
    ///
    /// ```
    /// use figura_core::color::Color;
    ///
    /// assert!(Color::new("lightsteelblue").is_ok());
    /// assert!(Color::new("#12345").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        DynamicColor::from_str(color_str)
            .map(|color| Self { color })
            .map_err(|err| format!("invalid color `{color_str}`: {err}"))
    }

    /// The color as `#rrggbb`, ignoring alpha.
    ///
    /// ```
    /// use figura_core::color::Color;
    ///
    /// let color = Color::new("rgb(231, 76, 60)").unwrap();
    /// assert_eq!(color.to_svg_value(), "#e74c3c");
    /// ```
    pub fn to_svg_value(self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        [rgba.r, rgba.g, rgba.b, rgba.a]
    }

    /// Fragment usable inside an SVG id, e.g. `hex_ff0000ff`.
    pub fn to_id_safe_string(self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        format!("hex_{r:02x}{g:02x}{b:02x}{a:02x}")
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Opacity between 0.0 and 1.0.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
