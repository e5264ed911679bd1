use graphics::{Color, rgba};
use serde::{Deserialize, Serialize};

/// Color of the border and the knobs drawn around a selected shape.
pub const HANDLE_COLOR: Color = rgba(0.188, 0.368, 0.431, 1.);

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    #[serde(with = "css_color")]
    pub stroke_color: Color,
    #[serde(with = "css_color")]
    pub fill_color: Color,
    pub line_width: f32,
}

impl Style {
    pub const DEFAULT: Self = Self {
        stroke_color: rgba(0., 0., 0., 1.),
        fill_color: rgba(0., 0., 0., 1.),
        line_width: 1.,
    };
    pub const fn new(stroke_color: Color, fill_color: Color, line_width: f32) -> Self {
        Self {
            stroke_color,
            fill_color,
            line_width,
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// (De)serializes colors as CSS color strings, written back out as `#rrggbbaa`.
pub mod css_color {
    use graphics::Color;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        let rgba = color.to_rgba8();
        serializer.serialize_str(&format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            rgba.r, rgba.g, rgba.b, rgba.a
        ))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let value = String::deserialize(deserializer)?;
        graphics::parse_color(&value)
            .map_err(|err| D::Error::custom(format!("invalid color {value:?}: {err}")))
    }
}
