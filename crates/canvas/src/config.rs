use anyhow::{Context, Result, ensure};
use graphics::Color;
use serde::{Deserialize, Serialize};

use crate::style::{HANDLE_COLOR, Style, css_color};

/// Editor settings. Every field is optional in the serialized form and falls back to its default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Style given to newly drawn rectangles.
    pub shape: Style,
    /// Border and handle colors of the crop selection.
    pub crop: Style,
    #[serde(with = "css_color")]
    pub handle_color: Color,
    pub crop_handle_radius: f32,
    /// Used instead of `crop_handle_radius` for presses from a touch screen.
    pub crop_touch_handle_radius: f32,
    pub nudge_step: f32,
    pub fine_nudge_step: f32,
    /// Accept a freshly drawn crop selection as soon as the pointer is released.
    pub release_to_capture: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shape: Style::DEFAULT,
            crop: Style::new(HANDLE_COLOR, HANDLE_COLOR, 2.),
            handle_color: HANDLE_COLOR,
            crop_handle_radius: 9.,
            crop_touch_handle_radius: 12.,
            nudge_step: 15.,
            fine_nudge_step: 1.,
            release_to_capture: false,
        }
    }
}

impl Config {
    pub fn from_json(source: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(source).context("Failed to parse the editor configuration.")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize the editor configuration.")
    }

    pub fn validate(&self) -> Result<()> {
        for (name, width) in [
            ("shape.line_width", self.shape.line_width),
            ("crop.line_width", self.crop.line_width),
        ] {
            ensure!(
                width.is_finite() && width > 0.,
                "{name} must be a positive number, got {width}"
            );
        }
        for (name, value) in [
            ("crop_handle_radius", self.crop_handle_radius),
            ("crop_touch_handle_radius", self.crop_touch_handle_radius),
            ("nudge_step", self.nudge_step),
            ("fine_nudge_step", self.fine_nudge_step),
        ] {
            ensure!(
                value.is_finite() && value >= 0.,
                "{name} must not be negative, got {value}"
            );
        }
        Ok(())
    }
}
