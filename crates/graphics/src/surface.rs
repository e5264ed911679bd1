use std::f32::consts::TAU;

use euclid::Angle;
use euclid::default::{Point2D, Rect};
use serde::{Deserialize, Serialize};

use crate::{Color, rgba};

/// The paint state saved and restored by [`Surface::save`] and [`Surface::restore`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaintState {
    pub fill_color: Color,
    pub stroke_color: Color,
    pub line_width: f32,
}

impl PaintState {
    pub const DEFAULT: Self = Self {
        fill_color: rgba(0., 0., 0., 1.),
        stroke_color: rgba(0., 0., 0., 1.),
        line_width: 1.,
    };
}

impl Default for PaintState {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// An immediate mode 2D drawing target with the semantics of an HTML canvas context.
///
/// Coordinates are y-down. Rectangles may carry a negative width or height, in which case they
/// extend left/up from their origin. Paths are built with [`Surface::begin_path`] followed by
/// `move_to`, `line_to`, `arc` and `close_path`, and painted with [`Surface::fill`].
pub trait Surface {
    /// Pushes the current paint state.
    fn save(&mut self);
    /// Pops the most recently saved paint state, doing nothing if none was saved.
    fn restore(&mut self);

    fn set_fill_color(&mut self, color: Color);
    fn set_stroke_color(&mut self, color: Color);
    fn set_line_width(&mut self, width: f32);

    fn fill_rect(&mut self, rect: Rect<f32>);
    fn stroke_rect(&mut self, rect: Rect<f32>);
    /// Erases everything within `rect` to full transparency.
    fn clear_rect(&mut self, rect: Rect<f32>);

    fn begin_path(&mut self);
    fn move_to(&mut self, point: Point2D<f32>);
    fn line_to(&mut self, point: Point2D<f32>);
    /// Adds a clockwise circular arc from `start` to `end`.
    ///
    /// If the path already has a current point, a straight line connects it to the start of the
    /// arc. A span of a full turn or more draws a whole circle.
    fn arc(&mut self, center: Point2D<f32>, radius: f32, start: Angle<f32>, end: Angle<f32>);
    fn close_path(&mut self);
    /// Fills the current path with the fill color. The path is kept until the next `begin_path`.
    fn fill(&mut self);
}

/// The clockwise sweep an arc from `start` to `end` covers, within `0..=TAU`.
pub fn clockwise_sweep(start: Angle<f32>, end: Angle<f32>) -> Angle<f32> {
    let delta = end.radians - start.radians;
    if delta >= TAU {
        Angle::radians(TAU)
    } else {
        Angle::radians(delta.rem_euclid(TAU))
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, PI};

    use super::*;

    #[test]
    fn sweeps_wrap_clockwise() {
        let sweep = clockwise_sweep(Angle::radians(1.5 * PI), Angle::radians(FRAC_PI_2));
        assert!((sweep.radians - PI).abs() < 1e-5, "got {sweep:?}");

        let quarter = clockwise_sweep(Angle::radians(0.), Angle::radians(FRAC_PI_2));
        assert!((quarter.radians - FRAC_PI_2).abs() < 1e-6, "got {quarter:?}");
    }

    #[test]
    fn full_turns_stay_full() {
        let sweep = clockwise_sweep(Angle::radians(0.), Angle::radians(2. * PI));
        assert_eq!(sweep.radians, TAU);
        let sweep = clockwise_sweep(Angle::radians(PI), Angle::radians(4. * PI));
        assert_eq!(sweep.radians, TAU);
    }
}
