use euclid::Angle;
use euclid::default::{Point2D, Rect};
use serde::{Deserialize, Serialize};

use crate::{Color, Surface};

/// A single call made against a [`Surface`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Save,
    Restore,
    SetFillColor(Color),
    SetStrokeColor(Color),
    SetLineWidth(f32),
    FillRect(Rect<f32>),
    StrokeRect(Rect<f32>),
    ClearRect(Rect<f32>),
    BeginPath,
    MoveTo(Point2D<f32>),
    LineTo(Point2D<f32>),
    Arc {
        center: Point2D<f32>,
        radius: f32,
        start: Angle<f32>,
        end: Angle<f32>,
    },
    ClosePath,
    Fill,
}

impl DrawCommand {
    /// Whether the command paints pixels, as opposed to changing state or building a path.
    pub const fn paints(&self) -> bool {
        matches!(
            self,
            DrawCommand::FillRect(_)
                | DrawCommand::StrokeRect(_)
                | DrawCommand::ClearRect(_)
                | DrawCommand::Fill
        )
    }
}

/// A surface that keeps every call as a display list, to be inspected or replayed later.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self { commands: vec![] }
    }

    #[inline]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Issues the recorded commands, in order, against another surface.
    pub fn replay(&self, target: &mut impl Surface) {
        for command in &self.commands {
            match *command {
                DrawCommand::Save => target.save(),
                DrawCommand::Restore => target.restore(),
                DrawCommand::SetFillColor(color) => target.set_fill_color(color),
                DrawCommand::SetStrokeColor(color) => target.set_stroke_color(color),
                DrawCommand::SetLineWidth(width) => target.set_line_width(width),
                DrawCommand::FillRect(rect) => target.fill_rect(rect),
                DrawCommand::StrokeRect(rect) => target.stroke_rect(rect),
                DrawCommand::ClearRect(rect) => target.clear_rect(rect),
                DrawCommand::BeginPath => target.begin_path(),
                DrawCommand::MoveTo(point) => target.move_to(point),
                DrawCommand::LineTo(point) => target.line_to(point),
                DrawCommand::Arc {
                    center,
                    radius,
                    start,
                    end,
                } => target.arc(center, radius, start, end),
                DrawCommand::ClosePath => target.close_path(),
                DrawCommand::Fill => target.fill(),
            }
        }
    }
}

impl Surface for RecordingSurface {
    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }
    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }
    fn set_fill_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::SetFillColor(color));
    }
    fn set_stroke_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::SetStrokeColor(color));
    }
    fn set_line_width(&mut self, width: f32) {
        self.commands.push(DrawCommand::SetLineWidth(width));
    }
    fn fill_rect(&mut self, rect: Rect<f32>) {
        self.commands.push(DrawCommand::FillRect(rect));
    }
    fn stroke_rect(&mut self, rect: Rect<f32>) {
        self.commands.push(DrawCommand::StrokeRect(rect));
    }
    fn clear_rect(&mut self, rect: Rect<f32>) {
        self.commands.push(DrawCommand::ClearRect(rect));
    }
    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }
    fn move_to(&mut self, point: Point2D<f32>) {
        self.commands.push(DrawCommand::MoveTo(point));
    }
    fn line_to(&mut self, point: Point2D<f32>) {
        self.commands.push(DrawCommand::LineTo(point));
    }
    fn arc(&mut self, center: Point2D<f32>, radius: f32, start: Angle<f32>, end: Angle<f32>) {
        self.commands.push(DrawCommand::Arc {
            center,
            radius,
            start,
            end,
        });
    }
    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }
    fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill);
    }
}

#[cfg(test)]
mod tests {
    use euclid::default::Size2D;

    use super::*;
    use crate::rgba;

    fn sample() -> RecordingSurface {
        let mut surface = RecordingSurface::new();
        surface.save();
        surface.set_fill_color(rgba(1., 0., 0., 1.));
        surface.fill_rect(Rect::new(Point2D::new(1., 2.), Size2D::new(3., 4.)));
        surface.begin_path();
        surface.arc(
            Point2D::new(5., 5.),
            2.,
            Angle::radians(0.),
            Angle::radians(1.),
        );
        surface.fill();
        surface.restore();
        surface
    }

    #[test]
    fn replay_reproduces_the_display_list() {
        let original = sample();
        let mut copy = RecordingSurface::new();
        original.replay(&mut copy);
        assert_eq!(original.commands(), copy.commands());
    }

    #[test]
    fn only_painting_commands_paint() {
        let painted = sample()
            .commands()
            .iter()
            .filter(|command| command.paints())
            .count();
        assert_eq!(painted, 2);
    }

    #[test]
    fn clear_empties_the_list() {
        let mut surface = sample();
        surface.clear();
        assert!(surface.commands().is_empty());
    }
}
