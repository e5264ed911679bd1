use std::f32::consts::TAU;

use euclid::Angle;
use euclid::default::{Box2D, Point2D, Rect, Size2D, Vector2D};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use thiserror::Error;

use graphics::{Color, Surface, positive_box};
use input::CursorIcon;

use crate::style::{HANDLE_COLOR, Style};

/// Radius of the knobs drawn on each handle of a selected shape.
pub const HANDLE_RADIUS: f32 = 10.;
/// Half the side of the square hot zone centred on each handle.
pub const HANDLE_HIT_EXTENT: f32 = 10.;
pub const HANDLE_BORDER_WIDTH: f32 = 2.;

/// The eight resize handles on a rectangle's perimeter, in hit-test order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum Handle {
    TopLeft = 0,
    TopCenter = 1,
    TopRight = 2,
    MiddleLeft = 3,
    MiddleRight = 4,
    BottomLeft = 5,
    BottomCenter = 6,
    BottomRight = 7,
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("handle index {0} is out of range, expected 0..=7")]
pub struct HandleError(pub i32);

impl TryFrom<i32> for Handle {
    type Error = HandleError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Handle::iter()
            .find(|handle| handle.index() == value)
            .ok_or(HandleError(value))
    }
}

impl Handle {
    #[inline]
    pub const fn index(self) -> i32 {
        self as i32
    }

    const fn moves_left(self) -> bool {
        matches!(
            self,
            Handle::TopLeft | Handle::MiddleLeft | Handle::BottomLeft
        )
    }
    const fn moves_right(self) -> bool {
        matches!(
            self,
            Handle::TopRight | Handle::MiddleRight | Handle::BottomRight
        )
    }
    const fn moves_top(self) -> bool {
        matches!(self, Handle::TopLeft | Handle::TopCenter | Handle::TopRight)
    }
    const fn moves_bottom(self) -> bool {
        matches!(
            self,
            Handle::BottomLeft | Handle::BottomCenter | Handle::BottomRight
        )
    }

    pub const fn cursor(self) -> CursorIcon {
        match self {
            Handle::TopLeft | Handle::BottomRight => CursorIcon::NwseResize,
            Handle::TopRight | Handle::BottomLeft => CursorIcon::NeswResize,
            Handle::TopCenter | Handle::BottomCenter => CursorIcon::NsResize,
            Handle::MiddleLeft | Handle::MiddleRight => CursorIcon::EwResize,
        }
    }

    /// Where this handle sits on `rect`, which may have a negative size.
    pub fn position_on(self, rect: &Rect<f32>) -> Point2D<f32> {
        let Rect { origin, size } = *rect;
        let x = if self.moves_left() {
            origin.x
        } else if self.moves_right() {
            origin.x + size.width
        } else {
            origin.x + size.width / 2.
        };
        let y = if self.moves_top() {
            origin.y
        } else if self.moves_bottom() {
            origin.y + size.height
        } else {
            origin.y + size.height / 2.
        };
        Point2D::new(x, y)
    }
}

/// Moves `handle` of `rect` to `position`, keeping its anchor in place.
///
/// Each axis is only updated when the new edge stays strictly on its own side of the anchor edge;
/// otherwise that axis is left as is while the other one still follows the pointer.
pub fn resize_rect(rect: &mut Rect<f32>, handle: Handle, position: Point2D<f32>) {
    let Rect { origin, size } = rect;

    if handle.moves_left() && position.x < origin.x + size.width {
        size.width += origin.x - position.x;
        origin.x = position.x;
    }
    if handle.moves_right() && position.x > origin.x {
        size.width = position.x - origin.x;
    }
    if handle.moves_top() && position.y < origin.y + size.height {
        size.height += origin.y - position.y;
        origin.y = position.y;
    }
    if handle.moves_bottom() && position.y > origin.y {
        size.height = position.y - origin.y;
    }
}

#[inline]
fn within_box(point: Point2D<f32>, area: &Box2D<f32>) -> bool {
    point.x >= area.min.x && point.x <= area.max.x && point.y >= area.min.y && point.y <= area.max.y
}

/// A rectangle annotation. Its size may be negative while it is being drawn.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub rect: Rect<f32>,
    pub style: Style,
}

impl Default for Shape {
    fn default() -> Self {
        Self {
            rect: Rect::zero(),
            style: Style::DEFAULT,
        }
    }
}

impl Shape {
    pub fn new(origin: Point2D<f32>, size: Size2D<f32>, style: Style) -> Self {
        Self {
            rect: Rect::new(origin, size),
            style,
        }
    }

    /// Where `handle` sits on this shape's perimeter.
    pub fn handle_position(&self, handle: Handle) -> Point2D<f32> {
        handle.position_on(&self.rect)
    }

    pub fn bounding_box(&self) -> Box2D<f32> {
        positive_box(&self.rect)
    }

    pub fn draw_shape(&self, surface: &mut impl Surface) {
        surface.save();

        surface.set_fill_color(self.style.fill_color);
        surface.set_stroke_color(self.style.stroke_color);
        surface.set_line_width(self.style.line_width);
        surface.stroke_rect(self.rect);
        surface.fill_rect(self.rect);

        surface.restore();
    }

    pub fn draw_handles(&self, surface: &mut impl Surface) {
        self.draw_handles_with_color(surface, HANDLE_COLOR);
    }

    /// Draws the selection border and a round knob on every handle.
    pub fn draw_handles_with_color(&self, surface: &mut impl Surface, color: Color) {
        surface.save();

        surface.set_stroke_color(color);
        surface.set_line_width(HANDLE_BORDER_WIDTH);
        surface.stroke_rect(self.rect);

        surface.set_fill_color(color);
        for handle in Handle::iter() {
            surface.begin_path();
            surface.arc(
                self.handle_position(handle),
                HANDLE_RADIUS,
                Angle::zero(),
                Angle::radians(TAU),
            );
            surface.close_path();
            surface.fill();
        }

        surface.restore();
    }

    /// Whether `point` lies on or inside the shape's edges.
    pub fn within_shape_bounds(&self, point: Point2D<f32>) -> bool {
        within_box(point, &self.bounding_box())
    }

    /// The first handle, in [`Handle`] order, whose hot zone contains `point`.
    pub fn within_handle_bounds(&self, point: Point2D<f32>) -> Option<Handle> {
        Handle::iter().find(|handle| {
            let center = self.handle_position(*handle);
            let zone = Box2D::new(center, center).inflate(HANDLE_HIT_EXTENT, HANDLE_HIT_EXTENT);
            within_box(point, &zone)
        })
    }

    pub fn move_handle(&mut self, handle: Handle, position: Point2D<f32>) {
        resize_rect(&mut self.rect, handle, position);
    }

    /// Moves the handle with the raw `index`, returning false without touching the shape if no
    /// such handle exists.
    pub fn move_handle_index(&mut self, index: i32, position: Point2D<f32>) -> bool {
        match Handle::try_from(index) {
            Ok(handle) => {
                self.move_handle(handle, position);
                true
            }
            Err(_) => false,
        }
    }

    /// Drags the far corner to `position`, as when the shape is first being drawn.
    pub fn resize_to_point(&mut self, position: Point2D<f32>) {
        self.rect.size = Size2D::from(position - self.rect.origin);
    }
    pub fn resize_to_point_square(&mut self, position: Point2D<f32>) {
        let delta = position - self.rect.origin;
        let length = delta.x.abs().min(delta.y.abs());
        self.rect.size = Size2D::new(length * delta.x.signum(), length * delta.y.signum());
    }

    pub fn translate(&mut self, delta: Vector2D<f32>) {
        self.rect.origin += delta;
    }

    /// Flips a negative width or height so the origin becomes the top-left corner.
    pub fn normalize(&mut self) {
        self.rect = self.bounding_box().to_rect();
    }

    pub fn is_empty(&self) -> bool {
        self.rect.size.width == 0. || self.rect.size.height == 0.
    }
}
