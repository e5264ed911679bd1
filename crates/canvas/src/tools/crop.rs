use euclid::default::{Point2D, Rect, Size2D, Vector2D};
use tracing::{debug, trace};

use graphics::Surface;
use input::{
    CursorIcon, InputMethod, KeyboardEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind,
    SpecialKey,
};

use crate::config::Config;
use crate::crop::{draw_crop_handles, draw_crop_rectangle};
use crate::scene::Scene;
use crate::shape::{Handle, resize_rect};
use crate::style::Style;
use crate::tools::{Tool, ToolMessage};

/// Hot circles are this many times larger than the handle radius.
const HANDLE_HIT_FACTOR: f32 = 2.;
/// Half the width of the band around each edge that drags that edge.
const BORDER_DRAG_EXTENT: f32 = 10.;
/// Edges can only be grabbed away from the handles on selections at least this large.
const BORDER_DRAG_MIN_SIZE: f32 = 100.;

// Corners take precedence over edge midpoints.
const HIT_ORDER: [Handle; 8] = [
    Handle::TopLeft,
    Handle::TopRight,
    Handle::BottomRight,
    Handle::BottomLeft,
    Handle::TopCenter,
    Handle::MiddleRight,
    Handle::BottomCenter,
    Handle::MiddleLeft,
];

/// Where the pointer is relative to the crop selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Location {
    Outside,
    Inside,
    Handle(Handle),
}

impl Location {
    pub const fn cursor(self) -> CursorIcon {
        match self {
            Location::Outside => CursorIcon::Crosshair,
            Location::Inside => CursorIcon::Grab,
            Location::Handle(handle) => handle.cursor(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Drag {
    Create {
        start: Point2D<f32>,
    },
    Move {
        start: Point2D<f32>,
        initial_origin: Point2D<f32>,
    },
    Resize(Handle),
}

/// Selects the area of the screenshot to keep.
#[derive(Clone, Debug, PartialEq)]
pub struct CropTool {
    selection: Option<Rect<f32>>,
    /// The selection never leaves these bounds when set.
    bounds: Option<Rect<f32>>,
    drag: Option<Drag>,

    /// Radius of the handles for the current press; depends on the input method.
    handle_radius: f32,
    mouse_handle_radius: f32,
    touch_handle_radius: f32,
    nudge_step: f32,
    fine_nudge_step: f32,
    release_to_capture: bool,
}

impl Default for CropTool {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl CropTool {
    pub fn new(config: &Config) -> Self {
        Self {
            selection: None,
            bounds: None,
            drag: None,
            handle_radius: config.crop_handle_radius,
            mouse_handle_radius: config.crop_handle_radius,
            touch_handle_radius: config.crop_touch_handle_radius,
            nudge_step: config.nudge_step,
            fine_nudge_step: config.fine_nudge_step,
            release_to_capture: config.release_to_capture,
        }
    }

    pub fn selection(&self) -> Option<Rect<f32>> {
        self.selection
    }

    pub fn set_selection(&mut self, selection: Option<Rect<f32>>) {
        self.selection = selection.map(|rect| self.ensure_inside(rect));
    }

    /// Restricts the selection to `bounds`, moving the current one back inside if needed.
    pub fn set_bounds(&mut self, bounds: Option<Rect<f32>>) {
        self.bounds = bounds;
        self.selection = self.selection.map(|rect| self.ensure_inside(rect));
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn location(&self, point: Point2D<f32>) -> Location {
        let Some(selection) = self.selection else {
            return Location::Outside;
        };

        let hit_radius = self.handle_radius * HANDLE_HIT_FACTOR;
        if let Some(handle) = HIT_ORDER.into_iter().find(|handle| {
            (point - handle.position_on(&selection)).square_length() <= hit_radius * hit_radius
        }) {
            return Location::Handle(handle);
        }

        let (min, max) = (selection.min(), selection.max());
        let near = |offset: f32| offset.abs() <= BORDER_DRAG_EXTENT;
        if selection.size.width >= BORDER_DRAG_MIN_SIZE
            && selection.size.height >= BORDER_DRAG_MIN_SIZE
        {
            if (min.x..=max.x).contains(&point.x) {
                if near(point.y - min.y) {
                    return Location::Handle(Handle::TopCenter);
                }
                if near(point.y - max.y) {
                    return Location::Handle(Handle::BottomCenter);
                }
            }
            if (min.y..=max.y).contains(&point.y) {
                if near(point.x - min.x) {
                    return Location::Handle(Handle::MiddleLeft);
                }
                if near(point.x - max.x) {
                    return Location::Handle(Handle::MiddleRight);
                }
            }
        }

        if (min.x..=max.x).contains(&point.x) && (min.y..=max.y).contains(&point.y) {
            Location::Inside
        } else {
            Location::Outside
        }
    }

    /// Draws the selection border and its handles.
    pub fn draw(&self, surface: &mut impl Surface, style: &Style) {
        let Some(selection) = self.selection.filter(|rect| !rect.is_empty()) else {
            return;
        };
        draw_crop_rectangle(surface, selection, style);
        draw_crop_handles(surface, selection, style);
    }

    fn clamp_point(&self, point: Point2D<f32>) -> Point2D<f32> {
        match self.bounds {
            Some(bounds) => point.clamp(bounds.min(), bounds.max()),
            None => point,
        }
    }

    /// Moves `rect` without resizing it so that it lies within the bounds where possible.
    fn ensure_inside(&self, mut rect: Rect<f32>) -> Rect<f32> {
        let Some(bounds) = self.bounds else {
            return rect;
        };
        if rect.min_x() < bounds.min_x() {
            rect.origin.x = bounds.min_x();
        } else if rect.max_x() > bounds.max_x() {
            rect.origin.x = bounds.max_x() - rect.size.width;
        }
        if rect.min_y() < bounds.min_y() {
            rect.origin.y = bounds.min_y();
        } else if rect.max_y() > bounds.max_y() {
            rect.origin.y = bounds.max_y() - rect.size.height;
        }
        rect
    }

    fn changed(&self) -> ToolMessage {
        ToolMessage::CropChanged(self.selection)
    }

    fn press(&mut self, position: Point2D<f32>, method: InputMethod) -> Vec<ToolMessage> {
        self.handle_radius = match method {
            InputMethod::Touch => self.touch_handle_radius,
            InputMethod::Mouse | InputMethod::Tablet => self.mouse_handle_radius,
        };
        let location = self.location(position);
        let (drag, cursor) = match (location, self.selection) {
            (Location::Inside, Some(selection)) => (
                Drag::Move {
                    start: position,
                    initial_origin: selection.origin,
                },
                CursorIcon::Grabbing,
            ),
            (Location::Handle(handle), Some(_)) => (Drag::Resize(handle), handle.cursor()),
            _ => (
                Drag::Create {
                    start: self.clamp_point(position),
                },
                CursorIcon::Crosshair,
            ),
        };
        trace!("crop drag started: {drag:?}");
        self.drag = Some(drag);
        vec![ToolMessage::SetFocus, ToolMessage::CursorIcon(cursor)]
    }

    fn drag_to(&mut self, drag: Drag, position: Point2D<f32>) -> Vec<ToolMessage> {
        let selection = match (drag, self.selection) {
            (Drag::Create { start }, _) => {
                let end = self.clamp_point(position);
                // A plain click keeps the current selection.
                if end == start {
                    return vec![];
                }
                Rect::from_points([start, end])
            }
            (
                Drag::Move {
                    start,
                    initial_origin,
                },
                Some(selection),
            ) => self.ensure_inside(Rect::new(
                initial_origin + (position - start),
                selection.size,
            )),
            (Drag::Resize(handle), Some(mut selection)) => {
                resize_rect(&mut selection, handle, self.clamp_point(position));
                selection
            }
            _ => return vec![],
        };
        if self.selection == Some(selection) {
            return vec![];
        }
        self.selection = Some(selection);
        vec![self.changed()]
    }

    fn nudge(&mut self, key: SpecialKey, modifiers: Modifiers) -> Vec<ToolMessage> {
        if self.drag.is_some() {
            trace!("ignoring {key:?} while dragging the crop selection");
            return vec![];
        }
        let Some(mut selection) = self.selection else {
            return vec![];
        };
        let step = if modifiers.contains(Modifiers::SHIFT) {
            self.fine_nudge_step
        } else {
            self.nudge_step
        };
        let delta = match key {
            SpecialKey::Up => Vector2D::new(0., -step),
            SpecialKey::Down => Vector2D::new(0., step),
            SpecialKey::Left => Vector2D::new(-step, 0.),
            SpecialKey::Right => Vector2D::new(step, 0.),
            _ => return vec![],
        };

        if modifiers.contains(Modifiers::ALT) {
            selection.size = Size2D::new(
                (selection.size.width + delta.x).max(0.),
                (selection.size.height + delta.y).max(0.),
            );
        } else {
            selection.origin += delta;
        }
        self.selection = Some(self.ensure_inside(selection));
        vec![self.changed()]
    }
}

impl Tool for CropTool {
    fn mouse_event(
        &mut self,
        _scene: &mut Scene,
        event: MouseEvent,
        _modifiers: Modifiers,
    ) -> Vec<ToolMessage> {
        match event.kind {
            MouseEventKind::Press { button, method, .. } if button == MouseButton::Left => {
                self.press(event.position, method)
            }
            MouseEventKind::DoubleClick { button, .. } if button == MouseButton::Left => {
                match self.selection.filter(|rect| {
                    !rect.is_empty()
                        && (rect.min_x()..=rect.max_x()).contains(&event.position.x)
                        && (rect.min_y()..=rect.max_y()).contains(&event.position.y)
                }) {
                    Some(selection) => {
                        debug!("crop accepted by double click: {selection:?}");
                        vec![ToolMessage::CropAccepted(selection)]
                    }
                    None => vec![],
                }
            }
            MouseEventKind::Motion { .. } => match self.drag {
                Some(drag) => self.drag_to(drag, event.position),
                None => vec![ToolMessage::CursorIcon(
                    self.location(event.position).cursor(),
                )],
            },
            MouseEventKind::Release { button, .. } => {
                let drag = self.drag.take();
                let mut messages = if drag.is_some() {
                    vec![ToolMessage::ReleaseFocus]
                } else {
                    vec![]
                };
                match button {
                    MouseButton::Left => {
                        if let Some(drag) = drag {
                            messages.extend(self.drag_to(drag, event.position));
                        }
                        if let Some(Drag::Create { .. }) = drag
                            && self.release_to_capture
                            && let Some(selection) = self.selection.filter(|s| !s.is_empty())
                        {
                            debug!("accepting crop {selection:?} on release");
                            messages.push(ToolMessage::CropAccepted(selection));
                        }
                    }
                    MouseButton::Right => {
                        if self.selection.take().is_some() {
                            messages.push(self.changed());
                        }
                    }
                    _ => {}
                }
                messages.push(ToolMessage::CursorIcon(
                    self.location(event.position).cursor(),
                ));
                messages
            }
            MouseEventKind::Leave => {
                if self.drag.take().is_some() {
                    vec![ToolMessage::ReleaseFocus]
                } else {
                    vec![]
                }
            }
            _ => vec![],
        }
    }

    fn keyboard_event(&mut self, _scene: &mut Scene, event: KeyboardEvent) -> Vec<ToolMessage> {
        match event.pressed_special() {
            Some(SpecialKey::Escape) => {
                debug!("crop canceled");
                vec![ToolMessage::CropCanceled]
            }
            Some(SpecialKey::Enter) => match self.selection.filter(|rect| !rect.is_empty()) {
                Some(selection) => {
                    debug!("crop accepted: {selection:?}");
                    vec![ToolMessage::CropAccepted(selection)]
                }
                None => vec![],
            },
            Some(key @ (SpecialKey::Up | SpecialKey::Down | SpecialKey::Left | SpecialKey::Right)) => {
                self.nudge(key, event.modifiers)
            }
            _ => vec![],
        }
    }
}
