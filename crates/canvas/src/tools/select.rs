use euclid::default::Point2D;
use tracing::{debug, trace};

use input::{
    CursorIcon, KeyboardEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind, SpecialKey,
};

use crate::scene::Scene;
use crate::shape::Handle;
use crate::tools::{Tool, ToolMessage};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Drag {
    Resize { id: u32, handle: Handle },
    Move { id: u32, last: Point2D<f32> },
}

/// Picks committed shapes, then moves them or drags their handles.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SelectTool {
    selected: Option<u32>,
    drag: Option<Drag>,
}
impl SelectTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<u32> {
        self.selected
    }

    /// Drops the selection and any drag in progress.
    pub fn deselect(&mut self) {
        self.selected = None;
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    fn hover_cursor(&self, scene: &Scene, position: Point2D<f32>) -> CursorIcon {
        let handle = self
            .selected
            .and_then(|id| scene.get_node(id))
            .and_then(|shape| shape.within_handle_bounds(position));
        match handle {
            Some(handle) => handle.cursor(),
            None if scene.get_node_id_at_position(position).is_some() => CursorIcon::Move,
            None => CursorIcon::Default,
        }
    }

    fn press(&mut self, scene: &Scene, position: Point2D<f32>) -> Vec<ToolMessage> {
        if let Some(id) = self.selected
            && let Some(handle) = scene
                .get_node(id)
                .and_then(|shape| shape.within_handle_bounds(position))
        {
            trace!("dragging handle {handle:?} of shape {id}");
            self.drag = Some(Drag::Resize { id, handle });
            return vec![ToolMessage::SetFocus, ToolMessage::CursorIcon(handle.cursor())];
        }

        match scene.get_node_id_at_position(position) {
            Some(id) => {
                self.selected = Some(id);
                self.drag = Some(Drag::Move { id, last: position });
                vec![
                    ToolMessage::SetFocus,
                    ToolMessage::Select(Some(id)),
                    ToolMessage::CursorIcon(CursorIcon::Grabbing),
                ]
            }
            None => {
                let had_selection = self.selected.take().is_some();
                if had_selection {
                    vec![ToolMessage::Select(None)]
                } else {
                    vec![]
                }
            }
        }
    }

    fn finish_drag(&mut self, scene: &mut Scene) -> Vec<ToolMessage> {
        let Some(drag) = self.drag.take() else {
            return vec![];
        };
        let (Drag::Resize { id, .. } | Drag::Move { id, .. }) = drag;
        if let Some(shape) = scene.get_node_mut(id) {
            shape.normalize();
            debug!("shape {id} is now at {:?}", shape.rect);
        }
        vec![ToolMessage::ReleaseFocus, ToolMessage::Redraw]
    }
}

impl Tool for SelectTool {
    fn mouse_event(
        &mut self,
        scene: &mut Scene,
        event: MouseEvent,
        _modifiers: Modifiers,
    ) -> Vec<ToolMessage> {
        match event.kind {
            MouseEventKind::Press { button, .. } if button == MouseButton::Left => {
                self.press(scene, event.position)
            }
            MouseEventKind::Motion { .. } => match self.drag.as_mut() {
                Some(Drag::Resize { id, handle }) => {
                    if let Some(shape) = scene.get_node_mut(*id) {
                        shape.move_handle(*handle, event.position);
                    }
                    vec![ToolMessage::Redraw]
                }
                Some(Drag::Move { id, last }) => {
                    if let Some(shape) = scene.get_node_mut(*id) {
                        shape.translate(event.position - *last);
                    }
                    *last = event.position;
                    vec![ToolMessage::Redraw]
                }
                None => vec![ToolMessage::CursorIcon(
                    self.hover_cursor(scene, event.position),
                )],
            },
            MouseEventKind::Release { button, .. } if button == MouseButton::Left => {
                let mut messages = self.finish_drag(scene);
                messages.push(ToolMessage::CursorIcon(
                    self.hover_cursor(scene, event.position),
                ));
                messages
            }
            MouseEventKind::Leave => self.finish_drag(scene),
            _ => vec![],
        }
    }

    fn keyboard_event(&mut self, scene: &mut Scene, event: KeyboardEvent) -> Vec<ToolMessage> {
        match event.pressed_special() {
            Some(SpecialKey::Delete | SpecialKey::Backspace) => {
                let Some(id) = self.selected else {
                    return vec![];
                };
                self.deselect();
                scene.remove_node(id);
                debug!("deleted shape {id}");
                vec![ToolMessage::Select(None), ToolMessage::Redraw]
            }
            Some(SpecialKey::Escape) if self.selected.is_some() && self.drag.is_none() => {
                self.deselect();
                vec![ToolMessage::Select(None)]
            }
            _ => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use euclid::default::{Rect, Size2D};
    use input::Key;

    use super::*;
    use crate::shape::Shape;
    use crate::style::Style;

    fn scene_with_square() -> (Scene, u32) {
        let mut scene = Scene::new();
        let id = scene.add_node(Shape::new(
            Point2D::new(100., 100.),
            Size2D::new(100., 100.),
            Style::DEFAULT,
        ));
        (scene, id)
    }

    fn left(position: (f32, f32)) -> MouseEvent {
        MouseEvent::press(Point2D::new(position.0, position.1), MouseButton::Left)
    }
    fn release(position: (f32, f32)) -> MouseEvent {
        MouseEvent::release(Point2D::new(position.0, position.1), MouseButton::Left)
    }
    fn motion(position: (f32, f32)) -> MouseEvent {
        MouseEvent::motion(Point2D::new(position.0, position.1))
    }

    #[test]
    fn clicking_a_shape_selects_and_moves_it() {
        let (mut scene, id) = scene_with_square();
        let mut tool = SelectTool::new();
        let none = Modifiers::empty();

        let messages = tool.mouse_event(&mut scene, left((150., 150.)), none);
        assert!(messages.contains(&ToolMessage::Select(Some(id))));
        assert_eq!(tool.selected(), Some(id));

        tool.mouse_event(&mut scene, motion((160., 130.)), none);
        tool.mouse_event(&mut scene, motion((170., 120.)), none);
        let messages = tool.mouse_event(&mut scene, release((170., 120.)), none);
        assert!(messages.contains(&ToolMessage::ReleaseFocus));

        assert_eq!(
            scene.get_node(id).unwrap().rect,
            Rect::new(Point2D::new(120., 70.), Size2D::new(100., 100.))
        );
    }

    #[test]
    fn handles_of_the_selection_resize_it() {
        let (mut scene, id) = scene_with_square();
        let mut tool = SelectTool::new();
        let none = Modifiers::empty();
        tool.mouse_event(&mut scene, left((150., 150.)), none);
        tool.mouse_event(&mut scene, release((150., 150.)), none);

        let messages = tool.mouse_event(&mut scene, left((205., 205.)), none);
        assert!(messages.contains(&ToolMessage::CursorIcon(CursorIcon::NwseResize)));
        tool.mouse_event(&mut scene, motion((250., 230.)), none);
        tool.mouse_event(&mut scene, release((250., 230.)), none);

        assert_eq!(
            scene.get_node(id).unwrap().rect,
            Rect::new(Point2D::new(100., 100.), Size2D::new(150., 130.))
        );
    }

    #[test]
    fn hovering_reports_cursors() {
        let (mut scene, _) = scene_with_square();
        let mut tool = SelectTool::new();
        let none = Modifiers::empty();

        assert_eq!(
            tool.mouse_event(&mut scene, motion((150., 150.)), none),
            vec![ToolMessage::CursorIcon(CursorIcon::Move)]
        );
        assert_eq!(
            tool.mouse_event(&mut scene, motion((10., 10.)), none),
            vec![ToolMessage::CursorIcon(CursorIcon::Default)]
        );
        // Handles only count once the shape is selected.
        assert_eq!(
            tool.mouse_event(&mut scene, motion((150., 92.)), none),
            vec![ToolMessage::CursorIcon(CursorIcon::Default)]
        );
        tool.mouse_event(&mut scene, left((150., 150.)), none);
        tool.mouse_event(&mut scene, release((150., 150.)), none);
        assert_eq!(
            tool.mouse_event(&mut scene, motion((150., 92.)), none),
            vec![ToolMessage::CursorIcon(CursorIcon::NsResize)]
        );
    }

    #[test]
    fn clicking_empty_space_drops_the_selection() {
        let (mut scene, _) = scene_with_square();
        let mut tool = SelectTool::new();
        let none = Modifiers::empty();
        tool.mouse_event(&mut scene, left((150., 150.)), none);
        tool.mouse_event(&mut scene, release((150., 150.)), none);

        let messages = tool.mouse_event(&mut scene, left((10., 10.)), none);
        assert_eq!(messages, vec![ToolMessage::Select(None)]);
        assert_eq!(tool.selected(), None);
        assert!(!tool.is_dragging());
    }

    #[test]
    fn delete_removes_the_selected_shape() {
        let (mut scene, id) = scene_with_square();
        let mut tool = SelectTool::new();
        tool.mouse_event(&mut scene, left((150., 150.)), Modifiers::empty());
        tool.mouse_event(&mut scene, release((150., 150.)), Modifiers::empty());

        let messages = tool.keyboard_event(
            &mut scene,
            KeyboardEvent::press(Key::SpecialKey(SpecialKey::Delete), Modifiers::empty()),
        );
        assert_eq!(messages, vec![ToolMessage::Select(None), ToolMessage::Redraw]);
        assert!(scene.get_node(id).is_none());

        let messages = tool.keyboard_event(
            &mut scene,
            KeyboardEvent::press(Key::SpecialKey(SpecialKey::Delete), Modifiers::empty()),
        );
        assert!(messages.is_empty());
    }
}
