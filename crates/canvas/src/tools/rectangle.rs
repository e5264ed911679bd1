use euclid::default::Size2D;
use tracing::debug;

use input::{Modifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::scene::Scene;
use crate::shape::Shape;
use crate::style::Style;
use crate::tools::{Tool, ToolMessage};

#[derive(Clone, Debug, Default)]
pub struct RectangleTool {
    style: Style,
    drag: Option<Shape>,
}
impl RectangleTool {
    pub fn new(style: Style) -> Self {
        Self { style, drag: None }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    fn resize(drag: &mut Shape, event: &MouseEvent, modifiers: Modifiers) {
        if modifiers.intersects(Modifiers::SHIFT) {
            drag.resize_to_point_square(event.position);
        } else {
            drag.resize_to_point(event.position);
        }
    }
}

impl Tool for RectangleTool {
    fn mouse_event(
        &mut self,
        _scene: &mut Scene,
        event: MouseEvent,
        modifiers: Modifiers,
    ) -> Vec<ToolMessage> {
        match event.kind {
            MouseEventKind::Leave => {
                if self.drag.is_some() {
                    self.drag = None;
                    vec![ToolMessage::ReleaseFocus, ToolMessage::ClearScratch]
                } else {
                    vec![]
                }
            }
            MouseEventKind::Motion { .. } => {
                let Some(drag) = self.drag.as_mut() else {
                    return vec![];
                };
                Self::resize(drag, &event, modifiers);
                vec![ToolMessage::Scratch(*drag)]
            }
            MouseEventKind::Press { button, .. } => match button {
                MouseButton::Left => {
                    let drag = self
                        .drag
                        .insert(Shape::new(event.position, Size2D::zero(), self.style));
                    vec![ToolMessage::SetFocus, ToolMessage::Scratch(*drag)]
                }
                MouseButton::Right => {
                    if self.drag.take().is_some() {
                        vec![ToolMessage::ReleaseFocus, ToolMessage::ClearScratch]
                    } else {
                        vec![]
                    }
                }
                _ => vec![],
            },
            MouseEventKind::Release { button, .. } => match button {
                MouseButton::Left => {
                    let Some(mut drag) = self.drag.take() else {
                        return vec![];
                    };
                    Self::resize(&mut drag, &event, modifiers);
                    if drag.is_empty() {
                        vec![ToolMessage::ReleaseFocus, ToolMessage::ClearScratch]
                    } else {
                        drag.normalize();
                        debug!("committing rectangle {:?}", drag.rect);
                        vec![
                            ToolMessage::ReleaseFocus,
                            ToolMessage::ClearScratch,
                            ToolMessage::Commit(drag),
                        ]
                    }
                }
                _ => vec![],
            },
            _ => vec![],
        }
    }
}
