use euclid::default::{Point2D, Rect};
use tracing::{debug, info, instrument, trace};

use graphics::Surface;
use input::{
    CursorIcon, Key, KeyboardEvent, KeyboardEventKind, Modifiers, MouseEvent, MouseEventKind,
};

use crate::RedrawRequest;
use crate::config::Config;
use crate::scene::Scene;
use crate::shape::Shape;
use crate::tools::{ToolKind, ToolMessage, Tools};

/// Which tool received the last pointer event, if the pointer is over the canvas at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionKind {
    Tool(ToolKind),
    Outside,
}

/// How the user finished with the crop selection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CropOutcome {
    Accepted(Rect<f32>),
    Canceled,
}

pub struct Editor<T: RedrawRequest> {
    pub scene: Scene,
    pub config: Config,
    pub tools: Tools,

    selected_tool: ToolKind,
    focused_tool: Option<ToolKind>,
    last_interaction: InteractionKind,
    last_position: Point2D<f32>,
    modifiers: Modifiers,

    scratch: Option<Shape>,
    selected_node: Option<u32>,
    crop_outcome: Option<CropOutcome>,

    redraw_manager: T,
}

impl<T: RedrawRequest> Editor<T> {
    pub fn new(config: Config, redraw_manager: T) -> Self {
        Self {
            scene: Scene::new(),
            tools: Tools::new(&config),
            config,

            selected_tool: ToolKind::default(),
            focused_tool: None,
            last_interaction: InteractionKind::Outside,
            last_position: Point2D::zero(),
            modifiers: Modifiers::empty(),

            scratch: None,
            selected_node: None,
            crop_outcome: None,

            redraw_manager,
        }
    }

    pub fn selected_tool(&self) -> ToolKind {
        self.selected_tool
    }

    pub fn selected_node(&self) -> Option<u32> {
        self.selected_node
    }

    pub fn scratch(&self) -> Option<&Shape> {
        self.scratch.as_ref()
    }

    pub fn crop_selection(&self) -> Option<Rect<f32>> {
        self.tools.crop.selection()
    }

    /// The accepted or canceled crop, once per decision.
    pub fn take_crop_outcome(&mut self) -> Option<CropOutcome> {
        self.crop_outcome.take()
    }

    /// Keeps the crop selection within the screenshot's area.
    pub fn set_bounds(&mut self, bounds: Rect<f32>) {
        self.tools.crop.set_bounds(Some(bounds));
        self.redraw_manager.request_redraw();
        info!("Updated the canvas bounds to: {bounds:?}!");
    }

    /// Switches tools; a tool that is mid-drag is told the pointer left first.
    pub fn select_tool(&mut self, tool: ToolKind) -> Option<CursorIcon> {
        if tool == self.selected_tool {
            return None;
        }
        if let Some(focused) = self.focused_tool {
            let messages = focused.mouse_event(
                &mut self.scene,
                &mut self.tools,
                MouseEvent::leave(self.last_position),
                self.modifiers,
            );
            self.handle_tool(focused, messages);
            self.focused_tool = None;
        }
        if tool != ToolKind::Select && self.selected_node.take().is_some() {
            self.tools.select.deselect();
            self.redraw_manager.request_redraw();
        }
        debug!("selected tool {tool:?}");
        self.selected_tool = tool;
        Some(tool.default_cursor())
    }

    pub fn keyboard_event(&mut self, event: KeyboardEvent) {
        self.modifiers = event.modifiers;

        if self.focused_tool.is_none()
            && event.modifiers.contains(Modifiers::CTRL)
            && matches!(
                &event.kind,
                KeyboardEventKind::Press(Key::Character(c)) if c.eq_ignore_ascii_case("z")
            )
        {
            self.undo();
            return;
        }

        let tool = self.focused_tool.unwrap_or(self.selected_tool);
        let messages = tool.keyboard_event(&mut self.scene, &mut self.tools, event);
        self.handle_tool(tool, messages);
    }

    pub fn mouse_event(&mut self, event: MouseEvent) -> Option<CursorIcon> {
        self.last_position = event.position;

        // A tool in the middle of a drag receives everything until it releases focus.
        if let Some(tool) = self.focused_tool {
            let messages = tool.mouse_event(&mut self.scene, &mut self.tools, event, self.modifiers);
            self.last_interaction = match event.kind {
                MouseEventKind::Leave => InteractionKind::Outside,
                _ => InteractionKind::Tool(tool),
            };
            return self.handle_tool(tool, messages);
        }

        if let MouseEventKind::Leave = event.kind {
            let result = match self.last_interaction {
                InteractionKind::Tool(tool) => {
                    let messages =
                        tool.mouse_event(&mut self.scene, &mut self.tools, event, self.modifiers);
                    self.handle_tool(tool, messages)
                }
                InteractionKind::Outside => None,
            };
            self.last_interaction = InteractionKind::Outside;
            return result;
        }

        // Tell tools about the pointer entering or the selected tool changing under it.
        let mut result = None;
        match self.last_interaction {
            InteractionKind::Tool(tool) if tool != self.selected_tool => {
                let leave_messages = tool.mouse_event(
                    &mut self.scene,
                    &mut self.tools,
                    MouseEvent::leave(event.position),
                    self.modifiers,
                );
                self.handle_tool(tool, leave_messages);
                result = self
                    .enter_selected_tool(event.position)
                    .or(Some(self.selected_tool.default_cursor()));
            }
            InteractionKind::Outside => {
                result = self
                    .enter_selected_tool(event.position)
                    .or(Some(self.selected_tool.default_cursor()));
            }
            _ => {}
        }
        self.last_interaction = InteractionKind::Tool(self.selected_tool);
        if let MouseEventKind::Enter = event.kind {
            return result;
        }

        let tool = self.selected_tool;
        let messages = tool.mouse_event(&mut self.scene, &mut self.tools, event, self.modifiers);
        self.handle_tool(tool, messages).or(result)
    }

    fn enter_selected_tool(&mut self, position: Point2D<f32>) -> Option<CursorIcon> {
        let tool = self.selected_tool;
        let messages = tool.mouse_event(
            &mut self.scene,
            &mut self.tools,
            MouseEvent::enter(position),
            self.modifiers,
        );
        self.handle_tool(tool, messages)
    }

    pub fn handle_tool(
        &mut self,
        tool: ToolKind,
        messages: Vec<ToolMessage>,
    ) -> Option<CursorIcon> {
        let mut cursor_icon = None;
        for message in messages {
            trace!("{tool:?} sent {message:?}");
            match message {
                ToolMessage::CursorIcon(icon) => {
                    cursor_icon = Some(icon);
                }
                ToolMessage::Commit(shape) => {
                    self.scratch = None;
                    let id = self.scene.add_node(shape);
                    debug!("added shape {id} at {:?}", shape.rect);
                    self.redraw_manager.request_redraw();
                }
                ToolMessage::Scratch(shape) => {
                    self.scratch = Some(shape);
                    self.redraw_manager.request_redraw();
                }
                ToolMessage::ClearScratch => {
                    if self.scratch.take().is_some() {
                        self.redraw_manager.request_redraw();
                    }
                }
                ToolMessage::SetFocus => self.focused_tool = Some(tool),
                ToolMessage::ReleaseFocus => {
                    self.focused_tool = None;
                }
                ToolMessage::Select(id) => {
                    if self.selected_node != id {
                        self.selected_node = id;
                        self.redraw_manager.request_redraw();
                    }
                }
                ToolMessage::Redraw | ToolMessage::CropChanged(_) => {
                    self.redraw_manager.request_redraw();
                }
                ToolMessage::CropAccepted(rect) => {
                    info!("crop accepted: {rect:?}");
                    self.crop_outcome = Some(CropOutcome::Accepted(rect));
                }
                ToolMessage::CropCanceled => {
                    info!("crop canceled");
                    self.crop_outcome = Some(CropOutcome::Canceled);
                }
            };
        }
        cursor_icon
    }

    /// Removes the newest shape.
    pub fn undo(&mut self) -> Option<Shape> {
        let (id, shape) = self.scene.undo()?;
        if self.selected_node == Some(id) {
            self.selected_node = None;
            self.tools.select.deselect();
        }
        debug!("undid shape {id}");
        self.redraw_manager.request_redraw();
        Some(shape)
    }

    /// Drops every shape, the scratch shape and the crop selection.
    pub fn clear(&mut self) {
        self.scene.clear();
        self.scratch = None;
        self.selected_node = None;
        self.tools.select.deselect();
        self.tools.crop.set_selection(None);
        self.redraw_manager.request_redraw();
    }

    /// Draws the scene, the shape being drawn, the selection's handles, then the crop selection.
    #[instrument(skip_all)]
    pub fn render(&self, surface: &mut impl Surface) {
        self.scene.draw(surface);

        if let Some(scratch) = &self.scratch {
            scratch.draw_shape(surface);
        }

        if let Some(shape) = self.selected_node.and_then(|id| self.scene.get_node(id)) {
            shape.draw_handles_with_color(surface, self.config.handle_color);
        }

        self.tools.crop.draw(surface, &self.config.crop);
    }
}
