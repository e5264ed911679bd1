use euclid::default::Rect;

use input::{CursorIcon, KeyboardEvent, Modifiers, MouseEvent};

use crate::config::Config;
use crate::scene::Scene;
use crate::shape::Shape;

mod crop;
mod rectangle;
mod select;

pub use crop::{CropTool, Location};
pub use rectangle::RectangleTool;
pub use select::SelectTool;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum ToolKind {
    Select,
    #[default]
    Rectangle,
    Crop,
}

#[derive(Clone, Debug, Default)]
pub struct Tools {
    pub select: SelectTool,
    pub rectangle: RectangleTool,
    pub crop: CropTool,
}

impl Tools {
    pub fn new(config: &Config) -> Self {
        Self {
            select: SelectTool::new(),
            rectangle: RectangleTool::new(config.shape),
            crop: CropTool::new(config),
        }
    }
}

impl ToolKind {
    pub const fn default_cursor(&self) -> CursorIcon {
        match self {
            ToolKind::Select => CursorIcon::Default,
            ToolKind::Rectangle | ToolKind::Crop => CursorIcon::Crosshair,
        }
    }

    pub fn mouse_event(
        &self,
        scene: &mut Scene,
        tools: &mut Tools,
        event: MouseEvent,
        modifiers: Modifiers,
    ) -> Vec<ToolMessage> {
        match self {
            ToolKind::Select => tools.select.mouse_event(scene, event, modifiers),
            ToolKind::Rectangle => tools.rectangle.mouse_event(scene, event, modifiers),
            ToolKind::Crop => tools.crop.mouse_event(scene, event, modifiers),
        }
    }

    pub fn keyboard_event(
        &self,
        scene: &mut Scene,
        tools: &mut Tools,
        event: KeyboardEvent,
    ) -> Vec<ToolMessage> {
        match self {
            ToolKind::Select => tools.select.keyboard_event(scene, event),
            ToolKind::Rectangle => tools.rectangle.keyboard_event(scene, event),
            ToolKind::Crop => tools.crop.keyboard_event(scene, event),
        }
    }
}

pub trait Tool {
    fn mouse_event(
        &mut self,
        scene: &mut Scene,
        event: MouseEvent,
        modifiers: Modifiers,
    ) -> Vec<ToolMessage>;

    #[allow(unused_variables)]
    fn keyboard_event(&mut self, scene: &mut Scene, event: KeyboardEvent) -> Vec<ToolMessage> {
        vec![]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ToolMessage {
    CursorIcon(CursorIcon),
    Commit(Shape),
    Scratch(Shape),
    ClearScratch,

    SetFocus,
    ReleaseFocus,

    /// The shape with this ID became selected, or the selection was dropped.
    Select(Option<u32>),
    /// The scene was edited in place.
    Redraw,

    CropChanged(Option<Rect<f32>>),
    CropAccepted(Rect<f32>),
    CropCanceled,
}
