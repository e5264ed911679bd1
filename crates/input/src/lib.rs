// Parts of this mirror the pointer and keyboard events of Smithay's client-toolkit, so that hosts
// on any platform can translate their native events without depending on it.
use bitflags::bitflags;
use euclid::default::Point2D;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

bitflags! {
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u32 {
        const SHIFT = 1 << 0;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
        /// The "logo" key, also known as the "windows" or "super" key on a keyboard.
        #[doc(alias = "windows")]
        #[doc(alias = "super")]
        const LOGO = 1 << 3;

        const CAPS_LOCK = 1 << 4;
        const NUM_LOCK = 1 << 5;
    }

}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyboardEvent {
    pub modifiers: Modifiers,
    pub kind: KeyboardEventKind,
}

impl KeyboardEvent {
    pub const fn press(key: Key, modifiers: Modifiers) -> Self {
        Self {
            modifiers,
            kind: KeyboardEventKind::Press(key),
        }
    }
    pub const fn release(key: Key, modifiers: Modifiers) -> Self {
        Self {
            modifiers,
            kind: KeyboardEventKind::Release(key),
        }
    }
    /// The special key that was pressed, if this is a press of one.
    pub const fn pressed_special(&self) -> Option<SpecialKey> {
        match &self.kind {
            KeyboardEventKind::Press(Key::SpecialKey(key)) => Some(*key),
            _ => None,
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyboardEventKind {
    Press(Key),
    Release(Key),
    ModifiersChanged,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    SpecialKey(SpecialKey),
    Character(String),
    Unknown,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpecialKey {
    Escape,
    Enter,
    Backspace,
    Delete,

    Left,
    Right,
    Up,
    Down,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// The kind of device a pointer event came from.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InputMethod {
    #[default]
    Mouse,
    Tablet,
    Touch,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MouseEvent {
    pub position: Point2D<f32>,
    pub kind: MouseEventKind,
}

impl MouseEvent {
    pub const fn new(position: Point2D<f32>, kind: MouseEventKind) -> Self {
        Self { position, kind }
    }
    pub const fn enter(position: Point2D<f32>) -> Self {
        Self::new(position, MouseEventKind::Enter)
    }
    pub const fn leave(position: Point2D<f32>) -> Self {
        Self::new(position, MouseEventKind::Leave)
    }
    pub const fn motion(position: Point2D<f32>) -> Self {
        Self::new(position, MouseEventKind::Motion { time: 0 })
    }
    pub const fn press(position: Point2D<f32>, button: MouseButton) -> Self {
        Self::press_with(position, button, InputMethod::Mouse)
    }
    pub const fn press_with(
        position: Point2D<f32>,
        button: MouseButton,
        method: InputMethod,
    ) -> Self {
        Self::new(
            position,
            MouseEventKind::Press {
                time: 0,
                button,
                method,
            },
        )
    }
    pub const fn release(position: Point2D<f32>, button: MouseButton) -> Self {
        Self::new(position, MouseEventKind::Release { time: 0, button })
    }
    pub const fn double_click(position: Point2D<f32>, button: MouseButton) -> Self {
        Self::new(position, MouseEventKind::DoubleClick { time: 0, button })
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MouseEventKind {
    Enter,
    Leave,
    Motion {
        time: u32,
    },
    Press {
        time: u32,
        button: MouseButton,
        method: InputMethod,
    },
    Release {
        time: u32,
        button: MouseButton,
    },
    /// Sent after the second `Press`/`Release` pair of a double click.
    DoubleClick {
        time: u32,
        button: MouseButton,
    },
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum CursorIcon {
    /// The platform-dependent default cursor. Often rendered as arrow.
    #[default]
    Default,

    /// A simple crosshair (e.g., short line segments resembling a "+" sign).
    /// Often used to indicate a two dimensional bitmap selection mode.
    Crosshair,

    /// Indicates something is to be moved.
    Move,

    /// Indicates that something can be grabbed (dragged to be moved). Often
    /// rendered as the backside of an open hand.
    Grab,

    /// Indicates that something is being grabbed (dragged to be moved). Often
    /// rendered as the backside of a hand with fingers closed mostly out of
    /// view.
    Grabbing,

    /// The east and west borders to be moved.
    EwResize,

    /// The south and north borders to be moved.
    NsResize,

    /// The north-east and south-west corners to be moved.
    NeswResize,

    /// The north-west and south-east corners to be moved.
    NwseResize,
}

#[cfg(test)]
mod tests {
    use euclid::default::Point2D;

    use super::*;

    #[test]
    fn presses_come_from_the_mouse_unless_told_otherwise() {
        let position = Point2D::new(4., 2.);
        assert_eq!(
            MouseEvent::press(position, MouseButton::Left).kind,
            MouseEventKind::Press {
                time: 0,
                button: MouseButton::Left,
                method: InputMethod::Mouse,
            }
        );
        let touch = MouseEvent::press_with(position, MouseButton::Left, InputMethod::Touch);
        assert!(matches!(
            touch.kind,
            MouseEventKind::Press {
                method: InputMethod::Touch,
                ..
            }
        ));
        assert_eq!(
            MouseEvent::double_click(position, MouseButton::Left).kind,
            MouseEventKind::DoubleClick {
                time: 0,
                button: MouseButton::Left,
            }
        );
    }

    #[test]
    fn pressed_special_ignores_releases_and_characters() {
        let escape = Key::SpecialKey(SpecialKey::Escape);
        assert_eq!(
            KeyboardEvent::press(escape.clone(), Modifiers::empty()).pressed_special(),
            Some(SpecialKey::Escape)
        );
        assert_eq!(
            KeyboardEvent::release(escape, Modifiers::empty()).pressed_special(),
            None
        );
        assert_eq!(
            KeyboardEvent::press(Key::Character("a".into()), Modifiers::SHIFT).pressed_special(),
            None
        );
    }
}
