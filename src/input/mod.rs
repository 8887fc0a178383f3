use egui::{Key, Modifiers};

use crate::geometry::Point;

/// Bit mask of the pointer buttons held during an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct PointerButtons(u8);

impl PointerButtons {
    pub const NONE: Self = Self(0);
    pub const PRIMARY: Self = Self(1);
    pub const SECONDARY: Self = Self(1 << 1);
    pub const MIDDLE: Self = Self(1 << 2);

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn is_primary(self) -> bool {
        self.contains(Self::PRIMARY)
    }
}

impl std::ops::BitOr for PointerButtons {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl From<egui::PointerButton> for PointerButtons {
    fn from(button: egui::PointerButton) -> Self {
        match button {
            egui::PointerButton::Primary => Self::PRIMARY,
            egui::PointerButton::Secondary => Self::SECONDARY,
            egui::PointerButton::Middle => Self::MIDDLE,
            _ => Self::NONE,
        }
    }
}

/// Pointer position in image pixels, plus the buttons involved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub position: Point,
    pub buttons: PointerButtons,
}

impl PointerEvent {
    pub const fn new(position: Point, buttons: PointerButtons) -> Self {
        Self { position, buttons }
    }

    /// Primary-button event at `(x, y)`
    pub const fn primary(x: i32, y: i32) -> Self {
        Self::new(Point::new(x, y), PointerButtons::PRIMARY)
    }

    pub const fn is_primary(&self) -> bool {
        self.buttons.is_primary()
    }
}

/// Key press with the modifiers held at the time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub const fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    /// `key` with the platform command modifier (Ctrl, or Cmd on macOS)
    pub const fn command(key: Key) -> Self {
        Self::new(key, Modifiers::COMMAND)
    }

    pub fn is_command(&self, key: Key) -> bool {
        self.key == key && self.modifiers.command
    }
}
