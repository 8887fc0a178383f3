use serde::{Deserialize, Serialize};

pub mod handles;
pub mod hit_testing;

pub use handles::{HANDLE_SIZE, HandlePosition};

/// A pixel position on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this point shifted by the given delta
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// The pixel a screen position falls in
impl From<egui::Pos2> for Point {
    fn from(pos: egui::Pos2) -> Self {
        Self {
            x: pos.x.floor() as i32,
            y: pos.y.floor() as i32,
        }
    }
}

/// Axis-aligned integer rectangle.
///
/// The left and top edges are inclusive, right and bottom are exclusive, so a
/// rectangle at `(0, 0)` with width 10 contains `x = 0..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn from_origin_size(origin: Point, width: i32, height: i32) -> Self {
        Self {
            left: origin.x,
            top: origin.y,
            right: origin.x + width,
            bottom: origin.y + height,
        }
    }

    /// Normalized rectangle spanned by two corner points, in any order
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            left: a.x.min(b.x),
            top: a.y.min(b.y),
            right: a.x.max(b.x),
            bottom: a.y.max(b.y),
        }
    }

    /// Square of `size` centered on `center`
    pub const fn centered(center: Point, size: i32) -> Self {
        let left = center.x - size / 2;
        let top = center.y - size / 2;
        Self {
            left,
            top,
            right: left + size,
            bottom: top + size,
        }
    }

    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub const fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub const fn center_x(&self) -> i32 {
        self.left + self.width() / 2
    }

    pub const fn center_y(&self) -> i32 {
        self.top + self.height() / 2
    }

    /// True when the rectangle covers no pixels
    pub const fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
    }

    /// Grows every edge outwards by `amount`
    pub const fn inflate(&self, amount: i32) -> Self {
        Self {
            left: self.left - amount,
            top: self.top - amount,
            right: self.right + amount,
            bottom: self.bottom + amount,
        }
    }

    pub const fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
        }
    }
}
