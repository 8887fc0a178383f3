use egui::CursorIcon;

use super::hit_testing::is_point_near;
use super::{Point, Rect};

/// Edge length of a selection handle square, in pixels
pub const HANDLE_SIZE: i32 = 7;

/// One of the eight grab points around a selected element's bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlePosition {
    TopLeft,
    TopMiddle,
    TopRight,
    MiddleLeft,
    MiddleRight,
    BottomLeft,
    BottomMiddle,
    BottomRight,
}

impl HandlePosition {
    /// All handles in hit-test priority order
    pub const ALL: [HandlePosition; 8] = [
        HandlePosition::TopLeft,
        HandlePosition::TopMiddle,
        HandlePosition::TopRight,
        HandlePosition::MiddleLeft,
        HandlePosition::MiddleRight,
        HandlePosition::BottomLeft,
        HandlePosition::BottomMiddle,
        HandlePosition::BottomRight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HandlePosition::TopLeft => "top_left",
            HandlePosition::TopMiddle => "top_middle",
            HandlePosition::TopRight => "top_right",
            HandlePosition::MiddleLeft => "middle_left",
            HandlePosition::MiddleRight => "middle_right",
            HandlePosition::BottomLeft => "bottom_left",
            HandlePosition::BottomMiddle => "bottom_middle",
            HandlePosition::BottomRight => "bottom_right",
        }
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            HandlePosition::TopLeft | HandlePosition::BottomRight => CursorIcon::ResizeNwSe,
            HandlePosition::TopRight | HandlePosition::BottomLeft => CursorIcon::ResizeNeSw,
            HandlePosition::TopMiddle | HandlePosition::BottomMiddle => CursorIcon::ResizeVertical,
            HandlePosition::MiddleLeft | HandlePosition::MiddleRight => {
                CursorIcon::ResizeHorizontal
            }
        }
    }

    /// Centre of this handle for the given bounds
    pub fn center(&self, bounds: &Rect) -> Point {
        let x = match self {
            HandlePosition::TopLeft | HandlePosition::MiddleLeft | HandlePosition::BottomLeft => {
                bounds.left
            }
            HandlePosition::TopMiddle | HandlePosition::BottomMiddle => bounds.center_x(),
            HandlePosition::TopRight
            | HandlePosition::MiddleRight
            | HandlePosition::BottomRight => bounds.right,
        };
        let y = match self {
            HandlePosition::TopLeft | HandlePosition::TopMiddle | HandlePosition::TopRight => {
                bounds.top
            }
            HandlePosition::MiddleLeft | HandlePosition::MiddleRight => bounds.center_y(),
            HandlePosition::BottomLeft
            | HandlePosition::BottomMiddle
            | HandlePosition::BottomRight => bounds.bottom,
        };
        Point::new(x, y)
    }

    /// Square drawn for this handle
    pub fn handle_rect(&self, bounds: &Rect) -> Rect {
        Rect::centered(self.center(bounds), HANDLE_SIZE)
    }
}

/// All eight handle centres, in priority order
pub fn handle_points(bounds: &Rect) -> [(HandlePosition, Point); 8] {
    HandlePosition::ALL.map(|handle| (handle, handle.center(bounds)))
}

/// First handle (in priority order) within half a handle of `point`
pub fn handle_at(bounds: &Rect, point: Point) -> Option<HandlePosition> {
    let tolerance = HANDLE_SIZE / 2;
    HandlePosition::ALL.into_iter().find(|handle| {
        let center = handle.center(bounds);
        is_point_near(point, center.x, center.y, tolerance)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_centers_follow_bounds() {
        let bounds = Rect::from_ltrb(10, 20, 110, 70);
        let points = handle_points(&bounds);
        assert_eq!(points[0], (HandlePosition::TopLeft, Point::new(10, 20)));
        assert_eq!(points[1], (HandlePosition::TopMiddle, Point::new(60, 20)));
        assert_eq!(points[4], (HandlePosition::MiddleRight, Point::new(110, 45)));
        assert_eq!(points[7], (HandlePosition::BottomRight, Point::new(110, 70)));
    }

    #[test]
    fn test_handle_tolerance_is_half_handle() {
        let bounds = Rect::from_ltrb(0, 0, 100, 100);
        assert_eq!(handle_at(&bounds, Point::new(3, 3)), Some(HandlePosition::TopLeft));
        assert_eq!(handle_at(&bounds, Point::new(4, 0)), None);
        assert_eq!(handle_at(&bounds, Point::new(50, 50)), None);
    }

    #[test]
    fn test_overlapping_handles_resolve_in_fixed_order() {
        // On a 6px wide box the top handles sit at x = 0, 3 and 6
        let bounds = Rect::from_ltrb(0, 0, 6, 40);
        // x = 3 is within reach of all three, and equidistant from TopLeft and TopRight
        assert_eq!(handle_at(&bounds, Point::new(3, 0)), Some(HandlePosition::TopLeft));
        assert_eq!(handle_at(&bounds, Point::new(4, 0)), Some(HandlePosition::TopMiddle));
        assert_eq!(handle_at(&bounds, Point::new(6, 1)), Some(HandlePosition::TopMiddle));
        assert_eq!(handle_at(&bounds, Point::new(7, 1)), Some(HandlePosition::TopRight));
    }
}
