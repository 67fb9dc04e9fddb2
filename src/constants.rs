//! Shared crate-wide constants.
//!
//! Units are pixels of the hosting surface. The terminal runtime treats one
//! character cell as one pixel, which is why the values are small.

use std::time::Duration;

use crate::geometry::{Point, Size};

/// Height of the taskbar strip kept free below every window.
pub const CHROME_HEIGHT: i32 = 1;

/// Where a window opens when the request leaves the position unspecified.
pub const DEFAULT_WINDOW_POSITION: Point = Point::new(6, 3);

/// Size a window opens at when the request leaves it unspecified.
pub const DEFAULT_WINDOW_SIZE: Size = Size::new(48, 14);

/// Smallest size an edge resize may shrink a window to.
pub const MIN_WINDOW_SIZE: Size = Size::new(20, 6);

pub const DEFAULT_WINDOW_TITLE: &str = "Window";

/// Icon cell footprint on the desktop grid.
pub const ICON_CELL_WIDTH: i32 = 10;
pub const ICON_CELL_HEIGHT: i32 = 3;
/// Space between neighbouring icon cells on both axes.
pub const ICON_GAP: i32 = 1;

/// A marquee shorter than this is a click and leaves the selection alone.
pub const SELECTION_MIN_DURATION: Duration = Duration::from_millis(150);

pub const DOUBLE_CLICK_MAX_DELAY: Duration = Duration::from_millis(300);
/// Maximum pointer travel (in pixels) between the two halves of a double click.
pub const DOUBLE_CLICK_MAX_DISTANCE: f64 = 5.0;

/// Target interval between animation frames (~60 fps).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Offsets explored by the free-cell search, in priority order.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (0, 1),
    (1, 0),
    (0, -1),
    (-1, 0),
    (1, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
];

/// Width of one taskbar button, including its trailing gap.
pub const TASKBAR_BUTTON_WIDTH: i32 = 16;
