use std::fmt;
use std::str::FromStr;

use crate::error::ParseEdgeError;
use crate::geometry::{Bounds, Point, Size, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeEdge {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeEdge {
    pub const ALL: [ResizeEdge; 8] = [
        ResizeEdge::Top,
        ResizeEdge::Bottom,
        ResizeEdge::Right,
        ResizeEdge::Left,
        ResizeEdge::TopLeft,
        ResizeEdge::TopRight,
        ResizeEdge::BottomLeft,
        ResizeEdge::BottomRight,
    ];

    pub fn touches_left(self) -> bool {
        matches!(
            self,
            ResizeEdge::Left | ResizeEdge::TopLeft | ResizeEdge::BottomLeft
        )
    }

    pub fn touches_right(self) -> bool {
        matches!(
            self,
            ResizeEdge::Right | ResizeEdge::TopRight | ResizeEdge::BottomRight
        )
    }

    pub fn touches_top(self) -> bool {
        matches!(
            self,
            ResizeEdge::Top | ResizeEdge::TopLeft | ResizeEdge::TopRight
        )
    }

    pub fn touches_bottom(self) -> bool {
        matches!(
            self,
            ResizeEdge::Bottom | ResizeEdge::BottomLeft | ResizeEdge::BottomRight
        )
    }

    /// Compass shorthand (`n`, `se`, ...).
    pub fn as_compass(self) -> &'static str {
        match self {
            ResizeEdge::Top => "n",
            ResizeEdge::Bottom => "s",
            ResizeEdge::Right => "e",
            ResizeEdge::Left => "w",
            ResizeEdge::TopRight => "ne",
            ResizeEdge::TopLeft => "nw",
            ResizeEdge::BottomRight => "se",
            ResizeEdge::BottomLeft => "sw",
        }
    }
}

impl fmt::Display for ResizeEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_compass())
    }
}

impl FromStr for ResizeEdge {
    type Err = ParseEdgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResizeEdge::ALL
            .into_iter()
            .find(|edge| edge.as_compass().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseEdgeError(s.to_string()))
    }
}

/// Which edge or corner of `rect` the point sits on, if any.
///
/// Corners win over edges; the top edge is left to the header so it only
/// resizes from its two corners.
pub fn edge_at(rect: Bounds, point: Point) -> Option<ResizeEdge> {
    if !rect.contains(point) || rect.width < 2 || rect.height < 2 {
        return None;
    }
    let left = point.x == rect.x;
    let right = point.x == rect.right() - 1;
    let top = point.y == rect.y;
    let bottom = point.y == rect.bottom() - 1;
    match (left, right, top, bottom) {
        (true, _, true, _) => Some(ResizeEdge::TopLeft),
        (_, true, true, _) => Some(ResizeEdge::TopRight),
        (true, _, _, true) => Some(ResizeEdge::BottomLeft),
        (_, true, _, true) => Some(ResizeEdge::BottomRight),
        (true, _, _, _) => Some(ResizeEdge::Left),
        (_, true, _, _) => Some(ResizeEdge::Right),
        (_, _, _, true) => Some(ResizeEdge::Bottom),
        _ => None,
    }
}

/// Bounds after dragging `edge` by `delta` from `start`.
///
/// Right/bottom edges grow the size directly. Left/top edges move the
/// origin with the size so the opposite edge stays put, including when the
/// size bottoms out at `min`.
pub fn apply_resize(start: Bounds, edge: ResizeEdge, delta: Point, min: Size) -> Bounds {
    let mut next = start;
    if edge.touches_right() {
        next.width = (start.width + delta.x).max(min.width);
    }
    if edge.touches_bottom() {
        next.height = (start.height + delta.y).max(min.height);
    }
    if edge.touches_left() {
        let width = (start.width - delta.x).max(min.width);
        next.x = start.x + (start.width - width);
        next.width = width;
    }
    if edge.touches_top() {
        let height = (start.height - delta.y).max(min.height);
        next.y = start.y + (start.height - height);
        next.height = height;
    }
    next
}

/// Resize and then keep the result on screen exactly like a drag would.
///
/// When a left or top edge is pulled past the screen, the size gives up
/// what the clamp took so the opposite edge stays anchored.
pub fn apply_resize_clamped(
    start: Bounds,
    edge: ResizeEdge,
    delta: Point,
    min: Size,
    viewport: &Viewport,
) -> Bounds {
    let resized = apply_resize(start, edge, delta, min);
    let mut clamped = viewport.clamp_bounds(resized);
    if edge.touches_left() && clamped.x > resized.x {
        clamped.width = (resized.width - (clamped.x - resized.x)).max(min.width);
    }
    if edge.touches_top() && clamped.y > resized.y {
        clamped.height = (resized.height - (clamped.y - resized.y)).max(min.height);
    }
    clamped
}
