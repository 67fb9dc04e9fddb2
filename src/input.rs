use std::time::{Duration, Instant};

use crate::constants::{DOUBLE_CLICK_MAX_DELAY, DOUBLE_CLICK_MAX_DISTANCE};
use crate::geometry::Point;

/// What the pointer was over when the event was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerTarget {
    /// The bare desktop plane behind the icons.
    Background,
    Icon(String),
    Window(String),
    Taskbar,
}

/// A pointer event in screen coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerEvent {
    pub position: Point,
    pub target: PointerTarget,
}

impl PointerEvent {
    pub fn new(x: i32, y: i32, target: PointerTarget) -> Self {
        Self {
            position: Point::new(x, y),
            target,
        }
    }

    pub fn at(x: i32, y: i32) -> Self {
        Self::new(x, y, PointerTarget::Background)
    }
}

/// Distinguishes double clicks from two unrelated single clicks. Both
/// clicks must land on the same target.
#[derive(Debug, Clone)]
pub struct ClickTracker {
    max_delay: Duration,
    max_distance: f64,
    last: Option<(String, Point, Instant)>,
}

impl Default for ClickTracker {
    fn default() -> Self {
        Self::new(DOUBLE_CLICK_MAX_DELAY, DOUBLE_CLICK_MAX_DISTANCE)
    }
}

impl ClickTracker {
    pub fn new(max_delay: Duration, max_distance: f64) -> Self {
        Self {
            max_delay,
            max_distance,
            last: None,
        }
    }

    /// Register a click on `target` and report whether it completes a
    /// double click.
    pub fn click(&mut self, target: &str, position: Point, now: Instant) -> bool {
        if let Some((prev_target, prev_pos, prev_at)) = self.last.take() {
            let elapsed = now.saturating_duration_since(prev_at);
            let dx = f64::from(position.x - prev_pos.x);
            let dy = f64::from(position.y - prev_pos.y);
            if prev_target == target
                && elapsed < self.max_delay
                && dx.hypot(dy) < self.max_distance
            {
                return true;
            }
        }
        self.last = Some((target.to_string(), position, now));
        false
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
