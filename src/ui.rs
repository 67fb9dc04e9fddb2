//! UiFrame: a thin wrapper around a ratatui buffer that clips every draw
//! call to the visible area.
//!
//! Desktop geometry is signed (a window may hang off the left edge while it
//! is being dragged), so besides the usual widget helpers the frame accepts
//! `i32` coordinates and silently drops anything that falls outside.
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use crate::geometry::Bounds;

pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    /// Construct a `UiFrame` directly from an area and buffer.
    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    fn clip_rect(&self, rect: Rect) -> Option<Rect> {
        let clipped = rect.intersection(self.area);
        if clipped.width == 0 || clipped.height == 0 {
            None
        } else {
            Some(clipped)
        }
    }

    pub fn render_widget<W>(&mut self, widget: W, area: Rect)
    where
        W: Widget,
    {
        if let Some(clipped) = self.clip_rect(area) {
            widget.render(clipped, self.buffer);
        }
    }

    /// Visible part of a desktop rectangle, if any.
    pub fn clip_bounds(&self, bounds: Bounds) -> Option<Rect> {
        to_rect(bounds).and_then(|rect| self.clip_rect(rect))
    }

    /// Write one cell at signed coordinates.
    pub fn put(&mut self, x: i32, y: i32, symbol: &str, style: Style) {
        let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
            return;
        };
        if x < self.area.x || x >= self.area.right() || y < self.area.y || y >= self.area.bottom()
        {
            return;
        }
        if let Some(cell) = self.buffer.cell_mut((x, y)) {
            cell.set_symbol(symbol);
            cell.set_style(style);
        }
    }

    /// Write `text` left to right from signed coordinates, one cell per char.
    pub fn put_str(&mut self, x: i32, y: i32, text: &str, style: Style) {
        let mut buf = [0u8; 4];
        for (offset, ch) in (0..).zip(text.chars()) {
            self.put(x + offset, y, ch.encode_utf8(&mut buf), style);
        }
    }

    /// Paint every visible cell of `bounds`.
    pub fn fill(&mut self, bounds: Bounds, symbol: &str, style: Style) {
        let Some(rect) = self.clip_bounds(bounds) else {
            return;
        };
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.set_symbol(symbol);
                    cell.set_style(style);
                }
            }
        }
    }
}

/// Unsigned rectangle covering the non-negative part of `bounds`.
pub fn to_rect(bounds: Bounds) -> Option<Rect> {
    let left = bounds.x.max(0);
    let top = bounds.y.max(0);
    let right = bounds.right().min(i32::from(u16::MAX));
    let bottom = bounds.bottom().min(i32::from(u16::MAX));
    if right <= left || bottom <= top {
        return None;
    }
    Some(Rect {
        x: u16::try_from(left).ok()?,
        y: u16::try_from(top).ok()?,
        width: u16::try_from(right - left).ok()?,
        height: u16::try_from(bottom - top).ok()?,
    })
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    value.chars().take(width).collect()
}
