use ratatui::style::{Color, Modifier, Style};

use crate::geometry::{Bounds, Point};
use crate::ui::{UiFrame, truncate_to_width};

/// What a press on a window's header row asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    Minimize,
    Maximize,
    Close,
    /// Anywhere on the header that is not a button.
    Drag,
}

/// Header buttons, left to right.
pub const HEADER_BUTTONS: [(HeaderAction, &str); 3] = [
    (HeaderAction::Minimize, "[_]"),
    (HeaderAction::Maximize, "[□]"),
    (HeaderAction::Close, "[x]"),
];

const BUTTON_WIDTH: i32 = 3;

/// Screen rectangle of one header button. Buttons sit flush against the
/// right border; `None` when the window is too narrow to show them.
pub fn button_bounds(bounds: Bounds, action: HeaderAction) -> Option<Bounds> {
    let slot = HEADER_BUTTONS
        .iter()
        .position(|(candidate, _)| *candidate == action)? as i32;
    let first = bounds.right() - 1 - BUTTON_WIDTH * HEADER_BUTTONS.len() as i32;
    if first <= bounds.x {
        return None;
    }
    Some(Bounds::new(first + slot * BUTTON_WIDTH, bounds.y, BUTTON_WIDTH, 1))
}

/// Hit test the header row of a window at `bounds`.
pub fn header_action(bounds: Bounds, point: Point) -> Option<HeaderAction> {
    if point.y != bounds.y || !bounds.contains(point) {
        return None;
    }
    HEADER_BUTTONS
        .iter()
        .map(|(action, _)| *action)
        .find(|action| button_bounds(bounds, *action).is_some_and(|b| b.contains(point)))
        .or(Some(HeaderAction::Drag))
}

pub trait WindowDecorator: std::fmt::Debug {
    fn render_window(&self, ui: &mut UiFrame<'_>, bounds: Bounds, title: &str, focused: bool);
}

/// Solid title bar with the buttons on the right and a thin box border.
#[derive(Debug, Default)]
pub struct TitleBarDecorator;

impl WindowDecorator for TitleBarDecorator {
    fn render_window(&self, ui: &mut UiFrame<'_>, bounds: Bounds, title: &str, focused: bool) {
        if bounds.width <= 0 || bounds.height <= 0 {
            return;
        }
        let focused_header_style = Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);
        let normal_header_style = Style::default().bg(Color::DarkGray).fg(Color::White);
        let border_style = Style::default().fg(Color::DarkGray).bg(Color::Reset);
        let body_style = Style::default().bg(Color::Reset);

        let header_style = if focused {
            focused_header_style
        } else {
            normal_header_style
        };

        let left = bounds.x;
        let right = bounds.right() - 1;
        let bottom = bounds.bottom() - 1;

        ui.fill(bounds, " ", body_style);

        // Header
        ui.fill(Bounds::new(left, bounds.y, bounds.width, 1), " ", header_style);
        let buttons_start = button_bounds(bounds, HeaderAction::Minimize)
            .map(|b| b.x)
            .unwrap_or(right);
        let room = (buttons_start - left - 2).max(0) as usize;
        ui.put_str(left + 1, bounds.y, &truncate_to_width(title, room), header_style);
        for (action, label) in HEADER_BUTTONS {
            if let Some(button) = button_bounds(bounds, action) {
                ui.put_str(button.x, button.y, label, header_style);
            }
        }

        if bounds.height < 2 {
            return;
        }
        // Sides
        for y in bounds.y + 1..bottom {
            ui.put(left, y, "│", border_style);
            ui.put(right, y, "│", border_style);
        }
        // Bottom
        for x in left..=right {
            let symbol = if x == left {
                "└"
            } else if x == right {
                "┘"
            } else {
                "─"
            };
            ui.put(x, bottom, symbol, border_style);
        }
    }
}
