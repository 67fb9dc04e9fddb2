use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::geometry::Point;

/// A terminal mouse report reduced to what the desktop reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Down { position: Point, shift: bool },
    Move(Point),
    Up(Point),
}

/// Map a crossterm mouse event; only the left button takes part.
pub fn pointer_action(event: &MouseEvent) -> Option<PointerAction> {
    let position = Point::new(i32::from(event.column), i32::from(event.row));
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(PointerAction::Down {
            position,
            shift: event.modifiers.contains(KeyModifiers::SHIFT),
        }),
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
            Some(PointerAction::Move(position))
        }
        MouseEventKind::Up(MouseButton::Left) => Some(PointerAction::Up(position)),
        _ => None,
    }
}
