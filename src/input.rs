//! Adapter from terminal mouse/key events to abstract pointer inputs.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

use crate::geometry::{Point, Size};

/// Host-agnostic pointer input consumed by
/// [`DashboardEngine::handle_pointer`](crate::engine::DashboardEngine::handle_pointer).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    Down(Point),
    Move(Point),
    Up(Point),
    Cancel,
}

/// Map a crossterm mouse event; `cell` is the layout size of one terminal
/// cell. Only the primary button participates in drags.
pub fn pointer_from_mouse(event: &MouseEvent, cell: Size) -> Option<PointerInput> {
    let point = Point::new(
        f32::from(event.column) * cell.width,
        f32::from(event.row) * cell.height,
    );
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(PointerInput::Down(point)),
        MouseEventKind::Drag(MouseButton::Left) => Some(PointerInput::Move(point)),
        MouseEventKind::Up(MouseButton::Left) => Some(PointerInput::Up(point)),
        _ => None,
    }
}

/// Escape cancels an in-flight drag.
pub fn pointer_from_key(event: &KeyEvent) -> Option<PointerInput> {
    match (event.code, event.kind) {
        (KeyCode::Esc, KeyEventKind::Press) => Some(PointerInput::Cancel),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn left_button_maps_to_pointer_lifecycle() {
        let cell = Size::new(8.0, 16.0);
        assert_eq!(
            pointer_from_mouse(&mouse(MouseEventKind::Down(MouseButton::Left), 2, 3), cell),
            Some(PointerInput::Down(Point::new(16.0, 48.0)))
        );
        assert_eq!(
            pointer_from_mouse(&mouse(MouseEventKind::Drag(MouseButton::Left), 4, 3), cell),
            Some(PointerInput::Move(Point::new(32.0, 48.0)))
        );
        assert!(matches!(
            pointer_from_mouse(&mouse(MouseEventKind::Up(MouseButton::Left), 4, 3), cell),
            Some(PointerInput::Up(_))
        ));
    }

    #[test]
    fn other_buttons_and_scroll_are_ignored() {
        let cell = Size::new(1.0, 1.0);
        assert_eq!(
            pointer_from_mouse(&mouse(MouseEventKind::Down(MouseButton::Right), 0, 0), cell),
            None
        );
        assert_eq!(
            pointer_from_mouse(&mouse(MouseEventKind::ScrollDown, 0, 0), cell),
            None
        );
    }

    #[test]
    fn escape_cancels() {
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(pointer_from_key(&esc), Some(PointerInput::Cancel));
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(pointer_from_key(&enter), None);
    }
}
