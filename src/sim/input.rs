//! Pointer drag handling
//!
//! At most one item is held at a time. While held it ignores the belt and
//! follows the pointer; releasing it hands over to the scoring rules.

use glam::Vec2;

use super::rules::{self, Outcome};
use super::state::{Drag, GameState};
use crate::audio::SoundCue;

/// A pointer (touch or mouse) event in play-field coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Vec2),
    Move(Vec2),
    Up,
}

/// Dispatch a pointer event. Ignored while no session is active.
pub fn handle_pointer(state: &mut GameState, event: PointerEvent) -> Option<Outcome> {
    if !state.is_active() {
        return None;
    }
    match event {
        PointerEvent::Down(p) => {
            pointer_down(state, p);
            None
        }
        PointerEvent::Move(p) => {
            pointer_move(state, p);
            None
        }
        PointerEvent::Up => pointer_up(state),
    }
}

/// Pick up the first item (in draw order) under the pointer
pub fn pointer_down(state: &mut GameState, p: Vec2) -> Option<u32> {
    if state.drag.is_some() {
        return None;
    }

    let item = state.items.iter_mut().find(|item| item.contains_point(p))?;
    item.dragging = true;
    let drag = Drag {
        item_id: item.id,
        offset: p - item.pos,
    };
    state.drag = Some(drag);
    state.play(SoundCue::Click);
    Some(drag.item_id)
}

/// Move the held item with the pointer
pub fn pointer_move(state: &mut GameState, p: Vec2) {
    let Some(drag) = state.drag else { return };
    if let Some(item) = state.items.iter_mut().find(|i| i.id == drag.item_id) {
        item.pos = p - drag.offset;
    }
}

/// Release the held item
pub fn pointer_up(state: &mut GameState) -> Option<Outcome> {
    let drag = state.drag.take()?;
    rules::release_item(state, drag.item_id)
}
