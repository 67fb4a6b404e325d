//! Multi-select gesture semantics
//!
//! Selection flags live on the vertices in the geometry store; this module
//! only layers the gesture rules on top. A multi-select gesture captures
//! its direction (select vs deselect) from the first hovered vertex and
//! applies that same direction to every vertex hovered while the action
//! stays held, so sweeping over a mixed selection never toggles back.

use crate::world::Level;
use super::state::HandState;

/// Start a multi-select gesture. Captures the gesture direction from the
/// hovered vertex (deselecting when it was already selected) and flips
/// that vertex immediately. Clears the drag flag: selecting never drags.
pub fn begin_select_gesture(world: &mut Level, state: &mut HandState) {
    if let Some(vertex) = state.hovered_vertex {
        state.deselecting = world.is_selected(vertex);
        world.set_selected(vertex, !state.deselecting);
    } else {
        state.deselecting = false;
    }

    state.dragging = false;
}

/// Apply the gesture direction to whatever is hovered this frame
pub fn update_select_gesture(world: &mut Level, state: &HandState) {
    if let Some(vertex) = state.hovered_vertex {
        world.set_selected(vertex, !state.deselecting);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gesture_direction_is_captured_once() {
        let mut world = Level::new();
        let a = world.create_vertex(0.0, 0.0);
        let b = world.create_vertex(1.0, 0.0);
        world.set_selected(b, true);

        let mut state = HandState::default();
        state.hovered_vertex = Some(a);

        begin_select_gesture(&mut world, &mut state);
        assert!(!state.deselecting);
        assert!(world.is_selected(a));

        // b was already selected; the gesture forces it selected anyway
        state.hovered_vertex = Some(b);
        update_select_gesture(&mut world, &state);
        assert!(world.is_selected(b));
    }

    #[test]
    fn test_deselect_gesture_sweeps_off() {
        let mut world = Level::new();
        let a = world.create_vertex(0.0, 0.0);
        let b = world.create_vertex(1.0, 0.0);
        world.set_selected(a, true);

        let mut state = HandState::default();
        state.hovered_vertex = Some(a);

        begin_select_gesture(&mut world, &mut state);
        assert!(state.deselecting);
        assert!(!world.is_selected(a));

        state.hovered_vertex = Some(b);
        update_select_gesture(&mut world, &state);
        assert!(!world.is_selected(b));
    }

    #[test]
    fn test_empty_hover_selects_forward() {
        let mut world = Level::new();
        let mut state = HandState::default();
        state.deselecting = true;
        state.dragging = true;

        begin_select_gesture(&mut world, &mut state);
        assert!(!state.deselecting);
        assert!(!state.dragging);
    }
}
