//! Grid-snapped drag application
//!
//! A drag accumulates a raw hand offset from its origin, optionally locks
//! it to an axis, quantizes the unapplied remainder into whole grid steps,
//! and applies those steps to geometry: selected vertices move in the
//! footprint plane, a hovered face moves its flat floor/ceiling height.

use tracing::debug;

use crate::math::{Vec3, axis_align, snap_steps};
use crate::ui::Widgets;
use crate::world::{Level, FaceKind};
use super::state::HandState;

/// Applies quantized drag offsets to geometry
#[derive(Debug, Clone, Copy)]
pub struct DragController {
    pub grid_snap: f32,
}

impl DragController {
    /// Begin a drag gesture.
    ///
    /// Clicking an unselected vertex (or empty space) resets the selection
    /// to just that vertex (or to nothing); clicking into an existing
    /// selection keeps it so the whole set drags together. A drag over an
    /// empty selection is a legal no-op.
    pub fn start(
        &self,
        world: &mut Level,
        widgets: &mut Widgets,
        state: &mut HandState,
        hand_local: Vec3,
        grid_origin: &mut Vec3,
    ) {
        let keep_selection = state
            .hovered_vertex
            .map(|v| world.is_selected(v))
            .unwrap_or(false);

        if !keep_selection {
            world.deselect_all();
            if let Some(vertex) = state.hovered_vertex {
                world.set_selected(vertex, true);
            }
        }

        state.dragging = true;
        state.dragging_face = state.hovered_face.is_some();
        state.drag_origin = hand_local;
        state.drag_applied = Vec3::ZERO;

        widgets.set_drag_indicator_offset(Vec3::ZERO);

        if let Some(vertex) = state.hovered_vertex {
            if let Some(min_y) = world.min_y(vertex) {
                grid_origin.y = min_y;
            }
        }

        debug!(face = state.dragging_face, "drag started");
    }

    /// Advance the drag with the current hand position.
    ///
    /// Sub-grid movement is a no-op: nothing is applied, dirtied, or
    /// accumulated until the unapplied offset rounds to a whole step.
    pub fn update(
        &self,
        world: &mut Level,
        widgets: &mut Widgets,
        state: &mut HandState,
        hand_local: Vec3,
        axis_align_held: bool,
        grid_origin: &mut Vec3,
    ) {
        grid_origin.x = hand_local.x;
        grid_origin.z = hand_local.z;

        let mut offset = hand_local - state.drag_origin;

        if axis_align_held {
            offset = axis_align(offset);
        }

        let delta = offset - state.drag_applied;
        let mut steps = snap_steps(delta, self.grid_snap);

        // Faces move vertically, vertices horizontally
        if state.dragging_face {
            steps.x = 0;
            steps.z = 0;
        } else {
            steps.y = 0;
        }

        if steps.is_zero() {
            return;
        }

        let step = steps.scale(self.grid_snap);
        state.drag_applied = state.drag_applied + step;
        widgets.set_drag_indicator_offset(-state.drag_applied);

        if state.dragging_face {
            let Some(face) = state.hovered_face else {
                return;
            };
            let applied = match face.kind {
                FaceKind::Floor => world.translate_flat_floor(face.room, step.y),
                FaceKind::Ceiling => world.translate_flat_ceiling(face.room, step.y),
            };
            if applied {
                world.mark_room_dirty(face.room);
            }
        } else {
            // One batch so every selected vertex sees the identical step
            let selected = world.selected_vertices();
            world.apply_move(&selected, step);
        }
    }

    /// End the drag: clear the visual offset and queue the deferred merge
    /// pass for vertices the drag may have stacked on top of each other.
    pub fn finish(&self, world: &mut Level, widgets: &mut Widgets, state: &mut HandState) {
        widgets.set_drag_indicator_offset(Vec3::ZERO);
        world.request_merge_overlapping();
        state.dragging = false;

        debug!("drag finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Face, RoomId, VertexId};

    fn controller() -> DragController {
        DragController { grid_snap: 0.5 }
    }

    fn square_room(level: &mut Level) -> RoomId {
        level.add_room(
            Some(0.0),
            Some(3.0),
            &[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)],
        )
    }

    fn first_corner(level: &Level, room: RoomId) -> VertexId {
        let edges = level.room_edges(room);
        level.half_edges[edges[0]].vertex
    }

    #[test]
    fn test_start_resets_selection_to_hovered() {
        let mut world = Level::new();
        let room = square_room(&mut world);
        let corner = first_corner(&world, room);
        let other = world.create_vertex(9.0, 9.0);
        world.set_selected(other, true);

        let mut widgets = Widgets::new();
        let mut state = HandState::default();
        state.hovered_vertex = Some(corner);

        let mut grid_origin = Vec3::ZERO;
        controller().start(&mut world, &mut widgets, &mut state, Vec3::ZERO, &mut grid_origin);

        assert!(world.is_selected(corner));
        assert!(!world.is_selected(other));
        assert!(state.dragging);
        assert!(!state.dragging_face);
    }

    #[test]
    fn test_start_keeps_existing_selection() {
        let mut world = Level::new();
        let room = square_room(&mut world);
        let corner = first_corner(&world, room);
        let other = world.create_vertex(9.0, 9.0);
        world.set_selected(corner, true);
        world.set_selected(other, true);

        let mut widgets = Widgets::new();
        let mut state = HandState::default();
        state.hovered_vertex = Some(corner);

        let mut grid_origin = Vec3::ZERO;
        controller().start(&mut world, &mut widgets, &mut state, Vec3::ZERO, &mut grid_origin);

        // Dragging into a selected vertex keeps the whole set
        assert!(world.is_selected(corner));
        assert!(world.is_selected(other));
    }

    #[test]
    fn test_subgrid_motion_is_a_noop() {
        let mut world = Level::new();
        let room = square_room(&mut world);
        let corner = first_corner(&world, room);
        world.set_selected(corner, true);

        let mut widgets = Widgets::new();
        let mut state = HandState::default();
        state.hovered_vertex = Some(corner);
        state.action_held = true;

        let c = controller();
        let mut grid_origin = Vec3::ZERO;
        c.start(&mut world, &mut widgets, &mut state, Vec3::ZERO, &mut grid_origin);
        c.update(
            &mut world,
            &mut widgets,
            &mut state,
            Vec3::new(0.1, 0.0, 0.05),
            false,
            &mut grid_origin,
        );

        assert_eq!(state.drag_applied, Vec3::ZERO);
        assert!((world.vertices[corner].x - 0.0).abs() < 0.001);
        assert!(!world.is_room_dirty(room));
        assert_eq!(widgets.drag_indicator_offset(), Vec3::ZERO);
    }

    #[test]
    fn test_vertex_drag_moves_horizontally_only() {
        let mut world = Level::new();
        let room = square_room(&mut world);
        let corner = first_corner(&world, room);

        let mut widgets = Widgets::new();
        let mut state = HandState::default();
        state.hovered_vertex = Some(corner);
        state.action_held = true;

        let c = controller();
        let mut grid_origin = Vec3::ZERO;
        c.start(&mut world, &mut widgets, &mut state, Vec3::ZERO, &mut grid_origin);
        // Quantizes to steps (1, 2, 1); vertex drags zero the Y step
        c.update(
            &mut world,
            &mut widgets,
            &mut state,
            Vec3::new(0.6, 1.1, 0.6),
            false,
            &mut grid_origin,
        );

        assert_eq!(state.drag_applied, Vec3::new(0.5, 0.0, 0.5));
        assert!((world.vertices[corner].x - 0.5).abs() < 0.001);
        assert!((world.vertices[corner].z - 0.5).abs() < 0.001);
        assert!(world.is_room_dirty(room));
        assert_eq!(widgets.drag_indicator_offset(), Vec3::new(-0.5, 0.0, -0.5));
    }

    #[test]
    fn test_face_drag_moves_vertically_only() {
        let mut world = Level::new();
        let room = square_room(&mut world);

        let mut widgets = Widgets::new();
        let mut state = HandState::default();
        state.hovered_face = Some(Face { room, kind: FaceKind::Floor });
        state.action_held = true;

        let c = controller();
        let mut grid_origin = Vec3::ZERO;
        c.start(&mut world, &mut widgets, &mut state, Vec3::ZERO, &mut grid_origin);
        assert!(state.dragging_face);

        c.update(
            &mut world,
            &mut widgets,
            &mut state,
            Vec3::new(0.6, 1.1, 0.6),
            false,
            &mut grid_origin,
        );

        assert_eq!(state.drag_applied, Vec3::new(0.0, 1.0, 0.0));
        assert!((world.flat_floor(room).unwrap() - 1.0).abs() < 0.001);
        assert!(world.is_room_dirty(room));
        // Footprint untouched
        let ((min_x, _), _) = world.room_footprint(room).unwrap();
        assert!((min_x - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_face_drag_without_attribute_skips_silently() {
        let mut world = Level::new();
        let room = world.add_room(Some(0.0), None, &[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0)]);

        let mut widgets = Widgets::new();
        let mut state = HandState::default();
        state.hovered_face = Some(Face { room, kind: FaceKind::Ceiling });
        state.action_held = true;

        let c = controller();
        let mut grid_origin = Vec3::ZERO;
        c.start(&mut world, &mut widgets, &mut state, Vec3::ZERO, &mut grid_origin);
        c.update(
            &mut world,
            &mut widgets,
            &mut state,
            Vec3::new(0.0, 1.0, 0.0),
            false,
            &mut grid_origin,
        );

        assert!(world.flat_ceiling(room).is_none());
        assert!(!world.is_room_dirty(room));
        // The offset still accumulates; only the mutation is skipped
        assert_eq!(state.drag_applied, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_axis_lock_collapses_minor_axis() {
        let mut world = Level::new();
        let room = square_room(&mut world);
        let corner = first_corner(&world, room);

        let mut widgets = Widgets::new();
        let mut state = HandState::default();
        state.hovered_vertex = Some(corner);
        state.action_held = true;

        let c = controller();
        let mut grid_origin = Vec3::ZERO;
        c.start(&mut world, &mut widgets, &mut state, Vec3::ZERO, &mut grid_origin);
        c.update(
            &mut world,
            &mut widgets,
            &mut state,
            Vec3::new(3.0, 0.0, 1.0),
            true,
            &mut grid_origin,
        );

        // X dominates at 3:1, so Z is dropped before quantization
        assert_eq!(state.drag_applied, Vec3::new(3.0, 0.0, 0.0));
        assert!((world.vertices[corner].x - 3.0).abs() < 0.001);
        assert!((world.vertices[corner].z - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_drag_applies_same_step_to_all_selected() {
        let mut world = Level::new();
        let room = square_room(&mut world);
        let edges = world.room_edges(room);
        let a = world.half_edges[edges[0]].vertex;
        let b = world.half_edges[edges[1]].vertex;
        world.set_selected(a, true);
        world.set_selected(b, true);

        let mut widgets = Widgets::new();
        let mut state = HandState::default();
        state.hovered_vertex = Some(a);
        state.action_held = true;

        let c = controller();
        let mut grid_origin = Vec3::ZERO;
        c.start(&mut world, &mut widgets, &mut state, Vec3::ZERO, &mut grid_origin);
        c.update(
            &mut world,
            &mut widgets,
            &mut state,
            Vec3::new(1.0, 0.0, 0.0),
            false,
            &mut grid_origin,
        );

        assert!((world.vertices[a].x - 1.0).abs() < 0.001);
        assert!((world.vertices[b].x - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_finish_requests_merge_once() {
        let mut world = Level::new();
        square_room(&mut world);

        let mut widgets = Widgets::new();
        let mut state = HandState::default();
        state.action_held = true;

        let c = controller();
        let mut grid_origin = Vec3::ZERO;
        c.start(&mut world, &mut widgets, &mut state, Vec3::ZERO, &mut grid_origin);
        c.update(
            &mut world,
            &mut widgets,
            &mut state,
            Vec3::new(1.0, 0.0, 0.0),
            false,
            &mut grid_origin,
        );
        // No merge requested while the drag is live
        assert!(!world.take_merge_request());

        c.finish(&mut world, &mut widgets, &mut state);
        assert!(world.take_merge_request());
        assert!(!state.dragging);
        assert_eq!(widgets.drag_indicator_offset(), Vec3::ZERO);
    }
}
