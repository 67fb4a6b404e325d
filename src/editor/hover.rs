//! Hover resolution
//!
//! Each frame the hand position is matched against three competing target
//! kinds: the nearest vertex column, the nearest edge-insertion point, and
//! the nearest flat floor/ceiling. At most one survives. The resolver also
//! owns the hover side effects: vertex hover flags, the edge-insertion
//! marker, the extrude widget, and the haptic pulse on change.

use tracing::debug;

use crate::math::Vec3;
use crate::ui::Widgets;
use crate::world::{Level, VertexId, Face};
use super::state::HandState;

/// Resolves the hand position to at most one hovered target per frame
#[derive(Debug, Clone, Copy)]
pub struct HoverResolver {
    pub interact_radius: f32,
    pub haptic_pulse_micros: u16,
}

impl HoverResolver {
    /// Run one hover pass.
    ///
    /// Returns the level-local hand position when a pointer is available
    /// (hover may or may not have changed), or None when tracking is lost.
    /// While a drag is held the previous hover is kept untouched so the
    /// gesture target stays stable.
    pub fn resolve(
        &self,
        world: &mut Level,
        widgets: &mut Widgets,
        state: &mut HandState,
        marker: Option<VertexId>,
        grid_origin: &mut Vec3,
        pointer: Option<Vec3>,
    ) -> Option<Vec3> {
        // Hovered handles can go stale if geometry was edited externally;
        // treat them as nothing hovered.
        if let Some(v) = state.hovered_vertex {
            if !world.contains_vertex(v) {
                state.hovered_vertex = None;
            }
        }
        if let Some(e) = state.hovered_half_edge {
            if !world.contains_half_edge(e) {
                state.hovered_half_edge = None;
            }
        }
        if let Some(f) = state.hovered_face {
            if !world.contains_room(f.room) {
                state.hovered_face = None;
            }
        }

        let Some(hand_world) = pointer else {
            if let Some(v) = state.hovered_vertex.take() {
                world.set_hovered(v, false);
            }
            return None;
        };

        let hand_local = world.to_local(hand_world);

        if state.action_held && state.dragging {
            return Some(hand_local);
        }

        let interact_dist2 = self.interact_radius * self.interact_radius;

        // Vertex candidate
        let mut new_vertex: Option<VertexId> = None;
        let mut vertex_dist2 = f32::INFINITY;
        let mut vertex_world = Vec3::ZERO;

        if let Some((id, pos)) = world.find_closest_vertex(hand_local) {
            let world_pos = world.to_world(pos);
            let dist2 = world_pos.distance_sq(hand_world);
            if dist2 <= interact_dist2 {
                new_vertex = Some(id);
                vertex_dist2 = dist2;
                vertex_world = world_pos;
            }
        }

        // Edge-insertion candidate; never while the action is held
        let mut new_half_edge = None;
        let mut edge_dist2 = f32::INFINITY;

        if !state.action_held {
            if let Some((id, pos, virtual_vertex)) =
                world.find_closest_half_edge(hand_local, new_vertex.is_some())
            {
                let world_pos = world.to_world(pos);
                let mut dist2 = world_pos.distance_sq(hand_world);

                // An edge point essentially colocated with the hovered
                // vertex must not compete with it
                if new_vertex.is_some()
                    && world_pos.distance_sq(vertex_world) > interact_dist2
                {
                    dist2 = f32::INFINITY;
                }

                if dist2 <= interact_dist2 && dist2 <= vertex_dist2 {
                    new_vertex = None;
                    new_half_edge = Some(id);
                    edge_dist2 = dist2;

                    if let Some(m) = marker {
                        world.set_vertex_position(m, virtual_vertex.x, virtual_vertex.z);
                    }
                }
            }
        }

        // Floor/ceiling candidate; must beat both others strictly
        let mut new_face: Option<Face> = None;

        if !state.action_held {
            if let Some((room, kind, pos)) = world.find_closest_floor_ceiling(hand_local) {
                let world_pos = world.to_world(pos);
                let dist2 = world_pos.distance_sq(hand_world);

                if dist2 <= interact_dist2 && dist2 < vertex_dist2 && dist2 < edge_dist2 {
                    new_vertex = None;
                    new_half_edge = None;
                    new_face = Some(Face { room, kind });

                    widgets.set_extrude_widget_position(world_pos);
                    grid_origin.y = pos.y;
                }
            }
        }

        if state.hovered_vertex == new_vertex
            && state.hovered_half_edge == new_half_edge
            && state.hovered_face == new_face
        {
            return Some(hand_local);
        }

        widgets.trigger_haptic_pulse(self.haptic_pulse_micros);
        debug!(
            vertex = new_vertex.is_some(),
            half_edge = new_half_edge.is_some(),
            face = new_face.is_some(),
            "hover changed"
        );

        if state.hovered_vertex != new_vertex {
            if let Some(old) = state.hovered_vertex {
                world.set_hovered(old, false);
            }
            if let Some(new) = new_vertex {
                world.set_hovered(new, true);
            }
            state.hovered_vertex = new_vertex;
        }

        if state.hovered_half_edge != new_half_edge {
            if let Some(m) = marker {
                world.set_visible(m, new_half_edge.is_some());
            }
            state.hovered_half_edge = new_half_edge;
        }

        if state.hovered_face != new_face {
            widgets.set_extrude_widget_visible(new_face.is_some());
            state.hovered_face = new_face;
        }

        Some(hand_local)
    }
}
