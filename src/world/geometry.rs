//! Half-edge level geometry store
//!
//! Rooms own a loop of directed half-edges over shared corner vertices.
//! Handles are generational slotmap keys: a stale handle fails its lookup
//! and callers degrade to "nothing hovered" instead of panicking.

use std::collections::HashSet;
use slotmap::SlotMap;
use crate::math::Vec3;

slotmap::new_key_type! {
    /// Handle to a corner vertex in the level store.
    pub struct VertexId;

    /// Handle to a directed boundary half-edge.
    pub struct HalfEdgeId;

    /// Handle to a room.
    pub struct RoomId;
}

/// Which horizontal surface of a room a hover refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceKind {
    Floor,
    Ceiling,
}

/// Transient descriptor of a hoverable floor/ceiling surface.
/// Not a stored entity; equality is structural (room + kind).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Face {
    pub room: RoomId,
    pub kind: FaceKind,
}

/// Candidate insertion position on a hovered half-edge, before grid rounding
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualVertex {
    pub x: f32,
    pub z: f32,
}

/// A corner shared by one or more room boundaries
#[derive(Debug, Clone)]
pub struct Vertex {
    /// Footprint position in level-local space
    pub x: f32,
    pub z: f32,
    /// Lowest flat-floor height among rooms using this vertex
    pub min_y: f32,
    pub hovered: bool,
    pub selected: bool,
    pub visible: bool,
    /// Marker vertices (the edge-insertion widget) are skipped by queries
    pub virtual_marker: bool,
}

/// Directed edge along a room boundary
#[derive(Debug, Clone)]
pub struct HalfEdge {
    /// Origin vertex
    pub vertex: VertexId,
    /// Next edge around the boundary loop
    pub next: HalfEdgeId,
    /// Owning room
    pub room: RoomId,
}

/// A room: a boundary loop plus optional flat floor/ceiling heights
#[derive(Debug, Clone)]
pub struct Room {
    /// Entry into the boundary loop
    pub first_edge: Option<HalfEdgeId>,
    pub flat_floor: Option<f32>,
    pub flat_ceiling: Option<f32>,
    /// Mesh needs regeneration (consumed by the host)
    pub dirty: bool,
}

/// The level: vertex/half-edge/room arenas plus a world-space offset
pub struct Level {
    /// Level-local origin in world space
    pub position: Vec3,
    pub(crate) vertices: SlotMap<VertexId, Vertex>,
    pub(crate) half_edges: SlotMap<HalfEdgeId, HalfEdge>,
    pub(crate) rooms: SlotMap<RoomId, Room>,
    merge_requested: bool,
}

impl Level {
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            vertices: SlotMap::with_key(),
            half_edges: SlotMap::with_key(),
            rooms: SlotMap::with_key(),
            merge_requested: false,
        }
    }

    /// World space -> level-local space
    pub fn to_local(&self, world: Vec3) -> Vec3 {
        world - self.position
    }

    /// Level-local space -> world space
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        local + self.position
    }

    // --- Rooms ---

    /// Add a room from an XZ footprint polygon, building its boundary loop.
    /// Vertices are created in order; edge i runs from corner i to corner i+1.
    pub fn add_room(
        &mut self,
        flat_floor: Option<f32>,
        flat_ceiling: Option<f32>,
        footprint: &[(f32, f32)],
    ) -> RoomId {
        let room = self.rooms.insert(Room {
            first_edge: None,
            flat_floor,
            flat_ceiling,
            dirty: false,
        });

        let corners: Vec<VertexId> = footprint
            .iter()
            .map(|&(x, z)| self.create_vertex(x, z))
            .collect();

        // Edges first with self-referencing next, then wire the loop
        let edges: Vec<HalfEdgeId> = corners
            .iter()
            .map(|&v| {
                self.half_edges.insert_with_key(|k| HalfEdge {
                    vertex: v,
                    next: k,
                    room,
                })
            })
            .collect();

        for (i, &e) in edges.iter().enumerate() {
            self.half_edges[e].next = edges[(i + 1) % edges.len()];
        }

        self.rooms[room].first_edge = edges.first().copied();

        for &v in &corners {
            self.recompute_min_y(v);
        }

        room
    }

    pub fn contains_room(&self, room: RoomId) -> bool {
        self.rooms.contains_key(room)
    }

    /// Walk the boundary loop of a room. Guards against broken loops by
    /// capping the walk at the edge count.
    pub fn room_edges(&self, room: RoomId) -> Vec<HalfEdgeId> {
        let mut out = Vec::new();

        let Some(r) = self.rooms.get(room) else {
            return out;
        };
        let Some(first) = r.first_edge else {
            return out;
        };

        let mut current = first;
        for _ in 0..self.half_edges.len() {
            out.push(current);
            let Some(he) = self.half_edges.get(current) else {
                break;
            };
            current = he.next;
            if current == first {
                break;
            }
        }

        out
    }

    /// XZ bounding rectangle of a room's boundary, as (min, max) pairs
    pub fn room_footprint(&self, room: RoomId) -> Option<((f32, f32), (f32, f32))> {
        let mut min = (f32::MAX, f32::MAX);
        let mut max = (f32::MIN, f32::MIN);
        let mut any = false;

        for e in self.room_edges(room) {
            let Some(he) = self.half_edges.get(e) else {
                continue;
            };
            let Some(v) = self.vertices.get(he.vertex) else {
                continue;
            };
            min.0 = min.0.min(v.x);
            min.1 = min.1.min(v.z);
            max.0 = max.0.max(v.x);
            max.1 = max.1.max(v.z);
            any = true;
        }

        if any {
            Some((min, max))
        } else {
            None
        }
    }

    pub fn flat_floor(&self, room: RoomId) -> Option<f32> {
        self.rooms.get(room).and_then(|r| r.flat_floor)
    }

    pub fn flat_ceiling(&self, room: RoomId) -> Option<f32> {
        self.rooms.get(room).and_then(|r| r.flat_ceiling)
    }

    /// Raise or lower a flat floor. Returns false when the room is missing
    /// or has no flat floor; nothing is modified in that case.
    pub fn translate_flat_floor(&mut self, room: RoomId, dy: f32) -> bool {
        let Some(r) = self.rooms.get_mut(room) else {
            return false;
        };
        let Some(floor) = r.flat_floor.as_mut() else {
            return false;
        };
        *floor += dy;

        // Floor clearance of every corner may have changed
        let corners: Vec<VertexId> = self
            .room_edges(room)
            .iter()
            .filter_map(|&e| self.half_edges.get(e).map(|he| he.vertex))
            .collect();
        for v in corners {
            self.recompute_min_y(v);
        }

        true
    }

    /// Raise or lower a flat ceiling. Same skip rules as floors.
    pub fn translate_flat_ceiling(&mut self, room: RoomId, dy: f32) -> bool {
        let Some(r) = self.rooms.get_mut(room) else {
            return false;
        };
        let Some(ceiling) = r.flat_ceiling.as_mut() else {
            return false;
        };
        *ceiling += dy;
        true
    }

    pub fn mark_room_dirty(&mut self, room: RoomId) {
        if let Some(r) = self.rooms.get_mut(room) {
            r.dirty = true;
        }
    }

    pub fn is_room_dirty(&self, room: RoomId) -> bool {
        self.rooms.get(room).map(|r| r.dirty).unwrap_or(false)
    }

    // --- Vertices ---

    pub fn create_vertex(&mut self, x: f32, z: f32) -> VertexId {
        self.vertices.insert(Vertex {
            x,
            z,
            min_y: 0.0,
            hovered: false,
            selected: false,
            visible: true,
            virtual_marker: false,
        })
    }

    pub fn destroy_vertex(&mut self, vertex: VertexId) {
        self.vertices.remove(vertex);
    }

    pub fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.vertices.contains_key(vertex)
    }

    pub fn contains_half_edge(&self, edge: HalfEdgeId) -> bool {
        self.half_edges.contains_key(edge)
    }

    pub fn vertex_position(&self, vertex: VertexId) -> Option<(f32, f32)> {
        self.vertices.get(vertex).map(|v| (v.x, v.z))
    }

    pub fn set_vertex_position(&mut self, vertex: VertexId, x: f32, z: f32) {
        if let Some(v) = self.vertices.get_mut(vertex) {
            v.x = x;
            v.z = z;
        }
    }

    pub fn min_y(&self, vertex: VertexId) -> Option<f32> {
        self.vertices.get(vertex).map(|v| v.min_y)
    }

    /// Top of the hoverable column for a vertex: highest flat ceiling among
    /// rooms using it, or the floor clearance when none have one.
    pub fn vertex_top_y(&self, vertex: VertexId) -> f32 {
        let base = self.min_y(vertex).unwrap_or(0.0);
        let mut top = f32::MIN;

        for he in self.half_edges.values() {
            if he.vertex != vertex {
                continue;
            }
            if let Some(room) = self.rooms.get(he.room) {
                if let Some(ceiling) = room.flat_ceiling {
                    top = top.max(ceiling);
                }
            }
        }

        if top == f32::MIN {
            base
        } else {
            top.max(base)
        }
    }

    pub(crate) fn recompute_min_y(&mut self, vertex: VertexId) {
        let mut min = f32::INFINITY;

        for he in self.half_edges.values() {
            if he.vertex != vertex {
                continue;
            }
            if let Some(room) = self.rooms.get(he.room) {
                if let Some(floor) = room.flat_floor {
                    min = min.min(floor);
                }
            }
        }

        if let Some(v) = self.vertices.get_mut(vertex) {
            v.min_y = if min.is_finite() { min } else { 0.0 };
        }
    }

    // --- Flags ---

    pub fn set_hovered(&mut self, vertex: VertexId, hovered: bool) {
        if let Some(v) = self.vertices.get_mut(vertex) {
            v.hovered = hovered;
        }
    }

    pub fn is_hovered(&self, vertex: VertexId) -> bool {
        self.vertices.get(vertex).map(|v| v.hovered).unwrap_or(false)
    }

    pub fn set_visible(&mut self, vertex: VertexId, visible: bool) {
        if let Some(v) = self.vertices.get_mut(vertex) {
            v.visible = visible;
        }
    }

    pub fn is_visible(&self, vertex: VertexId) -> bool {
        self.vertices.get(vertex).map(|v| v.visible).unwrap_or(false)
    }

    pub fn set_virtual_marker(&mut self, vertex: VertexId, marker: bool) {
        if let Some(v) = self.vertices.get_mut(vertex) {
            v.virtual_marker = marker;
        }
    }

    pub fn set_selected(&mut self, vertex: VertexId, selected: bool) {
        if let Some(v) = self.vertices.get_mut(vertex) {
            v.selected = selected;
        }
    }

    pub fn is_selected(&self, vertex: VertexId) -> bool {
        self.vertices.get(vertex).map(|v| v.selected).unwrap_or(false)
    }

    pub fn deselect_all(&mut self) {
        for v in self.vertices.values_mut() {
            v.selected = false;
        }
    }

    /// Handles of all selected (real) vertices, in arena order
    pub fn selected_vertices(&self) -> Vec<VertexId> {
        self.vertices
            .iter()
            .filter(|(_, v)| v.selected && !v.virtual_marker)
            .map(|(k, _)| k)
            .collect()
    }

    // --- Topology edits ---

    /// Splice a vertex into a half-edge: the edge now ends at `vertex` and a
    /// new half-edge continues from there to the old endpoint.
    /// Returns the new half-edge, or None when a handle is stale.
    pub fn insert_vertex_into_half_edge(
        &mut self,
        edge: HalfEdgeId,
        vertex: VertexId,
    ) -> Option<HalfEdgeId> {
        if !self.vertices.contains_key(vertex) {
            return None;
        }
        let (old_next, room) = {
            let he = self.half_edges.get(edge)?;
            (he.next, he.room)
        };

        let new_edge = self.half_edges.insert(HalfEdge {
            vertex,
            next: old_next,
            room,
        });
        self.half_edges[edge].next = new_edge;

        self.recompute_min_y(vertex);
        Some(new_edge)
    }

    /// Move a batch of vertices by an XZ offset in one commit: the valid
    /// handle set is resolved before any position changes, so every
    /// surviving vertex sees the identical step.
    pub fn apply_move(&mut self, handles: &[VertexId], offset: Vec3) {
        let valid: Vec<VertexId> = handles
            .iter()
            .copied()
            .filter(|&h| self.vertices.contains_key(h))
            .collect();

        for &h in &valid {
            let v = &mut self.vertices[h];
            v.x += offset.x;
            v.z += offset.z;
        }

        // Every room touching a moved vertex needs its mesh rebuilt
        let moved: HashSet<VertexId> = valid.into_iter().collect();
        let rooms: Vec<RoomId> = self
            .half_edges
            .values()
            .filter(|he| moved.contains(&he.vertex))
            .map(|he| he.room)
            .collect();
        for room in rooms {
            self.mark_room_dirty(room);
        }
    }

    // --- Deferred merge pass ---

    /// Request a merge of overlapping vertices. Deferred and idempotent;
    /// the host decides when to run [`Level::merge_overlapping`].
    pub fn request_merge_overlapping(&mut self) {
        self.merge_requested = true;
    }

    pub fn take_merge_request(&mut self) -> bool {
        std::mem::replace(&mut self.merge_requested, false)
    }

    /// Collapse vertices closer than `epsilon` in the footprint plane onto
    /// the earliest survivor, re-pointing half-edges and dropping the
    /// zero-length edges that result. Hover/selection flags carry over.
    pub fn merge_overlapping(&mut self, epsilon: f32) {
        let eps2 = epsilon * epsilon;

        let ids: Vec<VertexId> = self
            .vertices
            .iter()
            .filter(|(_, v)| !v.virtual_marker)
            .map(|(k, _)| k)
            .collect();

        let mut replaced: Vec<(VertexId, VertexId)> = Vec::new();
        for (i, &a) in ids.iter().enumerate() {
            if replaced.iter().any(|&(dup, _)| dup == a) {
                continue;
            }
            let (ax, az) = (self.vertices[a].x, self.vertices[a].z);
            for &b in &ids[i + 1..] {
                if replaced.iter().any(|&(dup, _)| dup == b) {
                    continue;
                }
                let (bx, bz) = (self.vertices[b].x, self.vertices[b].z);
                let d2 = (ax - bx) * (ax - bx) + (az - bz) * (az - bz);
                if d2 <= eps2 {
                    replaced.push((b, a));
                }
            }
        }

        if replaced.is_empty() {
            return;
        }

        for &(dup, survivor) in &replaced {
            let (selected, hovered) = {
                let v = &self.vertices[dup];
                (v.selected, v.hovered)
            };
            {
                let s = &mut self.vertices[survivor];
                s.selected |= selected;
                s.hovered |= hovered;
            }

            for he in self.half_edges.values_mut() {
                if he.vertex == dup {
                    he.vertex = survivor;
                }
            }

            self.vertices.remove(dup);
        }

        self.remove_degenerate_edges();

        for &(_, survivor) in &replaced {
            self.recompute_min_y(survivor);
        }
    }

    /// Unlink zero-length half-edges (origin equals the next edge's origin)
    fn remove_degenerate_edges(&mut self) {
        loop {
            let mut victim = None;

            for (id, he) in &self.half_edges {
                if he.next == id {
                    continue;
                }
                if let Some(next) = self.half_edges.get(he.next) {
                    if next.vertex == he.vertex {
                        victim = Some((id, he.next, he.room));
                        break;
                    }
                }
            }

            let Some((id, next_id, room)) = victim else {
                break;
            };

            let pred = self
                .half_edges
                .iter()
                .find(|(_, p)| p.next == id)
                .map(|(pid, _)| pid);
            if let Some(pid) = pred {
                self.half_edges[pid].next = next_id;
            }

            if let Some(r) = self.rooms.get_mut(room) {
                if r.first_edge == Some(id) {
                    r.first_edge = Some(next_id);
                }
                r.dirty = true;
            }

            self.half_edges.remove(id);
        }
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::new()
    }
}
