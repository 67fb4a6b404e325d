//! Spatial queries over the level store
//!
//! All positions here are level-local. Vertices are hoverable along their
//! column (floor clearance up to the highest ceiling of an owning room);
//! half-edge candidates clamp to the owning room's height span; faces clamp
//! the hand to the room footprint at the attribute height.

use crate::math::Vec3;
use super::geometry::{Level, VertexId, HalfEdgeId, RoomId, FaceKind, VirtualVertex};

impl Level {
    /// Nearest real vertex to a point. Marker vertices are skipped.
    pub fn find_closest_vertex(&self, point: Vec3) -> Option<(VertexId, Vec3)> {
        let mut best: Option<(VertexId, Vec3)> = None;
        let mut best_d2 = f32::INFINITY;

        let ids: Vec<VertexId> = self
            .vertices
            .iter()
            .filter(|(_, v)| !v.virtual_marker)
            .map(|(k, _)| k)
            .collect();

        for id in ids {
            let v = &self.vertices[id];
            let top = self.vertex_top_y(id);
            let y = point.y.max(v.min_y).min(top.max(v.min_y));
            let pos = Vec3::new(v.x, y, v.z);

            let d2 = pos.distance_sq(point);
            if d2 < best_d2 {
                best_d2 = d2;
                best = Some((id, pos));
            }
        }

        best
    }

    /// Nearest point on any boundary half-edge, with the would-be insertion
    /// position. When `vertex_candidate` is set the segment parameter is
    /// clamped to the middle half so the insertion point stays off the
    /// endpoints already covered by the vertex query.
    pub fn find_closest_half_edge(
        &self,
        point: Vec3,
        vertex_candidate: bool,
    ) -> Option<(HalfEdgeId, Vec3, VirtualVertex)> {
        let (t_min, t_max) = if vertex_candidate {
            (0.25, 0.75)
        } else {
            (0.0, 1.0)
        };

        let mut best: Option<(HalfEdgeId, Vec3, VirtualVertex)> = None;
        let mut best_d2 = f32::INFINITY;

        for (id, he) in &self.half_edges {
            let Some(next) = self.half_edges.get(he.next) else {
                continue;
            };
            let Some(a) = self.vertices.get(he.vertex) else {
                continue;
            };
            let Some(b) = self.vertices.get(next.vertex) else {
                continue;
            };

            let dx = b.x - a.x;
            let dz = b.z - a.z;
            let len2 = dx * dx + dz * dz;

            let mut t = if len2 <= f32::EPSILON {
                0.5
            } else {
                ((point.x - a.x) * dx + (point.z - a.z) * dz) / len2
            };
            t = t.clamp(t_min, t_max);

            let x = a.x + dx * t;
            let z = a.z + dz * t;

            let (floor, ceiling) = self
                .rooms
                .get(he.room)
                .map(|r| {
                    let floor = r.flat_floor.unwrap_or(0.0);
                    (floor, r.flat_ceiling.unwrap_or(floor))
                })
                .unwrap_or((0.0, 0.0));
            let y = point.y.max(floor).min(ceiling.max(floor));

            let pos = Vec3::new(x, y, z);
            let d2 = pos.distance_sq(point);
            if d2 < best_d2 {
                best_d2 = d2;
                best = Some((id, pos, VirtualVertex { x, z }));
            }
        }

        best
    }

    /// Nearest flat floor or ceiling surface under (or over) a point.
    /// Rooms without the matching attribute contribute no candidate.
    pub fn find_closest_floor_ceiling(
        &self,
        point: Vec3,
    ) -> Option<(RoomId, FaceKind, Vec3)> {
        let mut best: Option<(RoomId, FaceKind, Vec3)> = None;
        let mut best_d2 = f32::INFINITY;

        let rooms: Vec<RoomId> = self.rooms.keys().collect();
        for room in rooms {
            let Some(((min_x, min_z), (max_x, max_z))) = self.room_footprint(room) else {
                continue;
            };
            let x = point.x.clamp(min_x, max_x);
            let z = point.z.clamp(min_z, max_z);

            let r = &self.rooms[room];
            let surfaces = [
                (FaceKind::Floor, r.flat_floor),
                (FaceKind::Ceiling, r.flat_ceiling),
            ];

            for (kind, height) in surfaces {
                let Some(y) = height else {
                    continue;
                };
                let pos = Vec3::new(x, y, z);
                let d2 = pos.distance_sq(point);
                if d2 < best_d2 {
                    best_d2 = d2;
                    best = Some((room, kind, pos));
                }
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_room(level: &mut Level) -> RoomId {
        level.add_room(
            Some(0.0),
            Some(3.0),
            &[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)],
        )
    }

    #[test]
    fn test_closest_vertex_clamps_to_column() {
        let mut level = Level::new();
        square_room(&mut level);

        // Hand partway up the corner column: distance is horizontal only
        let (id, pos) = level
            .find_closest_vertex(Vec3::new(0.2, 1.5, 0.1))
            .unwrap();
        assert!((pos.x - 0.0).abs() < 0.001);
        assert!((pos.y - 1.5).abs() < 0.001);
        assert!((pos.z - 0.0).abs() < 0.001);
        assert!(level.contains_vertex(id));

        // Above the ceiling the column is capped
        let (_, pos) = level
            .find_closest_vertex(Vec3::new(0.0, 5.0, 0.0))
            .unwrap();
        assert!((pos.y - 3.0).abs() < 0.001);
    }

    #[test]
    fn test_closest_vertex_skips_markers() {
        let mut level = Level::new();
        square_room(&mut level);
        let marker = level.create_vertex(0.01, 0.01);
        level.set_virtual_marker(marker, true);

        let (id, _) = level
            .find_closest_vertex(Vec3::new(0.01, 0.0, 0.01))
            .unwrap();
        assert_ne!(id, marker);
    }

    #[test]
    fn test_closest_half_edge_midspan() {
        let mut level = Level::new();
        square_room(&mut level);

        let (_, pos, virtual_vertex) = level
            .find_closest_half_edge(Vec3::new(2.0, 1.0, 0.2), false)
            .unwrap();
        assert!((pos.x - 2.0).abs() < 0.001);
        assert!((pos.y - 1.0).abs() < 0.001);
        assert!((pos.z - 0.0).abs() < 0.001);
        assert!((virtual_vertex.x - 2.0).abs() < 0.001);
        assert!((virtual_vertex.z - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_closest_half_edge_biased_off_endpoints() {
        let mut level = Level::new();
        square_room(&mut level);

        // Near a corner: unbiased lands at the endpoint, biased stays at
        // a quarter of the 4-unit edge
        let hand = Vec3::new(0.1, 0.0, 0.0);
        let (_, pos, _) = level.find_closest_half_edge(hand, false).unwrap();
        assert!((pos.x - 0.1).abs() < 0.001);

        let (_, pos, _) = level.find_closest_half_edge(hand, true).unwrap();
        assert!((pos.x - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_closest_face_prefers_nearer_surface() {
        let mut level = Level::new();
        let room = square_room(&mut level);

        let (hit_room, kind, pos) = level
            .find_closest_floor_ceiling(Vec3::new(2.0, 0.4, 2.0))
            .unwrap();
        assert_eq!(hit_room, room);
        assert_eq!(kind, FaceKind::Floor);
        assert!((pos.y - 0.0).abs() < 0.001);

        let (_, kind, pos) = level
            .find_closest_floor_ceiling(Vec3::new(2.0, 2.8, 2.0))
            .unwrap();
        assert_eq!(kind, FaceKind::Ceiling);
        assert!((pos.y - 3.0).abs() < 0.001);
    }

    #[test]
    fn test_closest_face_clamps_to_footprint() {
        let mut level = Level::new();
        square_room(&mut level);

        let (_, _, pos) = level
            .find_closest_floor_ceiling(Vec3::new(5.0, 0.2, -1.0))
            .unwrap();
        assert!((pos.x - 4.0).abs() < 0.001);
        assert!((pos.z - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_no_face_candidates_without_attributes() {
        let mut level = Level::new();
        level.add_room(None, None, &[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0)]);
        assert!(level
            .find_closest_floor_ceiling(Vec3::new(1.0, 0.0, 1.0))
            .is_none());
    }
}
