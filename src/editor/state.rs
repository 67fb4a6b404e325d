//! Per-hand interaction state

use crate::math::Vec3;
use crate::world::{VertexId, HalfEdgeId, Face};

/// Gesture phase of the active hand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Selecting,
    DraggingVertices,
    DraggingFace,
}

/// Everything the tool tracks for the active hand across frames.
///
/// At most one of the three hover fields is set at any time; the hover
/// resolver maintains that invariant.
#[derive(Debug, Clone, Copy, Default)]
pub struct HandState {
    pub hovered_vertex: Option<VertexId>,
    pub hovered_half_edge: Option<HalfEdgeId>,
    pub hovered_face: Option<Face>,
    pub action_held: bool,
    pub dragging: bool,
    pub dragging_face: bool,
    /// Direction of the current multi-select gesture, fixed at gesture start
    pub deselecting: bool,
    /// Hand position when the drag started (level-local)
    pub drag_origin: Vec3,
    /// Offset already applied to geometry during this drag
    pub drag_applied: Vec3,
}

impl HandState {
    pub fn phase(&self) -> DragPhase {
        if !self.action_held {
            DragPhase::Idle
        } else if !self.dragging {
            DragPhase::Selecting
        } else if self.dragging_face {
            DragPhase::DraggingFace
        } else {
            DragPhase::DraggingVertices
        }
    }

    /// How many hover targets are set (0 or 1 when the invariant holds)
    pub fn hover_count(&self) -> usize {
        self.hovered_vertex.is_some() as usize
            + self.hovered_half_edge.is_some() as usize
            + self.hovered_face.is_some() as usize
    }
}
