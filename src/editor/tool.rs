//! The vertex edit tool and its per-frame session glue
//!
//! `VertexEditTool` binds the hover resolver, selection gestures and drag
//! controller into the button protocol: action-down starts a select or
//! drag gesture (materializing an edge-insertion vertex first if one is
//! hovered), action-held advances it, action-up completes it.

use tracing::info;

use crate::config::ToolConfig;
use crate::math::{Vec3, round_to_grid};
use crate::ui::{HandFrame, Widgets};
use crate::world::{Level, VertexId};
use super::drag::DragController;
use super::hover::HoverResolver;
use super::selection::{begin_select_gesture, update_select_gesture};
use super::state::HandState;

/// Editor tool lifecycle. Tools are activated against a level, updated
/// once per frame per active hand, and deactivated when the user switches
/// away. Two-handed use is opt-in and off by default.
pub trait Tool {
    fn id(&self) -> &'static str;
    fn label(&self) -> &'static str;

    fn allow_two_handed(&self) -> bool {
        false
    }

    /// Whether the snap grid should be drawn this frame
    fn show_grid(&self) -> bool {
        false
    }

    /// Level-local anchor for the snap grid
    fn grid_origin(&self) -> Vec3 {
        Vec3::ZERO
    }

    fn on_selected(&mut self, _world: &mut Level) {}
    fn on_deselected(&mut self, _world: &mut Level) {}

    fn update(&mut self, world: &mut Level, widgets: &mut Widgets, hand: &HandFrame);
}

/// Hover, select and drag vertices, edge-insertion points and flat faces
pub struct VertexEditTool {
    state: HandState,
    hover: HoverResolver,
    drag: DragController,
    /// Widget vertex showing the candidate edge-insertion position.
    /// Owned by the tool, not part of the level geometry.
    marker: Option<VertexId>,
    grid_origin: Vec3,
}

impl VertexEditTool {
    pub fn new(config: &ToolConfig) -> Self {
        Self {
            state: HandState::default(),
            hover: HoverResolver {
                interact_radius: config.interact_radius,
                haptic_pulse_micros: config.haptic_pulse_micros,
            },
            drag: DragController {
                grid_snap: config.grid_snap,
            },
            marker: None,
            grid_origin: Vec3::ZERO,
        }
    }

    pub fn state(&self) -> &HandState {
        &self.state
    }

    pub fn marker(&self) -> Option<VertexId> {
        self.marker
    }

    /// Turn the hovered edge-insertion point into a real vertex: grid-round
    /// the marker position per axis, splice it into the hovered half-edge,
    /// and hover it in place of the edge.
    fn materialize_edge_vertex(&mut self, world: &mut Level) {
        let Some(edge) = self.state.hovered_half_edge else {
            return;
        };
        let Some(marker) = self.marker else {
            return;
        };
        let Some((x, z)) = world.vertex_position(marker) else {
            return;
        };

        let grid = self.drag.grid_snap;
        let vertex = world.create_vertex(round_to_grid(x, grid), round_to_grid(z, grid));

        world.insert_vertex_into_half_edge(edge, vertex);
        world.set_hovered(vertex, true);

        self.state.hovered_vertex = Some(vertex);
        self.state.hovered_half_edge = None;
    }

    fn update_interact(
        &mut self,
        world: &mut Level,
        widgets: &mut Widgets,
        hand: &HandFrame,
        hand_local: Vec3,
    ) {
        if hand.action_pressed {
            self.state.action_held = true;

            if self.state.hovered_half_edge.is_some() {
                self.materialize_edge_vertex(world);
            }

            if hand.multi_select_down {
                begin_select_gesture(world, &mut self.state);
            } else {
                self.drag.start(
                    world,
                    widgets,
                    &mut self.state,
                    hand_local,
                    &mut self.grid_origin,
                );
            }
        } else if self.state.action_held && hand.action_down {
            if self.state.dragging {
                self.drag.update(
                    world,
                    widgets,
                    &mut self.state,
                    hand_local,
                    hand.axis_align_down,
                    &mut self.grid_origin,
                );
                return;
            }

            update_select_gesture(world, &self.state);
        }

        if self.state.action_held && hand.action_released {
            self.state.action_held = false;

            if self.state.dragging {
                self.drag.finish(world, widgets, &mut self.state);
            }
        }
    }

    fn reset_state(&mut self, world: &mut Level) {
        if let Some(vertex) = self.state.hovered_vertex.take() {
            world.set_hovered(vertex, false);
        }
        self.state.dragging = false;
    }
}

impl Tool for VertexEditTool {
    fn id(&self) -> &'static str {
        "vertex_edit"
    }

    fn label(&self) -> &'static str {
        "Vertex Edit"
    }

    fn show_grid(&self) -> bool {
        self.state.action_held && self.state.dragging
    }

    fn grid_origin(&self) -> Vec3 {
        self.grid_origin
    }

    fn on_selected(&mut self, world: &mut Level) {
        if self.marker.is_none() {
            let marker = world.create_vertex(0.0, 0.0);
            world.set_virtual_marker(marker, true);
            world.set_hovered(marker, true);
            world.set_visible(marker, false);
            self.marker = Some(marker);
        }

        info!(tool = self.id(), "tool selected");
    }

    fn on_deselected(&mut self, world: &mut Level) {
        self.reset_state(world);

        if let Some(marker) = self.marker.take() {
            world.destroy_vertex(marker);
        }

        info!(tool = self.id(), "tool deselected");
    }

    fn update(&mut self, world: &mut Level, widgets: &mut Widgets, hand: &HandFrame) {
        let resolved = self.hover.resolve(
            world,
            widgets,
            &mut self.state,
            self.marker,
            &mut self.grid_origin,
            hand.pointer,
        );

        if let Some(hand_local) = resolved {
            self.update_interact(world, widgets, hand, hand_local);
        }

        widgets.set_grid_visible(self.show_grid());
        widgets.set_grid_origin(world.to_world(self.grid_origin));
    }
}

/// Per-frame orchestrator: owns the level, the widget state and the active
/// tool, and runs one interaction pass per tick for the single active hand.
pub struct EditSession {
    pub world: Level,
    pub widgets: Widgets,
    tool: VertexEditTool,
    merge_epsilon: f32,
}

impl EditSession {
    /// Create a session and activate the tool against the level
    pub fn new(mut world: Level, config: &ToolConfig) -> Self {
        let mut tool = VertexEditTool::new(config);
        tool.on_selected(&mut world);

        Self {
            world,
            widgets: Widgets::new(),
            tool,
            merge_epsilon: config.merge_epsilon,
        }
    }

    pub fn tool(&self) -> &VertexEditTool {
        &self.tool
    }

    /// One frame of interaction for the active hand
    pub fn tick(&mut self, hand: &HandFrame) {
        self.tool.update(&mut self.world, &mut self.widgets, hand);
    }

    /// Deactivate the tool, clearing hover state and the marker without
    /// requesting a merge pass.
    pub fn deactivate_tool(&mut self) {
        self.tool.on_deselected(&mut self.world);
    }

    /// Run the merge pass if a completed gesture requested one.
    /// Returns whether a pass ran.
    pub fn run_pending_merge(&mut self) -> bool {
        if !self.world.take_merge_request() {
            return false;
        }
        self.world.merge_overlapping(self.merge_epsilon);
        true
    }

    /// Haptic pulse queued this tick, if any (drained by the host)
    pub fn take_haptic_pulse(&mut self) -> Option<u16> {
        self.widgets.take_haptic_pulse()
    }
}
