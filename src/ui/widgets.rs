//! Presentation widget state
//!
//! The interaction core writes widget state here; the host reads it when
//! rendering and drains haptic pulses to the device. No drawing happens
//! in this crate.

use crate::math::Vec3;

/// Widget state shared with the host renderer
#[derive(Debug, Clone, Default)]
pub struct Widgets {
    drag_offset: Vec3,
    extrude_visible: bool,
    extrude_position: Vec3,
    grid_visible: bool,
    grid_origin: Vec3,
    /// Pending haptic pulse length in microseconds, if any
    haptic: Option<u16>,
}

impl Widgets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visual offset applied to dragged geometry (negated accumulated drag)
    pub fn set_drag_indicator_offset(&mut self, offset: Vec3) {
        self.drag_offset = offset;
    }

    pub fn drag_indicator_offset(&self) -> Vec3 {
        self.drag_offset
    }

    pub fn set_extrude_widget_visible(&mut self, visible: bool) {
        self.extrude_visible = visible;
    }

    pub fn extrude_widget_visible(&self) -> bool {
        self.extrude_visible
    }

    pub fn set_extrude_widget_position(&mut self, position: Vec3) {
        self.extrude_position = position;
    }

    pub fn extrude_widget_position(&self) -> Vec3 {
        self.extrude_position
    }

    pub fn set_grid_visible(&mut self, visible: bool) {
        self.grid_visible = visible;
    }

    pub fn grid_visible(&self) -> bool {
        self.grid_visible
    }

    pub fn set_grid_origin(&mut self, origin: Vec3) {
        self.grid_origin = origin;
    }

    pub fn grid_origin(&self) -> Vec3 {
        self.grid_origin
    }

    /// Queue one haptic pulse; pulses in the same tick coalesce
    pub fn trigger_haptic_pulse(&mut self, micros: u16) {
        self.haptic = Some(micros);
    }

    /// Host-side: take the pending pulse for this tick, if any
    pub fn take_haptic_pulse(&mut self) -> Option<u16> {
        self.haptic.take()
    }
}
