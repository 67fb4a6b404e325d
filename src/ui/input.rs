//! Per-frame hand input sample
//!
//! The host polls the tracking device and fills one of these per active
//! hand per tick. Button fields are edge-triggered the same way the
//! device API reports them.

use crate::math::Vec3;

/// Hand state for one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct HandFrame {
    /// World-space pointer position; None when tracking is lost
    pub pointer: Option<Vec3>,
    pub action_pressed: bool,  // Just pressed this frame
    pub action_down: bool,     // Held
    pub action_released: bool, // Just released this frame
    pub multi_select_down: bool,
    pub axis_align_down: bool,
}

impl HandFrame {
    /// An idle frame with the pointer at a position (test/host helper)
    pub fn at(pointer: Vec3) -> Self {
        Self {
            pointer: Some(pointer),
            ..Default::default()
        }
    }

    pub fn with_action_pressed(mut self) -> Self {
        self.action_pressed = true;
        self.action_down = true;
        self
    }

    pub fn with_action_down(mut self) -> Self {
        self.action_down = true;
        self
    }

    pub fn with_action_released(mut self) -> Self {
        self.action_released = true;
        self
    }

    pub fn with_multi_select(mut self) -> Self {
        self.multi_select_down = true;
        self
    }

    pub fn with_axis_align(mut self) -> Self {
        self.axis_align_down = true;
        self
    }
}
