//! Host-facing input and presentation surfaces
//!
//! - `HandFrame`: one polled hand sample per tick
//! - `Widgets`: widget state the host renders and the haptic queue it drains

mod input;
mod widgets;

pub use input::*;
pub use widgets::*;
