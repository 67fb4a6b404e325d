//! Interaction core: hover resolution, selection gestures, drag control
//! and the tool that ties them to the per-frame button protocol.

mod drag;
mod hover;
mod selection;
mod state;
mod tool;

pub use drag::DragController;
pub use hover::HoverResolver;
pub use selection::{begin_select_gesture, update_select_gesture};
pub use state::{DragPhase, HandState};
pub use tool::{EditSession, Tool, VertexEditTool};
