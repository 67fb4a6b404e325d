//! roomweave: the interaction core of a room-based level editor.
//!
//! The host application owns rendering, device input and mesh generation;
//! this crate owns the level geometry (rooms as half-edge boundary loops
//! over shared corner vertices) and the hand-driven editing model on top
//! of it: hover resolution with vertex/edge/face precedence, multi-select
//! gestures, grid-quantized drags, and deferred merging of coincident
//! vertices.
//!
//! The host feeds a [`ui::HandFrame`] per tick into an
//! [`editor::EditSession`] and reads widget state and haptic pulses back
//! out of [`ui::Widgets`].

pub mod config;
pub mod editor;
pub mod math;
pub mod ui;
pub mod world;

pub use config::ToolConfig;
pub use editor::{EditSession, Tool, VertexEditTool};
pub use world::Level;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
