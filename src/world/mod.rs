//! World module - room-based level geometry
//!
//! Half-edge boundary loops over shared vertices, flat floor/ceiling
//! heights per room, and the spatial queries the interaction core needs.

mod geometry;
mod queries;

pub use geometry::*;
