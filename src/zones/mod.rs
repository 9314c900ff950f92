//! Zone system for card locations.
//!
//! Four kinds of zone exist: the draw pile, the discard pile, the shop and
//! one hand per player. `ZoneManager` moves cards between them.
//!
//! ## Key Types
//!
//! - `Zone`: Zone identifier (from `core::config`)
//! - `ZoneManager`: Card location tracking and movement

pub mod manager;

pub use manager::ZoneManager;

// Re-export zone types from core for convenience
pub use crate::core::config::{Zone, ZoneVisibility};
