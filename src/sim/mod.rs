//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, no sub-stepping
//! - Seeded RNG only
//! - Stable iteration order (row-major block field)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{ArenaEdge, ball_edge_breach, overlaps, platform_edge_breach};
pub use rect::Rect;
pub use state::{
    Arena, Ball, Block, Direction, GameEvent, GameState, Outcome, Platform, RngState, Snapshot,
};
pub use tick::tick;
