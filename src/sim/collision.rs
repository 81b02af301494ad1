//! Collision detection against projected positions
//!
//! Every check here is a pure predicate. Callers pass the body's projected
//! rectangle (position + velocity) so hits are found before the move commits.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::Arena;

/// Arena edge a body tried to cross
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArenaEdge {
    Left,
    Right,
    Top,
    Bottom,
}

/// Strict AABB overlap: rectangles that only touch do not collide
#[inline]
pub fn overlaps(projected: &Rect, target: &Rect) -> bool {
    projected.right() > target.left()
        && projected.left() < target.right()
        && projected.bottom() > target.top()
        && projected.top() < target.bottom()
}

/// First arena edge the projected ball crosses
///
/// Edges are checked left, right, top, bottom and only the first match is
/// reported, so a corner breach resolves as a single reflection.
pub fn ball_edge_breach(projected: &Rect, arena: &Arena) -> Option<ArenaEdge> {
    if projected.left() < 0.0 {
        Some(ArenaEdge::Left)
    } else if projected.right() > arena.width {
        Some(ArenaEdge::Right)
    } else if projected.top() < 0.0 {
        Some(ArenaEdge::Top)
    } else if projected.bottom() > arena.height {
        Some(ArenaEdge::Bottom)
    } else {
        None
    }
}

/// Side wall the projected platform crosses (the platform only moves horizontally)
pub fn platform_edge_breach(projected: &Rect, arena: &Arena) -> Option<ArenaEdge> {
    if projected.left() < 0.0 {
        Some(ArenaEdge::Left)
    } else if projected.right() > arena.width {
        Some(ArenaEdge::Right)
    } else {
        None
    }
}
