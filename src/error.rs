//! Errors reported to callers of the simulation
//!
//! Only caller/integration bugs are errors. Losing the ball or clearing the
//! field are normal outcomes and never show up here.

use std::fmt;

use crate::consts::MAX_BLOCKS;

/// Invariant violations detected while building or driving a session
#[derive(Clone, Debug, PartialEq)]
pub enum SessionError {
    /// Block field needs at least one row and one column
    InvalidGrid { rows: u32, cols: u32 },
    /// rows x cols is larger than the block field allows
    TooManyBlocks { rows: u32, cols: u32 },
    /// Arena dimensions must be positive
    InvalidArena { width: f32, height: f32 },
    /// An entity dimension or speed was not positive
    InvalidSize { what: &'static str },
    /// Some block of the field lies outside the arena
    GridOutOfBounds { rows: u32, cols: u32 },
    /// `launch_ball` called while the ball is already in flight
    BallNotDocked,
    /// Configuration text could not be read or parsed
    Config(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGrid { rows, cols } => {
                write!(f, "invalid block grid: {rows}x{cols} (rows and cols must be > 0)")
            }
            Self::TooManyBlocks { rows, cols } => {
                write!(f, "block grid {rows}x{cols} exceeds {MAX_BLOCKS} blocks")
            }
            Self::InvalidArena { width, height } => {
                write!(f, "invalid arena: {width}x{height} (dimensions must be > 0)")
            }
            Self::InvalidSize { what } => write!(f, "{what} must be > 0"),
            Self::GridOutOfBounds { rows, cols } => {
                write!(f, "block grid {rows}x{cols} does not fit inside the arena")
            }
            Self::BallNotDocked => write!(f, "ball is not docked; it can only be launched once"),
            Self::Config(msg) => write!(f, "config error: {msg}"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}
