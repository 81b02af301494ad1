//! Block Bounce - a block-breaker arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, score and outcome)
//! - `config`: Session configuration with serde-backed loading
//! - `runner`: Headless frame-loop driver and input controllers
//! - `error`: Invariant violations reported to callers

pub mod config;
pub mod error;
pub mod runner;
pub mod sim;

pub use config::Config;
pub use error::SessionError;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 640.0;
    pub const ARENA_HEIGHT: f32 = 360.0;

    /// Block grid defaults
    pub const BLOCK_ROWS: u32 = 4;
    pub const BLOCK_COLS: u32 = 8;
    pub const BLOCK_WIDTH: f32 = 60.0;
    pub const BLOCK_HEIGHT: f32 = 20.0;
    /// Top-left corner of block (0, 0)
    pub const BLOCK_ORIGIN_X: f32 = 65.0;
    pub const BLOCK_ORIGIN_Y: f32 = 35.0;
    /// Distance between the top-left corners of neighbouring blocks
    pub const BLOCK_STRIDE_X: f32 = 64.0;
    pub const BLOCK_STRIDE_Y: f32 = 24.0;
    /// Largest block field a session accepts
    pub const MAX_BLOCKS: u32 = 4096;

    /// Ball defaults (docked start position sits on top of the platform)
    pub const BALL_X: f32 = 320.0;
    pub const BALL_Y: f32 = 280.0;
    pub const BALL_SIZE: f32 = 20.0;
    /// Per-axis speed in pixels per tick
    pub const BALL_SPEED: f32 = 3.0;

    /// Platform defaults
    pub const PLATFORM_X: f32 = 280.0;
    pub const PLATFORM_Y: f32 = 300.0;
    pub const PLATFORM_WIDTH: f32 = 100.0;
    pub const PLATFORM_HEIGHT: f32 = 14.0;
    /// Horizontal speed in pixels per tick
    pub const PLATFORM_SPEED: f32 = 6.0;

    /// Default RNG seed for the launch direction
    pub const DEFAULT_SEED: u64 = 0x5EED;
}
