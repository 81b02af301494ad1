//! Session configuration
//!
//! Every tunable of a session lives here so nothing in the simulation reads
//! ambient globals. Missing JSON fields fall back to the classic layout.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SessionError;

/// Tunables for one game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Block field ===
    pub rows: u32,
    pub cols: u32,
    pub block_width: f32,
    pub block_height: f32,
    /// Top-left corner of the first block
    pub block_origin: (f32, f32),
    /// Offset between neighbouring blocks (column, row)
    pub block_stride: (f32, f32),

    // === Ball ===
    pub ball_start: (f32, f32),
    pub ball_size: f32,
    pub ball_speed: f32,

    // === Platform ===
    pub platform_start: (f32, f32),
    pub platform_width: f32,
    pub platform_height: f32,
    pub platform_speed: f32,

    /// Seed for the launch direction
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            rows: BLOCK_ROWS,
            cols: BLOCK_COLS,
            block_width: BLOCK_WIDTH,
            block_height: BLOCK_HEIGHT,
            block_origin: (BLOCK_ORIGIN_X, BLOCK_ORIGIN_Y),
            block_stride: (BLOCK_STRIDE_X, BLOCK_STRIDE_Y),

            ball_start: (BALL_X, BALL_Y),
            ball_size: BALL_SIZE,
            ball_speed: BALL_SPEED,

            platform_start: (PLATFORM_X, PLATFORM_Y),
            platform_width: PLATFORM_WIDTH,
            platform_height: PLATFORM_HEIGHT,
            platform_speed: PLATFORM_SPEED,

            seed: DEFAULT_SEED,
        }
    }
}

impl Config {
    /// Default layout with a different grid and arena size
    pub fn with_grid(rows: u32, cols: u32, arena_width: f32, arena_height: f32) -> Self {
        Self {
            rows,
            cols,
            arena_width,
            arena_height,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| SessionError::Config(format!("{}: {e}", path.display())))?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Top-left corner of the block at `(row, col)`
    pub fn block_position(&self, row: u32, col: u32) -> Vec2 {
        Vec2::new(
            self.block_origin.0 + col as f32 * self.block_stride.0,
            self.block_origin.1 + row as f32 * self.block_stride.1,
        )
    }

    /// Check the invariants a session relies on
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(SessionError::InvalidGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self
            .rows
            .checked_mul(self.cols)
            .is_none_or(|count| count > MAX_BLOCKS)
        {
            return Err(SessionError::TooManyBlocks {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if !(self.arena_width > 0.0 && self.arena_height > 0.0) {
            return Err(SessionError::InvalidArena {
                width: self.arena_width,
                height: self.arena_height,
            });
        }

        let sizes = [
            (self.block_width, "block width"),
            (self.block_height, "block height"),
            (self.ball_size, "ball size"),
            (self.ball_speed, "ball speed"),
            (self.platform_width, "platform width"),
            (self.platform_height, "platform height"),
            (self.platform_speed, "platform speed"),
        ];
        if let Some(&(_, what)) = sizes.iter().find(|(value, _)| !(*value > 0.0)) {
            return Err(SessionError::InvalidSize { what });
        }

        // Constant stride: the first and last blocks bound the whole field
        let first = self.block_position(0, 0);
        let last = self.block_position(self.rows - 1, self.cols - 1);
        let far = first.max(last) + Vec2::new(self.block_width, self.block_height);
        if first.min(last).cmplt(Vec2::ZERO).any()
            || far.x > self.arena_width
            || far.y > self.arena_height
        {
            return Err(SessionError::GridOutOfBounds {
                rows: self.rows,
                cols: self.cols,
            });
        }

        if self.platform_width > self.arena_width {
            log::warn!(
                "platform ({}) is wider than the arena ({})",
                self.platform_width,
                self.arena_width
            );
        }

        Ok(())
    }
}
