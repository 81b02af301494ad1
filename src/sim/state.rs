//! Game state and core simulation types
//!
//! A `GameState` is one session: the arena, the moving bodies, the block
//! field and the score/outcome tracker. Nothing here is global.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::config::Config;
use crate::error::SessionError;

/// Session outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    /// Ticks keep running
    #[default]
    Playing,
    /// Every block cleared
    Won,
    /// Ball left through the bottom edge
    Lost,
}

impl Outcome {
    /// Won and Lost never transition again
    pub fn is_terminal(&self) -> bool {
        *self != Outcome::Playing
    }
}

/// Platform steering intent from the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    None,
}

/// Discrete events raised during a tick, for audio and UI feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball broke the block at this index of the field
    BlockHit { index: usize },
    /// Ball touched the platform
    PlatformHit,
    /// Ball bounced off a side or top wall
    WallHit { edge: super::collision::ArenaEdge },
    /// Last block cleared
    Won,
    /// Ball dropped out of the arena
    Lost,
}

/// Fixed arena bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub rect: Rect,
    /// Per-axis velocity in pixels per tick
    pub vel: Vec2,
    /// Magnitude applied on every bounce
    pub speed: f32,
}

impl Ball {
    pub fn new(pos: Vec2, size: f32, speed: f32) -> Self {
        Self {
            rect: Rect {
                pos,
                size: Vec2::splat(size),
            },
            vel: Vec2::ZERO,
            speed,
        }
    }

    /// Where the ball will be after this tick's move
    #[inline]
    pub fn projected(&self) -> Rect {
        self.rect.translated(self.vel)
    }

    /// Commit one tick of motion
    pub fn integrate(&mut self) {
        self.rect.pos += self.vel;
    }
}

/// The player-controlled platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    /// Horizontal velocity in pixels per tick (0 when idle)
    pub dx: f32,
    pub speed: f32,
}

impl Platform {
    pub fn new(pos: Vec2, width: f32, height: f32, speed: f32) -> Self {
        Self {
            rect: Rect {
                pos,
                size: Vec2::new(width, height),
            },
            dx: 0.0,
            speed,
        }
    }

    #[inline]
    pub fn projected(&self) -> Rect {
        self.rect.translated(Vec2::new(self.dx, 0.0))
    }

    /// Apply steering intent
    pub fn steer(&mut self, direction: Direction) {
        self.dx = match direction {
            Direction::Left => -self.speed,
            Direction::Right => self.speed,
            Direction::None => 0.0,
        };
    }

    pub fn stop(&mut self) {
        self.dx = 0.0;
    }

    /// Commit one tick of motion
    pub fn integrate(&mut self) {
        self.rect.pos.x += self.dx;
    }

    /// Where on the platform `x` lands: -1 at the left edge, 0 at the centre,
    /// +1 at the right edge. Clamped for contacts past either end.
    pub fn touch_offset(&self, x: f32) -> f32 {
        let offset = x - self.rect.left();
        (2.0 * offset / self.rect.width() - 1.0).clamp(-1.0, 1.0)
    }
}

/// A destructible block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub rect: Rect,
    pub active: bool,
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Read-only view handed to renderers and controllers after each tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub arena: Arena,
    pub ball: Rect,
    pub ball_vel: Vec2,
    pub docked: bool,
    pub platform: Rect,
    /// Only blocks still in play
    pub blocks: Vec<Rect>,
    pub score: u32,
    pub block_count: u32,
    pub outcome: Outcome,
    pub time_ticks: u64,
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub arena: Arena,
    pub ball: Ball,
    pub platform: Platform,
    /// Row-major block field; membership never changes after creation
    pub blocks: Vec<Block>,
    /// Ball rides on the platform until launched
    pub docked: bool,
    /// Blocks cleared so far
    pub score: u32,
    pub outcome: Outcome,
    /// Ticks executed
    pub time_ticks: u64,
    pub rng_state: RngState,
}

impl GameState {
    /// Fresh session with the default layout and the given grid and arena
    pub fn new_session(
        rows: u32,
        cols: u32,
        arena_width: f32,
        arena_height: f32,
    ) -> Result<Self, SessionError> {
        Self::from_config(&Config::with_grid(rows, cols, arena_width, arena_height))
    }

    /// Build a session: block field, docked ball, idle platform, zero score
    pub fn from_config(config: &Config) -> Result<Self, SessionError> {
        config.validate()?;

        let mut blocks = Vec::with_capacity(config.rows as usize * config.cols as usize);
        for row in 0..config.rows {
            for col in 0..config.cols {
                let pos = config.block_position(row, col);
                blocks.push(Block {
                    rect: Rect {
                        pos,
                        size: Vec2::new(config.block_width, config.block_height),
                    },
                    active: true,
                });
            }
        }

        let ball = Ball::new(
            Vec2::new(config.ball_start.0, config.ball_start.1),
            config.ball_size,
            config.ball_speed,
        );
        let platform = Platform::new(
            Vec2::new(config.platform_start.0, config.platform_start.1),
            config.platform_width,
            config.platform_height,
            config.platform_speed,
        );

        log::info!(
            "New session: {}x{} blocks in a {}x{} arena (seed {})",
            config.rows,
            config.cols,
            config.arena_width,
            config.arena_height,
            config.seed
        );

        Ok(Self {
            arena: Arena {
                width: config.arena_width,
                height: config.arena_height,
            },
            ball,
            platform,
            blocks,
            docked: true,
            score: 0,
            outcome: Outcome::Playing,
            time_ticks: 0,
            rng_state: RngState::new(config.seed),
        })
    }

    /// Set the platform's steering intent; repeating the same intent is a no-op
    pub fn set_platform_direction(&mut self, direction: Direction) {
        self.platform.steer(direction);
    }

    /// Release the docked ball: straight up at full speed with a random
    /// whole-number horizontal component in `[-speed, speed]`
    pub fn launch_ball(&mut self) -> Result<(), SessionError> {
        if !self.docked {
            return Err(SessionError::BallNotDocked);
        }

        let spread = self.ball.speed.floor() as i32;
        let mut rng = self.rng_state.to_rng();
        let dx = rng.random_range(-spread..=spread) as f32;

        self.ball.vel = Vec2::new(dx, -self.ball.speed);
        self.docked = false;
        log::info!("Ball launched with velocity ({}, {})", self.ball.vel.x, self.ball.vel.y);
        Ok(())
    }

    /// Total blocks in the field, cleared or not
    pub fn block_count(&self) -> u32 {
        self.blocks.len() as u32
    }

    pub fn active_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| b.active)
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Count a cleared block; returns true when this clear wins the game
    pub(crate) fn add_score(&mut self) -> bool {
        self.score = (self.score + 1).min(self.block_count());
        if self.outcome == Outcome::Playing && self.score == self.block_count() {
            self.outcome = Outcome::Won;
            log::info!("All {} blocks cleared after {} ticks", self.score, self.time_ticks);
            return true;
        }
        false
    }

    /// Record a bottom-edge breach; returns true if this ended the game
    pub(crate) fn lose(&mut self) -> bool {
        if self.outcome != Outcome::Playing {
            return false;
        }
        self.outcome = Outcome::Lost;
        log::info!("Ball lost at tick {} with score {}", self.time_ticks, self.score);
        true
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            arena: self.arena,
            ball: self.ball.rect,
            ball_vel: self.ball.vel,
            docked: self.docked,
            platform: self.platform.rect,
            blocks: self.active_blocks().map(|b| b.rect).collect(),
            score: self.score,
            block_count: self.block_count(),
            outcome: self.outcome,
            time_ticks: self.time_ticks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_new_session_layout() {
        let state = GameState::new_session(4, 8, 640.0, 360.0).unwrap();
        assert_eq!(state.block_count(), 32);
        assert!(state.blocks.iter().all(|b| b.active));
        assert!(state.docked);
        assert_eq!(state.score, 0);
        assert_eq!(state.outcome, Outcome::Playing);
        assert_eq!(state.ball.vel, Vec2::ZERO);
        assert_eq!(state.ball.rect.pos, Vec2::new(BALL_X, BALL_Y));

        // Row-major: the second block is in the same row
        assert_eq!(state.blocks[1].rect.pos, Vec2::new(129.0, 35.0));
        assert_eq!(state.blocks[8].rect.pos, Vec2::new(65.0, 59.0));
    }

    #[test]
    fn test_new_session_rejects_empty_grid() {
        assert_eq!(
            GameState::new_session(4, 0, 640.0, 360.0).unwrap_err(),
            SessionError::InvalidGrid { rows: 4, cols: 0 }
        );
    }

    #[test]
    fn test_launch_only_once() {
        let mut state = GameState::new_session(4, 8, 640.0, 360.0).unwrap();
        state.launch_ball().unwrap();
        assert!(!state.docked);
        assert_eq!(state.ball.vel.y, -BALL_SPEED);
        assert!(state.ball.vel.x.abs() <= BALL_SPEED);
        assert_eq!(state.ball.vel.x, state.ball.vel.x.round());

        let vel = state.ball.vel;
        assert_eq!(state.launch_ball(), Err(SessionError::BallNotDocked));
        assert_eq!(state.ball.vel, vel);
    }

    #[test]
    fn test_launch_is_deterministic_per_seed() {
        let config = Config {
            seed: 42,
            ..Config::default()
        };
        let mut a = GameState::from_config(&config).unwrap();
        let mut b = GameState::from_config(&config).unwrap();
        a.launch_ball().unwrap();
        b.launch_ball().unwrap();
        assert_eq!(a.ball.vel, b.ball.vel);
    }

    #[test]
    fn test_steering_is_idempotent() {
        let mut state = GameState::new_session(1, 1, 640.0, 360.0).unwrap();
        state.set_platform_direction(Direction::Left);
        state.set_platform_direction(Direction::Left);
        assert_eq!(state.platform.dx, -PLATFORM_SPEED);
        state.set_platform_direction(Direction::Right);
        assert_eq!(state.platform.dx, PLATFORM_SPEED);
        state.set_platform_direction(Direction::None);
        assert_eq!(state.platform.dx, 0.0);
    }

    #[test]
    fn test_touch_offset() {
        let platform = Platform::new(Vec2::new(280.0, 300.0), 100.0, 14.0, 6.0);
        assert_eq!(platform.touch_offset(280.0), -1.0);
        assert_eq!(platform.touch_offset(330.0), 0.0);
        assert_eq!(platform.touch_offset(380.0), 1.0);
        assert_eq!(platform.touch_offset(305.0), -0.5);
        // Ball centre past the end still counts as the edge
        assert_eq!(platform.touch_offset(270.0), -1.0);
    }

    #[test]
    fn test_terminal_outcome_is_sticky() {
        let mut state = GameState::new_session(1, 1, 640.0, 360.0).unwrap();
        assert!(state.add_score());
        assert_eq!(state.outcome, Outcome::Won);
        assert!(!state.lose());
        assert_eq!(state.outcome, Outcome::Won);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_snapshot_hides_cleared_blocks() {
        let mut state = GameState::new_session(2, 2, 640.0, 360.0).unwrap();
        state.blocks[0].active = false;
        let snap = state.snapshot();
        assert_eq!(snap.blocks.len(), 3);
        assert_eq!(snap.block_count, 4);
        assert_eq!(snap.blocks[0], state.blocks[1].rect);
    }
}
