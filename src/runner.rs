//! Headless frame-loop driver
//!
//! The simulation never schedules itself. A driver gathers input intent,
//! applies it, calls `tick` once, hands the frame to whoever draws or plays
//! sounds, and stops as soon as the outcome is terminal.

use serde::Serialize;

use crate::error::SessionError;
use crate::sim::{Direction, GameEvent, GameState, Outcome, Snapshot, tick};

/// Input intent gathered since the previous tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// New steering intent (None keeps the current one)
    pub direction: Option<Direction>,
    /// Release the docked ball
    pub launch: bool,
}

/// Source of per-tick input (keyboard layer, autopilot, replay)
pub trait Controller {
    fn next_input(&mut self, view: &Snapshot) -> TickInput;
}

/// Demo autopilot: launches right away and keeps the platform under the ball
#[derive(Debug, Clone)]
pub struct TrackingController {
    /// Horizontal slack before the platform starts moving
    pub dead_zone: f32,
}

impl Default for TrackingController {
    fn default() -> Self {
        Self { dead_zone: 8.0 }
    }
}

impl Controller for TrackingController {
    fn next_input(&mut self, view: &Snapshot) -> TickInput {
        if view.docked {
            return TickInput {
                direction: Some(Direction::None),
                launch: true,
            };
        }

        let diff = view.ball.center_x() - view.platform.center_x();
        let direction = if diff < -self.dead_zone {
            Direction::Left
        } else if diff > self.dead_zone {
            Direction::Right
        } else {
            Direction::None
        };

        TickInput {
            direction: Some(direction),
            launch: false,
        }
    }
}

/// Replays a fixed input list, then sends empty input
#[derive(Debug, Clone, Default)]
pub struct ScriptedController {
    inputs: Vec<TickInput>,
    cursor: usize,
}

impl ScriptedController {
    pub fn new(inputs: Vec<TickInput>) -> Self {
        Self { inputs, cursor: 0 }
    }
}

impl Controller for ScriptedController {
    fn next_input(&mut self, _view: &Snapshot) -> TickInput {
        let input = self.inputs.get(self.cursor).cloned().unwrap_or_default();
        self.cursor += 1;
        input
    }
}

/// What happened over one driven run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub score: u32,
    pub block_count: u32,
    pub outcome: Outcome,
    pub block_hits: u32,
    pub platform_hits: u32,
    pub wall_hits: u32,
}

impl RunSummary {
    fn record(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::BlockHit { .. } => self.block_hits += 1,
                GameEvent::PlatformHit => self.platform_hits += 1,
                GameEvent::WallHit { .. } => self.wall_hits += 1,
                GameEvent::Won | GameEvent::Lost => {}
            }
        }
    }
}

/// Apply a controller's intent to the session
pub fn apply_input(state: &mut GameState, input: &TickInput) -> Result<(), SessionError> {
    if let Some(direction) = input.direction {
        state.set_platform_direction(direction);
    }
    if input.launch {
        state.launch_ball()?;
    }
    Ok(())
}

/// Drive the session until it ends or `max_ticks` ticks have run
pub fn run(
    state: &mut GameState,
    controller: &mut dyn Controller,
    max_ticks: u64,
) -> Result<RunSummary, SessionError> {
    run_with(state, controller, max_ticks, |_, _| {})
}

/// Like [`run`], calling `on_frame` with the post-tick snapshot and events
pub fn run_with<F>(
    state: &mut GameState,
    controller: &mut dyn Controller,
    max_ticks: u64,
    mut on_frame: F,
) -> Result<RunSummary, SessionError>
where
    F: FnMut(&Snapshot, &[GameEvent]),
{
    let mut summary = RunSummary {
        block_count: state.block_count(),
        ..Default::default()
    };

    while !state.is_terminal() && summary.ticks < max_ticks {
        let input = controller.next_input(&state.snapshot());
        apply_input(state, &input)?;

        let events = tick(state);
        summary.ticks += 1;
        summary.record(&events);
        on_frame(&state.snapshot(), &events);
    }

    summary.score = state.score;
    summary.outcome = state.outcome;
    log::info!(
        "Run finished after {} ticks: {:?}, score {}/{}",
        summary.ticks,
        summary.outcome,
        summary.score,
        summary.block_count
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_tracking_launches_when_docked() {
        let state = GameState::new_session(4, 8, ARENA_WIDTH, ARENA_HEIGHT).unwrap();
        let input = TrackingController::default().next_input(&state.snapshot());
        assert!(input.launch);
    }

    #[test]
    fn test_tracking_steers_toward_ball() {
        let mut state = GameState::new_session(4, 8, ARENA_WIDTH, ARENA_HEIGHT).unwrap();
        state.docked = false;
        let mut bot = TrackingController::default();

        state.ball.rect.pos.x = 100.0;
        assert_eq!(bot.next_input(&state.snapshot()).direction, Some(Direction::Left));
        state.ball.rect.pos.x = 500.0;
        assert_eq!(bot.next_input(&state.snapshot()).direction, Some(Direction::Right));
        state.ball.rect.pos.x = 322.0;
        assert_eq!(bot.next_input(&state.snapshot()).direction, Some(Direction::None));
    }

    #[test]
    fn test_double_launch_is_reported() {
        let mut state = GameState::new_session(4, 8, ARENA_WIDTH, ARENA_HEIGHT).unwrap();
        let launch = TickInput {
            launch: true,
            ..Default::default()
        };
        let mut script = ScriptedController::new(vec![launch.clone(), launch]);

        let err = run(&mut state, &mut script, 10).unwrap_err();
        assert_eq!(err, SessionError::BallNotDocked);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_run_respects_max_ticks() {
        let mut state = GameState::new_session(4, 8, ARENA_WIDTH, ARENA_HEIGHT).unwrap();
        let mut idle = ScriptedController::default();

        let summary = run(&mut state, &mut idle, 25).unwrap();
        assert_eq!(summary.ticks, 25);
        assert_eq!(state.time_ticks, 25);
        assert_eq!(summary.outcome, Outcome::Playing);
        assert!(state.docked);
    }

    #[test]
    fn test_run_stops_on_terminal_outcome() {
        let mut state = GameState::new_session(4, 8, ARENA_WIDTH, ARENA_HEIGHT).unwrap();
        state.docked = false;
        state.ball.rect.pos = glam::Vec2::new(100.0, 338.0);
        state.ball.vel = glam::Vec2::new(0.0, BALL_SPEED);

        let mut frames = 0;
        let summary = run_with(&mut state, &mut ScriptedController::default(), 100, |view, events| {
            frames += 1;
            assert_eq!(view.outcome, Outcome::Lost);
            assert_eq!(events, &[GameEvent::Lost]);
        })
        .unwrap();

        assert_eq!(frames, 1);
        assert_eq!(summary.ticks, 1);
        assert_eq!(summary.outcome, Outcome::Lost);
    }
}
