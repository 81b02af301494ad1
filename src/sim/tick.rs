//! Fixed-order simulation tick
//!
//! One call advances the session by exactly one step:
//! 1. ball vs active blocks
//! 2. ball vs platform
//! 3. ball vs arena edges
//! 4. platform vs arena edges
//! 5. platform motion
//! 6. ball motion
//!
//! Steps 1-4 test projected positions and only mutate velocities (or clamp
//! positions); nothing moves until steps 5 and 6.

use super::collision::{ArenaEdge, ball_edge_breach, overlaps, platform_edge_breach};
use super::state::{GameEvent, GameState};

/// Advance the session by one tick and return the events it produced
///
/// A session whose outcome is already terminal is left untouched and yields
/// no events.
pub fn tick(state: &mut GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.is_terminal() {
        return events;
    }

    state.time_ticks += 1;

    // A docked ball belongs to the platform and cannot collide on its own
    if !state.docked {
        collide_blocks(state, &mut events);
        collide_platform(state, &mut events);
        collide_ball_bounds(state, &mut events);
    }
    collide_platform_bounds(state);

    integrate(state);

    events
}

/// Flip vertical velocity on every active block the projected ball overlaps
///
/// The projection is recomputed per block, so a flip caused by one block is
/// seen by the blocks after it in row-major order.
fn collide_blocks(state: &mut GameState, events: &mut Vec<GameEvent>) {
    for index in 0..state.blocks.len() {
        if !state.blocks[index].active {
            continue;
        }
        if !overlaps(&state.ball.projected(), &state.blocks[index].rect) {
            continue;
        }

        state.ball.vel.y = -state.ball.vel.y;
        state.blocks[index].active = false;
        events.push(GameEvent::BlockHit { index });
        log::debug!("Block {} cleared at tick {}", index, state.time_ticks);

        if state.add_score() {
            events.push(GameEvent::Won);
        }
    }
}

/// Bounce off the platform with an angle set by where the ball lands
fn collide_platform(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if !overlaps(&state.ball.projected(), &state.platform.rect) {
        return;
    }

    let ball = &mut state.ball;
    let platform = &state.platform;

    // Drag: a moving platform nudges the ball along with it
    if platform.dx != 0.0 {
        ball.rect.pos.x += platform.dx;
    }

    // Already heading up from an earlier bounce
    if ball.vel.y > 0.0 {
        ball.vel.y = -ball.speed;
        let t = platform.touch_offset(ball.rect.center_x());
        ball.vel.x = ball.speed * t;
        log::debug!("Platform bounce at offset {t:.2}");
    }

    events.push(GameEvent::PlatformHit);
}

/// Reflect off the first crossed wall; the bottom edge ends the game
fn collide_ball_bounds(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let Some(edge) = ball_edge_breach(&state.ball.projected(), &state.arena) else {
        return;
    };

    let ball = &mut state.ball;
    match edge {
        ArenaEdge::Left => {
            ball.rect.pos.x = 0.0;
            ball.vel.x = ball.speed;
        }
        ArenaEdge::Right => {
            ball.rect.pos.x = state.arena.width - ball.rect.width();
            ball.vel.x = -ball.speed;
        }
        ArenaEdge::Top => {
            ball.rect.pos.y = 0.0;
            ball.vel.y = ball.speed;
        }
        ArenaEdge::Bottom => {
            if state.lose() {
                events.push(GameEvent::Lost);
            }
            return;
        }
    }

    events.push(GameEvent::WallHit { edge });
}

/// The platform halts at the side walls instead of bouncing
fn collide_platform_bounds(state: &mut GameState) {
    if platform_edge_breach(&state.platform.projected(), &state.arena).is_some() {
        state.platform.stop();
    }
}

fn integrate(state: &mut GameState) {
    let carry = state.platform.dx;
    state.platform.integrate();
    if state.docked {
        state.ball.rect.pos.x += carry;
    }
    state.ball.integrate();
}
