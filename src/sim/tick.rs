//! Simulation tick
//!
//! Advances the game by one frame. With the default per-frame integration
//! the tunables are per-tick quantities and `dt` is not applied.

use super::collision::{Boundary, PipeHit, bird_bounds_check, bird_pipe_collision};
use super::state::{GameState, Phase};

/// Something noteworthy that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Bird passed the pipe; carries the new score
    Scored { score: u32 },
    /// Pipe scrolled off the left edge and was respawned
    PipeRecycled { gap_center_y: f32 },
    /// Bird left the viewport
    OutOfBounds(Boundary),
    /// Bird hit a pipe
    Crashed(PipeHit),
}

/// Advance the game state by one frame of `dt` seconds.
///
/// Order: gravity, move bird, bounds check (ends the tick on exit), scroll
/// pipe, recycle, score, pipe collision. Does nothing unless the game is
/// laid out and running.
pub fn tick(state: &mut GameState, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.phase != Phase::Running || !state.is_ready() {
        return events;
    }

    state.time_ticks += 1;

    let tuning = state.tuning();
    let scale = tuning.integration.step_scale(dt);
    let gravity = tuning.gravity;
    let pipe_speed = tuning.pipe_speed;

    // Bird physics
    state.bird.velocity += gravity * scale;
    state.bird.pos.y += state.bird.velocity * scale;

    if let Some(boundary) = bird_bounds_check(&state.bird_rect(), state.viewport()) {
        state.phase = Phase::Over;
        log::info!("Game over: left viewport ({:?}), score {}", boundary, state.score);
        events.push(GameEvent::OutOfBounds(boundary));
        return events;
    }

    // Pipe scroll and recycle
    state.pipe.x -= pipe_speed * scale;
    if state.pipe.right(state.dimensions()) < 0.0 {
        state.recycle_pipe();
        log::debug!("Pipe recycled, gap at {:.1}", state.pipe.gap_center_y);
        events.push(GameEvent::PipeRecycled {
            gap_center_y: state.pipe.gap_center_y,
        });
    }

    // Score once per pipe, when its center passes the bird's center
    if !state.pipe.scored && state.pipe.center_x(state.dimensions()) < state.bird.pos.x {
        state.score += 1;
        state.pipe.scored = true;
        log::debug!("Score {}", state.score);
        events.push(GameEvent::Scored { score: state.score });
    }

    if let Some(hit) = bird_pipe_collision(
        &state.bird_rect(),
        &state.top_pipe_rect(),
        &state.bottom_pipe_rect(),
    ) {
        state.phase = Phase::Over;
        log::info!("Game over: hit {:?} pipe, score {}", hit, state.score);
        events.push(GameEvent::Crashed(hit));
    }

    events
}
