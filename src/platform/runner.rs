//! Threaded game loop
//!
//! One thread owns the `GameState`. Each iteration it drains queued input,
//! measures real time, ticks, and hands a snapshot to the presenter. A stop
//! request is only observed between iterations.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use thiserror::Error;

use super::input::{InputEvent, InputReceiver, InputSender, input_channel};
use super::time::FrameClock;
use crate::consts::INPUT_QUEUE_CAPACITY;
use crate::settings::Settings;
use crate::sim::{FrameSnapshot, GameEvent, GameState, tick};

/// Receives frames from the simulation thread
pub trait Presenter: Send {
    /// Draw one frame
    fn present(&mut self, frame: &FrameSnapshot);

    /// Called for each event of a tick, before that tick's frame is presented
    fn on_event(&mut self, _event: &GameEvent) {}
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("game loop thread panicked")]
    Panicked,
    #[error("game loop already stopped")]
    AlreadyStopped,
}

/// Handle to a running simulation thread
pub struct GameRunner {
    input: InputSender,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<GameState>>,
}

impl GameRunner {
    /// Start the loop on its own thread
    pub fn spawn<P>(state: GameState, presenter: P, settings: &Settings) -> Result<Self, RunnerError>
    where
        P: Presenter + 'static,
    {
        let (input, receiver) = input_channel(INPUT_QUEUE_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let frame_budget = settings.frame_budget();

        let thread_stop = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("game-loop".to_string())
            .spawn(move || run_loop(state, presenter, receiver, thread_stop, frame_budget))?;

        log::info!("Game loop started (frame cap: {:?})", settings.target_fps);
        Ok(Self {
            input,
            stop,
            handle: Some(handle),
        })
    }

    /// A sender for input threads
    pub fn input(&self) -> InputSender {
        self.input.clone()
    }

    /// True until the loop thread has exited
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Request a stop, wait for the current iteration to finish, and return
    /// the final state. No frame is presented after this returns.
    pub fn stop(mut self) -> Result<GameState, RunnerError> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Result<GameState, RunnerError> {
        self.stop.store(true, Ordering::Release);
        let handle = self.handle.take().ok_or(RunnerError::AlreadyStopped)?;
        let state = handle.join().map_err(|_| RunnerError::Panicked)?;
        log::info!("Game loop joined (final score {})", state.score);
        Ok(state)
    }
}

impl Drop for GameRunner {
    fn drop(&mut self) {
        if self.handle.is_some() {
            if let Err(e) = self.shutdown() {
                log::error!("Game loop shutdown failed: {}", e);
            }
        }
    }
}

/// Apply one queued input event on the simulation thread
pub fn apply_input(state: &mut GameState, event: InputEvent) {
    match event {
        InputEvent::Tap => state.flap(),
        InputEvent::Resize { width, height } => {
            state.resize(width, height);
            // First layout starts the run
            if !state.is_ready() && state.viewport().is_ready() {
                state.reset();
            }
        }
    }
}

fn run_loop<P: Presenter>(
    mut state: GameState,
    mut presenter: P,
    input: InputReceiver,
    stop: Arc<AtomicBool>,
    frame_budget: Option<Duration>,
) -> GameState {
    let mut clock = FrameClock::new();

    while !stop.load(Ordering::Acquire) {
        for event in input.drain() {
            apply_input(&mut state, event);
        }

        let dt = clock.tick();
        for event in tick(&mut state, dt) {
            presenter.on_event(&event);
        }
        presenter.present(&state.snapshot());

        if let Some(budget) = frame_budget {
            let spent = clock.since_frame_start();
            if spent < budget {
                thread::sleep(budget - spent);
            }
        }
    }

    log::info!(
        "Game loop stopped after {} frames ({:.1}s)",
        clock.frame_count(),
        clock.elapsed()
    );
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Phase;
    use crate::tuning::Tuning;

    #[test]
    fn test_first_resize_starts_run() {
        let mut state = GameState::new(Tuning::default(), 1);
        apply_input(&mut state, InputEvent::Tap);
        assert!(!state.is_ready());

        apply_input(&mut state, InputEvent::Resize { width: 1080, height: 1920 });
        assert!(state.is_ready());
        assert_eq!(state.pipe.x, 1080.0);
        assert_eq!(state.bird.velocity, 0.0);
    }

    #[test]
    fn test_later_resize_does_not_reset() {
        let mut state = GameState::with_viewport(Tuning::default(), 1, 1080, 1920);
        state.score = 3;
        state.pipe.x = 400.0;
        apply_input(&mut state, InputEvent::Resize { width: 720, height: 1280 });
        assert_eq!(state.score, 3);
        assert_eq!(state.pipe.x, 400.0);
    }

    #[test]
    fn test_tap_routes_to_flap() {
        let mut state = GameState::with_viewport(Tuning::default(), 1, 1080, 1920);
        apply_input(&mut state, InputEvent::Tap);
        assert_eq!(state.bird.velocity, -10.0);
        state.phase = Phase::Over;
        apply_input(&mut state, InputEvent::Tap);
        assert_eq!(state.phase, Phase::Running);
        assert_eq!(state.bird.velocity, 0.0);
    }
}
