//! Read-only frame description handed to presenters

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::{GameState, Phase, Viewport};

/// Bird as drawn this frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BirdFrame {
    pub center: Vec2,
    pub rect: Rect,
    pub velocity: f32,
}

/// Pipes as drawn this frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipeFrame {
    pub top: Rect,
    pub bottom: Rect,
    pub gap_center_y: f32,
}

/// Everything a presenter needs to draw one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub viewport: Viewport,
    pub bird: BirdFrame,
    pub pipes: PipeFrame,
    pub score: u32,
    pub phase: Phase,
    /// False until the game has been laid out on a real viewport
    pub ready: bool,
    pub tick: u64,
}

impl FrameSnapshot {
    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }
}

impl GameState {
    /// Project the current state for rendering. Never mutates.
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            viewport: self.viewport(),
            bird: BirdFrame {
                center: self.bird.pos,
                rect: self.bird_rect(),
                velocity: self.bird.velocity,
            },
            pipes: PipeFrame {
                top: self.top_pipe_rect(),
                bottom: self.bottom_pipe_rect(),
                gap_center_y: self.pipe.gap_center_y,
            },
            score: self.score,
            phase: self.phase,
            ready: self.is_ready(),
            tick: self.time_ticks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick;
    use crate::tuning::Tuning;

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = GameState::with_viewport(Tuning::default(), 5, 1080, 1920);
        state.pipe.gap_center_y = 1000.0;
        let frame = state.snapshot();
        assert!(frame.ready);
        assert!(!frame.is_over());
        assert_eq!(frame.viewport, Viewport::new(1080, 1920));
        assert_eq!(frame.bird.center, Vec2::new(270.0, 960.0));
        assert_eq!(frame.bird.rect, state.bird_rect());
        assert_eq!(frame.pipes.top.bottom, 775.0);
        assert_eq!(frame.pipes.bottom.top, 1225.0);
        assert_eq!(frame.score, 0);
    }

    #[test]
    fn test_snapshot_does_not_mutate() {
        let mut state = GameState::with_viewport(Tuning::default(), 5, 1080, 1920);
        tick(&mut state, 1.0 / 60.0);
        let a = state.snapshot();
        let b = state.snapshot();
        assert_eq!(a, b);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::with_viewport(Tuning::default(), 5, 1080, 1920);
        let frame = state.snapshot();
        let json = serde_json::to_string(&frame).unwrap();
        assert!(json.contains("\"phase\":\"Running\""));
        let back: FrameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, frame);
    }
}
