//! Game state and core simulation types
//!
//! Screen space is y-down: positive velocity moves the bird toward the floor.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Physics is advancing
    Running,
    /// Run ended; the next tap restarts
    Over,
}

/// Drawable area in pixels. A zero dimension means "not laid out yet".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[inline]
    pub fn width_f(&self) -> f32 {
        self.width as f32
    }

    #[inline]
    pub fn height_f(&self) -> f32 {
        self.height as f32
    }
}

/// Scaled sprite sizes for the current viewport, truncated to whole pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub bird_width: f32,
    pub bird_height: f32,
    pub pipe_width: f32,
    pub pipe_height: f32,
}

impl Dimensions {
    /// Derive sizes from the viewport height and sprite aspect ratios.
    ///
    /// Pipes are scaled to a fraction of the viewport height, keeping their
    /// aspect ratio. The bird is a fraction of the pipe width, keeping its own
    /// aspect ratio. A missing pipe sprite means no obstacle (zero size); a
    /// missing bird sprite (or missing pipe to scale against) falls back to a
    /// fixed box.
    pub fn derive(viewport: Viewport, tuning: &Tuning) -> Self {
        let (pipe_width, pipe_height) = match tuning.sprites.pipe {
            Some(sprite) => {
                let height = (viewport.height_f() * tuning.pipe_height_ratio).trunc();
                let width = (sprite.width * (height / sprite.height)).trunc();
                (width, height)
            }
            None => (0.0, 0.0),
        };

        let (bird_width, bird_height) = match (tuning.sprites.bird, tuning.sprites.pipe) {
            (Some(sprite), Some(_)) => {
                let width = (pipe_width * tuning.bird_to_pipe_width_ratio).trunc().max(1.0);
                let aspect = sprite.height / sprite.width;
                let height = (width * aspect).trunc().max(1.0);
                (width, height)
            }
            _ => (FALLBACK_BIRD_SIZE, FALLBACK_BIRD_SIZE),
        };

        Self {
            bird_width,
            bird_height,
            pipe_width,
            pipe_height,
        }
    }
}

/// The player
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bird {
    /// Center position (px)
    pub pos: Vec2,
    /// Vertical velocity (px per tick, positive is downward)
    pub velocity: f32,
}

impl Bird {
    pub fn rect(&self, dims: &Dimensions) -> Rect {
        Rect::centered(self.pos.x, self.pos.y, dims.bird_width, dims.bird_height)
    }
}

/// The single recycled obstacle: a top pipe and a bottom pipe around a gap
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PipePair {
    /// Leading (left) edge (px)
    pub x: f32,
    /// Vertical center of the gap (px)
    pub gap_center_y: f32,
    /// Set once this pipe has been passed
    pub scored: bool,
}

impl PipePair {
    #[inline]
    pub fn right(&self, dims: &Dimensions) -> f32 {
        self.x + dims.pipe_width
    }

    #[inline]
    pub fn center_x(&self, dims: &Dimensions) -> f32 {
        (self.x + self.right(dims)) / 2.0
    }

    pub fn top_rect(&self, dims: &Dimensions, gap_size: f32) -> Rect {
        let bottom = self.gap_center_y - gap_size / 2.0;
        Rect::new(self.x, bottom - dims.pipe_height, self.right(dims), bottom)
    }

    pub fn bottom_rect(&self, dims: &Dimensions, gap_size: f32) -> Rect {
        let top = self.gap_center_y + gap_size / 2.0;
        Rect::new(self.x, top, self.right(dims), top + dims.pipe_height)
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Player
    pub bird: Bird,
    /// Active pipe pair
    pub pipe: PipePair,
    /// Pipes passed this run
    pub score: u32,
    /// Current phase
    pub phase: Phase,
    /// Ticks advanced since the last reset
    pub time_ticks: u64,
    tuning: Tuning,
    viewport: Viewport,
    dims: Dimensions,
    /// Set by a reset against a laid-out viewport
    initialized: bool,
    rng: Pcg32,
}

impl GameState {
    /// Create an un-laid-out game. Nothing advances until a positive
    /// `resize` followed by a `reset`.
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self {
            seed,
            bird: Bird::default(),
            pipe: PipePair::default(),
            score: 0,
            phase: Phase::Running,
            time_ticks: 0,
            tuning,
            viewport: Viewport::default(),
            dims: Dimensions::default(),
            initialized: false,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Create a game already sized and reset for the given viewport
    pub fn with_viewport(tuning: Tuning, seed: u64, width: u32, height: u32) -> Self {
        let mut state = Self::new(tuning, seed);
        state.resize(width, height);
        state.reset();
        state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn dimensions(&self) -> &Dimensions {
        &self.dims
    }

    /// True once a reset has laid the game out on a positive viewport
    pub fn is_ready(&self) -> bool {
        self.initialized && self.viewport.is_ready()
    }

    /// Set the viewport and rescale sprites. Positions are not rescheduled;
    /// bounds and collision checks see the new size from the next tick on.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!("Ignoring resize to {}x{}", width, height);
            return;
        }
        self.viewport = Viewport::new(width, height);
        self.dims = Dimensions::derive(self.viewport, &self.tuning);
        log::debug!(
            "Viewport {}x{}: bird {}x{}, pipe {}x{}",
            width,
            height,
            self.dims.bird_width,
            self.dims.bird_height,
            self.dims.pipe_width,
            self.dims.pipe_height
        );
    }

    /// Start a fresh run: bird back at its spawn point, pipe at the right
    /// edge with a new gap, score cleared.
    pub fn reset(&mut self) {
        let width = self.viewport.width_f();
        let height = self.viewport.height_f();

        self.bird = Bird {
            pos: Vec2::new(width * BIRD_START_X_RATIO, height * BIRD_START_Y_RATIO),
            velocity: 0.0,
        };
        self.pipe = PipePair {
            x: width,
            gap_center_y: self.random_gap_center(),
            scored: false,
        };
        self.score = 0;
        self.time_ticks = 0;
        self.phase = Phase::Running;
        self.initialized = self.viewport.is_ready();

        if self.initialized {
            log::info!("Run started on {}x{}", self.viewport.width, self.viewport.height);
        } else {
            log::debug!("Reset before layout; waiting for a viewport");
        }
    }

    /// The tap signal: flap while running, restart once the run is over
    pub fn flap(&mut self) {
        match self.phase {
            Phase::Running => self.bird.velocity = self.tuning.flap_impulse,
            Phase::Over => self.reset(),
        }
    }

    /// Move the pipe back to the right edge with a fresh gap
    pub fn recycle_pipe(&mut self) {
        self.pipe.x = self.viewport.width_f();
        self.pipe.gap_center_y = self.random_gap_center();
        self.pipe.scored = false;
    }

    pub fn bird_rect(&self) -> Rect {
        self.bird.rect(&self.dims)
    }

    pub fn top_pipe_rect(&self) -> Rect {
        self.pipe.top_rect(&self.dims, self.tuning.gap_size)
    }

    pub fn bottom_pipe_rect(&self) -> Rect {
        self.pipe.bottom_rect(&self.dims, self.tuning.gap_size)
    }

    /// Uniform draw in [margin, height - margin)
    fn random_gap_center(&mut self) -> f32 {
        let height = self.viewport.height_f();
        let margin = height * self.tuning.gap_margin_ratio;
        margin + self.rng.random::<f32>() * (height - 2.0 * margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::{SpriteMetrics, SpriteSize};

    #[test]
    fn test_dimensions_scale_with_viewport() {
        let tuning = Tuning::default();
        let dims = Dimensions::derive(Viewport::new(1080, 1920), &tuning);
        assert_eq!(dims.pipe_height, 864.0);
        assert_eq!(dims.pipe_width, 140.0);
        assert_eq!(dims.bird_width, 56.0);
        assert_eq!(dims.bird_height, 39.0);
    }

    #[test]
    fn test_dimensions_without_sprites() {
        let tuning = Tuning {
            sprites: SpriteMetrics {
                pipe: None,
                bird: None,
            },
            ..Tuning::default()
        };
        let dims = Dimensions::derive(Viewport::new(1080, 1920), &tuning);
        assert_eq!(dims.pipe_width, 0.0);
        assert_eq!(dims.pipe_height, 0.0);
        assert_eq!(dims.bird_width, FALLBACK_BIRD_SIZE);
        assert_eq!(dims.bird_height, FALLBACK_BIRD_SIZE);
    }

    #[test]
    fn test_bird_height_never_zero() {
        let tuning = Tuning {
            sprites: SpriteMetrics {
                pipe: Some(SpriteSize::new(52.0, 320.0)),
                bird: Some(SpriteSize::new(1000.0, 1.0)),
            },
            ..Tuning::default()
        };
        let dims = Dimensions::derive(Viewport::new(1080, 1920), &tuning);
        assert_eq!(dims.bird_height, 1.0);
    }

    #[test]
    fn test_reset_layout() {
        let state = GameState::with_viewport(Tuning::default(), 7, 1080, 1920);
        assert!(state.is_ready());
        assert_eq!(state.phase, Phase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.bird.pos, Vec2::new(270.0, 960.0));
        assert_eq!(state.bird.velocity, 0.0);
        assert_eq!(state.pipe.x, 1080.0);
        assert!(!state.pipe.scored);
        assert!(state.pipe.gap_center_y >= 1920.0 * 0.15);
        assert!(state.pipe.gap_center_y < 1920.0 * 0.85);
    }

    #[test]
    fn test_gap_center_stays_in_range() {
        let mut state = GameState::with_viewport(Tuning::default(), 42, 720, 1280);
        for _ in 0..1000 {
            state.recycle_pipe();
            let y = state.pipe.gap_center_y;
            assert!((192.0..=1088.0).contains(&y), "gap center {y} out of range");
        }
    }

    #[test]
    fn test_same_seed_same_gaps() {
        let a = GameState::with_viewport(Tuning::default(), 99, 1080, 1920);
        let b = GameState::with_viewport(Tuning::default(), 99, 1080, 1920);
        assert_eq!(a.pipe.gap_center_y, b.pipe.gap_center_y);
    }

    #[test]
    fn test_not_ready_before_layout() {
        let mut state = GameState::new(Tuning::default(), 1);
        assert!(!state.is_ready());
        state.reset();
        assert!(!state.is_ready());

        // Resize alone does not lay the game out
        state.resize(1080, 1920);
        assert!(!state.is_ready());
        state.reset();
        assert!(state.is_ready());
    }

    #[test]
    fn test_zero_resize_ignored() {
        let mut state = GameState::with_viewport(Tuning::default(), 1, 1080, 1920);
        state.resize(0, 500);
        assert_eq!(state.viewport(), Viewport::new(1080, 1920));
    }

    #[test]
    fn test_resize_keeps_pipe_position() {
        let mut state = GameState::with_viewport(Tuning::default(), 1, 1080, 1920);
        state.pipe.x = 500.0;
        state.resize(720, 1280);
        assert_eq!(state.pipe.x, 500.0);
        assert_eq!(state.viewport(), Viewport::new(720, 1280));
        assert_eq!(state.dimensions().pipe_height, 576.0);
    }

    #[test]
    fn test_flap_running_sets_impulse() {
        let mut state = GameState::with_viewport(Tuning::default(), 1, 1080, 1920);
        state.bird.velocity = 5.0;
        state.flap();
        assert_eq!(state.bird.velocity, -10.0);
        assert_eq!(state.phase, Phase::Running);
    }

    #[test]
    fn test_flap_over_restarts() {
        let mut state = GameState::with_viewport(Tuning::default(), 1, 1080, 1920);
        state.phase = Phase::Over;
        state.score = 12;
        state.pipe.x = 3.0;
        state.flap();
        assert_eq!(state.phase, Phase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.pipe.x, 1080.0);
        assert_eq!(state.bird.velocity, 0.0);
    }

    #[test]
    fn test_pipe_rects_surround_gap() {
        let mut state = GameState::with_viewport(Tuning::default(), 1, 1080, 1920);
        state.pipe.gap_center_y = 1000.0;
        let top = state.top_pipe_rect();
        let bottom = state.bottom_pipe_rect();
        assert_eq!(top.bottom, 775.0);
        assert_eq!(top.top, 775.0 - 864.0);
        assert_eq!(bottom.top, 1225.0);
        assert_eq!(bottom.bottom, 1225.0 + 864.0);
        assert_eq!(top.left, 1080.0);
        assert_eq!(top.right, 1220.0);
    }
}
