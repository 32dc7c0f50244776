//! Flappy Sim - A Flappy Bird simulation core
//!
//! Core modules:
//! - `sim`: Simulation (physics, collisions, scoring, game state)
//! - `platform`: Frame clock, input hand-off and the threaded game loop
//! - `tuning`: Data-driven game balance
//! - `settings`: Presentation preferences
//! - `hud`: Text overlay description for presenters
//! - `levels`: Level-unlock policy and its persisted level

pub mod hud;
pub mod levels;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use levels::{Game, LevelProgress};
pub use settings::Settings;
pub use tuning::{Integration, Tuning};

/// Game configuration constants
pub mod consts {
    /// Default gravity (velocity increment per tick, px)
    pub const GRAVITY: f32 = 0.6;
    /// Default flap impulse (negative is upward, y grows downward)
    pub const FLAP_IMPULSE: f32 = -10.0;
    /// Default pipe scroll speed (px per tick)
    pub const PIPE_SPEED: f32 = 6.0;
    /// Default vertical gap between the top and bottom pipe (px)
    pub const GAP_SIZE: f32 = 450.0;
    /// Bird width as a fraction of the scaled pipe width
    pub const BIRD_TO_PIPE_WIDTH_RATIO: f32 = 0.4;
    /// Pipe sprite height as a fraction of the viewport height
    pub const PIPE_HEIGHT_RATIO: f32 = 0.45;
    /// Gap centers stay this fraction of the viewport away from either edge
    pub const GAP_MARGIN_RATIO: f32 = 0.15;

    /// Bird spawns at this fraction of the viewport width
    pub const BIRD_START_X_RATIO: f32 = 0.25;
    /// Bird spawns at this fraction of the viewport height
    pub const BIRD_START_Y_RATIO: f32 = 0.5;
    /// Bird box size used when no bird sprite is available
    pub const FALLBACK_BIRD_SIZE: f32 = 80.0;

    /// Real-time delta clamp for the frame clock (seconds)
    pub const MAX_FRAME_DT: f32 = 0.25;
    /// Input events buffered between the input thread and the loop
    pub const INPUT_QUEUE_CAPACITY: usize = 64;
}
