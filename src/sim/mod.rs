//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Seeded RNG only
//! - No clocks, threads or platform dependencies
//! - Mutated only through `resize`, `reset`, `flap` and `tick`

pub mod collision;
pub mod rect;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Boundary, PipeHit, bird_bounds_check, bird_pipe_collision};
pub use rect::Rect;
pub use snapshot::{BirdFrame, FrameSnapshot, PipeFrame};
pub use state::{Bird, Dimensions, GameState, Phase, PipePair, Viewport};
pub use tick::{GameEvent, tick};
