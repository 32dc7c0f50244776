//! Platform layer
//!
//! Handles everything the pure simulation must not touch:
//! - Real-time frame clock
//! - Input hand-off from other threads
//! - The dedicated simulation thread

pub mod input;
pub mod runner;
pub mod time;

pub use input::{InputEvent, InputReceiver, InputSender, SendError, input_channel};
pub use runner::{GameRunner, Presenter, RunnerError};
pub use time::FrameClock;
