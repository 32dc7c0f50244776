//! Input hand-off
//!
//! Input callbacks never touch the game state. They push events into a
//! bounded queue that the simulation thread drains between frames.

use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError, TrySendError};

use thiserror::Error;

/// Raw input forwarded by a presenter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Touch/click/key press: flap, or restart after game over
    Tap,
    /// Drawable area changed
    Resize { width: u32, height: u32 },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SendError {
    #[error("input queue full, dropped {0:?}")]
    Full(InputEvent),
    #[error("game loop has stopped")]
    Disconnected,
}

/// Producer half; cheap to clone into any number of input threads
#[derive(Debug, Clone)]
pub struct InputSender {
    tx: SyncSender<InputEvent>,
}

impl InputSender {
    /// Queue an event without blocking
    pub fn send(&self, event: InputEvent) -> Result<(), SendError> {
        match self.tx.try_send(event) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(event)) => {
                log::warn!("Input queue full, dropping {:?}", event);
                Err(SendError::Full(event))
            }
            Err(TrySendError::Disconnected(_)) => Err(SendError::Disconnected),
        }
    }

    pub fn tap(&self) -> Result<(), SendError> {
        self.send(InputEvent::Tap)
    }

    pub fn resize(&self, width: u32, height: u32) -> Result<(), SendError> {
        self.send(InputEvent::Resize { width, height })
    }
}

/// Consumer half, owned by the simulation thread
#[derive(Debug)]
pub struct InputReceiver {
    rx: Receiver<InputEvent>,
}

impl InputReceiver {
    /// All events queued so far, oldest first. Never blocks.
    pub fn drain(&self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        events
    }
}

/// Create a bounded input queue
pub fn input_channel(capacity: usize) -> (InputSender, InputReceiver) {
    let (tx, rx) = mpsc::sync_channel(capacity.max(1));
    (InputSender { tx }, InputReceiver { rx })
}
