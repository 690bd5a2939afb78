//! Ordered command queue.
//!
//! Sensor, arming and image events change the alarm status differently
//! depending on the order they are applied in, so every producer funnels
//! its commands through one FIFO and a single consumer drains it into the
//! [`SecurityService`](crate::app::service::SecurityService).
//!
//! ```text
//! ┌─────────────┐     ┌───────────────┐     ┌──────────────────┐
//! │ Sensor feed │────▶│               │     │                  │
//! │ Camera feed │────▶│ CommandQueue  │────▶│ SecurityService  │
//! │ Console/UI  │────▶│ (bounded FIFO)│     │ (single consumer)│
//! └─────────────┘     └───────────────┘     └──────────────────┘
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

use heapless::Deque;
use log::warn;

use crate::app::commands::SecurityCommand;
use crate::error::{Error, Result};

/// Maximum number of pending commands.
pub const COMMAND_QUEUE_CAP: usize = 32;

/// Multi-producer, single-consumer FIFO of controller commands.
///
/// `push` may be called from any thread; commands come out of `pop` and
/// `drain` in exactly the order they were accepted.
pub struct CommandQueue {
    inner: Mutex<Deque<SecurityCommand, COMMAND_QUEUE_CAP>>,
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandQueue {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Deque::new()),
        }
    }

    /// Push a command onto the back of the queue.
    /// Returns `false` if the queue is full (command dropped).
    pub fn push(&self, cmd: SecurityCommand) -> bool {
        if self.lock().push_back(cmd).is_err() {
            warn!("Command queue full, dropping command");
            return false;
        }
        true
    }

    /// Like [`push`](Self::push), but reports a full queue as [`Error::QueueFull`].
    pub fn submit(&self, cmd: SecurityCommand) -> Result<()> {
        if self.push(cmd) {
            Ok(())
        } else {
            Err(Error::QueueFull)
        }
    }

    /// Pop the oldest command, or `None` if the queue is empty.
    pub fn pop(&self) -> Option<SecurityCommand> {
        self.lock().pop_front()
    }

    /// Process every pending command in FIFO order.
    ///
    /// The lock is released between commands, so producers can keep
    /// pushing while the handler runs; those commands are drained too.
    pub fn drain(&self, mut handler: impl FnMut(SecurityCommand)) {
        while let Some(cmd) = self.pop() {
            handler(cmd);
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panicking producer cannot leave the deque half-written, so a
    // poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, Deque<SecurityCommand, COMMAND_QUEUE_CAP>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
