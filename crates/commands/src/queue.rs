use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::command::{Command, QueuedCommand};

/// Thread-safe, order-preserving buffer of pending commands.
///
/// The queue is the only resource shared between submitter threads and the
/// step thread. Both operations are short critical sections: a push appends
/// one element, a drain swaps the whole buffer out.
///
/// # Invariants
/// - Sequences are assigned under the buffer lock, so append order equals
///   sequence order and no two commands ever share a sequence.
/// - `drain_all` takes the entire buffer in one indivisible operation; a push
///   that starts after the drain began lands in the next batch.
#[derive(Debug, Default)]
pub struct CommandQueue {
    buffer: Mutex<Vec<QueuedCommand>>,
    next_sequence: AtomicU64,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command, assigning the next sequence. Returns the assigned
    /// sequence. Never blocks beyond the buffer lock.
    pub fn push(&self, command: Command) -> u64 {
        let mut buffer = self.buffer.lock();
        let sequence = self.next_sequence.fetch_add(1, Ordering::Relaxed);
        buffer.push(QueuedCommand { sequence, command });
        sequence
    }

    /// Remove and return the entire current contents as one atomic snapshot,
    /// in sequence order.
    pub fn drain_all(&self) -> Vec<QueuedCommand> {
        std::mem::take(&mut *self.buffer.lock())
    }

    /// Number of commands currently queued.
    pub fn len(&self) -> usize {
        self.buffer.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
