//! Frame scheduling seam between the engine and its host.
//!
//! The engine never drives itself. After each tick it asks a
//! [`TickScheduler`] for one more callback and remembers the returned
//! [`TickHandle`]; the host later delivers that handle back through
//! [`SimulationEngine::fire`](crate::engine::SimulationEngine::fire).
//! Pausing or resetting cancels the outstanding handle.

use std::collections::VecDeque;

use serde::Serialize;

/// Identifies one requested tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct TickHandle(u64);

impl TickHandle {
    pub const fn id(self) -> u64 {
        self.0
    }
}

pub trait TickScheduler {
    /// Requests one tick on the next frame.
    fn schedule_tick(&mut self) -> TickHandle;

    /// Withdraws a requested tick. Unknown or already delivered handles are
    /// ignored.
    fn cancel_tick(&mut self, handle: TickHandle);
}

/// FIFO scheduler drained explicitly by the caller, one tick per frame.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    queue: VecDeque<TickHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns the oldest outstanding tick.
    pub fn next_due(&mut self) -> Option<TickHandle> {
        self.queue.pop_front()
    }

    pub fn peek(&self) -> Option<TickHandle> {
        self.queue.front().copied()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule_tick(&mut self) -> TickHandle {
        let handle = TickHandle(self.next_id);
        self.next_id += 1;
        self.queue.push_back(handle);
        handle
    }

    fn cancel_tick(&mut self, handle: TickHandle) {
        self.queue.retain(|queued| *queued != handle);
    }
}
