//! Cancellable frame scheduling.
//!
//! The animation loop is a repeating task: every tick asks the scheduler
//! for the next frame and receives a [`FrameToken`] for it. Cancelling
//! the pending token is the only way to end the loop.

/// Handle for one scheduled frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameToken(u64);

impl FrameToken {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Display-synchronized scheduler seam.
pub trait FrameScheduler {
    /// Requests a callback at the next display refresh.
    fn schedule(&mut self) -> FrameToken;

    /// Withdraws a request; unknown or already delivered tokens are ignored.
    fn cancel(&mut self, token: FrameToken);
}

/// Queue-backed scheduler for hosts that poll once per refresh.
///
/// The host calls [`FrameQueue::take_due`] at every refresh and delivers
/// the returned tokens back to the simulator.
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    due: Vec<FrameToken>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains every token requested since the last refresh.
    pub fn take_due(&mut self) -> Vec<FrameToken> {
        std::mem::take(&mut self.due)
    }

    pub fn pending_len(&self) -> usize {
        self.due.len()
    }

    pub fn is_idle(&self) -> bool {
        self.due.is_empty()
    }
}

impl FrameScheduler for FrameQueue {
    fn schedule(&mut self) -> FrameToken {
        let token = FrameToken(self.next_id);
        self.next_id += 1;
        self.due.push(token);
        token
    }

    fn cancel(&mut self, token: FrameToken) {
        self.due.retain(|t| *t != token);
    }
}
