use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;

/// Receiver of pass progress, as an integer percentage in `0..=100`
///
/// Implemented for closures, for `mpsc` senders and for [`NoProgress`].
pub trait ProgressSink: Sync {
    /// Called by the driver before each column and once on completion.
    fn report(&self, percent: u8);
}

impl<F> ProgressSink for F
where
    F: Fn(u8) + Sync,
{
    fn report(&self, percent: u8) {
        self(percent);
    }
}

impl ProgressSink for Sender<u8> {
    fn report(&self, percent: u8) {
        // A dropped receiver only means nobody is watching anymore.
        let _ = self.send(percent);
    }
}

/// Progress sink that discards every report
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _percent: u8) {}
}

/// Cooperative cancellation flag
///
/// Clones share the same flag. The driver checks it once per column, so a
/// request takes effect at the next column boundary.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation of every pass observing this token.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// Maps column progress of one stage onto a slice of the overall `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ProgressSpan {
    start: f32,
    length: f32,
}

impl ProgressSpan {
    pub(crate) const FULL: Self = Self {
        start: 0.0,
        length: 100.0,
    };

    /// Stage `index` of `count` equal stages.
    pub(crate) fn stage(index: u32, count: u32) -> Self {
        let length = 100.0 / count as f32;
        Self {
            start: length * index as f32,
            length,
        }
    }

    /// Percentage reported before processing `column` of `width`.
    pub(crate) fn percent(&self, column: u32, width: u32) -> u8 {
        let fraction = column as f32 / width as f32;
        (self.start + fraction * self.length) as u8
    }
}
