//! Runs a filter pass on a background thread.
//!
//! The pass owns its filter and shares the source image through an `Arc`;
//! progress arrives on a channel and cancellation goes through the handle's
//! token.

use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use image::Rgb;
use tracing::debug;

use crate::error::Error;
use crate::filters::filter::{Filter, PassOutcome};
use crate::filters::progress::CancelToken;
use crate::Image;

/// Handle to a pass running on its own thread
#[derive(Debug)]
pub struct PassHandle {
    progress: Receiver<u8>,
    cancel: CancelToken,
    thread: JoinHandle<Result<PassOutcome, Error>>,
}

impl PassHandle {
    /// Progress percentages in the order the pass reported them.
    ///
    /// The channel disconnects once the pass has finished.
    pub fn progress(&self) -> &Receiver<u8> {
        &self.progress
    }

    /// Requests cancellation; the pass stops at its next column boundary.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Waits for the pass to finish.
    ///
    /// # Errors
    ///
    /// * `Error::WorkerPanicked` - If the worker thread panicked
    /// * Any error returned by [`Filter::process`]
    pub fn join(self) -> Result<PassOutcome, Error> {
        self.thread.join().map_err(|_| Error::WorkerPanicked)?
    }
}

/// Starts `filter` over `source` on a new thread.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
///
/// use imageops_filters::{spawn_pass, Image, InvertFilter};
/// use image::Rgb;
///
/// let source: Arc<Image<Rgb<u8>>> = Arc::new(Image::from_pixel(8, 8, Rgb([0, 0, 0])));
/// let handle = spawn_pass(Box::new(InvertFilter), Arc::clone(&source));
/// let output = handle.join().unwrap().into_image().unwrap();
/// assert_eq!(output.get_pixel(3, 3), &Rgb([255, 255, 255]));
/// ```
pub fn spawn_pass(filter: Box<dyn Filter>, source: Arc<Image<Rgb<u8>>>) -> PassHandle {
    let (sender, progress) = mpsc::channel();
    let cancel = CancelToken::new();
    let token = cancel.clone();

    debug!(filter = filter.name(), "spawning filter worker");
    let thread = thread::spawn(move || filter.process(&source, &sender, &token));

    PassHandle {
        progress,
        cancel,
        thread,
    }
}
