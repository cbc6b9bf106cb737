//! Background execution for slow color filters.
//!
//! Gaussian and median blur can take long enough to stall an interactive
//! thread. [`FilterWorker`] runs them on a dedicated rayon pool and reports
//! the result through a callback ([`FilterWorker::submit`]) or a waitable
//! handle ([`FilterWorker::spawn`]). Tasks cannot be cancelled; once started
//! a filter runs to completion.
//!
//! Each task owns its input buffer. To run two filters on the same image,
//! submit a copy to each.

use crate::buffer::PixelBuffer;
use crate::dispatch::{apply_filter, FilterKind};
use crate::error::{EngineError, Result};
use crate::FilterSettings;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::mpsc::{self, Receiver};

/// A thread pool dedicated to filter work.
pub struct FilterWorker {
    pool: ThreadPool,
}

impl FilterWorker {
    /// Create a worker with `threads` threads. `0` picks rayon's default
    /// (one per logical CPU).
    pub fn new(threads: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("filterlab-worker-{i}"))
            .build()
            .map_err(|e| EngineError::WorkerUnavailable(e.to_string()))?;
        Ok(Self { pool })
    }

    /// Number of threads in the pool.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Run `kind` on `buffer` in the background and hand the result to
    /// `on_done` on a worker thread.
    pub fn submit<F>(
        &self,
        kind: FilterKind,
        buffer: PixelBuffer,
        settings: FilterSettings,
        on_done: F,
    ) where
        F: FnOnce(Result<PixelBuffer>) + Send + 'static,
    {
        log::trace!(
            "queueing {} filter for {}x{} image",
            kind,
            buffer.width(),
            buffer.height()
        );
        self.pool
            .spawn(move || on_done(apply_filter(kind, &buffer, &settings)));
    }

    /// Run `kind` on `buffer` in the background and return a handle to the
    /// result.
    pub fn spawn(&self, kind: FilterKind, buffer: PixelBuffer, settings: FilterSettings) -> FilterTask {
        let (tx, rx) = mpsc::channel();
        self.submit(kind, buffer, settings, move |result| {
            // The receiver may already be gone if the caller dropped the task.
            let _ = tx.send(result);
        });
        FilterTask { rx }
    }
}

/// Handle to a filter running on a [`FilterWorker`].
pub struct FilterTask {
    rx: Receiver<Result<PixelBuffer>>,
}

impl FilterTask {
    /// Block until the filter finishes.
    pub fn wait(self) -> Result<PixelBuffer> {
        self.rx.recv().unwrap_or_else(|_| {
            Err(EngineError::WorkerUnavailable(
                "worker stopped before the filter finished".to_string(),
            ))
        })
    }

    /// Return the result if the filter has finished, without blocking.
    pub fn try_result(&self) -> Option<Result<PixelBuffer>> {
        self.rx.try_recv().ok()
    }
}
