//! Background execution of batch runs.
//!
//! A [`Runner`] starts each run on its own thread and reports through a
//! channel, so a caller can stay responsive while rows are processed. At most
//! one run per runner is active at a time; there is no cancellation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use tracing::warn;
use xl2sql_model::ProcessingResult;

use crate::error::{ProcessError, Result};
use crate::processor::{BatchProcessor, RunRequest};
use crate::progress::ProgressSink;

/// Message sent from the worker thread.
#[derive(Debug)]
pub enum RunEvent {
    Progress(u8),
    Status(String),
    /// Final message of every run.
    Finished(Result<ProcessingResult>),
}

struct ChannelSink {
    sender: Sender<RunEvent>,
    last_percent: Option<u8>,
}

impl ProgressSink for ChannelSink {
    fn progress(&mut self, percent: u8) {
        // Repeated percentages carry no information for the receiver.
        if self.last_percent == Some(percent) {
            return;
        }
        self.last_percent = Some(percent);
        let _ = self.sender.send(RunEvent::Progress(percent));
    }

    fn status(&mut self, message: &str) {
        let _ = self.sender.send(RunEvent::Status(message.to_string()));
    }
}

/// Clears the active flag when the worker finishes, even on panic.
struct ActiveGuard(Arc<AtomicBool>);

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Starts runs in the background, one at a time.
#[derive(Debug, Clone, Default)]
pub struct Runner {
    active: Arc<AtomicBool>,
}

impl Runner {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a started run has not finished.
    pub fn is_running(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Spawns a worker for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::RunInProgress`] if a run is still active.
    pub fn start(&self, request: RunRequest) -> Result<RunHandle> {
        if self
            .active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("rejected run request while another run is active");
            return Err(ProcessError::RunInProgress);
        }
        let guard = ActiveGuard(Arc::clone(&self.active));
        let (sender, receiver) = mpsc::channel();
        let worker = thread::Builder::new()
            .name("xl2sql-run".to_string())
            .spawn(move || {
                let _guard = guard;
                let mut sink = ChannelSink {
                    sender: sender.clone(),
                    last_percent: None,
                };
                let result = BatchProcessor::new(request).run(&mut sink);
                let _ = sender.send(RunEvent::Finished(result));
            });
        match worker {
            Ok(worker) => Ok(RunHandle {
                events: receiver,
                worker: Some(worker),
            }),
            Err(_) => {
                // The closure (and its guard) was dropped, clearing the flag.
                Err(ProcessError::WorkerDisconnected)
            }
        }
    }
}

/// Receiving end of a background run.
#[derive(Debug)]
pub struct RunHandle {
    events: Receiver<RunEvent>,
    worker: Option<JoinHandle<()>>,
}

impl RunHandle {
    /// Blocks until the run finishes, passing progress and status to `sink`.
    pub fn wait(mut self, sink: &mut dyn ProgressSink) -> Result<ProcessingResult> {
        let mut outcome = Err(ProcessError::WorkerDisconnected);
        for event in self.events.iter() {
            match event {
                RunEvent::Progress(percent) => sink.progress(percent),
                RunEvent::Status(message) => sink.status(&message),
                RunEvent::Finished(result) => {
                    outcome = result;
                    break;
                }
            }
        }
        if let Some(worker) = self.worker.take()
            && worker.join().is_err()
        {
            return Err(ProcessError::WorkerDisconnected);
        }
        outcome
    }
}
