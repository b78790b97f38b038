//! Background scan worker and its message channel.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::engine::{ScanEngine, ScanProgress};
use super::exclusion::ExclusionSet;
use super::item::Item;

/// How often a controller should call [`ScanSession::poll`].
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// What to scan.
#[derive(Debug, Clone)]
pub enum ScanRequest {
    System {
        exclusions: ExclusionSet,
    },
    Folder {
        root: PathBuf,
        max_depth: usize,
        exclusions: ExclusionSet,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanStatus {
    Completed,
    Failed(String),
}

/// Final outcome of one scan.
#[derive(Debug, Clone)]
pub struct ScanResult {
    pub items: Vec<Item>,
    pub status: ScanStatus,
}

impl ScanResult {
    pub fn completed(items: Vec<Item>) -> Self {
        Self {
            items,
            status: ScanStatus::Completed,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            status: ScanStatus::Failed(message.into()),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == ScanStatus::Completed
    }
}

/// Message sent from the worker. Every scan sends zero or more
/// `Progress` messages followed by exactly one `Complete`.
#[derive(Debug, Clone)]
pub enum ScanMessage {
    Progress(ScanProgress),
    Complete(ScanResult),
}

/// Runs at most one scan at a time on a background thread.
pub struct ScanSession {
    engine: Arc<ScanEngine>,
    rx: Option<Receiver<ScanMessage>>,
    worker: Option<JoinHandle<()>>,
    in_flight: bool,
}

impl ScanSession {
    pub fn new(engine: Arc<ScanEngine>) -> Self {
        Self {
            engine,
            rx: None,
            worker: None,
            in_flight: false,
        }
    }

    pub fn engine(&self) -> &Arc<ScanEngine> {
        &self.engine
    }

    pub fn is_scanning(&self) -> bool {
        self.in_flight
    }

    /// Start a scan on a new worker thread.
    ///
    /// Returns false, leaving the running scan untouched, if one is already
    /// in flight.
    pub fn start(&mut self, request: ScanRequest) -> bool {
        if self.in_flight {
            tracing::warn!("Scan already in progress, ignoring request");
            return false;
        }

        let (tx, rx) = mpsc::channel();
        let engine = Arc::clone(&self.engine);
        // Workers log through the caller's subscriber
        let dispatch = tracing::dispatcher::get_default(|d| d.clone());

        let spawned = thread::Builder::new()
            .name("scan-worker".into())
            .spawn(move || {
                tracing::dispatcher::with_default(&dispatch, || run_scan(&engine, request, tx))
            });

        match spawned {
            Ok(handle) => {
                self.rx = Some(rx);
                self.worker = Some(handle);
                self.in_flight = true;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to spawn scan worker");
                false
            }
        }
    }

    /// Drain every message currently queued, without blocking.
    ///
    /// A `Complete` result has its items sorted by size, largest first,
    /// and ends the scan.
    pub fn poll(&mut self) -> Vec<ScanMessage> {
        let mut messages = Vec::new();
        let mut finished = false;

        if let Some(rx) = &self.rx {
            loop {
                match rx.try_recv() {
                    Ok(ScanMessage::Complete(mut result)) => {
                        result.items.sort_by(|a, b| b.bytes().cmp(&a.bytes()));
                        messages.push(ScanMessage::Complete(result));
                        finished = true;
                        break;
                    }
                    Ok(message) => messages.push(message),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        tracing::error!("Scan worker exited without a result");
                        finished = true;
                        break;
                    }
                }
            }
        }

        if finished {
            self.finish();
        }
        messages
    }

    /// Poll until the current scan completes, forwarding progress.
    ///
    /// Returns `None` when no scan is running.
    pub fn wait(&mut self, mut on_progress: impl FnMut(&ScanProgress)) -> Option<ScanResult> {
        while self.in_flight {
            for message in self.poll() {
                match message {
                    ScanMessage::Progress(p) => on_progress(&p),
                    ScanMessage::Complete(result) => return Some(result),
                }
            }
            if self.in_flight {
                thread::sleep(POLL_INTERVAL);
            }
        }
        None
    }

    fn finish(&mut self) {
        self.rx = None;
        self.in_flight = false;
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                tracing::error!("Scan worker panicked");
            }
        }
    }
}

fn run_scan(engine: &ScanEngine, request: ScanRequest, tx: Sender<ScanMessage>) {
    let progress_tx = tx.clone();
    let progress = move |p: ScanProgress| {
        let _ = progress_tx.send(ScanMessage::Progress(p));
    };

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| match &request {
        ScanRequest::System { exclusions } => engine.scan_system(exclusions, progress),
        ScanRequest::Folder {
            root,
            max_depth,
            exclusions,
        } => engine.scan_folder(root, *max_depth, exclusions, progress),
    }));

    let result = match outcome {
        Ok(items) => ScanResult::completed(items),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::error!(error = %message, "Scan failed");
            ScanResult::failed(message)
        }
    };

    let _ = tx.send(ScanMessage::Complete(result));
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "scan worker panicked".to_string()
    }
}
