// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Background highlight worker.
//!
//! Input notifications can arrive faster than highlighting completes on
//! large documents. The worker owns a [`HighlightingService`] on its own
//! thread, takes text snapshots over a channel and always highlights the
//! newest one, dropping revisions that were superseded while it was busy.
//! Requests are processed one at a time, in revision order.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError};

use crate::editor::config::EditorConfig;
use crate::editor::session::HighlightLayer;
use crate::error::{Error, Result};
use crate::syntax::HighlightingService;

/// A snapshot of the text to highlight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightRequest {
    /// Caller-assigned revision, increasing with every edit
    pub revision: u64,
    /// The full text at that revision
    pub text: String,
}

/// The rendered layer for one revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightResponse {
    /// Revision of the request this answers
    pub revision: u64,
    /// Rendered markup and gutter
    pub layer: HighlightLayer,
}

/// Handle to a running highlight worker thread.
///
/// Dropping the handle stops the worker and waits for it to exit.
#[derive(Debug)]
pub struct HighlightWorker {
    requests: Option<Sender<HighlightRequest>>,
    responses: Receiver<HighlightResponse>,
    handle: Option<JoinHandle<()>>,
}

impl HighlightWorker {
    /// Starts a worker thread.
    pub fn spawn(config: EditorConfig) -> Result<Self> {
        let (request_tx, request_rx) = crossbeam_channel::unbounded();
        let (response_tx, response_rx) = crossbeam_channel::unbounded();

        let handle = thread::Builder::new()
            .name("highlight-worker".to_string())
            .spawn(move || run_worker(config, request_rx, response_tx))
            .map_err(Error::WorkerSpawn)?;

        tracing::debug!("highlight worker started");
        Ok(Self { requests: Some(request_tx), responses: response_rx, handle: Some(handle) })
    }

    /// Queues `text` for highlighting as `revision`.
    pub fn submit(&self, revision: u64, text: impl Into<String>) -> Result<()> {
        let requests = self.requests.as_ref().ok_or(Error::WorkerDisconnected)?;
        requests
            .send(HighlightRequest { revision, text: text.into() })
            .map_err(|_| Error::WorkerDisconnected)
    }

    /// Waits for the next response.
    pub fn recv(&self) -> Result<HighlightResponse> {
        self.responses.recv().map_err(|_| Error::WorkerDisconnected)
    }

    /// Waits up to `timeout` for the next response.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<HighlightResponse>> {
        match self.responses.recv_timeout(timeout) {
            Ok(response) => Ok(Some(response)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(Error::WorkerDisconnected),
        }
    }

    /// Returns the newest response already available, discarding older ones.
    pub fn latest(&self) -> Result<Option<HighlightResponse>> {
        let mut latest = None;
        loop {
            match self.responses.try_recv() {
                Ok(response) => latest = Some(response),
                Err(TryRecvError::Empty) => return Ok(latest),
                Err(TryRecvError::Disconnected) => {
                    return latest.map(Some).ok_or(Error::WorkerDisconnected);
                }
            }
        }
    }

    /// Stops the worker and waits for it to exit. Calling it again is a no-op.
    pub fn shutdown(&mut self) -> Result<()> {
        // Closing the request channel ends the worker loop.
        self.requests.take();
        match self.handle.take() {
            Some(handle) => {
                handle.join().map_err(|_| Error::WorkerPanicked)?;
                tracing::debug!("highlight worker stopped");
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl Drop for HighlightWorker {
    fn drop(&mut self) {
        if let Err(err) = self.shutdown() {
            tracing::warn!(%err, "highlight worker did not stop cleanly");
        }
    }
}

fn run_worker(config: EditorConfig, requests: Receiver<HighlightRequest>, responses: Sender<HighlightResponse>) {
    let mut service = HighlightingService::new();
    service.set_enabled(config.highlighting_enabled);

    while let Ok(mut request) = requests.recv() {
        let mut superseded = 0usize;
        while let Ok(newer) = requests.try_recv() {
            request = newer;
            superseded += 1;
        }
        if superseded > 0 {
            tracing::debug!(superseded, revision = request.revision, "skipped stale revisions");
        }

        let layer = HighlightLayer::build(&mut service, &request.text, &config);
        if responses.send(HighlightResponse { revision: request.revision, layer }).is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::highlight;

    const TIMEOUT: Duration = Duration::from_secs(10);

    #[test]
    fn test_single_request() {
        let worker = HighlightWorker::spawn(EditorConfig::new()).unwrap();
        worker.submit(1, "x = 5").unwrap();

        let response = worker.recv_timeout(TIMEOUT).unwrap().expect("response");
        assert_eq!(response.revision, 1);
        assert_eq!(response.layer.markup, format!("{}<br>&nbsp;", highlight("x = 5")));
        assert_eq!(response.layer.line_numbers, "1");
    }

    #[test]
    fn test_newest_revision_always_answered() {
        let worker = HighlightWorker::spawn(EditorConfig::new()).unwrap();
        let mut text = String::new();
        for revision in 1..=50u64 {
            text.push_str("a = a + 1\n");
            worker.submit(revision, text.clone()).unwrap();
        }

        let mut last_revision = 0;
        while last_revision < 50 {
            let response = worker.recv_timeout(TIMEOUT).unwrap().expect("response");
            assert!(response.revision > last_revision, "responses must be in revision order");
            last_revision = response.revision;
            if last_revision == 50 {
                assert_eq!(response.layer.line_numbers.lines().count(), 51);
            }
        }
    }

    #[test]
    fn test_latest_discards_older_responses() {
        let worker = HighlightWorker::spawn(EditorConfig::new()).unwrap();
        worker.submit(1, "a").unwrap();
        let first = worker.recv_timeout(TIMEOUT).unwrap();
        assert!(first.is_some());

        assert_eq!(worker.latest().unwrap(), None);
        worker.submit(2, "b").unwrap();
        let second = worker.recv_timeout(TIMEOUT).unwrap().expect("response");
        assert_eq!(second.revision, 2);
    }

    #[test]
    fn test_disabled_worker_escapes() {
        let worker = HighlightWorker::spawn(EditorConfig::disabled()).unwrap();
        worker.submit(7, "a < b").unwrap();
        let response = worker.recv().unwrap();
        assert_eq!(response.layer.markup, "a &lt; b<br>&nbsp;");
    }

    #[test]
    fn test_submit_after_shutdown() {
        let mut worker = HighlightWorker::spawn(EditorConfig::new()).unwrap();
        worker.shutdown().unwrap();
        worker.shutdown().unwrap();

        assert!(matches!(worker.submit(1, "x"), Err(Error::WorkerDisconnected)));
        assert!(matches!(worker.recv(), Err(Error::WorkerDisconnected)));
        assert!(matches!(worker.latest(), Err(Error::WorkerDisconnected)));
    }
}
