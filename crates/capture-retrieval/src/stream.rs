//! Result stream surfaced to retrieval callers.

use capture_core::CaptureError;
use capture_engines::raw::RawScanResults;
use tokio::sync::mpsc;

/// One event on a retrieval stream.
///
/// Items arrive in engine emission order per account; nothing is ordered
/// across accounts. `Complete` is terminal and fires exactly once, even
/// after a total failure.
#[derive(Debug)]
pub enum RetrievalEvent {
    /// A raw provider result.
    Item(Box<RawScanResults>),
    /// A per-item failure; the stream continues.
    Error(CaptureError),
    /// Terminal completion signal.
    Complete,
}

/// Receiving side of one retrieval operation.
#[derive(Debug)]
pub struct RetrievalStream {
    rx: mpsc::Receiver<RetrievalEvent>,
}

impl RetrievalStream {
    pub(crate) fn channel(capacity: usize) -> (mpsc::Sender<RetrievalEvent>, Self) {
        let (tx, rx) = mpsc::channel(capacity);
        (tx, Self { rx })
    }

    /// Receive the next event, or `None` once the operation has shut down
    /// after `Complete`.
    pub async fn next_event(&mut self) -> Option<RetrievalEvent> {
        self.rx.recv().await
    }

    /// Drain the stream to the end, splitting events by kind.
    pub async fn collect(mut self) -> CollectedEvents {
        let mut collected = CollectedEvents::default();
        while let Some(event) = self.next_event().await {
            match event {
                RetrievalEvent::Item(item) => collected.items.push(item),
                RetrievalEvent::Error(err) => collected.errors.push(err),
                RetrievalEvent::Complete => collected.completions += 1,
            }
        }
        collected
    }
}

/// A fully drained retrieval stream.
#[derive(Debug, Default)]
pub struct CollectedEvents {
    /// Raw results, in arrival order.
    pub items: Vec<Box<RawScanResults>>,
    /// Per-item failures, in arrival order.
    pub errors: Vec<CaptureError>,
    /// How many completion signals arrived; always exactly one.
    pub completions: u32,
}
