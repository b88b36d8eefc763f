//! Canonical receipt stream handed to SDK callers.

use capture_core::CaptureError;
use capture_receipt::Receipt;
use tokio::sync::mpsc;

/// One event on a receipt stream.
#[derive(Debug)]
pub enum ReceiptEvent {
    /// A normalized canonical receipt.
    Receipt(Box<Receipt>),
    /// A per-item failure; the stream continues.
    Error(CaptureError),
    /// Terminal completion signal, fired exactly once.
    Complete,
}

/// Receiving side of one SDK retrieval operation, already normalized.
#[derive(Debug)]
pub struct ReceiptStream {
    rx: mpsc::Receiver<ReceiptEvent>,
}

impl ReceiptStream {
    pub(crate) fn channel(capacity: usize) -> (mpsc::Sender<ReceiptEvent>, Self) {
        let (tx, rx) = mpsc::channel(capacity);
        (tx, Self { rx })
    }

    /// Receive the next event, or `None` once the operation has shut down
    /// after `Complete`.
    pub async fn next_event(&mut self) -> Option<ReceiptEvent> {
        self.rx.recv().await
    }

    /// Drain the stream to the end, splitting events by kind.
    pub async fn collect(mut self) -> CollectedReceipts {
        let mut collected = CollectedReceipts::default();
        while let Some(event) = self.next_event().await {
            match event {
                ReceiptEvent::Receipt(receipt) => collected.receipts.push(receipt),
                ReceiptEvent::Error(err) => collected.errors.push(err),
                ReceiptEvent::Complete => collected.completions += 1,
            }
        }
        collected
    }
}

/// A fully drained receipt stream.
#[derive(Debug, Default)]
pub struct CollectedReceipts {
    /// Canonical receipts, in arrival order.
    pub receipts: Vec<Box<Receipt>>,
    /// Per-item failures, in arrival order.
    pub errors: Vec<CaptureError>,
    /// How many completion signals arrived; always exactly one.
    pub completions: u32,
}
