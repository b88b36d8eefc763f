//! Retrieval orchestration: scan and scrape operations fanning provider
//! engine output into ordered-by-arrival result streams.

pub mod orchestrator;
pub mod stream;

pub use orchestrator::RetrievalOrchestrator;
pub use stream::{CollectedEvents, RetrievalEvent, RetrievalStream};
