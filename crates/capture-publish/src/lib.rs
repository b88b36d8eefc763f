//! Licensing and the best-effort receipt publish pipeline.
//!
//! Two concerns live here: registering the user's licensing record with the
//! identity platform at initialization, and submitting normalized receipts
//! to the remote ingestion endpoint with bearer authentication. Publishing
//! is deliberately best-effort; see [`Publisher`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod license;
pub mod publisher;

pub use license::LicenseService;
pub use publisher::Publisher;
