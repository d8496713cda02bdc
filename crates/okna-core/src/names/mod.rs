//! Persistent window names.
//!
//! Names are keyed by window handle. Handles die with their windows, so the
//! store drops stale entries every time it loads.

pub mod errors;
pub mod persistence;
pub mod store;

pub use errors::NameStoreError;
pub use store::NameStore;
