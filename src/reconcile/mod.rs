//! # Reconciling a Crawl Against the Previous Snapshot
//!
//! Fresh postings and snapshot postings are both normalized, then every
//! fresh posting is classified as new, updated or unchanged by its id. The
//! result is the complete next snapshot plus the per-class id lists used for
//! reporting. Postings that disappeared from the listing are pruned.
//!
//! ## Submodules
//!
//! - **normalize**: Canonical form of a posting (trimmed strings, sorted materials).
//! - **engine**: The reconciliation pass and deadline ordering.
//! - **types**: Defines `Snapshot`, `Classification` and `ReconcileReport`.

mod engine;
mod normalize;
mod types;

pub use engine::{reconcile, sort_by_deadline};
pub use normalize::normalize_posting;
pub use types::{Classification, ReconcileReport, Snapshot};
