//! # Utility Functions for Postings
//!
//! General helpers shared across the pipeline.
//!
//! ## Submodules
//!
//! - **digest**: SHA-256 content digests of postings, used when reporting changes.

mod digest;

pub use digest::posting_digest;
