//! # Fetching Listing and Detail Pages
//!
//! This module retrieves markup from the listings site. The listing page is
//! fetched once per run; detail pages are fetched concurrently by the
//! dispatcher, bounded by a semaphore, with each candidate isolated so that a
//! single failure only drops that candidate.
//!
//! ## Usage
//!
//! Build an `HttpPageSource`, fetch the listing with `fetch_listing`, then
//! hand the relevant `Candidate`s to `dispatch_candidates`.
//!
//! ## Submodules
//!
//! - **client**: The `PageSource` seam and its `reqwest` implementation.
//! - **dispatcher**: Bounded concurrent fetch-and-extract of detail pages.
//! - **types**: Defines the `Candidate` produced by the listing enumerator.

mod client;
mod dispatcher;
mod types;

pub use client::{absolute_url, fetch_listing, HttpPageSource, PageSource, DEFAULT_TIMEOUT};
pub use dispatcher::{dispatch_candidates, DEFAULT_CONCURRENCY};
pub use types::Candidate;
