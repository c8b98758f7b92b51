//! Physics Postdoc Crawler Library
//!
//! This library crawls the academic job listings site for physics-adjacent
//! postdoctoral postings, fetches their detail pages concurrently, and
//! reconciles the result against the snapshot saved by the previous run.
//!

pub mod crawl;
pub mod export;
pub mod fetch;
pub mod parse;
pub mod reconcile;
pub mod utils;
