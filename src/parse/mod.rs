//! # Parsing Listing Pages, Detail Pages and Deadlines
//!
//! This module turns the site's loosely structured markup into typed data.
//! The listing enumerator reads the top-level listing page into candidates
//! and applies the relevance predicate; the field extractor pulls the
//! optional sections out of each detail page; the deadline parser converts
//! free-text deadlines into sort keys and calendar dates.
//!
//! Every optional section is treated as optional: missing markup yields an
//! empty value, never an error.
//!
//! ## Submodules
//!
//! - **listing**: Listing enumerator and relevance predicate.
//! - **fields**: Title and detail-page field extraction.
//! - **deadline**: Sort-key and canonical deadline parsing.
//! - **types**: Defines `Posting` and `DetailFields`.

mod deadline;
mod fields;
mod listing;
mod types;

pub use deadline::{deadline_sort_key, parse_deadline, Deadline, DeadlineKey, StatusPhrase};
pub use fields::{extract_detail_fields, extract_title};
pub use listing::{enumerate_candidates, is_relevant, NO_DEADLINE};
pub use types::{DetailFields, Posting};
