//! Writing reconciled postings back out.
//!
//! The snapshot file is the only durable state of the crawler: it is read at
//! the start of a run and replaced wholesale at the end. After the snapshot is
//! written, the postings are enriched with a country column and published to
//! a second file for downstream display, and a change summary is logged.
//!
//! ## Submodules
//!
//! - **snapshot**: Loading and atomically saving the JSON snapshot.
//! - **location**: Splitting the country out of the position location.
//! - **summary**: Console summary of new and updated postings.

mod location;
mod snapshot;
mod summary;

pub use location::{split_country, with_country};
pub use snapshot::{load_snapshot, save_postings};
pub use summary::{change_lines, log_summary};
