//! In-memory application state kept in step with the repository.
//!
//! [`Tracker`] is the single writer: it writes through to the
//! [`Repository`](crate::repository::Repository) and applies a
//! [`CacheUpdate`] only after the write succeeded.

mod operations;
mod tracker;
mod views;

pub use operations::{apply_update, Cache, CacheUpdate};
pub use tracker::{LoadState, Tracker};
pub use views::{events_in_category, events_newest_first, Progress};
