//! Record collections and their on-disk files.
//!
//! Each collection is a keyed set of JSON records persisted as a single
//! checksummed file that is replaced atomically on every write.

mod collection;
mod file;

pub use collection::{Collection, KeyPath, RecordKey, Records};
pub use file::CollectionFile;
