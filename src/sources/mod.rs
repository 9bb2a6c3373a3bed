//! Settings file sources.

mod file;

pub use file::FileSource;
