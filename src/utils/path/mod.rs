//! Path utilities.
//!
//! Pure functions for path manipulation.
//!
//! - [`fs`]: Filesystem path normalization (`normalize_path`, `resolve_file`)

pub mod fs;

pub use fs::{normalize_path, resolve_file};
