//! Utilities for testing code that consumes decoded rows.

/// Builders for cursors, descriptors and raw cells.
pub mod test_helpers;

pub use test_helpers::*;
