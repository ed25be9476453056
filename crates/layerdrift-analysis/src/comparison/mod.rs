//! Snapshot comparison.

pub mod comparator;

pub use comparator::compare;
