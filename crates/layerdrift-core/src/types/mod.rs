pub mod collections;
pub mod identifiers;
