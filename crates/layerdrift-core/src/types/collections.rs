//! Hash collections used across the workspace.
//!
//! FxHash is not DoS-resistant, which is fine for in-process analysis of a
//! single repository. Never iterate these where output order matters; sort or
//! use a `BTreeMap` instead.

pub use rustc_hash::{FxHashMap, FxHashSet};
