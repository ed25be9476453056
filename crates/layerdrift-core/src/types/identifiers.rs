//! Arena identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Index of a module inside one graph's node arena.
///
/// Only meaningful for the graph that issued it. Node ids are assigned in
/// ascending module-id order, so comparing two `NodeId`s of the same graph
/// compares the underlying module ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn from_index(index: usize) -> Self {
        Self(index as u32)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}
