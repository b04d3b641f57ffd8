//! Strongly-typed dense indices for states and actions.

use std::fmt;

/// Dense index of a symbolic state within one enumeration.
///
/// `StateIndex(n)` is the n-th state returned by the engine's state
/// enumeration. Indices are only meaningful against the codec that
/// issued them; they are never invented by the environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateIndex(pub u32);

impl StateIndex {
    /// The index as a `usize`, for slice addressing.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for StateIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for StateIndex {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Dense index of a parameterized action within one enumeration.
///
/// `ActionIndex(n)` is the n-th action returned by the engine's action
/// enumeration. This is the integer an RL policy emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionIndex(pub u32);

impl ActionIndex {
    /// The index as a `usize`, for slice addressing.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ActionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ActionIndex {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
