//! The two index bijections.
//!
//! [`StateCodec`] maps `SymbolicState ⇄ StateIndex` in both directions.
//! [`ActionCodec`] maps `ActionIndex → Invocation`; the reverse lookup is
//! kept for diagnostics only, since policies always choose by index.
//!
//! Both are backed by [`IndexSet`], whose insertion order *is* the index
//! assignment. Construction rejects duplicates, so every index decodes to
//! exactly one descriptor and every descriptor encodes to exactly one
//! index.

use indexmap::IndexSet;

use cairn_core::{
    ActionIndex, ActionSpec, EnumerationError, Invocation, StateIndex, SymbolicState,
    UnknownStateError,
};

/// Bijection between enumerated symbolic states and dense indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateCodec {
    states: IndexSet<SymbolicState>,
}

impl StateCodec {
    /// Build from an engine-ordered state list.
    ///
    /// Fails on an empty list, on a repeated state, or when the list is
    /// too long for `u32` indices.
    pub fn from_states(states: Vec<SymbolicState>) -> Result<Self, EnumerationError> {
        if states.is_empty() {
            return Err(EnumerationError::NoStates);
        }
        if u32::try_from(states.len()).is_err() {
            return Err(EnumerationError::TooLarge {
                what: "states",
                count: states.len(),
            });
        }
        let mut set = IndexSet::with_capacity(states.len());
        for (pos, state) in states.into_iter().enumerate() {
            if let Some(first) = set.get_index_of(&state) {
                return Err(EnumerationError::DuplicateState {
                    state,
                    first,
                    repeat: pos,
                });
            }
            set.insert(state);
        }
        Ok(Self { states: set })
    }

    /// Index of an enumerated state.
    pub fn encode(&self, state: &SymbolicState) -> Result<StateIndex, UnknownStateError> {
        self.states
            .get_index_of(state)
            .map(|i| StateIndex(i as u32))
            .ok_or_else(|| UnknownStateError {
                state: state.clone(),
            })
    }

    /// State at an index. `None` only for an index this codec never issued.
    pub fn decode(&self, index: StateIndex) -> Option<&SymbolicState> {
        self.states.get_index(index.index())
    }

    /// Whether the state was enumerated.
    pub fn contains(&self, state: &SymbolicState) -> bool {
        self.states.contains(state)
    }

    /// Number of enumerated states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always `false` for a constructed codec; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// States in index order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (StateIndex, &SymbolicState)> {
        self.states
            .iter()
            .enumerate()
            .map(|(i, s)| (StateIndex(i as u32), s))
    }
}

/// Mapping from action indices to engine invocations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionCodec {
    specs: Vec<ActionSpec>,
    invocations: IndexSet<Invocation>,
}

impl ActionCodec {
    /// Build from an engine-ordered action list.
    ///
    /// Each action is rendered once, up front. Two actions that render to
    /// the same invocation are a duplicate, even if their specs differ.
    pub fn from_specs(specs: Vec<ActionSpec>) -> Result<Self, EnumerationError> {
        if specs.is_empty() {
            return Err(EnumerationError::NoActions);
        }
        if u32::try_from(specs.len()).is_err() {
            return Err(EnumerationError::TooLarge {
                what: "actions",
                count: specs.len(),
            });
        }
        let mut invocations = IndexSet::with_capacity(specs.len());
        for (pos, spec) in specs.iter().enumerate() {
            let (first, inserted) = invocations.insert_full(spec.invocation());
            if !inserted {
                return Err(EnumerationError::DuplicateAction {
                    invocation: spec.invocation().to_string(),
                    first,
                    repeat: pos,
                });
            }
        }
        Ok(Self { specs, invocations })
    }

    /// Invocation form of an action index.
    pub fn encode(&self, index: ActionIndex) -> Option<&Invocation> {
        self.invocations.get_index(index.index())
    }

    /// The typed action behind an index.
    pub fn spec(&self, index: ActionIndex) -> Option<&ActionSpec> {
        self.specs.get(index.index())
    }

    /// Reverse lookup of an invocation.
    pub fn lookup(&self, invocation: &Invocation) -> Option<ActionIndex> {
        self.invocations
            .get_index_of(invocation)
            .map(|i| ActionIndex(i as u32))
    }

    /// Number of enumerated actions.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Always `false` for a constructed codec; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Actions in index order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (ActionIndex, &ActionSpec, &Invocation)> {
        self.specs
            .iter()
            .zip(self.invocations.iter())
            .enumerate()
            .map(|(i, (spec, inv))| (ActionIndex(i as u32), spec, inv))
    }
}
