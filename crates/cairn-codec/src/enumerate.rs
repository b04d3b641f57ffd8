//! The enumeration builder.
//!
//! [`build()`] runs once per environment, before the environment exists.
//! It issues exactly two queries (`enumerate_states`, `enumerate_actions`)
//! and never touches the engine's world-state. The resulting
//! [`Enumeration`] is immutable: an environment takes it by value and
//! nothing can rebuild it mid-episode.

use cairn_core::{ActionSpec, EnumerationError, SymbolicEngine, SymbolicState};
use tracing::info;

use crate::codec::{ActionCodec, StateCodec};
use crate::hash::enumeration_fingerprint;

/// The complete, index-assigned state and action sets of one engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enumeration {
    states: StateCodec,
    actions: ActionCodec,
    fingerprint: u64,
}

impl Enumeration {
    /// Assemble from already-fetched, engine-ordered lists.
    pub fn from_parts(
        states: Vec<SymbolicState>,
        actions: Vec<ActionSpec>,
    ) -> Result<Self, EnumerationError> {
        let states = StateCodec::from_states(states)?;
        let actions = ActionCodec::from_specs(actions)?;
        let fingerprint = enumeration_fingerprint(&states, &actions);
        Ok(Self {
            states,
            actions,
            fingerprint,
        })
    }

    /// The state bijection.
    pub fn states(&self) -> &StateCodec {
        &self.states
    }

    /// The action mapping.
    pub fn actions(&self) -> &ActionCodec {
        &self.actions
    }

    /// FNV-1a digest of both ordered sets. See [`enumeration_fingerprint`].
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// Split into the two codecs.
    pub fn into_codecs(self) -> (StateCodec, ActionCodec) {
        (self.states, self.actions)
    }
}

/// Query the engine once for its states and actions and index them.
///
/// # Errors
///
/// [`EnumerationError::Engine`] if either query fails (including an
/// unreachable engine), [`EnumerationError::NoStates`] /
/// [`EnumerationError::NoActions`] for an empty answer, and the duplicate
/// variants if the engine lists an entry twice.
pub fn build(engine: &mut dyn SymbolicEngine) -> Result<Enumeration, EnumerationError> {
    let states = engine.enumerate_states()?;
    let actions = engine.enumerate_actions()?;
    let enumeration = Enumeration::from_parts(states, actions)?;
    info!(
        states = enumeration.states.len(),
        actions = enumeration.actions.len(),
        fingerprint = %format!("{:#018x}", enumeration.fingerprint),
        "enumeration built"
    );
    Ok(enumeration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cairn_core::{ActionIndex, StateIndex};

    fn sample() -> Enumeration {
        Enumeration::from_parts(
            vec!["A".into(), "B".into(), "C".into()],
            vec![
                ActionSpec::new("move", ["A", "B"]),
                ActionSpec::new("move", ["B", "C"]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn into_codecs_keeps_both_bijections() {
        let enumeration = sample();
        let expected_states = enumeration.states().clone();
        let expected_actions = enumeration.actions().clone();

        let (states, actions) = enumeration.into_codecs();
        assert_eq!(states, expected_states);
        assert_eq!(actions, expected_actions);
        assert_eq!(states.len(), 3);
        assert_eq!(actions.len(), 2);
        assert_eq!(states.encode(&SymbolicState::new("C")), Ok(StateIndex(2)));
        assert_eq!(states.decode(StateIndex(1)), Some(&SymbolicState::new("B")));
        assert_eq!(
            actions.encode(ActionIndex(1)).map(|i| i.as_str()),
            Some("move(B,C)")
        );
    }

    #[test]
    fn fingerprint_follows_the_parts() {
        let reordered = Enumeration::from_parts(
            vec!["B".into(), "A".into(), "C".into()],
            vec![
                ActionSpec::new("move", ["A", "B"]),
                ActionSpec::new("move", ["B", "C"]),
            ],
        )
        .unwrap();
        assert_eq!(sample().fingerprint(), sample().fingerprint());
        assert_ne!(sample().fingerprint(), reordered.fingerprint());
    }
}
