//! Fingerprinting of an enumeration.
//!
//! Uses FNV-1a for a fast, deterministic 64-bit digest of both ordered
//! index sets. Not cryptographically secure: the digest exists so that a
//! policy trained against one enumeration can detect that the live engine
//! now enumerates differently.

use crate::codec::{ActionCodec, StateCodec};

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

/// Tags folded in before each section so states and actions cannot alias.
const STATES_TAG: u8 = 0x53;
const ACTIONS_TAG: u8 = 0x41;

#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

#[inline]
fn fnv1a_u64(mut hash: u64, v: u64) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

/// Length-prefixed, so `["ab", "c"]` and `["a", "bc"]` differ.
#[inline]
fn fnv1a_str(mut hash: u64, s: &str) -> u64 {
    hash = fnv1a_u64(hash, s.len() as u64);
    for &b in s.as_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

/// Digest of both codecs, in index order.
///
/// Equal for two enumerations with the same states and invocations in the
/// same order. Reordering, adding, or removing an entry changes it.
pub fn enumeration_fingerprint(states: &StateCodec, actions: &ActionCodec) -> u64 {
    let mut hash = fnv1a_byte(FNV_OFFSET, STATES_TAG);
    hash = fnv1a_u64(hash, states.len() as u64);
    for (_, state) in states.iter() {
        hash = fnv1a_str(hash, state.as_str());
    }

    hash = fnv1a_byte(hash, ACTIONS_TAG);
    hash = fnv1a_u64(hash, actions.len() as u64);
    for (_, _, invocation) in actions.iter() {
        hash = fnv1a_str(hash, invocation.as_str());
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use cairn_core::{ActionSpec, SymbolicState};

    fn codecs(states: &[&str], actions: &[&str]) -> (StateCodec, ActionCodec) {
        let s = StateCodec::from_states(states.iter().map(|t| SymbolicState::new(*t)).collect())
            .unwrap();
        let a = ActionCodec::from_specs(
            actions
                .iter()
                .map(|n| ActionSpec::new(*n, Vec::<String>::new()))
                .collect(),
        )
        .unwrap();
        (s, a)
    }

    #[test]
    fn same_enumeration_same_fingerprint() {
        let (s1, a1) = codecs(&["A", "B", "C"], &["x", "y"]);
        let (s2, a2) = codecs(&["A", "B", "C"], &["x", "y"]);
        assert_eq!(
            enumeration_fingerprint(&s1, &a1),
            enumeration_fingerprint(&s2, &a2)
        );
    }

    #[test]
    fn order_matters() {
        let (s1, a1) = codecs(&["A", "B"], &["x"]);
        let (s2, a2) = codecs(&["B", "A"], &["x"]);
        assert_ne!(
            enumeration_fingerprint(&s1, &a1),
            enumeration_fingerprint(&s2, &a2)
        );
    }

    #[test]
    fn string_boundaries_matter() {
        let (s1, a1) = codecs(&["ab", "c"], &["x"]);
        let (s2, a2) = codecs(&["a", "bc"], &["x"]);
        assert_ne!(
            enumeration_fingerprint(&s1, &a1),
            enumeration_fingerprint(&s2, &a2)
        );
    }

    #[test]
    fn states_and_actions_do_not_alias() {
        let (s1, a1) = codecs(&["x"], &["y"]);
        let (s2, a2) = codecs(&["y"], &["x"]);
        assert_ne!(
            enumeration_fingerprint(&s1, &a1),
            enumeration_fingerprint(&s2, &a2)
        );
    }
}
