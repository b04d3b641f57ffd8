//! Integration test: building enumerations from live engines.
//!
//! Runs the builder against scripted engines (failure paths, ordering,
//! side effects) and against the reference blocks world (known sizes and
//! a stable fingerprint across independent builds).

use cairn_blocks::BlocksWorld;
use cairn_codec::{build, Enumeration};
use cairn_core::{
    ActionIndex, ActionSpec, EngineError, EnumerationError, Invocation, StateIndex, SymbolicState,
};
use cairn_test_utils::{three_state_scenario, EngineCall, ScriptedEngine};

// ── Failure paths ────────────────────────────────────────────────────

#[test]
fn unreachable_engine_fails_enumeration() {
    let mut engine = three_state_scenario().unavailable();
    match build(&mut engine) {
        Err(EnumerationError::Engine(EngineError::Unavailable { .. })) => {}
        other => panic!("expected Engine(Unavailable), got {other:?}"),
    }
}

#[test]
fn empty_state_set_is_rejected() {
    let mut engine = ScriptedEngine::new(&[], vec![ActionSpec::new("noop", Vec::<String>::new())], "");
    assert_eq!(build(&mut engine), Err(EnumerationError::NoStates));
}

#[test]
fn empty_action_set_is_rejected() {
    let mut engine = ScriptedEngine::new(&["A"], Vec::new(), "A");
    assert_eq!(build(&mut engine), Err(EnumerationError::NoActions));
}

#[test]
fn duplicate_states_are_rejected() {
    let mut engine = ScriptedEngine::new(
        &["A", "B", "A"],
        vec![ActionSpec::new("noop", Vec::<String>::new())],
        "A",
    );
    assert_eq!(
        build(&mut engine),
        Err(EnumerationError::DuplicateState {
            state: SymbolicState::new("A"),
            first: 0,
            repeat: 2,
        })
    );
}

#[test]
fn duplicate_invocations_are_rejected() {
    let mut engine = ScriptedEngine::new(
        &["A"],
        vec![ActionSpec::new("go", ["x"]), ActionSpec::new("go", ["x"])],
        "A",
    );
    assert!(matches!(
        build(&mut engine),
        Err(EnumerationError::DuplicateAction {
            first: 0,
            repeat: 1,
            ..
        })
    ));
}

// ── Ordering and side effects ────────────────────────────────────────

#[test]
fn indices_follow_engine_order() {
    let mut engine = three_state_scenario();
    let enumeration = build(&mut engine).unwrap();
    let states: Vec<&str> = enumeration
        .states()
        .iter()
        .map(|(_, s)| s.as_str())
        .collect();
    assert_eq!(states, ["A", "B", "C"]);
    assert_eq!(
        enumeration.states().encode(&SymbolicState::new("C")),
        Ok(StateIndex(2))
    );
    assert_eq!(
        enumeration.actions().encode(ActionIndex(0)).map(Invocation::as_str),
        Some("move(A,B)")
    );
}

#[test]
fn building_never_touches_the_world() {
    let mut engine = three_state_scenario();
    let log = engine.call_log();
    build(&mut engine).unwrap();
    assert_eq!(
        log.calls(),
        [EngineCall::EnumerateStates, EngineCall::EnumerateActions]
    );
}

#[test]
fn fingerprint_depends_on_order() {
    let actions = vec![ActionSpec::new("go", ["x"])];
    let forward =
        Enumeration::from_parts(vec!["A".into(), "B".into()], actions.clone()).unwrap();
    let reversed = Enumeration::from_parts(vec!["B".into(), "A".into()], actions).unwrap();
    assert_ne!(forward.fingerprint(), reversed.fingerprint());
}

// ── Reference engine ─────────────────────────────────────────────────

#[test]
fn three_block_world_sizes() {
    let mut world = BlocksWorld::new(3).unwrap();
    let enumeration = build(&mut world).unwrap();
    assert_eq!(enumeration.states().len(), 13);
    assert_eq!(enumeration.actions().len(), 18);
}

#[test]
fn fingerprint_is_stable_across_builds() {
    let first = build(&mut BlocksWorld::new(3).unwrap()).unwrap();
    let second = build(&mut BlocksWorld::new(3).unwrap()).unwrap();
    assert_eq!(first.fingerprint(), second.fingerprint());
    assert_eq!(first, second);

    let other = build(&mut BlocksWorld::new(4).unwrap()).unwrap();
    assert_ne!(first.fingerprint(), other.fingerprint());
}

#[test]
fn goal_channel_world_is_the_square_of_the_plain_one() {
    let plain = build(&mut BlocksWorld::new(3).unwrap()).unwrap();
    let composite = build(&mut BlocksWorld::new(3).unwrap().with_goal_channel()).unwrap();
    assert_eq!(composite.states().len(), 13 * 13);
    assert_eq!(composite.actions(), plain.actions());
}
