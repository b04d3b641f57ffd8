//! Reusable engine scenarios.
//!
//! - [`three_state_scenario`]: states `{A, B, C}`, one action `move(A,B)`
//!   that takes `A` to `C`.
//! - [`composite_scenario`]: three agent positions `a`, `b`, `c`, with
//!   composite states `agent ++ goal` for every pair, and `go(x)` actions
//!   that jump to position `x` from anywhere except `x` itself.

use cairn_core::ActionSpec;

use crate::ScriptedEngine;

/// Minimal fixed-target scenario.
///
/// Index assignment is `A → 0`, `B → 1`, `C → 2`; `move(A,B)` is action 0.
/// Starting from `A`, the first `move(A,B)` is accepted and lands on `C`;
/// from `C` there is no transition, so a second attempt is rejected.
pub fn three_state_scenario() -> ScriptedEngine {
    ScriptedEngine::new(&["A", "B", "C"], vec![ActionSpec::new("move", ["A", "B"])], "A")
        .transition("A", "move(A,B)", "C")
}

/// Agent sub-state width used by [`composite_scenario`].
pub const COMPOSITE_AGENT_WIDTH: usize = 1;

/// Target-conditioned scenario over one-character agent positions.
///
/// Enumerated states are the nine composites `aa, ab, ..., cc` in
/// row-major order (agent first). The engine itself only ever reports the
/// one-character agent position. Actions: `go(a)`, `go(b)`, `go(c)`.
pub fn composite_scenario() -> ScriptedEngine {
    let positions = ["a", "b", "c"];
    let composites: Vec<String> = positions
        .iter()
        .flat_map(|agent| positions.iter().map(move |goal| format!("{agent}{goal}")))
        .collect();
    let composite_refs: Vec<&str> = composites.iter().map(String::as_str).collect();
    let actions = positions
        .iter()
        .map(|p| ActionSpec::new("go", [*p]))
        .collect();

    let mut engine = ScriptedEngine::new(&composite_refs, actions, "a");
    for from in positions {
        for to in positions {
            if from != to {
                engine = engine.transition(from, &format!("go({to})"), to);
            }
        }
    }
    engine
}
