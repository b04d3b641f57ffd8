//! Opaque symbolic descriptors exchanged with the engine.
//!
//! [`SymbolicState`] and [`ActionSpec`] are produced by the engine and
//! compared, hashed, and rendered by the core. The core never looks
//! inside a state except to split a composite state at a fixed width.

use smallvec::SmallVec;
use std::fmt;

/// An engine-defined description of one world configuration.
///
/// Two states are equal iff their text is equal. The text is treated as
/// an opaque token: no digit positions or block names are interpreted
/// by the core.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolicState(String);

impl SymbolicState {
    /// Wrap an engine-produced descriptor.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The descriptor text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length of the descriptor in characters.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    /// Split into `(agent, goal)` after `agent_width` characters.
    ///
    /// Returns `None` unless both parts are non-empty. The width is a
    /// fixed property of the composition; it is never inferred from the
    /// text.
    pub fn split_composite(&self, agent_width: usize) -> Option<(&str, &str)> {
        let (byte_at, _) = self.0.char_indices().nth(agent_width)?;
        if byte_at == 0 {
            return None;
        }
        Some(self.0.split_at(byte_at))
    }

    /// Concatenate an agent sub-state and a goal sub-state.
    pub fn compose(agent: &str, goal: &str) -> Self {
        let mut text = String::with_capacity(agent.len() + goal.len());
        text.push_str(agent);
        text.push_str(goal);
        Self(text)
    }
}

impl fmt::Display for SymbolicState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SymbolicState {
    fn from(v: &str) -> Self {
        Self::new(v)
    }
}

impl From<String> for SymbolicState {
    fn from(v: String) -> Self {
        Self(v)
    }
}

/// The call form of an action, as submitted to the engine.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Invocation(String);

impl Invocation {
    /// The invocation text, e.g. `move(a,b,table)`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Argument list of an [`ActionSpec`].
///
/// Blocks-world moves carry three arguments; four inline slots avoid a
/// heap allocation for every action the engine is likely to enumerate.
pub type ActionArgs = SmallVec<[String; 4]>;

/// A parameterized action: a name and an ordered argument list.
///
/// # Examples
///
/// ```
/// use cairn_core::ActionSpec;
///
/// let mv = ActionSpec::new("move", ["a", "b", "table"]);
/// assert_eq!(mv.invocation().as_str(), "move(a,b,table)");
///
/// let noop = ActionSpec::new("wait", Vec::<String>::new());
/// assert_eq!(noop.invocation().as_str(), "wait");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ActionSpec {
    /// Functor name.
    pub name: String,
    /// Arguments in call order.
    pub args: ActionArgs,
}

impl ActionSpec {
    /// Build an action from a name and its arguments.
    pub fn new<I, S>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Render to the engine's invocation syntax: `name(arg1,arg2,...)`.
    ///
    /// Total: an action without arguments renders to its bare name.
    pub fn invocation(&self) -> Invocation {
        if self.args.is_empty() {
            return Invocation(self.name.clone());
        }
        let args_len: usize = self.args.iter().map(|a| a.len() + 1).sum();
        let mut text = String::with_capacity(self.name.len() + args_len + 1);
        text.push_str(&self.name);
        text.push('(');
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                text.push(',');
            }
            text.push_str(arg);
        }
        text.push(')');
        Invocation(text)
    }
}

impl fmt::Display for ActionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.invocation())
    }
}
