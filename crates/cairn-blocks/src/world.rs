//! In-process blocks-world engine.
//!
//! A configuration of `n` blocks is written as `n` digits, one per block
//! in name order (`a`, `b`, `c`, ...). Digit `0` means the block rests on
//! the table; digit `k` means it rests on the k-th block. `"031"` is
//! `a` on the table, `b` on `c`, `c` on `a`: a single tower `a c b`.
//!
//! A configuration is valid when no block supports two blocks and
//! following supports from any block always reaches the table.
//!
//! Actions are `move(Block,From,To)`: legal when `Block` is clear, rests
//! on `From`, and `To` is the table or another clear block.

use smallvec::{smallvec, SmallVec};
use std::error::Error;
use std::fmt;

use cairn_core::{ActionSpec, EngineError, Invocation, SymbolicEngine, SymbolicState};
use tracing::debug;

/// Largest supported block count (digits `0..=6` stay single characters).
pub const MAX_BLOCKS: usize = 6;

const TABLE: u8 = 0;
const TABLE_NAME: &str = "table";
const MOVE: &str = "move";

/// Support digit per block.
type Supports = SmallVec<[u8; MAX_BLOCKS]>;

/// Invalid [`BlocksWorld`] parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorldError {
    /// Block count outside `1..=MAX_BLOCKS`.
    BlockCount {
        /// The rejected count.
        requested: usize,
    },
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlockCount { requested } => write!(
                f,
                "block count {requested} outside supported range 1..={MAX_BLOCKS}"
            ),
        }
    }
}

impl Error for WorldError {}

/// Blocks-world engine with a persistent world-state.
///
/// In goal-channel mode ([`with_goal_channel`](BlocksWorld::with_goal_channel))
/// the state enumeration lists every `agent ++ goal` pair of
/// configurations, while [`current_state`](SymbolicEngine::current_state)
/// still reports only the agent configuration. The agent sub-state width
/// is [`block_count()`](BlocksWorld::block_count).
#[derive(Clone, Debug)]
pub struct BlocksWorld {
    block_count: usize,
    goal_channel: bool,
    current: Supports,
    shut_down: bool,
}

impl BlocksWorld {
    /// A world of `block_count` blocks, all on the table.
    pub fn new(block_count: usize) -> Result<Self, WorldError> {
        if block_count == 0 || block_count > MAX_BLOCKS {
            return Err(WorldError::BlockCount {
                requested: block_count,
            });
        }
        Ok(Self {
            block_count,
            goal_channel: false,
            current: smallvec![TABLE; block_count],
            shut_down: false,
        })
    }

    /// Enumerate composite `agent ++ goal` states instead of plain ones.
    pub fn with_goal_channel(mut self) -> Self {
        self.goal_channel = true;
        self
    }

    /// Number of blocks, which is also the width of one configuration.
    pub fn block_count(&self) -> usize {
        self.block_count
    }

    /// Every valid configuration, in ascending digit order.
    fn configurations(&self) -> Vec<Supports> {
        let n = self.block_count;
        let base = (n + 1) as u8;
        let mut out = Vec::new();
        let mut digits: Supports = smallvec![TABLE; n];
        loop {
            if is_valid(&digits) {
                out.push(digits.clone());
            }
            let mut pos = n;
            loop {
                if pos == 0 {
                    return out;
                }
                pos -= 1;
                digits[pos] += 1;
                if digits[pos] < base {
                    break;
                }
                digits[pos] = TABLE;
            }
        }
    }

    fn check_open(&self) -> Result<(), EngineError> {
        if self.shut_down {
            return Err(EngineError::ShutDown);
        }
        Ok(())
    }

    fn parse_move(&self, invocation: &Invocation) -> Result<(u8, u8, u8), EngineError> {
        let malformed = || EngineError::Malformed {
            detail: format!("expected {MOVE}(Block,From,To), got '{invocation}'"),
        };
        let body = invocation
            .as_str()
            .strip_prefix(MOVE)
            .and_then(|rest| rest.strip_prefix('('))
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(malformed)?;
        let mut parts = body.split(',');
        let (Some(block), Some(from), Some(to), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };
        let block = parse_place(block.trim(), self.block_count).ok_or_else(malformed)?;
        let from = parse_place(from.trim(), self.block_count).ok_or_else(malformed)?;
        let to = parse_place(to.trim(), self.block_count).ok_or_else(malformed)?;
        if block == TABLE {
            return Err(malformed());
        }
        Ok((block, from, to))
    }
}

impl SymbolicEngine for BlocksWorld {
    fn enumerate_states(&mut self) -> Result<Vec<SymbolicState>, EngineError> {
        self.check_open()?;
        let configs: Vec<String> = self.configurations().iter().map(|c| render(c)).collect();
        if !self.goal_channel {
            return Ok(configs.into_iter().map(SymbolicState::from).collect());
        }
        Ok(configs
            .iter()
            .flat_map(|agent| {
                configs
                    .iter()
                    .map(move |goal| SymbolicState::compose(agent, goal))
            })
            .collect())
    }

    fn enumerate_actions(&mut self) -> Result<Vec<ActionSpec>, EngineError> {
        self.check_open()?;
        let n = self.block_count as u8;
        let places: Vec<u8> = (1..=n).chain(std::iter::once(TABLE)).collect();
        let mut actions = Vec::new();
        for block in 1..=n {
            for &from in &places {
                for &to in &places {
                    if from == block || to == block || from == to {
                        continue;
                    }
                    actions.push(ActionSpec::new(
                        MOVE,
                        [place_name(block), place_name(from), place_name(to)],
                    ));
                }
            }
        }
        Ok(actions)
    }

    fn reset_world(&mut self) -> Result<SymbolicState, EngineError> {
        self.check_open()?;
        self.current = smallvec![TABLE; self.block_count];
        Ok(SymbolicState::new(render(&self.current)))
    }

    fn current_state(&mut self) -> Result<SymbolicState, EngineError> {
        self.check_open()?;
        Ok(SymbolicState::new(render(&self.current)))
    }

    fn apply_action(&mut self, invocation: &Invocation) -> Result<bool, EngineError> {
        self.check_open()?;
        let (block, from, to) = self.parse_move(invocation)?;
        let slot = (block - 1) as usize;
        let legal = to != block
            && to != from
            && is_clear(&self.current, block)
            && self.current[slot] == from
            && (to == TABLE || is_clear(&self.current, to));
        if legal {
            self.current[slot] = to;
        }
        debug!(
            action = %invocation,
            legal,
            state = %render(&self.current),
            "blocks world step"
        );
        Ok(legal)
    }

    fn shutdown(&mut self) -> Result<(), EngineError> {
        self.shut_down = true;
        Ok(())
    }
}

/// Decompose a configuration into stacks, each listed bottom to top.
///
/// Stacks are ordered by their bottom block's name. Returns `None` if
/// `state` is not a valid configuration of 1 to [`MAX_BLOCKS`] blocks.
///
/// ```
/// use cairn_blocks::stacks;
///
/// assert_eq!(stacks("031"), Some(vec![vec!['a', 'c', 'b']]));
/// assert_eq!(stacks("000"), Some(vec![vec!['a'], vec!['b'], vec!['c']]));
/// assert_eq!(stacks("11"), None);
/// ```
pub fn stacks(state: &str) -> Option<Vec<Vec<char>>> {
    let supports = parse(state)?;
    let mut out = Vec::new();
    for bottom in 1..=supports.len() as u8 {
        if supports[(bottom - 1) as usize] != TABLE {
            continue;
        }
        let mut stack = vec![block_char(bottom)];
        let mut top = bottom;
        while let Some(above) = supports.iter().position(|&s| s == top) {
            top = above as u8 + 1;
            stack.push(block_char(top));
        }
        out.push(stack);
    }
    Some(out)
}

fn parse(state: &str) -> Option<Supports> {
    let n = state.chars().count();
    if n == 0 || n > MAX_BLOCKS {
        return None;
    }
    let mut supports = Supports::new();
    for c in state.chars() {
        let d = c.to_digit(10)? as u8;
        if d as usize > n {
            return None;
        }
        supports.push(d);
    }
    is_valid(&supports).then_some(supports)
}

fn is_valid(supports: &[u8]) -> bool {
    let n = supports.len();
    let mut used = [false; MAX_BLOCKS + 1];
    for &s in supports {
        if s == TABLE {
            continue;
        }
        if used[s as usize] {
            return false;
        }
        used[s as usize] = true;
    }
    // Every chain of supports must reach the table within n hops.
    (0..n).all(|start| {
        let mut cur = start;
        for _ in 0..=n {
            match supports[cur] {
                TABLE => return true,
                s => cur = (s - 1) as usize,
            }
        }
        false
    })
}

fn is_clear(supports: &[u8], block: u8) -> bool {
    !supports.contains(&block)
}

fn render(supports: &[u8]) -> String {
    supports.iter().map(|&d| char::from(b'0' + d)).collect()
}

fn block_char(block: u8) -> char {
    char::from(b'a' + block - 1)
}

fn place_name(place: u8) -> String {
    if place == TABLE {
        TABLE_NAME.to_string()
    } else {
        block_char(place).to_string()
    }
}

fn parse_place(name: &str, block_count: usize) -> Option<u8> {
    if name == TABLE_NAME {
        return Some(TABLE);
    }
    let mut chars = name.chars();
    let c = chars.next()?;
    if chars.next().is_some() || !c.is_ascii_lowercase() {
        return None;
    }
    let block = c as u8 - b'a' + 1;
    (block as usize <= block_count).then_some(block)
}
