//! Swap rule registry and matching for menuki.
//!
//! Rules are plain data records — a gate, a predicate, a direction — held in
//! registration order, which is also priority order. Evaluation is pure: the
//! matcher inspects an entry list and answers "which rule fires on which
//! entry", and the engine owns everything stateful (working copies, commits,
//! per-frame block bookkeeping).

mod block;
mod rules;

pub use block::{block_bounds, same_block};
pub use rules::{
    Direction, EntryMatch, Gate, LabelMatch, Match, MatchCtx, Matcher, ModifierReq, RuleSet,
    SwapRule,
};
