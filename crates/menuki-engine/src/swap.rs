//! The per-frame convergence pass.
//!
//! Every frame re-derives the reordered list from the host's authoritative
//! snapshot, never from the engine's previous output, so customization is
//! reapplied from scratch each tick and no reconciliation against prior
//! state exists. Each subject block moves at most one adjacent step per
//! frame; multi-step preferences converge over successive frames.

use menuki_protocol::Entry;
use swapmode::{Direction, Match, MatchCtx, RuleSet, block_bounds};
use tracing::{debug, trace};

use crate::{Result, deps::HostApi};

/// Run one frame pass over the host's current entries.
///
/// Returns the number of commits issued. A host failure aborts the pass
/// mid-flight: nothing further is committed and the error propagates for
/// reporting; the next tick starts over from a fresh snapshot.
pub(crate) fn frame_pass(
    host: &dyn HostApi,
    rules: &RuleSet,
    ctx: &MatchCtx<'_>,
) -> Result<usize> {
    let mut working = host.entries()?;
    let mut skip = vec![false; working.len()];
    let mut commits = 0usize;

    while let Some(m) = rules.find_match(&working, ctx, &skip) {
        // One match retires the whole subject block for this frame, swap or
        // not; independent blocks keep getting their own pass below.
        let (start, end) = block_bounds(&working, m.entry);
        for flag in &mut skip[start..=end] {
            *flag = true;
        }

        let Some(neighbor) = default_ward_neighbor(&m, start, end) else {
            trace!(
                rule = rules.name(m.rule),
                entry = m.entry,
                "already at block edge, nothing to do"
            );
            continue;
        };

        debug!(
            rule = rules.name(m.rule),
            from = m.entry,
            to = neighbor,
            label = %working[m.entry].label,
            "swapping adjacent entries"
        );
        working.swap(m.entry, neighbor);
        commit(host, &working)?;
        commits += 1;
    }

    Ok(commits)
}

/// Index one step toward (Promote) or away from (Demote) the default slot,
/// constrained to the matched entry's own subject block.
fn default_ward_neighbor(m: &Match, start: usize, end: usize) -> Option<usize> {
    match m.direction {
        Direction::Promote => (m.entry < end).then(|| m.entry + 1),
        Direction::Demote => (m.entry > start).then(|| m.entry - 1),
    }
}

/// Commit the working copy: the host gets its own freshly built list, the
/// engine keeps the working copy for further blocks in the same frame.
fn commit(host: &dyn HostApi, working: &[Entry]) -> Result<()> {
    host.set_entries(working.to_vec())?;
    Ok(())
}
