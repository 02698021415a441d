//! Submenu synthesis on menu open.
//!
//! For each configurable multi-option block (a widget block whose vocabulary
//! carries a quantity family), this inserts a header of synthetic
//! configuration entries directly above the block. Activating one writes a
//! per-subject binding; the visible reorder happens on the next frame tick
//! when the bound-option rule reads the store.

use menuki_protocol::{
    ActionKind, BindingKey, BindingStore, ClickChannel, Entry, Family, HandlerId, WorldQuery,
};
use swapmode::block_bounds;
use tracing::trace;

/// Option-label prefixes marking a configurable quantity family.
const QUANTITY_PREFIXES: &[&str] = &["withdraw-", "deposit-"];

/// Label of the synthetic entry clearing all channels of a binding.
pub(crate) const RESET_LABEL: &str = "Reset swap";

/// Persisted effect a synthetic entry performs when activated.
///
/// Synthetic entries carry a handler id, not a closure; the op record holds
/// the subject identity outright, so activation still lands even when the
/// subject has vanished from the current menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SyntheticOp {
    /// Persist `option` as the choice for `key` on `channel`.
    Bind {
        /// Subject identity.
        key: BindingKey,
        /// Click channel being configured.
        channel: ClickChannel,
        /// Option label to promote.
        option: String,
    },
    /// Clear every channel's binding for `key`.
    Clear {
        /// Subject identity.
        key: BindingKey,
    },
}

/// Result of a menu-open synthesis pass.
pub(crate) struct Synthesis {
    /// Augmented entry list to commit.
    pub entries: Vec<Entry>,
    /// Handler registrations backing the inserted entries.
    pub handlers: Vec<(HandlerId, SyntheticOp)>,
}

/// A configurable block discovered in the menu.
struct Configurable {
    /// Binding identity of the backing item.
    key: BindingKey,
    /// Subject text carried onto the synthetic entries.
    subject: String,
    /// Quantity-family options in vocabulary order; index 0 is the default.
    options: Vec<String>,
}

/// Build the augmented list, or `None` when no block is configurable.
pub(crate) fn synthesize(
    entries: &[Entry],
    bindings: &dyn BindingStore,
    world: &dyn WorldQuery,
    next_handler: &mut u64,
) -> Option<Synthesis> {
    let mut out = Vec::with_capacity(entries.len());
    let mut handlers = Vec::new();
    let mut index = 0;
    while index < entries.len() {
        let (start, end) = block_bounds(entries, index);
        if let Some(block) = configurable(&entries[start..=end], world) {
            emit_header(&block, bindings, &mut out, &mut handlers, next_handler);
        }
        out.extend_from_slice(&entries[start..=end]);
        index = end + 1;
    }
    if handlers.is_empty() {
        None
    } else {
        Some(Synthesis {
            entries: out,
            handlers,
        })
    }
}

/// Identify a configurable quantity block.
fn configurable(block: &[Entry], world: &dyn WorldQuery) -> Option<Configurable> {
    let anchor = block.iter().find(|e| {
        e.kind.family() == Some(Family::Widget) && e.widget_ref.is_some() && e.identifier != 0
    })?;
    let vocabulary = world.widget_actions(anchor.widget_ref?)?;
    let options: Vec<String> = vocabulary
        .into_iter()
        .filter(|action| {
            QUANTITY_PREFIXES.iter().any(|prefix| {
                action
                    .get(..prefix.len())
                    .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
            })
        })
        .collect();
    // A single option offers no choice to configure.
    if options.len() < 2 {
        return None;
    }
    trace!(
        subject = %anchor.subject,
        options = options.len(),
        "configurable block found"
    );
    Some(Configurable {
        key: BindingKey::item(anchor.identifier),
        subject: anchor.subject.clone(),
        options,
    })
}

/// Emit the synthetic header for one block: an optional reset entry, then
/// per-channel swap candidates in reverse vocabulary order.
fn emit_header(
    block: &Configurable,
    bindings: &dyn BindingStore,
    out: &mut Vec<Entry>,
    handlers: &mut Vec<(HandlerId, SyntheticOp)>,
    next_handler: &mut u64,
) {
    let bound = |channel| bindings.get(&block.key, channel);
    if bound(ClickChannel::Shift).is_some() || bound(ClickChannel::Primary).is_some() {
        let id = allocate(next_handler);
        handlers.push((id, SyntheticOp::Clear { key: block.key }));
        out.push(synthetic(RESET_LABEL.to_string(), &block.subject, id));
    }

    for channel in [ClickChannel::Shift, ClickChannel::Primary] {
        let bound = bound(channel);
        for option in block.options.iter().rev() {
            // The vocabulary default needs no swap entry (reset covers it),
            // and neither does the channel's current choice.
            let is_default = option.eq_ignore_ascii_case(&block.options[0]);
            let is_bound = bound
                .as_deref()
                .is_some_and(|b| b.eq_ignore_ascii_case(option));
            if is_default || is_bound {
                continue;
            }
            let id = allocate(next_handler);
            handlers.push((
                id,
                SyntheticOp::Bind {
                    key: block.key,
                    channel,
                    option: option.clone(),
                },
            ));
            out.push(synthetic(
                format!("Swap {} {}", channel.label(), option),
                &block.subject,
                id,
            ));
        }
    }
}

/// Draw the next handler id; ids never repeat across menu generations.
fn allocate(next_handler: &mut u64) -> HandlerId {
    let id = HandlerId(*next_handler);
    *next_handler += 1;
    id
}

/// Build one synthetic entry.
fn synthetic(label: String, subject: &str, id: HandlerId) -> Entry {
    Entry::new(label, subject, ActionKind::Custom).with_handler(id)
}
