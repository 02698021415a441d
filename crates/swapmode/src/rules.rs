//! Swap rules, gates, and the priority-ordered matcher.

use config::{Config, FairyRingMode, Flag};
use menuki_protocol::{BindingKey, BindingStore, ClickChannel, Entry, Family, WorldQuery};
use tracing::trace;

/// Which way a matched entry moves: one adjacent step per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward the default slot (higher index).
    Promote,
    /// Away from the default slot (lower index).
    Demote,
}

/// Modifier-key requirement on a rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModifierReq {
    /// Fires regardless of modifier state.
    #[default]
    Ignored,
    /// Fires only while shift is held.
    Held,
    /// Fires only while shift is released.
    Released,
}

impl ModifierReq {
    /// Evaluate against the frame's shift state.
    fn satisfied(self, shift_held: bool) -> bool {
        match self {
            Self::Ignored => true,
            Self::Held => shift_held,
            Self::Released => !shift_held,
        }
    }
}

/// ASCII case-insensitive label predicate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LabelMatch {
    /// Matches any label.
    #[default]
    Any,
    /// Whole-label match.
    Exact(&'static str),
    /// Leading-fragment match ("pay" covers "Pay (north)").
    Prefix(&'static str),
    /// Anywhere-in-label match.
    Contains(&'static str),
}

impl LabelMatch {
    /// Evaluate against a display label.
    fn matches(&self, label: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(want) => label.eq_ignore_ascii_case(want),
            Self::Prefix(want) => label
                .get(..want.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(want)),
            Self::Contains(want) => label
                .to_ascii_lowercase()
                .contains(&want.to_ascii_lowercase()),
        }
    }
}

/// Enablement predicate, re-read from the active config every pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Always enabled.
    Always,
    /// Enabled while a boolean toggle is on.
    Flag(Flag),
    /// Enabled while the fairy ring preference equals the given mode.
    FairyRing(FairyRingMode),
}

impl Gate {
    /// Evaluate against the active config.
    fn enabled(&self, cfg: &Config) -> bool {
        match self {
            Self::Always => true,
            Self::Flag(flag) => cfg.flag(*flag),
            Self::FairyRing(mode) => cfg.swap_fairy_ring == *mode,
        }
    }
}

/// Static predicate over one entry's shape.
///
/// All fields default to "don't care"; a rule names only the dimensions it
/// constrains. Entries outside the option families never match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryMatch {
    /// Option label requirement.
    pub option: LabelMatch,
    /// Subject display-text requirement.
    pub subject: LabelMatch,
    /// Required option family, if any.
    pub family: Option<Family>,
    /// Required 1-based option slot, if any.
    pub slot: Option<u8>,
    /// Modifier-key requirement.
    pub shift: ModifierReq,
}

impl EntryMatch {
    /// Evaluate against one entry.
    fn matches(&self, entry: &Entry, ctx: &MatchCtx<'_>) -> bool {
        let Some(family) = entry.kind.family() else {
            return false;
        };
        if !self.shift.satisfied(ctx.shift_held) {
            return false;
        }
        if self.family.is_some_and(|want| want != family) {
            return false;
        }
        if self.slot.is_some() && entry.kind.slot() != self.slot {
            return false;
        }
        if !self.option.matches(&entry.label) {
            return false;
        }
        // Hosts sometimes hand out entries with a bare ref and no display
        // text; the comparison then runs against the resolved name.
        if entry.subject.is_empty() {
            let resolved = entry.subject_ref.and_then(|r| ctx.world.subject_name(r));
            self.subject.matches(resolved.as_deref().unwrap_or(""))
        } else {
            self.subject.matches(&entry.subject)
        }
    }
}

/// How a rule recognizes its entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Static label/family predicate.
    Entry(EntryMatch),
    /// The persisted per-subject choice for the frame's click channel.
    BoundOption,
}

/// One conditional swap rule. Priority is registration order.
#[derive(Debug, Clone, Copy)]
pub struct SwapRule {
    /// Stable name for logging.
    pub name: &'static str,
    /// Enablement predicate.
    pub gate: Gate,
    /// Entry predicate.
    pub matcher: Matcher,
    /// Movement direction on match.
    pub direction: Direction,
}

/// Per-pass inputs the matcher evaluates against.
pub struct MatchCtx<'a> {
    /// Whether the shift modifier is held this frame.
    pub shift_held: bool,
    /// Active configuration.
    pub config: &'a Config,
    /// Binding store, re-read on every evaluation.
    pub bindings: &'a dyn BindingStore,
    /// World-state queries for subjects referenced only by id.
    pub world: &'a dyn WorldQuery,
}

impl MatchCtx<'_> {
    /// Click channel selected by the frame's modifier state.
    pub fn channel(&self) -> ClickChannel {
        if self.shift_held {
            ClickChannel::Shift
        } else {
            ClickChannel::Primary
        }
    }
}

/// A (rule, entry) pair produced by [`RuleSet::find_match`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Index of the winning rule within the registry.
    pub rule: usize,
    /// Index of the matched entry within the scanned list.
    pub entry: usize,
    /// Movement direction of the winning rule.
    pub direction: Direction,
}

/// Ordered collection of swap rules; earlier registration wins.
#[derive(Debug, Default)]
pub struct RuleSet {
    /// Rules in priority order.
    rules: Vec<SwapRule>,
}

impl RuleSet {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule at the lowest priority.
    pub fn register(&mut self, rule: SwapRule) {
        self.rules.push(rule);
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Name of the rule at `index`, for logging.
    pub fn name(&self, index: usize) -> &'static str {
        self.rules.get(index).map(|r| r.name).unwrap_or("?")
    }

    /// First (rule, entry) pair that fires on `entries`.
    ///
    /// Rules are scanned in priority order; per rule, entries are scanned
    /// from the default slot upward — index 0 is the lowest execution
    /// priority, so the first candidate seen is the one nearest the default
    /// slot. The first pair found wins outright, short-circuiting
    /// lower-priority rules even if they would also match. `skip` masks
    /// entries whose subject block already produced a match this frame.
    pub fn find_match(
        &self,
        entries: &[Entry],
        ctx: &MatchCtx<'_>,
        skip: &[bool],
    ) -> Option<Match> {
        for (rule_idx, rule) in self.rules.iter().enumerate() {
            if !rule.gate.enabled(ctx.config) {
                continue;
            }
            for entry_idx in (0..entries.len()).rev() {
                if skip.get(entry_idx).copied().unwrap_or(false) {
                    continue;
                }
                if rule_fires(rule, &entries[entry_idx], ctx) {
                    trace!(
                        rule = rule.name,
                        entry = entry_idx,
                        label = %entries[entry_idx].label,
                        "rule matched"
                    );
                    return Some(Match {
                        rule: rule_idx,
                        entry: entry_idx,
                        direction: rule.direction,
                    });
                }
            }
        }
        None
    }

    /// The built-in registry, highest priority first.
    ///
    /// User click bindings outrank every built-in swap; the rest follows the
    /// order the swaps were introduced in.
    pub fn standard() -> Self {
        let mut set = Self::new();
        set.register(SwapRule {
            name: "bound-option",
            gate: Gate::Flag(Flag::UiCustomization),
            matcher: Matcher::BoundOption,
            direction: Direction::Promote,
        });
        set.register(SwapRule {
            name: "assignment",
            gate: Gate::Flag(Flag::SwapAssignment),
            matcher: Matcher::Entry(EntryMatch {
                option: LabelMatch::Exact("assignment"),
                family: Some(Family::Npc),
                ..EntryMatch::default()
            }),
            direction: Direction::Promote,
        });
        set.register(SwapRule {
            name: "trade",
            gate: Gate::Flag(Flag::SwapTrade),
            matcher: Matcher::Entry(EntryMatch {
                option: LabelMatch::Exact("trade"),
                family: Some(Family::Npc),
                ..EntryMatch::default()
            }),
            direction: Direction::Promote,
        });
        set.register(SwapRule {
            name: "bank",
            gate: Gate::Flag(Flag::SwapBank),
            matcher: Matcher::Entry(EntryMatch {
                option: LabelMatch::Exact("bank"),
                ..EntryMatch::default()
            }),
            direction: Direction::Promote,
        });
        set.register(SwapRule {
            name: "pay",
            gate: Gate::Flag(Flag::SwapPay),
            matcher: Matcher::Entry(EntryMatch {
                option: LabelMatch::Prefix("pay"),
                family: Some(Family::Npc),
                ..EntryMatch::default()
            }),
            direction: Direction::Promote,
        });
        set.register(SwapRule {
            name: "quick",
            gate: Gate::Flag(Flag::SwapQuick),
            matcher: Matcher::Entry(EntryMatch {
                option: LabelMatch::Prefix("quick-"),
                ..EntryMatch::default()
            }),
            direction: Direction::Promote,
        });
        set.register(SwapRule {
            name: "birdhouse-empty",
            gate: Gate::Flag(Flag::SwapBirdhouseEmpty),
            matcher: Matcher::Entry(EntryMatch {
                option: LabelMatch::Exact("empty"),
                subject: LabelMatch::Contains("birdhouse"),
                family: Some(Family::Object),
                ..EntryMatch::default()
            }),
            direction: Direction::Promote,
        });
        set.register(SwapRule {
            name: "teleport-alternate",
            gate: Gate::Flag(Flag::SwapTeleportSpell),
            matcher: Matcher::Entry(EntryMatch {
                subject: LabelMatch::Contains("teleport"),
                family: Some(Family::Widget),
                slot: Some(2),
                shift: ModifierReq::Held,
                ..EntryMatch::default()
            }),
            direction: Direction::Promote,
        });
        set.register(SwapRule {
            name: "fairy-zanaris",
            gate: Gate::FairyRing(FairyRingMode::Zanaris),
            matcher: Matcher::Entry(EntryMatch {
                option: LabelMatch::Exact("zanaris"),
                subject: LabelMatch::Contains("fairy ring"),
                family: Some(Family::Object),
                ..EntryMatch::default()
            }),
            direction: Direction::Promote,
        });
        set.register(SwapRule {
            name: "fairy-zanaris-demote-configure",
            gate: Gate::FairyRing(FairyRingMode::Zanaris),
            matcher: Matcher::Entry(EntryMatch {
                option: LabelMatch::Exact("configure"),
                subject: LabelMatch::Contains("fairy ring"),
                family: Some(Family::Object),
                ..EntryMatch::default()
            }),
            direction: Direction::Demote,
        });
        set.register(SwapRule {
            name: "fairy-last-destination",
            gate: Gate::FairyRing(FairyRingMode::LastDestination),
            matcher: Matcher::Entry(EntryMatch {
                option: LabelMatch::Prefix("last-destination"),
                subject: LabelMatch::Contains("fairy ring"),
                family: Some(Family::Object),
                ..EntryMatch::default()
            }),
            direction: Direction::Promote,
        });
        set.register(SwapRule {
            name: "fairy-configure",
            gate: Gate::FairyRing(FairyRingMode::Configure),
            matcher: Matcher::Entry(EntryMatch {
                option: LabelMatch::Exact("configure"),
                subject: LabelMatch::Contains("fairy ring"),
                family: Some(Family::Object),
                ..EntryMatch::default()
            }),
            direction: Direction::Promote,
        });
        set
    }
}

/// Evaluate one rule against one entry.
fn rule_fires(rule: &SwapRule, entry: &Entry, ctx: &MatchCtx<'_>) -> bool {
    match &rule.matcher {
        Matcher::Entry(m) => m.matches(entry, ctx),
        Matcher::BoundOption => bound_option_fires(entry, ctx),
    }
}

/// The dynamic rule: does the store bind this entry's label for the frame's
/// click channel?
fn bound_option_fires(entry: &Entry, ctx: &MatchCtx<'_>) -> bool {
    if entry.kind.family() != Some(Family::Widget) || entry.identifier == 0 {
        return false;
    }
    let key = BindingKey::item(entry.identifier);
    ctx.bindings
        .get(&key, ctx.channel())
        .is_some_and(|bound| bound.eq_ignore_ascii_case(&entry.label))
}
