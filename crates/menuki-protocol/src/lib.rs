//! Shared menu model and boundary types for menuki.
//!
//! The host client owns the context menu: an ordered list of [`Entry`] values
//! it regenerates every frame. This crate defines that entry model plus the
//! small vocabulary of types crossing the engine boundary — click channels,
//! binding keys, game state, diagnostics — so the engine, matcher, and host
//! adapters all speak the same language without depending on each other.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Option family of a swappable menu entry.
///
/// Only entries belonging to a family participate in reordering; Cancel,
/// Walk, and the examine kinds are never swapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    /// Options acting on an NPC.
    Npc,
    /// Options acting on a world object.
    Object,
    /// Options acting on an interface widget (including inventory items).
    Widget,
}

/// Kind of action a menu entry performs when invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Close the menu without acting.
    Cancel,
    /// Walk to the clicked tile.
    Walk,
    /// Examine an NPC.
    ExamineNpc,
    /// Examine a world object.
    ExamineObject,
    /// The n-th option on an NPC (1-based; 1 is the client default).
    Npc(u8),
    /// The n-th option on a world object (1-based).
    Object(u8),
    /// The n-th option on an interface widget (1-based).
    Widget(u8),
    /// Synthetic entry injected by the engine, resolved via [`HandlerId`].
    Custom,
}

impl ActionKind {
    /// The option family this kind belongs to, if it is swappable at all.
    pub fn family(&self) -> Option<Family> {
        match self {
            Self::Npc(_) => Some(Family::Npc),
            Self::Object(_) => Some(Family::Object),
            Self::Widget(_) => Some(Family::Widget),
            _ => None,
        }
    }

    /// The 1-based option slot for option-family kinds.
    pub fn slot(&self) -> Option<u8> {
        match self {
            Self::Npc(n) | Self::Object(n) | Self::Widget(n) => Some(*n),
            _ => None,
        }
    }

    /// True for engine-injected entries.
    pub fn is_synthetic(&self) -> bool {
        matches!(self, Self::Custom)
    }
}

/// Opaque back-reference to the NPC or object instance an entry acts on.
///
/// Two same-named subjects on screen carry distinct refs; the engine uses
/// this to keep their entry blocks independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectRef(pub u64);

/// Opaque back-reference to the interface widget behind an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WidgetRef(pub u64);

/// Identifier attached to a synthetic entry, resolved by the engine to a
/// registered handler when the entry is activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandlerId(pub u64);

/// One clickable option in the context menu.
///
/// Entries are immutable once read from the host: the engine never edits an
/// entry in place, it builds new lists and commits them whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Display text of the action ("Talk-to", "Bank", "Withdraw-5", ...).
    pub label: String,
    /// Display text of the thing acted on; empty for subject-less entries.
    pub subject: String,
    /// What invoking the entry does.
    pub kind: ActionKind,
    /// Item or interface index; 0 when unused.
    pub identifier: u32,
    /// Back-reference disambiguating same-named subjects.
    pub subject_ref: Option<SubjectRef>,
    /// Back-reference for interface-driven entries.
    pub widget_ref: Option<WidgetRef>,
    /// Activation handler; present only on synthetic entries.
    pub handler: Option<HandlerId>,
}

impl Entry {
    /// Create an entry with no identifier, refs, or handler.
    pub fn new(label: impl Into<String>, subject: impl Into<String>, kind: ActionKind) -> Self {
        Self {
            label: label.into(),
            subject: subject.into(),
            kind,
            identifier: 0,
            subject_ref: None,
            widget_ref: None,
            handler: None,
        }
    }

    /// Set the item/interface index.
    pub fn with_identifier(mut self, identifier: u32) -> Self {
        self.identifier = identifier;
        self
    }

    /// Attach the subject back-reference.
    pub fn with_subject_ref(mut self, subject_ref: SubjectRef) -> Self {
        self.subject_ref = Some(subject_ref);
        self
    }

    /// Attach the widget back-reference.
    pub fn with_widget_ref(mut self, widget_ref: WidgetRef) -> Self {
        self.widget_ref = Some(widget_ref);
        self
    }

    /// Attach an activation handler (synthetic entries only).
    pub fn with_handler(mut self, handler: HandlerId) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Subject identity used for block segmentation: display text plus ref.
    pub fn subject_id(&self) -> (&str, Option<SubjectRef>) {
        (self.subject.as_str(), self.subject_ref)
    }
}

/// Which click a persisted binding applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClickChannel {
    /// Plain left click — the default-slot action.
    Primary,
    /// Shift-modified left click.
    Shift,
}

impl ClickChannel {
    /// Label fragment used by synthetic configuration entries.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Primary => "left click",
            Self::Shift => "shift click",
        }
    }
}

/// Namespace of a binding's subject identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectKind {
    /// An NPC definition.
    Npc,
    /// A world object definition.
    Object,
    /// An inventory/bank item.
    Item,
    /// A bare interface widget.
    Widget,
}

/// Subject identity a binding is keyed by.
///
/// Bindings are keyed by subject identity rather than entry instance, so a
/// write outlives the menu it was made from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BindingKey {
    /// Identity namespace.
    pub kind: SubjectKind,
    /// Definition/item index within the namespace.
    pub id: u32,
}

impl BindingKey {
    /// Key for an item-backed widget entry.
    pub fn item(id: u32) -> Self {
        Self {
            kind: SubjectKind::Item,
            id,
        }
    }
}

/// External persistence of per-subject click bindings.
///
/// The engine holds no cache in front of this store: every pass re-reads on
/// demand, so a configuration change made mid-session takes effect on the
/// next frame. Implementations are read-after-write consistent within the
/// host's single logic thread; key encoding is the store's concern.
pub trait BindingStore {
    /// Persisted option label for `key` on `channel`, if any.
    fn get(&self, key: &BindingKey, channel: ClickChannel) -> Option<String>;
    /// Persist `option` as the choice for `key` on `channel`.
    fn set(&self, key: &BindingKey, channel: ClickChannel, option: &str);
    /// Drop every channel's binding for `key`.
    fn clear_all(&self, key: &BindingKey);
}

/// World-state queries resolving opaque back-references to display data.
///
/// Subjects are sometimes referenced only by id (the host omits display
/// text); rules compare against the resolved name. Widgets expose their full
/// option vocabulary here, which the submenu synthesizer needs to offer
/// choices beyond the options present in the current menu.
pub trait WorldQuery {
    /// Display name of the subject behind `subject`, if it still exists.
    fn subject_name(&self, subject: SubjectRef) -> Option<String>;
    /// Full ordered action vocabulary of the widget behind `widget`.
    fn widget_actions(&self, widget: WidgetRef) -> Option<Vec<String>>;
}

/// Coarse host session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Title/login screen.
    LoginScreen,
    /// Region load in progress.
    Loading,
    /// Interactive play.
    LoggedIn,
}

impl GameState {
    /// True when the player can interact with menus at all.
    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::LoggedIn)
    }
}

/// Modifier keys the engine reads from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModifierKey {
    /// The shift key, gating the shift click channel.
    Shift,
}

/// Severity of a diagnostic notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    /// Informational.
    Info,
    /// Something degraded but recoverable.
    Warn,
    /// A pass was aborted.
    Error,
}

/// Diagnostic payload emitted to the surrounding application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Severity.
    pub kind: NoticeKind,
    /// Short source tag ("Swap", "Menu", ...).
    pub title: String,
    /// Human-readable detail.
    pub text: String,
}

/// Failure reported by a host adapter call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostError {
    /// The host could not produce its entry list.
    #[error("host entry list unavailable: {0}")]
    Unavailable(String),
    /// The host rejected a committed entry list.
    #[error("host rejected entry commit: {0}")]
    Rejected(String),
}
