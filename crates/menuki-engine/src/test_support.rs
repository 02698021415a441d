//! Test support utilities for menuki-engine tests and the smoketest driver.
//! These helpers are public to be reachable from the smoketest binary and
//! are lightweight. They are intended for test use only.

use std::{
    collections::HashMap,
    sync::Mutex,
};

use menuki_protocol::{
    ActionKind, BindingKey, BindingStore, ClickChannel, Entry, GameState, HostError, ModifierKey,
    SubjectRef, WidgetRef, WorldQuery,
};

use crate::deps::HostApi;

/// Scriptable host double.
///
/// Returns a fresh copy of the entry list on every read (mirroring the real
/// client, whose menu getter copies its array), records every committed
/// list, and can be told to fail reads or commits.
pub struct FakeHost {
    /// Authoritative entry list.
    entries: Mutex<Vec<Entry>>,
    /// Every list committed through `set_entries`, in order.
    commits: Mutex<Vec<Vec<Entry>>>,
    /// Scripted shift state.
    shift: Mutex<bool>,
    /// Scripted session state.
    state: Mutex<GameState>,
    /// When true, `entries` fails.
    fail_reads: Mutex<bool>,
    /// When true, `set_entries` fails without storing.
    fail_commits: Mutex<bool>,
}

impl FakeHost {
    /// Host starting out logged in with the given menu.
    pub fn new(entries: Vec<Entry>) -> Self {
        Self {
            entries: Mutex::new(entries),
            commits: Mutex::new(Vec::new()),
            shift: Mutex::new(false),
            state: Mutex::new(GameState::LoggedIn),
            fail_reads: Mutex::new(false),
            fail_commits: Mutex::new(false),
        }
    }

    /// Replace the menu, as the client does when regenerating it.
    pub fn install(&self, entries: Vec<Entry>) {
        *self.entries.lock().unwrap() = entries;
    }

    /// Snapshot of the current authoritative list.
    pub fn current(&self) -> Vec<Entry> {
        self.entries.lock().unwrap().clone()
    }

    /// Labels of the current list, top of menu first.
    pub fn labels(&self) -> Vec<String> {
        self.current().iter().map(|e| e.label.clone()).collect()
    }

    /// Number of commits received so far.
    pub fn commit_count(&self) -> usize {
        self.commits.lock().unwrap().len()
    }

    /// Script the shift key.
    pub fn set_shift(&self, held: bool) {
        *self.shift.lock().unwrap() = held;
    }

    /// Script the session state.
    pub fn set_game_state(&self, state: GameState) {
        *self.state.lock().unwrap() = state;
    }

    /// Make subsequent reads fail.
    pub fn fail_reads(&self, fail: bool) {
        *self.fail_reads.lock().unwrap() = fail;
    }

    /// Make subsequent commits fail.
    pub fn fail_commits(&self, fail: bool) {
        *self.fail_commits.lock().unwrap() = fail;
    }
}

impl HostApi for FakeHost {
    fn entries(&self) -> Result<Vec<Entry>, HostError> {
        if *self.fail_reads.lock().unwrap() {
            return Err(HostError::Unavailable("scripted read failure".into()));
        }
        Ok(self.entries.lock().unwrap().clone())
    }

    fn set_entries(&self, entries: Vec<Entry>) -> Result<(), HostError> {
        if *self.fail_commits.lock().unwrap() {
            return Err(HostError::Rejected("scripted commit failure".into()));
        }
        *self.entries.lock().unwrap() = entries.clone();
        self.commits.lock().unwrap().push(entries);
        Ok(())
    }

    fn modifier_held(&self, key: ModifierKey) -> bool {
        match key {
            ModifierKey::Shift => *self.shift.lock().unwrap(),
        }
    }

    fn game_state(&self) -> GameState {
        *self.state.lock().unwrap()
    }
}

/// In-memory binding store.
#[derive(Default)]
pub struct MemoryBindings {
    /// Backing map; key encoding is this store's concern.
    map: Mutex<HashMap<(BindingKey, ClickChannel), String>>,
}

impl MemoryBindings {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of persisted bindings across all subjects.
    pub fn len(&self) -> usize {
        self.map.lock().unwrap().len()
    }

    /// True when nothing is persisted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BindingStore for MemoryBindings {
    fn get(&self, key: &BindingKey, channel: ClickChannel) -> Option<String> {
        self.map.lock().unwrap().get(&(*key, channel)).cloned()
    }

    fn set(&self, key: &BindingKey, channel: ClickChannel, option: &str) {
        self.map
            .lock()
            .unwrap()
            .insert((*key, channel), option.to_string());
    }

    fn clear_all(&self, key: &BindingKey) {
        self.map.lock().unwrap().retain(|(k, _), _| k != key);
    }
}

/// World double with scripted names and widget vocabularies.
#[derive(Default)]
pub struct FakeWorld {
    /// Subject names by ref.
    names: Mutex<HashMap<SubjectRef, String>>,
    /// Widget action vocabularies by ref.
    widgets: Mutex<HashMap<WidgetRef, Vec<String>>>,
}

impl FakeWorld {
    /// Empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a subject name.
    pub fn name_subject(&self, subject: SubjectRef, name: &str) {
        self.names
            .lock()
            .unwrap()
            .insert(subject, name.to_string());
    }

    /// Script a widget's full action vocabulary.
    pub fn set_widget_actions(&self, widget: WidgetRef, actions: &[&str]) {
        self.widgets
            .lock()
            .unwrap()
            .insert(widget, actions.iter().map(|s| s.to_string()).collect());
    }
}

impl WorldQuery for FakeWorld {
    fn subject_name(&self, subject: SubjectRef) -> Option<String> {
        self.names.lock().unwrap().get(&subject).cloned()
    }

    fn widget_actions(&self, widget: WidgetRef) -> Option<Vec<String>> {
        self.widgets.lock().unwrap().get(&widget).cloned()
    }
}

/// "Cancel" entry, no subject.
pub fn cancel() -> Entry {
    Entry::new("Cancel", "", ActionKind::Cancel)
}

/// "Walk here" entry, no subject.
pub fn walk() -> Entry {
    Entry::new("Walk here", "", ActionKind::Walk)
}

/// NPC option entry.
pub fn npc(label: &str, subject: &str, slot: u8, subject_ref: u64) -> Entry {
    Entry::new(label, subject, ActionKind::Npc(slot)).with_subject_ref(SubjectRef(subject_ref))
}

/// Object option entry.
pub fn object(label: &str, subject: &str, slot: u8, subject_ref: u64) -> Entry {
    Entry::new(label, subject, ActionKind::Object(slot)).with_subject_ref(SubjectRef(subject_ref))
}

/// NPC examine entry.
pub fn examine_npc(subject: &str, subject_ref: u64) -> Entry {
    Entry::new("Examine", subject, ActionKind::ExamineNpc).with_subject_ref(SubjectRef(subject_ref))
}

/// Object examine entry.
pub fn examine_object(subject: &str, subject_ref: u64) -> Entry {
    Entry::new("Examine", subject, ActionKind::ExamineObject)
        .with_subject_ref(SubjectRef(subject_ref))
}

/// Item-backed widget option entry.
pub fn widget_item(label: &str, subject: &str, slot: u8, item: u32, widget: u64) -> Entry {
    Entry::new(label, subject, ActionKind::Widget(slot))
        .with_identifier(item)
        .with_widget_ref(WidgetRef(widget))
}

/// Labels of a list, top of menu first.
pub fn labels(entries: &[Entry]) -> Vec<&str> {
    entries.iter().map(|e| e.label.as_str()).collect()
}
