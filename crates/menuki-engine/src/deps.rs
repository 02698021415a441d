use menuki_protocol::{Entry, GameState, HostError, ModifierKey};

// ---- Host API abstraction ----

/// Minimal host surface the engine consumes.
///
/// The host owns the menu: `entries` returns a fresh copy on every call, and
/// the engine replaces the authoritative list wholesale through
/// `set_entries` — the host may retain and iterate its own reference to the
/// previous list, so committed lists are always newly built, never the
/// snapshot mutated in place. Frame-tick and menu-open events arrive as
/// direct calls from the host's single logic thread; nothing here is invoked
/// concurrently.
pub trait HostApi {
    /// A fresh copy of the current entry list.
    fn entries(&self) -> Result<Vec<Entry>, HostError>;
    /// Replace the host's authoritative entry list.
    fn set_entries(&self, entries: Vec<Entry>) -> Result<(), HostError>;
    /// Whether the given modifier key is currently held.
    fn modifier_held(&self, key: ModifierKey) -> bool;
    /// Coarse session state; the engine is inert unless interactive.
    fn game_state(&self) -> GameState;
}
