//! Menuki Engine
//!
//! The menuki engine customizes the host client's contextual action menu:
//! - re-derives a reordered entry list from prioritized swap rules on every
//!   frame tick, committing per subject block
//! - synthesizes per-item click-binding submenus on menu open, persisting
//!   choices through the external binding store
//! - reports collaborator failures to the application's diagnostic channel
//!
//! The engine runs entirely on the host's single logic thread: frame-tick
//! and menu-open events are delivered serially, every pass completes
//! synchronously, and no state survives a frame except what lives in the
//! external binding store. It exposes a minimal, documented API:
//! - [`Engine`]: the primary type you construct and drive
//! - [`HostApi`]: the host surface the engine consumes
//! - [`NotificationDispatcher`]: diagnostic notice plumbing
//!
//! All other modules are crate-private implementation details.

use std::{collections::HashMap, sync::Arc};

mod deps;
mod error;
mod notification;
mod swap;
mod synth;

pub mod test_support;

#[cfg(test)]
mod test_synth;

use config::{Config, Flag};
use crossbeam_channel::Sender;
use menuki_protocol::{BindingStore, HandlerId, ModifierKey, Notice, WorldQuery};
use swapmode::{MatchCtx, RuleSet};
use tracing::{debug, trace, warn};

pub use deps::HostApi;
pub use error::{Error, Result};
pub use notification::NotificationDispatcher;

use synth::SyntheticOp;

/// Engine coordinating the frame swap pass and submenu synthesis.
///
/// Construct via [`Engine::new`], then deliver host events through
/// [`Engine::on_frame_tick`], [`Engine::on_menu_opened`], and
/// [`Engine::activate`]. Install user configuration with
/// [`Engine::set_config`]; rule gates re-read it every pass, so changes take
/// effect on the next frame.
pub struct Engine {
    /// Host adapter: entry list access, modifier state, game state.
    host: Arc<dyn HostApi>,
    /// External persistence of per-subject click bindings.
    bindings: Arc<dyn BindingStore>,
    /// World-state queries for names and widget vocabularies.
    world: Arc<dyn WorldQuery>,
    /// Priority-ordered swap rules, registered once at construction.
    rules: RuleSet,
    /// Active user configuration.
    config: Config,
    /// Diagnostic notice dispatcher.
    notifier: NotificationDispatcher,
    /// Handlers backing the most recently synthesized menu.
    handlers: HashMap<HandlerId, SyntheticOp>,
    /// Monotonic handler id counter; never reused across menu generations.
    next_handler: u64,
}

impl Engine {
    /// Create a new engine with the standard rule registry.
    ///
    /// - `host`, `bindings`, `world`: external collaborators; all access is
    ///   serialized by the host's event delivery
    /// - `tx`: channel for diagnostic [`Notice`] values
    pub fn new(
        host: Arc<dyn HostApi>,
        bindings: Arc<dyn BindingStore>,
        world: Arc<dyn WorldQuery>,
        tx: Sender<Notice>,
    ) -> Self {
        Self::with_rules(host, bindings, world, tx, RuleSet::standard())
    }

    /// Create an engine with a caller-supplied rule registry.
    pub fn with_rules(
        host: Arc<dyn HostApi>,
        bindings: Arc<dyn BindingStore>,
        world: Arc<dyn WorldQuery>,
        tx: Sender<Notice>,
        rules: RuleSet,
    ) -> Self {
        Self {
            host,
            bindings,
            world,
            rules,
            config: Config::default(),
            notifier: NotificationDispatcher::new(tx),
            handlers: HashMap::new(),
            next_handler: 1,
        }
    }

    /// Install the active configuration.
    pub fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Handle a frame tick: run the swap pass over the host's current
    /// entries.
    ///
    /// A frame where nothing matches issues no commit at all, leaving the
    /// host's ordering untouched. Host failures abort the pass and surface
    /// as an error notice; the next tick retries naturally from a fresh
    /// snapshot.
    pub fn on_frame_tick(&mut self) {
        if !self.host.game_state().is_interactive() {
            return;
        }
        let ctx = MatchCtx {
            shift_held: self.host.modifier_held(ModifierKey::Shift),
            config: &self.config,
            bindings: &*self.bindings,
            world: &*self.world,
        };
        match swap::frame_pass(&*self.host, &self.rules, &ctx) {
            Ok(0) => {}
            Ok(commits) => debug!(commits, "frame pass committed"),
            Err(e) => self.report("Swap", &e),
        }
    }

    /// Handle a menu-open event: synthesize click-binding submenus for
    /// configurable blocks and commit the augmented list.
    ///
    /// No-op when `ui_customization` is off. The handler table is rebuilt on
    /// every open, so ids from a previous menu generation go stale and are
    /// ignored by [`Engine::activate`].
    pub fn on_menu_opened(&mut self) {
        if !self.config.flag(Flag::UiCustomization) {
            return;
        }
        let entries = match self.host.entries() {
            Ok(entries) => entries,
            Err(e) => {
                self.report("Menu", &Error::from(e));
                return;
            }
        };
        self.handlers.clear();
        let Some(outcome) = synth::synthesize(
            &entries,
            &*self.bindings,
            &*self.world,
            &mut self.next_handler,
        ) else {
            return;
        };
        debug!(inserted = outcome.handlers.len(), "synthesized submenu");
        self.handlers.extend(outcome.handlers);
        if let Err(e) = self.host.set_entries(outcome.entries) {
            self.report("Menu", &Error::from(e));
        }
    }

    /// Activate a synthetic entry by its handler id.
    ///
    /// Writes the binding (or clears it, for reset entries) and nothing
    /// else; the visible reorder happens on the next frame tick. Bindings
    /// are keyed by subject identity rather than entry instance, so the
    /// write lands even when the menu contents have changed since the entry
    /// was built. Ids from stale menu generations are dropped.
    pub fn activate(&mut self, handler: HandlerId) {
        let Some(op) = self.handlers.get(&handler) else {
            trace!(?handler, "activation for stale handler ignored");
            return;
        };
        match op {
            SyntheticOp::Bind {
                key,
                channel,
                option,
            } => {
                debug!(?key, ?channel, option = %option, "binding persisted");
                self.bindings.set(key, *channel, option);
            }
            SyntheticOp::Clear { key } => {
                debug!(?key, "bindings cleared");
                self.bindings.clear_all(key);
            }
        }
    }

    /// Send an error notice, falling back to a log line if the channel is
    /// gone.
    fn report(&self, title: &str, error: &Error) {
        warn!(title, %error, "pass aborted");
        if self.notifier.send_error(title, error.to_string()).is_err() {
            warn!("notice channel closed; diagnostic dropped");
        }
    }
}
