//! Shared configuration types for menuki (swap toggles, modes, parsing).
//!
//! The swap rules themselves are data owned by `swapmode`; this crate holds
//! the user-facing switches that gate them, plus RON loading. Rule gates
//! re-read the active [`Config`] every pass, so an engine-level
//! `set_config` takes effect on the very next frame.

use std::{ffi::OsStr, fs, path::Path};

use serde::{Deserialize, Serialize};

mod error;

#[cfg(test)]
mod test_parse;

pub use error::Error;

/// How fairy ring entries should be reordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FairyRingMode {
    /// Leave the host ordering alone.
    #[default]
    Off,
    /// Prefer the plain Zanaris teleport; the configure option is demoted.
    Zanaris,
    /// Prefer the last-used destination.
    LastDestination,
    /// Prefer opening the destination configuration.
    Configure,
}

/// Boolean rule toggles, projected through [`Config::flag`] so that rule
/// definitions stay plain data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    /// Prefer "Assignment" on slayer masters.
    SwapAssignment,
    /// Prefer "Trade" on tradeable NPCs.
    SwapTrade,
    /// Prefer "Bank" on bankers and booths.
    SwapBank,
    /// Prefer "Pay (...)" options on farmers.
    SwapPay,
    /// Prefer "Quick-..." options on doors and barriers.
    SwapQuick,
    /// Prefer "Empty" on birdhouses.
    SwapBirdhouseEmpty,
    /// Prefer a teleport's alternate destination while shift is held.
    SwapTeleportSpell,
    /// Offer per-item click-binding submenus on menu open.
    UiCustomization,
}

/// User configuration for menu customization.
///
/// Every field defaults to off/neutral: a default config leaves the host's
/// menus byte-for-byte alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// Prefer "Assignment" on slayer masters.
    pub swap_assignment: bool,
    /// Prefer "Trade" on tradeable NPCs.
    pub swap_trade: bool,
    /// Prefer "Bank" on bankers and booths.
    pub swap_bank: bool,
    /// Prefer "Pay (...)" options on farmers.
    pub swap_pay: bool,
    /// Prefer "Quick-..." options on doors and barriers.
    pub swap_quick: bool,
    /// Prefer "Empty" on birdhouses.
    pub swap_birdhouse_empty: bool,
    /// Prefer a teleport's alternate destination while shift is held.
    pub swap_teleport_spell: bool,
    /// Fairy ring preference.
    pub swap_fairy_ring: FairyRingMode,
    /// Offer per-item click-binding submenus on menu open.
    pub ui_customization: bool,
}

impl Config {
    /// Resolve a boolean rule toggle.
    pub fn flag(&self, flag: Flag) -> bool {
        match flag {
            Flag::SwapAssignment => self.swap_assignment,
            Flag::SwapTrade => self.swap_trade,
            Flag::SwapBank => self.swap_bank,
            Flag::SwapPay => self.swap_pay,
            Flag::SwapQuick => self.swap_quick,
            Flag::SwapBirdhouseEmpty => self.swap_birdhouse_empty,
            Flag::SwapTeleportSpell => self.swap_teleport_spell,
            Flag::UiCustomization => self.ui_customization,
        }
    }
}

/// Parse a [`Config`] from RON text.
pub fn load_from_str(text: &str) -> Result<Config, Error> {
    parse(text, None)
}

/// Load a [`Config`] from a RON file at `path`.
pub fn load_from_path(path: &Path) -> Result<Config, Error> {
    if path.extension() != Some(OsStr::new("ron")) {
        return Err(Error::Read {
            path: Some(path.to_path_buf()),
            message: "Unsupported config format (expected a .ron file)".to_string(),
        });
    }
    let text = fs::read_to_string(path).map_err(|e| Error::Read {
        path: Some(path.to_path_buf()),
        message: e.to_string(),
    })?;
    let cfg = parse(&text, Some(path))?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(cfg)
}

/// Shared parse step; RON's error rendering already carries line:col.
fn parse(text: &str, path: Option<&Path>) -> Result<Config, Error> {
    ron::from_str(text).map_err(|e| Error::Parse {
        path: path.map(Path::to_path_buf),
        message: e.to_string(),
    })
}
