//! Hardware key allow-list policy
//!
//! Owns the set of buttons the user may still operate while kiosk mode
//! is active. The set is replaced wholesale on every update and is empty
//! by default: a fresh deployment blocks every hardware button. Only
//! membership matters; whether the set is consulted at all is decided by
//! the kiosk state at the dispatch point.

use std::collections::HashSet;

use log::info;
use serde::{Deserialize, Serialize};

use super::keycodes::HardwareKey;

/// Allowed hardware key flags.
///
/// Every flag defaults to false: a key absent from an update is blocked.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AllowedKeysConfig {
    pub volume_up: bool,
    pub volume_down: bool,
    pub back: bool,
    pub home: bool,
    pub recent_apps: bool,
    pub power: bool,
    pub camera: bool,
    pub menu: bool,
}

impl AllowedKeysConfig {
    /// Set the flag matching a semantic button
    pub fn allow(&mut self, key: HardwareKey) {
        match key {
            HardwareKey::VolumeUp => self.volume_up = true,
            HardwareKey::VolumeDown => self.volume_down = true,
            HardwareKey::Back => self.back = true,
            HardwareKey::Home => self.home = true,
            HardwareKey::RecentApps => self.recent_apps = true,
            HardwareKey::Power => self.power = true,
            HardwareKey::Camera => self.camera = true,
            HardwareKey::Menu => self.menu = true,
        }
    }
}

/// Hardware key allow-list
pub struct KeyPolicy {
    allowed: HashSet<HardwareKey>,
}

impl KeyPolicy {
    /// Start with an empty allow-list (maximal lock-down)
    pub fn new() -> Self {
        Self {
            allowed: HashSet::new(),
        }
    }

    /// Replace the allow-list with exactly the flagged buttons.
    /// Previous contents are discarded, not merged.
    pub fn set_allowed_keys(&mut self, config: &AllowedKeysConfig) {
        self.allowed.clear();
        if config.volume_up {
            self.allowed.insert(HardwareKey::VolumeUp);
        }
        if config.volume_down {
            self.allowed.insert(HardwareKey::VolumeDown);
        }
        if config.back {
            self.allowed.insert(HardwareKey::Back);
        }
        if config.home {
            self.allowed.insert(HardwareKey::Home);
        }
        if config.recent_apps {
            self.allowed.insert(HardwareKey::RecentApps);
        }
        if config.power {
            self.allowed.insert(HardwareKey::Power);
        }
        if config.camera {
            self.allowed.insert(HardwareKey::Camera);
        }
        if config.menu {
            self.allowed.insert(HardwareKey::Menu);
        }
        info!("Allowed keys updated: {:?}", self.allowed);
    }

    /// Is this button allow-listed?
    #[inline]
    pub fn is_allowed(&self, key: HardwareKey) -> bool {
        self.allowed.contains(&key)
    }
}

impl Default for KeyPolicy {
    fn default() -> Self {
        Self::new()
    }
}
