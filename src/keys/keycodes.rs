//! evdev keycode constants for controllable hardware buttons
//!
//! These are Linux input event codes from <linux/input-event-codes.h>,
//! restricted to the hardware buttons a kiosk deployment can allow-list.
//! Hosts that dispatch raw keycodes map them to [`HardwareKey`] here.

#![allow(dead_code)]

// ============================================================================
// Hardware Button Keycodes
// ============================================================================

/// Volume down button
pub const KEY_VOLUMEDOWN: u32 = 114;

/// Volume up button
pub const KEY_VOLUMEUP: u32 = 115;

/// Power button
pub const KEY_POWER: u32 = 116;

/// Menu button
pub const KEY_MENU: u32 = 139;

/// Back button
pub const KEY_BACK: u32 = 158;

/// Home button
pub const KEY_HOMEPAGE: u32 = 172;

/// Camera button
pub const KEY_CAMERA: u32 = 212;

/// Recent-apps (app switch) button
pub const KEY_APPSELECT: u32 = 0x244;

// ============================================================================
// Semantic Identifiers
// ============================================================================

/// Hardware buttons that can be allow-listed while kiosk mode is active.
///
/// These are semantic symbols; [`HardwareKey::from_keycode`] maps the raw
/// evdev codes above onto them. Any keycode outside this set has no
/// symbol and therefore can never appear in an allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HardwareKey {
    VolumeUp,
    VolumeDown,
    Back,
    Home,
    RecentApps,
    Power,
    Camera,
    Menu,
}

impl HardwareKey {
    /// All controllable buttons
    pub const ALL: [HardwareKey; 8] = [
        HardwareKey::VolumeUp,
        HardwareKey::VolumeDown,
        HardwareKey::Back,
        HardwareKey::Home,
        HardwareKey::RecentApps,
        HardwareKey::Power,
        HardwareKey::Camera,
        HardwareKey::Menu,
    ];

    /// Map a raw evdev keycode to its semantic button.
    /// Returns None for keys outside the controllable set.
    #[inline]
    pub const fn from_keycode(keycode: u32) -> Option<Self> {
        match keycode {
            KEY_VOLUMEUP => Some(HardwareKey::VolumeUp),
            KEY_VOLUMEDOWN => Some(HardwareKey::VolumeDown),
            KEY_BACK => Some(HardwareKey::Back),
            KEY_HOMEPAGE => Some(HardwareKey::Home),
            KEY_APPSELECT => Some(HardwareKey::RecentApps),
            KEY_POWER => Some(HardwareKey::Power),
            KEY_CAMERA => Some(HardwareKey::Camera),
            KEY_MENU => Some(HardwareKey::Menu),
            _ => None,
        }
    }

    /// Raw evdev keycode for this button
    #[inline]
    pub const fn keycode(self) -> u32 {
        match self {
            HardwareKey::VolumeUp => KEY_VOLUMEUP,
            HardwareKey::VolumeDown => KEY_VOLUMEDOWN,
            HardwareKey::Back => KEY_BACK,
            HardwareKey::Home => KEY_HOMEPAGE,
            HardwareKey::RecentApps => KEY_APPSELECT,
            HardwareKey::Power => KEY_POWER,
            HardwareKey::Camera => KEY_CAMERA,
            HardwareKey::Menu => KEY_MENU,
        }
    }

    /// Config/diagnostic name
    pub const fn name(self) -> &'static str {
        match self {
            HardwareKey::VolumeUp => "volume_up",
            HardwareKey::VolumeDown => "volume_down",
            HardwareKey::Back => "back",
            HardwareKey::Home => "home",
            HardwareKey::RecentApps => "recent_apps",
            HardwareKey::Power => "power",
            HardwareKey::Camera => "camera",
            HardwareKey::Menu => "menu",
        }
    }

    /// Parse a config/diagnostic name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "volume_up" | "volumeup" => Some(HardwareKey::VolumeUp),
            "volume_down" | "volumedown" => Some(HardwareKey::VolumeDown),
            "back" => Some(HardwareKey::Back),
            "home" => Some(HardwareKey::Home),
            "recent_apps" | "recent" => Some(HardwareKey::RecentApps),
            "power" => Some(HardwareKey::Power),
            "camera" => Some(HardwareKey::Camera),
            "menu" => Some(HardwareKey::Menu),
            _ => None,
        }
    }
}
