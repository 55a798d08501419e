//! Hardware key handling
//!
//! Manage the hardware button allow-list.
//! - Semantic key identifiers plus the raw evdev keycode table
//! - Allow-list policy consulted by the host's key dispatch path

pub mod keycodes;
pub mod policy;

pub use keycodes::HardwareKey;
pub use policy::{AllowedKeysConfig, KeyPolicy};
