//! Display surface control
//!
//! The display controller is the host capability that manipulates the
//! visible window: system chrome, screen power, forced fullscreen. Its
//! methods run on the single thread that owns the display surface; the
//! kiosk controller reaches it through the task queue in [`surface`].

pub mod surface;

pub use surface::{SurfaceHandle, SurfaceQueue};

use anyhow::Result;
use bitflags::bitflags;

bitflags! {
    /// Window flag word applied by display controllers.
    ///
    /// Vocabulary for implementations that track applied flags as a
    /// bitmask, the way mobile window managers do.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct WindowFlags: u32 {
        /// Screen stays powered on while the window is visible
        const KEEP_SCREEN_ON = 1 << 0;
        /// Window is pinned fullscreen; the status bar cannot be dragged open
        const FORCED_FULLSCREEN = 1 << 1;
    }
}

/// Host capability that manipulates the visible window.
///
/// Every method may fail with a platform error; the failure is reported
/// to the caller with the cause attached and kiosk state stays unchanged.
pub trait DisplayController {
    /// Hide status/navigation chrome. While hidden, the only reveal left
    /// to the user is a swipe-triggered transient peek.
    fn hide_system_chrome(&mut self) -> Result<()>;

    /// Restore status/navigation chrome.
    fn show_system_chrome(&mut self) -> Result<()>;

    /// Force the screen to stay powered on, or clear the flag.
    fn set_keep_screen_on(&mut self, on: bool) -> Result<()>;

    /// Pin the window fullscreen so the status bar cannot be dragged
    /// open, or clear the flag.
    fn set_forced_fullscreen(&mut self, on: bool) -> Result<()>;
}
