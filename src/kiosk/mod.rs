//! Kiosk state machine
//!
//! Owns the on/off state and the display/launcher side effects. Window
//! work is posted to the surface queue and awaited; state is committed
//! only after the work succeeds, so a failed transition leaves the
//! machine where it was. Both transitions re-apply their side effects
//! even when the state already matches, which keeps exit safe to call
//! from any visual state.

use anyhow::Result;
use log::{info, warn};

use crate::display::surface::SurfaceHandle;
use crate::error::KioskError;
use crate::launcher::{AppIdentity, LauncherRegistrar};

/// Kiosk mode state. Lives for the process lifetime, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KioskState {
    #[default]
    Inactive,
    Active,
}

impl KioskState {
    #[inline]
    pub const fn is_active(self) -> bool {
        matches!(self, KioskState::Active)
    }
}

/// Host capability to reassert the application's own task.
pub trait HostTask {
    /// Bring the application's task back to the foreground.
    fn bring_to_foreground(&self) -> Result<()>;
}

/// Kiosk mode controller
pub struct KioskController {
    state: KioskState,
    surface: SurfaceHandle,
    registrar: Box<dyn LauncherRegistrar>,
    task: Box<dyn HostTask>,
    identity: AppIdentity,
}

impl KioskController {
    pub fn new(
        surface: SurfaceHandle,
        registrar: Box<dyn LauncherRegistrar>,
        task: Box<dyn HostTask>,
        identity: AppIdentity,
    ) -> Self {
        Self {
            state: KioskState::Inactive,
            surface,
            registrar,
            task,
            identity,
        }
    }

    /// Current state as a boolean. No side effects, never fails.
    #[inline]
    pub fn is_in_kiosk_mode(&self) -> bool {
        self.state.is_active()
    }

    /// Apply the immersive lock-down and activate kiosk mode.
    ///
    /// One unit of work on the surface thread: hide system chrome, keep
    /// the screen on, pin fullscreen. State flips to Active only when
    /// all of it succeeded.
    pub async fn enter_kiosk_mode(&mut self) -> Result<(), KioskError> {
        let done = self
            .surface
            .submit(Box::new(|display| {
                display.hide_system_chrome()?;
                display.set_keep_screen_on(true)?;
                display.set_forced_fullscreen(true)?;
                Ok(())
            }))
            .map_err(|_| KioskError::SurfaceUnavailable)?;

        match done.await {
            Ok(Ok(())) => {
                self.state = KioskState::Active;
                info!("Entered kiosk mode");
                Ok(())
            }
            Ok(Err(cause)) => Err(KioskError::collaborator("failed to enter kiosk mode", cause)),
            Err(_) => Err(KioskError::SurfaceUnavailable),
        }
    }

    /// Revert the lock-down and deactivate kiosk mode.
    ///
    /// Safe to call while already Inactive: the restored visual state is
    /// simply re-applied.
    pub async fn exit_kiosk_mode(&mut self) -> Result<(), KioskError> {
        let done = self
            .surface
            .submit(Box::new(|display| {
                display.show_system_chrome()?;
                display.set_keep_screen_on(false)?;
                display.set_forced_fullscreen(false)?;
                Ok(())
            }))
            .map_err(|_| KioskError::SurfaceUnavailable)?;

        match done.await {
            Ok(Ok(())) => {
                self.state = KioskState::Inactive;
                info!("Exited kiosk mode");
                Ok(())
            }
            Ok(Err(cause)) => Err(KioskError::collaborator("failed to exit kiosk mode", cause)),
            Err(_) => Err(KioskError::SurfaceUnavailable),
        }
    }

    /// Live launcher query: does the OS currently resolve this
    /// application as its home handler?
    ///
    /// Degrades to false on any registrar failure; "unknown" and "not
    /// launcher" are equivalent for this read.
    pub fn is_set_as_launcher(&self) -> bool {
        match self.registrar.resolve_current_home_handler() {
            Ok(handler) => handler == self.identity,
            Err(e) => {
                warn!("Home handler query failed: {:#}", e);
                false
            }
        }
    }

    /// Request launcher registration: enable the launcher component,
    /// then open the OS home-selection surface.
    ///
    /// Success means both requests were issued. The user's eventual
    /// selection is neither awaited nor verified.
    pub fn set_as_launcher(&self) -> Result<(), KioskError> {
        self.registrar
            .enable_launcher_component(&self.identity)
            .and_then(|()| self.registrar.open_home_selection_ui())
            .map_err(|cause| KioskError::collaborator("failed to set as launcher", cause))
    }

    /// Host lifecycle hook: the application was pushed out of the
    /// foreground (system dialog, task switch).
    ///
    /// While kiosk mode is active the own task is immediately
    /// reasserted; interruptions must not offer an escape path that the
    /// blocked-key route already closes. No-op while Inactive.
    pub fn on_lost_foreground(&self) {
        if !self.state.is_active() {
            return;
        }
        info!("Lost foreground while kiosk mode active, reasserting");
        if let Err(e) = self.task.bring_to_foreground() {
            warn!("Failed to reassert foreground: {:#}", e);
        }
    }
}
