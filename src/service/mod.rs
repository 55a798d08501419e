//! Kiosk service surface
//!
//! Plain service object with an explicit operation table: the host
//! channel delivers [`Request`]s to [`KioskService::handle`], and the
//! host's key-dispatch path consults [`KioskService::should_block_key`]
//! synchronously for every hardware key event before default handling.
//!
//! The host owns the service by `&mut` and serializes all mutating
//! calls; kiosk state and the allow-list are single-writer by
//! construction and carry no locks. A host that genuinely dispatches
//! keys from another thread must wrap the service itself.

pub mod channel;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::KioskError;
use crate::keys::{AllowedKeysConfig, HardwareKey, KeyPolicy};
use crate::kiosk::KioskController;

/// Crate version reported by [`Request::GetVersion`]
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Operations callable by the embedding host
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", content = "args", rename_all = "snake_case")]
pub enum Request {
    IsInKioskMode,
    IsSetAsLauncher,
    EnterKioskMode,
    ExitKioskMode,
    SetAsLauncher,
    SetAllowedKeys(AllowedKeysConfig),
    GetVersion,
}

/// Success payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Response {
    KioskMode { is_in_kiosk_mode: bool },
    Launcher { is_launcher: bool },
    Version { version: String },
    Done,
}

/// The exposed kiosk service: controller plus key policy
pub struct KioskService {
    controller: KioskController,
    policy: KeyPolicy,
}

impl KioskService {
    pub fn new(controller: KioskController) -> Self {
        Self {
            controller,
            policy: KeyPolicy::new(),
        }
    }

    /// Execute one host operation.
    pub async fn handle(&mut self, request: Request) -> Result<Response, KioskError> {
        match request {
            Request::IsInKioskMode => Ok(Response::KioskMode {
                is_in_kiosk_mode: self.controller.is_in_kiosk_mode(),
            }),
            Request::IsSetAsLauncher => Ok(Response::Launcher {
                is_launcher: self.controller.is_set_as_launcher(),
            }),
            Request::EnterKioskMode => {
                self.controller.enter_kiosk_mode().await.map(|()| Response::Done)
            }
            Request::ExitKioskMode => {
                self.controller.exit_kiosk_mode().await.map(|()| Response::Done)
            }
            Request::SetAsLauncher => self.controller.set_as_launcher().map(|()| Response::Done),
            Request::SetAllowedKeys(config) => {
                self.policy.set_allowed_keys(&config);
                Ok(Response::Done)
            }
            Request::GetVersion => Ok(Response::Version {
                version: VERSION.to_string(),
            }),
        }
    }

    /// Key-dispatch hook. The host must consult this for every hardware
    /// key event and suppress default handling on `true`.
    ///
    /// Allow-list membership matters only while kiosk mode is active;
    /// while inactive every key passes regardless of the list.
    pub fn should_block_key(&self, key: HardwareKey) -> bool {
        if !self.controller.is_in_kiosk_mode() {
            return false;
        }
        let block = !self.policy.is_allowed(key);
        debug!(
            "Key {}: {}",
            key.name(),
            if block { "blocked" } else { "allowed" }
        );
        block
    }

    /// Raw-keycode variant for hosts that dispatch evdev codes directly.
    ///
    /// A code outside the controllable set can never be allow-listed, so
    /// it is blocked whenever kiosk mode is active.
    pub fn should_block_keycode(&self, keycode: u32) -> bool {
        if !self.controller.is_in_kiosk_mode() {
            return false;
        }
        match HardwareKey::from_keycode(keycode) {
            Some(key) => !self.policy.is_allowed(key),
            None => true,
        }
    }

    /// Deliver the host's lost-foreground lifecycle signal.
    pub fn on_lost_foreground(&self) {
        self.controller.on_lost_foreground();
    }

    pub fn controller(&self) -> &KioskController {
        &self.controller
    }
}
