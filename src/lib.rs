//! kioskctl - single-app kiosk mode control
//!
//! Locks a device UI into a single application: immersive display
//! lock-down, hardware key allow-listing, and optional registration as
//! the device's home launcher. The embedding host supplies the platform
//! capabilities (display surface, launcher registrar, task activation)
//! and drives the service through a request/response surface.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 Embedding host                  │
//! ├─────────────────────────────────────────────────┤
//! │  request channel  →  KioskService               │
//! │   key dispatch    →    ├─ KeyPolicy             │
//! │                        └─ KioskController       │
//! │                              ↓ surface queue    │
//! │  surface thread   →  DisplayController          │
//! │  collaborators:      LauncherRegistrar, HostTask│
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! All mutating calls originate serially from the host, which owns the
//! service by `&mut`; the kiosk state and the allow-list need no locking.
//! The one thread-affinity constraint is the display surface: window
//! mutations are posted to the surface owner's queue and awaited, never
//! run on the caller's thread.

pub mod config;
pub mod display;
pub mod error;
pub mod keys;
pub mod kiosk;
pub mod launcher;
pub mod service;

pub use display::{surface, DisplayController, WindowFlags};
pub use error::KioskError;
pub use keys::{AllowedKeysConfig, HardwareKey, KeyPolicy};
pub use kiosk::{HostTask, KioskController, KioskState};
pub use launcher::{AppIdentity, LauncherRegistrar};
pub use service::{KioskService, Request, Response};
