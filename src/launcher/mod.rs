//! Launcher registration
//!
//! The launcher registrar is the host capability that talks to the OS
//! package/launcher subsystem. Registration is an OS-level fact and is
//! never cached here: every query resolves the current home handler
//! live.

use std::fmt;

use anyhow::Result;

/// Package-style application identity, compared against the identity the
/// OS resolves for its home handler.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AppIdentity(String);

impl AppIdentity {
    pub fn new(identity: impl Into<String>) -> Self {
        Self(identity.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AppIdentity {
    fn from(identity: &str) -> Self {
        Self(identity.to_string())
    }
}

impl From<String> for AppIdentity {
    fn from(identity: String) -> Self {
        Self(identity)
    }
}

/// Host capability for home-launcher registration.
pub trait LauncherRegistrar {
    /// Enable this application's launcher component so the OS offers it
    /// as a home-app candidate.
    fn enable_launcher_component(&self, identity: &AppIdentity) -> Result<()>;

    /// Resolve the identity of the OS's currently selected home handler.
    fn resolve_current_home_handler(&self) -> Result<AppIdentity>;

    /// Open the OS home-app-selection surface so the user can confirm
    /// the choice.
    fn open_home_selection_ui(&self) -> Result<()>;
}
