//! Configuration file management
//!
//! Loads TOML deployment configuration.
//! Default config path: ~/.config/kioskctl/config.toml

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[cfg(target_os = "linux")]
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
#[cfg(target_os = "linux")]
use std::path::Path;
#[cfg(target_os = "linux")]
use std::sync::mpsc;

use crate::keys::AllowedKeysConfig;

/// Deployment settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// Hardware keys allowed while kiosk mode is active
    pub keys: AllowedKeysConfig,
    /// Kiosk behavior
    pub kiosk: KioskConfig,
}

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Package-style identity compared against the resolved home handler
    pub identity: String,
}

/// Kiosk behavior settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KioskConfig {
    /// Enter kiosk mode as soon as the host is up
    pub enter_on_start: bool,
}

impl Config {
    /// System-wide config path
    pub const SYSTEM_CONFIG_PATH: &'static str = "/etc/kioskctl/config.toml";

    /// Resolve the config file path with priority:
    /// 1. KIOSKCTL_CONFIG environment variable
    /// 2. ~/.config/kioskctl/config.toml (user config)
    /// 3. /etc/kioskctl/config.toml (system config)
    pub fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("KIOSKCTL_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
            warn!("KIOSKCTL_CONFIG points to a missing file: {}", path.display());
        }

        if let Some(user_config) = default_config_path() {
            if user_config.exists() {
                return Some(user_config);
            }
        }

        let system_config = std::path::Path::new(Self::SYSTEM_CONFIG_PATH);
        if system_config.exists() {
            return Some(system_config.to_path_buf());
        }

        None
    }

    /// Load configuration, falling back to built-in defaults when no
    /// file is found or a file fails to parse.
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            match Self::load_from_file(&path) {
                Ok(config) => {
                    info!("Loaded config: {}", path.display());
                    return config;
                }
                Err(e) => {
                    warn!("Failed to load config {}: {}", path.display(), e);
                }
            }
        }
        info!("Using built-in default config");
        Self::default()
    }

    /// Load settings from specified path
    pub fn load_from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Write the default config to the user config path (template
    /// generation)
    pub fn write_default() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Config directory not found"))?;
        let dir = config_dir.join("kioskctl");
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        let path = dir.join("config.toml");
        let content = toml::to_string_pretty(&Self::default())?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

/// Get default user config file path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("kioskctl").join("config.toml"))
}

/// Config file change watcher (Linux only)
#[cfg(target_os = "linux")]
pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<()>,
}

#[cfg(target_os = "linux")]
impl ConfigWatcher {
    /// Start watching config file
    pub fn new(config_path: &Path) -> Result<Self> {
        let (tx, rx) = mpsc::channel();

        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                // Detect Modify and Create events
                // (editors often save by writing to temp file then rename)
                use notify::EventKind;
                match event.kind {
                    EventKind::Modify(_) | EventKind::Create(_) => {
                        let _ = tx.send(());
                    }
                    _ => {}
                }
            }
        })?;

        // Watch the parent directory to catch rename operations
        let watch_path = config_path.parent().unwrap_or(config_path);
        watcher.watch(watch_path, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            rx,
        })
    }

    /// Check if config file was modified (non-blocking)
    pub fn check_reload(&self) -> bool {
        self.rx.try_recv().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_locked_down() {
        let config = Config::default();
        assert!(config.app.identity.is_empty());
        assert!(!config.kiosk.enter_on_start);
        // No key allowed by default
        assert!(!config.keys.volume_up);
        assert!(!config.keys.back);
        assert!(!config.keys.power);
    }

    #[test]
    fn test_parse_partial_config() {
        let config: Config = toml::from_str(
            r#"
            [app]
            identity = "app.kiosk.signage"

            [keys]
            volume_up = true
            volume_down = true

            [kiosk]
            enter_on_start = true
            "#,
        )
        .expect("parse");

        assert_eq!(config.app.identity, "app.kiosk.signage");
        assert!(config.keys.volume_up);
        assert!(config.keys.volume_down);
        assert!(!config.keys.home);
        assert!(config.kiosk.enter_on_start);
    }

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").expect("parse");
        assert!(!config.kiosk.enter_on_start);
        assert!(!config.keys.menu);
    }

    #[test]
    fn test_default_roundtrip() {
        let text = toml::to_string_pretty(&Config::default()).expect("serialize");
        let config: Config = toml::from_str(&text).expect("parse");
        assert!(config.app.identity.is_empty());
    }
}
