//! End-to-end kiosk flow over the public surface
//!
//! Exercises the full deployment shape: mock collaborators behind the
//! traits, window work on a real surface thread, host operations
//! through the request/response channel, key decisions through the
//! synchronous dispatch hook.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};

use kioskctl::config::Config;
use kioskctl::service::channel;
use kioskctl::surface;
use kioskctl::{
    AllowedKeysConfig, AppIdentity, DisplayController, HardwareKey, HostTask, KioskController,
    KioskService, LauncherRegistrar, Request, Response,
};

#[derive(Clone, Default)]
struct RecordingDisplay {
    calls: Arc<Mutex<Vec<&'static str>>>,
}

impl DisplayController for RecordingDisplay {
    fn hide_system_chrome(&mut self) -> Result<()> {
        self.calls.lock().expect("lock").push("hide_chrome");
        Ok(())
    }
    fn show_system_chrome(&mut self) -> Result<()> {
        self.calls.lock().expect("lock").push("show_chrome");
        Ok(())
    }
    fn set_keep_screen_on(&mut self, on: bool) -> Result<()> {
        self.calls
            .lock()
            .expect("lock")
            .push(if on { "screen_on" } else { "screen_off" });
        Ok(())
    }
    fn set_forced_fullscreen(&mut self, on: bool) -> Result<()> {
        self.calls
            .lock()
            .expect("lock")
            .push(if on { "fullscreen" } else { "windowed" });
        Ok(())
    }
}

struct ScriptedRegistrar {
    home: &'static str,
    enabled: AtomicUsize,
    opened: AtomicUsize,
}

impl ScriptedRegistrar {
    fn new(home: &'static str) -> Self {
        Self {
            home,
            enabled: AtomicUsize::new(0),
            opened: AtomicUsize::new(0),
        }
    }
}

impl LauncherRegistrar for ScriptedRegistrar {
    fn enable_launcher_component(&self, _identity: &AppIdentity) -> Result<()> {
        self.enabled.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
    fn resolve_current_home_handler(&self) -> Result<AppIdentity> {
        if self.home.is_empty() {
            return Err(anyhow!("no home handler resolved"));
        }
        Ok(AppIdentity::from(self.home))
    }
    fn open_home_selection_ui(&self) -> Result<()> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Clone, Default)]
struct CountingTask {
    raised: Arc<AtomicUsize>,
}

impl HostTask for CountingTask {
    fn bring_to_foreground(&self) -> Result<()> {
        self.raised.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn deployment(home: &'static str) -> (KioskService, RecordingDisplay, Arc<AtomicUsize>) {
    let display = RecordingDisplay::default();
    let (handle, _join) = surface::spawn(display.clone());
    let task = CountingTask::default();
    let raised = task.raised.clone();
    let service = KioskService::new(KioskController::new(
        handle,
        Box::new(ScriptedRegistrar::new(home)),
        Box::new(task),
        AppIdentity::from("app.kiosk.signage"),
    ));
    (service, display, raised)
}

fn allow(keys: &[HardwareKey]) -> AllowedKeysConfig {
    let mut config = AllowedKeysConfig::default();
    for &key in keys {
        config.allow(key);
    }
    config
}

/// The canonical lock-down sequence: configure keys, enter, dispatch,
/// exit, dispatch again.
#[tokio::test]
async fn locked_down_deployment_flow() {
    let (mut service, display, raised) = deployment("app.kiosk.signage");

    service
        .handle(Request::SetAllowedKeys(allow(&[
            HardwareKey::Power,
            HardwareKey::VolumeUp,
        ])))
        .await
        .expect("set keys");

    // Inactive: nothing is blocked yet
    assert!(!service.should_block_key(HardwareKey::Back));

    service.handle(Request::EnterKioskMode).await.expect("enter");
    assert!(!service.should_block_key(HardwareKey::Power));
    assert!(!service.should_block_key(HardwareKey::VolumeUp));
    assert!(service.should_block_key(HardwareKey::Back));
    assert!(service.should_block_key(HardwareKey::Home));

    // An OS interruption while locked down reasserts the own task
    service.on_lost_foreground();
    assert_eq!(raised.load(Ordering::SeqCst), 1);

    service.handle(Request::ExitKioskMode).await.expect("exit");
    assert!(!service.should_block_key(HardwareKey::Power));
    assert!(!service.should_block_key(HardwareKey::Back));
    service.on_lost_foreground();
    assert_eq!(raised.load(Ordering::SeqCst), 1);

    assert_eq!(
        display.calls.lock().expect("lock").as_slice(),
        [
            "hide_chrome",
            "screen_on",
            "fullscreen",
            "show_chrome",
            "screen_off",
            "windowed"
        ]
    );
}

/// The same deployment driven over the request/response channel.
#[tokio::test]
async fn channel_driven_deployment() {
    let (mut service, _display, _raised) = deployment("app.kiosk.signage");
    let (handle, queue) = channel::channel();

    let host = async move {
        handle
            .call(Request::SetAllowedKeys(allow(&[HardwareKey::VolumeDown])))
            .await
            .expect("set keys");

        assert_eq!(
            handle.call(Request::EnterKioskMode).await.expect("enter"),
            Response::Done
        );
        assert_eq!(
            handle.call(Request::IsInKioskMode).await.expect("query"),
            Response::KioskMode {
                is_in_kiosk_mode: true
            }
        );
        assert_eq!(
            handle.call(Request::IsSetAsLauncher).await.expect("query"),
            Response::Launcher { is_launcher: true }
        );
        assert_eq!(
            handle.call(Request::ExitKioskMode).await.expect("exit"),
            Response::Done
        );

        match handle.call(Request::GetVersion).await.expect("version") {
            Response::Version { version } => {
                assert_eq!(version, env!("CARGO_PKG_VERSION"));
            }
            other => panic!("unexpected response: {other:?}"),
        }
    };

    tokio::join!(channel::serve(&mut service, queue), host);
}

/// Launcher registration requests both steps and never verifies the
/// outcome; a registrar that cannot resolve a home handler reads as
/// "not launcher".
#[tokio::test]
async fn launcher_registration_requests() {
    let (mut service, _display, _raised) = deployment("");

    assert_eq!(
        service.handle(Request::IsSetAsLauncher).await.expect("query"),
        Response::Launcher { is_launcher: false }
    );
    assert_eq!(
        service.handle(Request::SetAsLauncher).await.expect("request"),
        Response::Done
    );
}

/// Config-file allowed keys feed straight into the policy.
#[tokio::test]
async fn config_keys_apply() {
    let config: Config = toml::from_str(
        r#"
        [keys]
        back = true
        "#,
    )
    .expect("parse");

    let (mut service, _display, _raised) = deployment("app.kiosk.signage");
    service
        .handle(Request::SetAllowedKeys(config.keys.clone()))
        .await
        .expect("set keys");
    service.handle(Request::EnterKioskMode).await.expect("enter");

    assert!(!service.should_block_key(HardwareKey::Back));
    assert!(service.should_block_key(HardwareKey::Menu));
}
