//! kioskctl demo host
//!
//! Drives the kiosk service against simulated collaborators from a
//! line-oriented prompt: kiosk transitions, key-block decisions,
//! launcher registration. The simulation keeps the contract of a real
//! embedding: window work runs on a dedicated surface thread, every
//! mutating call goes through the service owned by the host loop.

use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;

use anyhow::Result;
use log::info;

use kioskctl::config::Config;
use kioskctl::display::{DisplayController, WindowFlags};
use kioskctl::keys::{AllowedKeysConfig, HardwareKey};
use kioskctl::kiosk::{HostTask, KioskController};
use kioskctl::launcher::{AppIdentity, LauncherRegistrar};
use kioskctl::service::{KioskService, Request, Response, VERSION};
use kioskctl::surface;

/// Identity used when the config file does not set one
const DEMO_IDENTITY: &str = "dev.kioskctl.demo";

/// Home handler the simulated OS starts with
const STOCK_LAUNCHER: &str = "com.os.launcher";

// ============================================================================
// Simulated collaborators
// ============================================================================

/// Simulated display surface: logs chrome changes, tracks the window
/// flag word like a mobile window manager would
struct SimDisplay {
    chrome_hidden: bool,
    flags: WindowFlags,
}

impl SimDisplay {
    fn new() -> Self {
        Self {
            chrome_hidden: false,
            flags: WindowFlags::empty(),
        }
    }
}

impl DisplayController for SimDisplay {
    fn hide_system_chrome(&mut self) -> Result<()> {
        if !self.chrome_hidden {
            info!("display: system chrome hidden (transient peek only)");
        }
        self.chrome_hidden = true;
        Ok(())
    }

    fn show_system_chrome(&mut self) -> Result<()> {
        if self.chrome_hidden {
            info!("display: system chrome restored");
        }
        self.chrome_hidden = false;
        Ok(())
    }

    fn set_keep_screen_on(&mut self, on: bool) -> Result<()> {
        self.flags.set(WindowFlags::KEEP_SCREEN_ON, on);
        info!("display: window flags now {:?}", self.flags);
        Ok(())
    }

    fn set_forced_fullscreen(&mut self, on: bool) -> Result<()> {
        self.flags.set(WindowFlags::FORCED_FULLSCREEN, on);
        info!("display: window flags now {:?}", self.flags);
        Ok(())
    }
}

/// Simulated OS state shared between the registrar and the prompt
struct SimWorld {
    home_handler: AppIdentity,
    selection_ui_open: bool,
}

/// Simulated launcher registrar over the shared world
struct SimRegistrar {
    world: Rc<RefCell<SimWorld>>,
}

impl LauncherRegistrar for SimRegistrar {
    fn enable_launcher_component(&self, identity: &AppIdentity) -> Result<()> {
        info!("registrar: launcher component enabled for {identity}");
        Ok(())
    }

    fn resolve_current_home_handler(&self) -> Result<AppIdentity> {
        Ok(self.world.borrow().home_handler.clone())
    }

    fn open_home_selection_ui(&self) -> Result<()> {
        self.world.borrow_mut().selection_ui_open = true;
        info!("registrar: home selection UI opened (use 'home <id>' to pick)");
        Ok(())
    }
}

/// Simulated task activation
struct SimTask;

impl HostTask for SimTask {
    fn bring_to_foreground(&self) -> Result<()> {
        info!("host: own task moved to front");
        Ok(())
    }
}

// ============================================================================
// Entry point
// ============================================================================

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("kioskctl {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if args.iter().any(|a| a == "--init-config") {
        let path = Config::write_default()?;
        println!("Config file generated: {}", path.display());
        return Ok(());
    }

    let config = Config::load();
    let rt = tokio::runtime::Builder::new_current_thread().build()?;

    if args.iter().any(|a| a == "--test" || a == "-t") {
        rt.block_on(self_test(&config))?;
        eprintln!("[OK] kioskctl self-test complete");
        return Ok(());
    }

    rt.block_on(run(config))
}

/// Smoke test: one full enter/exit cycle against the simulation
async fn self_test(config: &Config) -> Result<()> {
    let mut service = build_service(config).0;
    service
        .handle(Request::SetAllowedKeys(config.keys.clone()))
        .await?;
    service.handle(Request::EnterKioskMode).await?;
    anyhow::ensure!(
        service.should_block_key(HardwareKey::Back),
        "back key not blocked while active"
    );
    service.handle(Request::ExitKioskMode).await?;
    anyhow::ensure!(
        !service.should_block_key(HardwareKey::Back),
        "back key blocked while inactive"
    );
    Ok(())
}

fn build_service(config: &Config) -> (KioskService, Rc<RefCell<SimWorld>>) {
    let (surface, _join) = surface::spawn(SimDisplay::new());
    let world = Rc::new(RefCell::new(SimWorld {
        home_handler: AppIdentity::from(STOCK_LAUNCHER),
        selection_ui_open: false,
    }));
    let identity = if config.app.identity.is_empty() {
        DEMO_IDENTITY.to_string()
    } else {
        config.app.identity.clone()
    };
    let controller = KioskController::new(
        surface,
        Box::new(SimRegistrar {
            world: world.clone(),
        }),
        Box::new(SimTask),
        AppIdentity::from(identity),
    );
    (KioskService::new(controller), world)
}

async fn run(config: Config) -> Result<()> {
    let (mut service, world) = build_service(&config);

    service
        .handle(Request::SetAllowedKeys(config.keys.clone()))
        .await?;

    if config.kiosk.enter_on_start {
        if let Err(e) = service.handle(Request::EnterKioskMode).await {
            eprintln!("enter on start failed: {e}");
        }
    }

    #[cfg(target_os = "linux")]
    let watcher = kioskctl::config::default_config_path()
        .and_then(|path| kioskctl::config::ConfigWatcher::new(&path).ok());

    println!("kioskctl {VERSION} demo host (type 'help' for commands)");
    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        print!("kiosk> ");
        std::io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        #[cfg(target_os = "linux")]
        if let Some(w) = &watcher {
            if w.check_reload() {
                let reloaded = Config::load();
                let _ = service
                    .handle(Request::SetAllowedKeys(reloaded.keys.clone()))
                    .await;
                println!("config reloaded, allowed keys re-applied");
            }
        }

        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        match command {
            "help" => print_commands(),
            "status" => {
                let active = matches!(
                    service.handle(Request::IsInKioskMode).await,
                    Ok(Response::KioskMode {
                        is_in_kiosk_mode: true
                    })
                );
                let launcher = matches!(
                    service.handle(Request::IsSetAsLauncher).await,
                    Ok(Response::Launcher { is_launcher: true })
                );
                let world = world.borrow();
                println!(
                    "kiosk mode: {}, launcher: {}, home handler: {}{}",
                    if active { "active" } else { "inactive" },
                    launcher,
                    world.home_handler,
                    if world.selection_ui_open {
                        " (selection UI open)"
                    } else {
                        ""
                    }
                );
            }
            "enter" => report(service.handle(Request::EnterKioskMode).await),
            "exit" => report(service.handle(Request::ExitKioskMode).await),
            "set-launcher" => report(service.handle(Request::SetAsLauncher).await),
            "allow" => {
                let mut keys = AllowedKeysConfig::default();
                let mut bad = false;
                for name in words {
                    match HardwareKey::from_name(name) {
                        Some(key) => keys.allow(key),
                        None => {
                            println!("unknown key: {name}");
                            bad = true;
                        }
                    }
                }
                if !bad {
                    report(service.handle(Request::SetAllowedKeys(keys)).await);
                }
            }
            "key" => match words.next() {
                Some(name) => {
                    let decision = match HardwareKey::from_name(name) {
                        Some(key) => Some(service.should_block_key(key)),
                        None => name.parse::<u32>().ok().map(|code| service.should_block_keycode(code)),
                    };
                    match decision {
                        Some(true) => println!("{name}: blocked"),
                        Some(false) => println!("{name}: allowed"),
                        None => println!("unknown key: {name}"),
                    }
                }
                None => println!("usage: key <name|keycode>"),
            },
            "fg" => {
                service.on_lost_foreground();
                println!("lost-foreground delivered");
            }
            "home" => match words.next() {
                Some(id) => {
                    let mut world = world.borrow_mut();
                    world.home_handler = AppIdentity::from(id);
                    world.selection_ui_open = false;
                    println!("home handler now {id}");
                }
                None => println!("usage: home <identity>"),
            },
            "version" => {
                if let Ok(Response::Version { version }) =
                    service.handle(Request::GetVersion).await
                {
                    println!("kioskctl {version}");
                }
            }
            "quit" | "q" => break,
            other => println!("unknown command: {other} (try 'help')"),
        }
    }

    Ok(())
}

fn report(result: Result<Response, kioskctl::KioskError>) {
    match result {
        Ok(_) => println!("ok"),
        Err(e) => println!("error: {e}"),
    }
}

fn print_commands() {
    println!(
        r#"Commands:
  status             Kiosk state, launcher state, simulated home handler
  enter              Enter kiosk mode
  exit               Exit kiosk mode
  allow [KEY...]     Replace the allow-list (volume_up volume_down back
                     home recent_apps power camera menu); no keys = block all
  key NAME|CODE      Ask the dispatch hook about one key
  set-launcher       Request launcher registration
  home IDENTITY      Simulate the user picking a home app
  fg                 Simulate the app losing the foreground
  version            Service version
  quit               Leave"#
    );
}

fn print_help() {
    println!(
        r#"kioskctl {} - single-app kiosk mode demo host

USAGE:
    kioskctl [OPTIONS]

OPTIONS:
    -h, --help       Print this help message
    -V, --version    Print version information
    -t, --test       Self-test mode (one enter/exit cycle, no prompt)
    --init-config    Generate a default config file

CONFIG FILE:
    ~/.config/kioskctl/config.toml (override with KIOSKCTL_CONFIG)
"#,
        env!("CARGO_PKG_VERSION")
    );
}
