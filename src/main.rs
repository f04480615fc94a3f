//! Strata binary: wires the configuration, the display boundary, the
//! command server, and the event loop together.
//!
//! The windowing-system connection itself is an external collaborator;
//! this binary runs on the headless backend, which records outbound
//! directives and receives events over an in-process channel. Commands
//! arrive over the Unix socket either way.

use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};
use parking_lot::Mutex;

use strata::command::Outcome;
use strata::config::StrataConfig;
use strata::display::{DisplayEvent, HeadlessDisplay};
use strata::input::KeyBindings;
use strata::layout::Region;
use strata::server::CommandServer;
use strata::wm::WindowManager;

/// Fallback region when the configuration names none; a real display
/// boundary would report the screen size here.
const DEFAULT_REGION: Region = Region {
    x: 0,
    y: 0,
    width: 1920,
    height: 1080,
};

#[derive(Parser)]
#[command(name = "strata")]
#[command(about = "A stack-oriented tiling window manager")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "~/.config/strata/strata.toml")]
    config: String,

    /// Override the command socket path
    #[arg(short, long)]
    socket: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    info!("starting strata {}", strata::VERSION);

    let mut resolved = StrataConfig::load(&cli.config)?
        .resolve()
        .context("invalid configuration")?;
    if let Some(socket) = cli.socket {
        resolved.socket_path = socket.into();
    }
    if resolved.regions.is_empty() {
        resolved.regions.push(DEFAULT_REGION);
    }
    if !resolved.startup.is_empty() {
        debug!(
            "startup programs (launched by the session, not the core): {:?}",
            resolved.startup
        );
    }

    let bindings = KeyBindings::new(resolved.bindings.clone());
    let display = HeadlessDisplay::new();
    let wm = Arc::new(Mutex::new(WindowManager::new(
        display,
        resolved.regions.clone(),
        resolved.gap,
    )));

    let (event_tx, event_rx) = mpsc::channel();

    // fold SIGINT into the normal shutdown path
    let interrupt_tx = event_tx.clone();
    ctrlc::set_handler(move || {
        let _ = interrupt_tx.send(DisplayEvent::Shutdown);
    })
    .context("could not install interrupt handler")?;

    let server = CommandServer::bind(&resolved.socket_path)?;
    let stopper = server.stopper();
    let server_wm = wm.clone();
    let server_events = event_tx.clone();
    let server_thread = std::thread::spawn(move || server.run(server_wm, server_events));

    info!("strata is ready");
    run_event_loop(event_rx, &wm, &bindings);

    // explicit teardown: stop the accept loop, then join; the socket
    // file is removed when the server drops
    info!("shutting down");
    stopper.stop();
    if server_thread.join().is_err() {
        warn!("command server thread panicked during shutdown");
    }
    Ok(())
}

/// One iteration per windowing event, holding the shared lock for the
/// duration of each.
fn run_event_loop(
    events: Receiver<DisplayEvent>,
    wm: &Arc<Mutex<WindowManager>>,
    bindings: &KeyBindings,
) {
    while let Ok(event) = events.recv() {
        match event {
            DisplayEvent::Shutdown => break,
            DisplayEvent::KeyPress(chord) => {
                if let Some(invocation) = bindings.lookup(&chord) {
                    let outcome = invocation.execute(&mut *wm.lock());
                    if outcome == Outcome::Shutdown {
                        break;
                    }
                }
            }
            other => wm.lock().handle_event(other),
        }
    }
}
