//! The command-socket server.
//!
//! A Unix socket server running a blocking accept loop on its own OS
//! thread. The wire format is one token per message, NUL-terminated; a
//! bare NUL is the empty token that ends a variable-length region list.
//! Each accepted connection carries exactly one command: the server
//! takes the window-manager lock, drives the dispatcher over the
//! connection, executes the resulting invocation, then drains and
//! closes. Success is silent; grammar errors reply before closing.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::Shutdown;
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use parking_lot::Mutex;

use crate::command::{self, Connection, Outcome};
use crate::display::DisplayEvent;
use crate::wm::WindowManager;

/// Listening side of the command protocol.
pub struct CommandServer {
    listener: UnixListener,
    socket_path: PathBuf,
    stop: Arc<AtomicBool>,
}

impl CommandServer {
    /// Bind and listen at `path`, replacing any stale socket file.
    /// Failure here is a fatal startup error.
    pub fn bind(path: &Path) -> Result<Self> {
        if path.exists() {
            std::fs::remove_file(path)
                .with_context(|| format!("could not remove stale socket {}", path.display()))?;
        }
        let listener = UnixListener::bind(path)
            .with_context(|| format!("could not bind command socket {}", path.display()))?;
        info!("command server listening on {}", path.display());
        Ok(Self {
            listener,
            socket_path: path.to_path_buf(),
            stop: Arc::new(AtomicBool::new(false)),
        })
    }

    /// A handle that wakes and stops the accept loop, for shutdown
    /// initiated from the event thread.
    pub fn stopper(&self) -> ServerStopper {
        ServerStopper {
            stop: self.stop.clone(),
            socket_path: self.socket_path.clone(),
        }
    }

    /// Serve connections until a `logout` command or a stop request.
    ///
    /// `events` is used to forward the shutdown to the event loop when
    /// a client logs the session out.
    pub fn run(self, wm: Arc<Mutex<WindowManager>>, events: Sender<DisplayEvent>) {
        for stream in self.listener.incoming() {
            if self.stop.load(Ordering::SeqCst) {
                break;
            }
            let stream = match stream {
                Ok(stream) => stream,
                Err(e) => {
                    warn!("could not accept connection: {}", e);
                    continue;
                }
            };
            match handle_connection(stream, &wm) {
                Ok(Outcome::Continue) => {}
                Ok(Outcome::Shutdown) => {
                    info!("logout requested over the command socket");
                    let _ = events.send(DisplayEvent::Shutdown);
                    break;
                }
                Err(e) => warn!("client connection failed: {:#}", e),
            }
        }
    }
}

impl Drop for CommandServer {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.socket_path) {
            debug!("could not remove socket file: {}", e);
        }
    }
}

/// Wakes the accept loop so it can observe the stop flag.
pub struct ServerStopper {
    stop: Arc<AtomicBool>,
    socket_path: PathBuf,
}

impl ServerStopper {
    pub fn stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
        // poke the listener out of accept(); the connection itself is
        // discarded before any token is read
        let _ = UnixStream::connect(&self.socket_path);
    }
}

/// Serve one complete command. The lock is held from the first token
/// read until the handler returns, so the command is one unit of work
/// in the linearization order.
fn handle_connection(stream: UnixStream, wm: &Arc<Mutex<WindowManager>>) -> Result<Outcome> {
    let mut conn = SocketConnection::new(stream)?;

    let mut guard = wm.lock();
    let outcome = match command::dispatch(&mut conn)? {
        Some(invocation) => {
            debug!("dispatching {:?}", invocation);
            invocation.execute(&mut *guard)
        }
        None => Outcome::Continue,
    };
    drop(guard);

    conn.finish()?;
    Ok(outcome)
}

/// NUL-terminated token framing over a Unix stream.
struct SocketConnection {
    reader: BufReader<UnixStream>,
    writer: UnixStream,
}

impl SocketConnection {
    fn new(stream: UnixStream) -> Result<Self> {
        let writer = stream.try_clone().context("could not clone stream")?;
        Ok(Self {
            reader: BufReader::new(stream),
            writer,
        })
    }

    /// Flush our side and wait for the client to hang up, so the reply
    /// is fully written before the socket goes away.
    fn finish(mut self) -> Result<()> {
        self.writer.flush().ok();
        self.writer.shutdown(Shutdown::Write).ok();
        let mut sink = [0u8; 64];
        while matches!(self.reader.read(&mut sink), Ok(n) if n > 0) {}
        Ok(())
    }
}

impl Connection for SocketConnection {
    fn read_token(&mut self) -> Result<String> {
        let mut buf = Vec::new();
        self.reader
            .read_until(b'\0', &mut buf)
            .context("could not read token")?;
        if buf.last() == Some(&b'\0') {
            buf.pop();
        }
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    fn reply(&mut self, text: &str) -> Result<()> {
        self.writer
            .write_all(text.as_bytes())
            .and_then(|_| self.writer.write_all(b"\0"))
            .context("could not write reply")
    }
}
