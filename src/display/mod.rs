//! The windowing-system boundary.
//!
//! The core never talks to a display server directly: it consumes
//! `DisplayEvent`s from whichever thread owns the connection and issues
//! placement and visibility directives through the `DisplayHandle`
//! trait. Window identities are opaque handles supplied by the backend.
//!
//! The shipped backend is `HeadlessDisplay`, which records every
//! directive it is asked to perform. The binary runs on it, and the
//! tests use it to observe exactly what the core would have told a real
//! display server to do.

use std::sync::Arc;

use log::debug;
use parking_lot::Mutex;

use crate::layout::Region;

/// Opaque handle for a client window.
pub type WindowId = u64;

/// Inbound events from the windowing system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEvent {
    /// A client asked for its window to be shown.
    MapRequest(WindowId),
    /// A window was unmapped.
    UnmapNotify(WindowId),
    /// A window was destroyed.
    DestroyNotify(WindowId),
    /// A client asked to place its own window.
    ConfigureRequest { window: WindowId, region: Region },
    /// A grabbed key chord was pressed, e.g. `Super+j`.
    KeyPress(String),
    /// The connection is going away; stop the event loop.
    Shutdown,
}

/// Outbound directives the core issues to the windowing system.
///
/// Each method mirrors one windowing-system request. The connection they
/// drive is not safe for concurrent use, so callers only invoke them
/// while holding the window-manager lock.
pub trait DisplayHandle: Send + Sync {
    /// Move and resize a window to the given rectangle.
    fn move_resize(&self, window: WindowId, rect: Region);

    /// Show a window on screen.
    fn map(&self, window: WindowId);

    /// Remove a window from the screen without destroying it.
    fn unmap(&self, window: WindowId);

    /// Raise a window above its siblings.
    fn raise(&self, window: WindowId);

    /// Give a window input focus.
    fn focus(&self, window: WindowId);

    /// Return input focus to the background surface.
    fn focus_root(&self);

    /// Ask a client to close its window, force-terminating it if the
    /// client does not speak the graceful deletion protocol.
    fn close(&self, window: WindowId);

    /// Apply a client's own configure request verbatim. Only used for
    /// windows the core does not manage.
    fn configure(&self, window: WindowId, rect: Region);
}

/// One recorded `DisplayHandle` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    MoveResize { window: WindowId, rect: Region },
    Map(WindowId),
    Unmap(WindowId),
    Raise(WindowId),
    Focus(WindowId),
    FocusRoot,
    Close(WindowId),
    Configure { window: WindowId, rect: Region },
}

/// A backend with no display server behind it.
///
/// Directives are appended to an in-memory log that can be drained for
/// inspection.
#[derive(Debug, Default)]
pub struct HeadlessDisplay {
    directives: Mutex<Vec<Directive>>,
}

impl HeadlessDisplay {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Drain and return everything recorded so far.
    pub fn take_directives(&self) -> Vec<Directive> {
        std::mem::take(&mut *self.directives.lock())
    }

    fn record(&self, directive: Directive) {
        debug!("display directive: {:?}", directive);
        self.directives.lock().push(directive);
    }
}

impl DisplayHandle for HeadlessDisplay {
    fn move_resize(&self, window: WindowId, rect: Region) {
        self.record(Directive::MoveResize { window, rect });
    }

    fn map(&self, window: WindowId) {
        self.record(Directive::Map(window));
    }

    fn unmap(&self, window: WindowId) {
        self.record(Directive::Unmap(window));
    }

    fn raise(&self, window: WindowId) {
        self.record(Directive::Raise(window));
    }

    fn focus(&self, window: WindowId) {
        self.record(Directive::Focus(window));
    }

    fn focus_root(&self) {
        self.record(Directive::FocusRoot);
    }

    fn close(&self, window: WindowId) {
        self.record(Directive::Close(window));
    }

    fn configure(&self, window: WindowId, rect: Region) {
        self.record(Directive::Configure { window, rect });
    }
}
