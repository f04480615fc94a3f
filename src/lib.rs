//! # Strata - Stack-Oriented Tiling Window Manager Core
//!
//! Strata arranges managed windows into groups (stacks of windows) and
//! tiles the top groups into screen regions. Two threads drive it: a
//! windowing-event loop and a command-socket server, serialized by a
//! single lock around the shared layout model.
//!
//! ## Architecture
//!
//! - `stack`: the LIFO container with top-relative addressing that
//!   backs both windows-in-a-group and the group collection
//! - `layout`: screen regions and the tiling placement algorithm
//! - `wm`: the shared layout model and its mutation operations
//! - `display`: the windowing-system boundary (events in, directives out)
//! - `command`: the action/actor/argument protocol state machine
//! - `server`: the Unix-socket command server
//! - `config`: TOML configuration loading
//! - `input`: key-binding resolution

pub mod command;
pub mod config;
pub mod display;
pub mod input;
pub mod layout;
pub mod server;
pub mod stack;
pub mod wm;

// Re-export main types for easy access
pub use command::{Invocation, Outcome};
pub use config::StrataConfig;
pub use display::{DisplayEvent, DisplayHandle, HeadlessDisplay};
pub use layout::Region;
pub use server::CommandServer;
pub use stack::Stack;
pub use wm::WindowManager;

// Re-export common error types
pub use anyhow::{Context, Error, Result};

/// Version information for strata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
