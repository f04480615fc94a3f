//! Key-binding resolution.
//!
//! The windowing boundary delivers key presses as opaque chord strings
//! (e.g. `Super+j`); this module maps them to the command invocations
//! configured for them. Bound commands run through exactly the same
//! handlers as socket commands, with the same silent no-op policy; a
//! key press has no reply channel.

use std::collections::HashMap;

use log::{debug, warn};

use crate::command::Invocation;

/// The resolved key-binding table, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct KeyBindings {
    map: HashMap<String, Invocation>,
}

impl KeyBindings {
    pub fn new(entries: Vec<(String, Invocation)>) -> Self {
        let mut map = HashMap::with_capacity(entries.len());
        for (chord, invocation) in entries {
            if let Some(previous) = map.insert(chord.clone(), invocation) {
                warn!("binding for `{chord}` shadows {previous:?}");
            }
        }
        Self { map }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Look up the invocation bound to a chord, if any.
    pub fn lookup(&self, chord: &str) -> Option<&Invocation> {
        let bound = self.map.get(chord);
        if bound.is_none() {
            debug!("no binding for key chord `{chord}`");
        }
        bound
    }
}

#[cfg(test)]
mod tests;
