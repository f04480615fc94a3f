//! Configuration loading for strata.
//!
//! Settings come from a TOML file read once at startup: the command
//! socket path, the default gap, the initial region list, key bindings,
//! and the startup program list. Bindings map a key chord to a command
//! line resolved through the same table as the wire protocol, so
//! anything a client can send can also be bound to a key.

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::command::{self, Invocation};
use crate::layout::Region;

/// Raw configuration as it appears in the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StrataConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    /// Initial layout parameters.
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Key bindings, resolved against the command table at load time.
    #[serde(default)]
    pub bindings: Vec<BindingConfig>,

    /// Programs the session launcher runs at startup. The core only
    /// records them; launching is the launcher's job.
    #[serde(default)]
    pub startup: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Where the command server listens.
    pub socket_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Pixel inset between placed windows and region edges.
    pub gap: u32,

    /// Screen regions in `WxH+X+Y` form. Empty means one full-screen
    /// region supplied by the display boundary.
    pub regions: Vec<String>,
}

/// One key binding: a chord and the command line it runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BindingConfig {
    pub key: String,
    pub command: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            socket_path: "/tmp/strata.socket".to_string(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            gap: 8,
            regions: Vec::new(),
        }
    }
}

/// Configuration after validation: regions and bindings parsed.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub socket_path: PathBuf,
    pub gap: u32,
    pub regions: Vec<Region>,
    pub bindings: Vec<(String, Invocation)>,
    pub startup: Vec<String>,
}

impl StrataConfig {
    /// Load configuration from a TOML file. A missing file falls back
    /// to the defaults; a malformed one is a startup error.
    pub fn load(path: &str) -> Result<Self> {
        let path = expand_home(path);
        if !path.exists() {
            info!("no configuration at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("could not read config file {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("could not parse config file {}", path.display()))?;
        info!("configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Parse the region strings and binding command lines, failing
    /// startup on the first invalid entry.
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let regions = self
            .layout
            .regions
            .iter()
            .map(|s| {
                s.parse::<Region>()
                    .with_context(|| format!("invalid region `{s}` in config"))
            })
            .collect::<Result<Vec<_>>>()?;

        let bindings = self
            .bindings
            .iter()
            .map(|b| {
                command::parse_line(&b.command)
                    .with_context(|| format!("invalid binding for `{}`", b.key))
                    .map(|invocation| (b.key.clone(), invocation))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ResolvedConfig {
            socket_path: PathBuf::from(&self.general.socket_path),
            gap: self.layout.gap,
            regions,
            bindings,
            startup: self.startup.clone(),
        })
    }
}

/// Expand a leading `~/` against `$HOME`.
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), std::env::var_os("HOME")) {
        (Some(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => PathBuf::from(path),
    }
}
