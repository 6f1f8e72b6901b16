//! Strip profile.
//!
//! Optionally loaded from a JSON file (`debug-strip.json` in the working
//! directory, or any path given with `--config`). Every field has a default,
//! and command-line flags override whatever the file says:
//!
//! ```json
//! {
//!   "trigger": "kDebugMode",
//!   "calls": ["print", "debugPrint"],
//!   "default_path": "lib/services/legiscan_service.dart"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StripError;
use crate::scanner::{Trigger, DEFAULT_CALL, DEFAULT_IDENTIFIER};

pub const CONFIG_FILE_NAME: &str = "debug-strip.json";

/// Target of the no-argument `clean-prints` binary when the profile names none.
pub const DEFAULT_TARGET: &str = "lib/services/legiscan_service.dart";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StripConfig {
    /// Identifier of the debug-mode flag (default: "kDebugMode")
    #[serde(default = "default_trigger")]
    pub trigger: String,
    /// Diagnostic calls whose presence marks a block removable (default: ["print"])
    #[serde(default = "default_calls")]
    pub calls: Vec<String>,
    /// File processed when no path is given
    #[serde(default)]
    pub default_path: Option<PathBuf>,
}

fn default_trigger() -> String {
    DEFAULT_IDENTIFIER.to_string()
}

fn default_calls() -> Vec<String> {
    vec![DEFAULT_CALL.to_string()]
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            trigger: default_trigger(),
            calls: default_calls(),
            default_path: None,
        }
    }
}

impl StripConfig {
    pub fn load(path: &Path) -> Result<Self, StripError> {
        let raw = fs::read_to_string(path).map_err(|source| StripError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| StripError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `debug-strip.json` from `dir` if it exists, defaults otherwise.
    pub fn discover(dir: &Path) -> Result<Self, StripError> {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply command-line overrides; an empty `calls` keeps the profile's.
    pub fn with_overrides(mut self, trigger: Option<String>, calls: Vec<String>) -> Self {
        if let Some(trigger) = trigger {
            self.trigger = trigger;
        }
        if !calls.is_empty() {
            self.calls = calls;
        }
        self
    }

    pub fn target(&self) -> PathBuf {
        self.default_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TARGET))
    }

    pub fn trigger(&self) -> Result<Trigger, StripError> {
        Trigger::new(&self.trigger, &self.calls)
    }
}
