use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::scanner::DebugBlock;

/// What one strip run did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StripReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub lines_before: usize,
    pub lines_after: usize,
    /// Removed blocks, zero-based half-open line spans of the input.
    pub blocks: Vec<DebugBlock>,
    pub guards_removed: usize,
    pub stray_removed: usize,
    pub kept: usize,
    pub unterminated: usize,
    pub changed: bool,
    pub written: bool,
}

impl StripReport {
    pub fn blocks_removed(&self) -> usize {
        self.blocks.len()
    }

    pub fn removed_total(&self) -> usize {
        self.blocks.len() + self.guards_removed + self.stray_removed
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for StripReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = self
            .path
            .as_deref()
            .map(quote_path)
            .unwrap_or_else(|| "input".to_string());

        if !self.changed {
            return write!(f, "No debug output found in {}", target);
        }

        let verb = if self.written { "Removed" } else { "Would remove" };
        write!(
            f,
            "{} {} from {}",
            verb,
            counts(
                self.blocks.len(),
                self.guards_removed,
                self.stray_removed
            ),
            target
        )?;
        if self.unterminated > 0 {
            write!(
                f,
                " ({} unterminated {} left in place)",
                self.unterminated,
                plural(self.unterminated, "block", "blocks")
            )?;
        }
        Ok(())
    }
}

fn counts(blocks: usize, guards: usize, stray: usize) -> String {
    let parts: Vec<String> = [
        (blocks, "debug block", "debug blocks"),
        (guards, "guarded call", "guarded calls"),
        (stray, "stray statement", "stray statements"),
    ]
    .iter()
    .filter(|(n, _, _)| *n > 0)
    .map(|(n, one, many)| format!("{} {}", n, plural(*n, one, many)))
    .collect();

    match parts.as_slice() {
        [] => "nothing".to_string(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}

/// Shell-quote a path for status output.
pub fn quote_path(path: &Path) -> String {
    let raw = path.to_string_lossy();
    match shlex::try_quote(&raw) {
        Ok(quoted) => quoted.into_owned(),
        Err(_) => path.display().to_string(),
    }
}
