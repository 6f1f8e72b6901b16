use tracing::debug;

use super::trigger::Trigger;
use super::types::Document;

/// Drop lone diagnostic calls mentioning the trigger identifier, e.g.
/// `print('debug: $kDebugMode');` outside any block. A call whose
/// arguments are wrapped over several lines is dropped as a whole.
///
/// Returns the cleaned document and how many statements were dropped.
pub fn remove_stray_calls(document: Document, trigger: &Trigger) -> (Document, usize) {
    let lines = document.into_lines();
    let mut kept = Vec::with_capacity(lines.len());
    let mut removed = 0usize;
    let mut pc = 0usize;

    while pc < lines.len() {
        match trigger.stray_call_len(&lines[pc..]) {
            Some(len) => {
                debug!(line = pc + 1, lines = len, "removing stray diagnostic call");
                removed += 1;
                pc += len;
            }
            None => {
                kept.push(lines[pc].clone());
                pc += 1;
            }
        }
    }

    (Document::from_lines(kept), removed)
}
