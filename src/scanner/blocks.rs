use tracing::{debug, trace, warn};

use super::braces::{DepthScanner, Scan, BRACES};
use super::trigger::Trigger;
use super::types::{DebugBlock, Document, Opener};

/// Result of the block-removal pass.
#[derive(Debug, Default)]
pub struct BlockOutcome {
    pub document: Document,
    pub removed: Vec<DebugBlock>,
    pub guards_removed: usize,
    /// Trigger blocks left in place: no diagnostic call, or followed by `else`.
    pub kept: usize,
    pub unterminated: usize,
}

enum ScanState {
    Scanning,
    InsideCandidate(Candidate),
}

struct Candidate {
    start: usize,
    opener: Opener,
    braces: DepthScanner,
    has_call: bool,
}

/// Remove every trigger block that contains a diagnostic call.
pub fn remove_blocks(document: Document, trigger: &Trigger) -> BlockOutcome {
    BlockPass::new(document, trigger).run()
}

struct BlockPass<'t> {
    trigger: &'t Trigger,
    lines: Vec<String>,
    out: Vec<String>,
    pc: usize,
    outcome: BlockOutcome,
}

impl<'t> BlockPass<'t> {
    fn new(document: Document, trigger: &'t Trigger) -> Self {
        let lines = document.into_lines();
        Self {
            trigger,
            out: Vec::with_capacity(lines.len()),
            lines,
            pc: 0,
            outcome: BlockOutcome::default(),
        }
    }

    fn run(mut self) -> BlockOutcome {
        let mut state = ScanState::Scanning;

        loop {
            state = match state {
                ScanState::Scanning => {
                    if self.pc >= self.lines.len() {
                        break;
                    }
                    self.scan_line()
                }
                ScanState::InsideCandidate(candidate) => {
                    if self.pc >= self.lines.len() {
                        self.unterminated(candidate)
                    } else {
                        self.extend(candidate)
                    }
                }
            };
        }

        self.outcome.document = Document::from_lines(self.out);
        self.outcome
    }

    fn scan_line(&mut self) -> ScanState {
        let line = &self.lines[self.pc];

        if self.trigger.is_guarded_call(line) && !next_starts_with_else(&self.lines, self.pc + 1)
        {
            debug!(line = self.pc + 1, "removing guarded call");
            self.outcome.guards_removed += 1;
            self.pc += 1;
            return ScanState::Scanning;
        }

        let Some(opener) = self.trigger.find_opener(line) else {
            self.emit_current();
            return ScanState::Scanning;
        };

        let mut candidate = Candidate {
            start: self.pc,
            opener,
            braces: DepthScanner::new(BRACES),
            has_call: false,
        };
        let from_opener = &line[opener.start..];

        match candidate.braces.feed(from_opener) {
            Scan::Unopened => {
                self.emit_current();
                ScanState::Scanning
            }
            Scan::Open => {
                candidate.has_call = self.trigger.has_call(from_opener);
                self.pc += 1;
                ScanState::InsideCandidate(candidate)
            }
            Scan::Closed(at) => {
                let close = opener.start + at;
                candidate.has_call = self.trigger.has_call(&line[opener.start..close]);
                self.close(candidate, close)
            }
        }
    }

    fn extend(&mut self, mut candidate: Candidate) -> ScanState {
        let line = &self.lines[self.pc];
        match candidate.braces.feed(line) {
            Scan::Closed(at) => {
                candidate.has_call |= self.trigger.has_call(&line[..at]);
                self.close(candidate, at)
            }
            Scan::Open | Scan::Unopened => {
                candidate.has_call |= self.trigger.has_call(line);
                self.pc += 1;
                ScanState::InsideCandidate(candidate)
            }
        }
    }

    /// The candidate's braces balanced on line `self.pc`, at byte `close`.
    fn close(&mut self, candidate: Candidate, close: usize) -> ScanState {
        let end = self.pc;
        let tail = &self.lines[end][close..];

        if !candidate.has_call {
            trace!(line = candidate.start + 1, "trigger block without diagnostic call");
            return self.keep(candidate);
        }
        if !candidate.opener.chained && continues_with_else(tail, &self.lines, end + 1) {
            debug!(
                line = candidate.start + 1,
                "keeping trigger block followed by else"
            );
            return self.keep(candidate);
        }

        let head = &self.lines[candidate.start][..candidate.opener.start];
        let block = DebugBlock {
            start: candidate.start,
            end: end + 1,
        };
        debug!(
            first = block.start + 1,
            last = block.end,
            "removing debug block"
        );
        self.outcome.removed.push(block);

        match splice(head, tail) {
            // Rescan: the tail may open another branch of the same chain.
            Some(joined) => {
                self.lines[end] = joined;
                self.pc = end;
            }
            None => self.pc = end + 1,
        }
        ScanState::Scanning
    }

    fn keep(&mut self, candidate: Candidate) -> ScanState {
        self.outcome.kept += 1;
        self.rewind(candidate)
    }

    fn unterminated(&mut self, candidate: Candidate) -> ScanState {
        warn!(
            line = candidate.start + 1,
            "trigger block never closes, leaving it in place"
        );
        self.outcome.unterminated += 1;
        self.rewind(candidate)
    }

    /// Emit the opener line verbatim and resume scanning right after it.
    fn rewind(&mut self, candidate: Candidate) -> ScanState {
        self.pc = candidate.start;
        self.emit_current();
        ScanState::Scanning
    }

    fn emit_current(&mut self) {
        self.out.push(self.lines[self.pc].clone());
        self.pc += 1;
    }
}

/// Join what precedes the opener with what follows the closing brace.
/// Returns `None` when nothing but whitespace would remain.
fn splice(head: &str, tail: &str) -> Option<String> {
    let (tail, ending) = match tail.strip_suffix('\r') {
        Some(t) => (t, "\r"),
        None => (tail, ""),
    };

    let joined = if head.trim().is_empty() {
        format!("{}{}", head, tail.trim_start())
    } else {
        format!("{}{}", head.trim_end(), tail)
    };

    if joined.trim().is_empty() {
        None
    } else {
        Some(joined + ending)
    }
}

fn starts_with_else(text: &str) -> bool {
    text.trim_start()
        .strip_prefix("else")
        .map(|rest| {
            rest.chars()
                .next()
                .map_or(true, |c| !(c.is_alphanumeric() || c == '_'))
        })
        .unwrap_or(false)
}

fn next_starts_with_else(lines: &[String], from: usize) -> bool {
    lines[from.min(lines.len())..]
        .iter()
        .find(|l| !l.trim().is_empty())
        .map_or(false, |l| starts_with_else(l))
}

fn continues_with_else(tail: &str, lines: &[String], next: usize) -> bool {
    if tail.trim().is_empty() {
        next_starts_with_else(lines, next)
    } else {
        starts_with_else(tail)
    }
}
