use serde::Serialize;

/// A source file as an ordered list of lines.
///
/// Lines are split on `\n` only, so a trailing `\r` stays on its line and a
/// trailing newline shows up as a final empty line. `render` is the exact
/// inverse of `parse`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
        }
    }

    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

/// A removed `[start, end)` line span, zero-based, in input coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DebugBlock {
    pub start: usize,
    pub end: usize,
}

impl DebugBlock {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// Where a trigger condition starts on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opener {
    /// Byte offset of the `if` (or of the `else` for chained branches).
    pub start: usize,
    /// `else if (...)` rather than a leading `if (...)`.
    pub chained: bool,
}
