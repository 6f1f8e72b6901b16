/// An opening/closing delimiter pair to track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters {
    pub open: char,
    pub close: char,
}

pub const BRACES: Delimiters = Delimiters {
    open: '{',
    close: '}',
};

pub const PARENS: Delimiters = Delimiters {
    open: '(',
    close: ')',
};

/// Result of feeding one line into a [`DepthScanner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan {
    /// No opening delimiter seen yet.
    Unopened,
    /// Opened and still nested at the end of the line.
    Open,
    /// Depth returned to zero; byte offset just past the closing delimiter.
    Closed(usize),
}

/// Counts nesting depth across lines, honoring quotes, `\` escapes and `//`
/// comments.
///
/// String state does not carry over between lines, so multi-line string
/// literals are scanned as code.
#[derive(Debug, Clone)]
pub struct DepthScanner {
    delims: Delimiters,
    depth: u32,
    opened: bool,
}

impl DepthScanner {
    pub fn new(delims: Delimiters) -> Self {
        Self {
            delims,
            depth: 0,
            opened: false,
        }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn feed(&mut self, text: &str) -> Scan {
        let mut chars = text.char_indices().peekable();
        let mut quote: Option<char> = None;
        let mut escaped = false;

        while let Some((idx, ch)) = chars.next() {
            if let Some(q) = quote {
                if escaped {
                    escaped = false;
                } else if ch == '\\' {
                    escaped = true;
                } else if ch == q {
                    quote = None;
                }
                continue;
            }

            match ch {
                '\'' | '"' | '`' => quote = Some(ch),
                '/' if matches!(chars.peek(), Some((_, '/'))) => break,
                c if c == self.delims.open => {
                    self.depth += 1;
                    self.opened = true;
                }
                c if c == self.delims.close && self.depth > 0 => {
                    self.depth -= 1;
                    if self.depth == 0 {
                        return Scan::Closed(idx + c.len_utf8());
                    }
                }
                _ => {}
            }
        }

        if self.opened {
            Scan::Open
        } else {
            Scan::Unopened
        }
    }
}

/// Whether byte `offset` of `text` is live code: not inside a quoted
/// literal and not behind `//`.
pub fn is_code(text: &str, offset: usize) -> bool {
    let mut chars = text.char_indices().peekable();
    let mut quote: Option<char> = None;
    let mut escaped = false;

    while let Some((idx, ch)) = chars.next() {
        if idx >= offset {
            return quote.is_none();
        }
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == q {
                quote = None;
            }
            continue;
        }

        match ch {
            '\'' | '"' | '`' => quote = Some(ch),
            '/' if matches!(chars.peek(), Some((_, '/'))) => return false,
            _ => {}
        }
    }
    quote.is_none()
}
