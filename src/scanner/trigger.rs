use regex::Regex;

use super::braces::{is_code, DepthScanner, Scan, PARENS};
use super::types::Opener;
use crate::error::StripError;

pub const DEFAULT_IDENTIFIER: &str = "kDebugMode";
pub const DEFAULT_CALL: &str = "print";

const IDENT: &str = r"[A-Za-z_][A-Za-z0-9_]*";

/// The debug flag and the diagnostic calls it guards, compiled into the
/// matchers used by the block and cleanup passes.
#[derive(Debug, Clone)]
pub struct Trigger {
    identifier: String,
    calls: Vec<String>,
    opener: Regex,
    call: Regex,
    guard: Regex,
    stray: Regex,
    mention: Regex,
}

impl Trigger {
    pub fn new<S: AsRef<str>>(identifier: &str, calls: &[S]) -> Result<Self, StripError> {
        let ident_re = Regex::new(&format!("^{IDENT}$")).map_err(invalid)?;
        let call_re = Regex::new(&format!(r"^{IDENT}(?:\.{IDENT})*$")).map_err(invalid)?;

        if !ident_re.is_match(identifier) {
            return Err(StripError::InvalidTrigger(format!(
                "`{identifier}` is not an identifier"
            )));
        }
        if calls.is_empty() {
            return Err(StripError::InvalidTrigger(
                "at least one diagnostic call is required".to_string(),
            ));
        }
        if let Some(bad) = calls.iter().find(|c| !call_re.is_match(c.as_ref())) {
            return Err(StripError::InvalidTrigger(format!(
                "`{}` is not a call name",
                bad.as_ref()
            )));
        }

        let calls: Vec<String> = calls.iter().map(|c| c.as_ref().to_string()).collect();
        let t = regex::escape(identifier);
        let p = calls
            .iter()
            .map(|c| regex::escape(c))
            .collect::<Vec<_>>()
            .join("|");

        Ok(Self {
            opener: Regex::new(&format!(r"(else\s+)?\bif\s*\(\s*{t}\b\s*(?:\)|&&)"))
                .map_err(invalid)?,
            call: Regex::new(&format!(r"\b(?:{p})\s*\(")).map_err(invalid)?,
            guard: Regex::new(&format!(
                r"^\s*if\s*\(\s*{t}\b\s*(?:&&[^{{}};]*)?\)\s*(?:{p})\s*\("
            ))
            .map_err(invalid)?,
            stray: Regex::new(&format!(r"^\s*(?:{p})\s*\(")).map_err(invalid)?,
            mention: Regex::new(&format!(r"\b{t}\b")).map_err(invalid)?,
            identifier: identifier.to_string(),
            calls,
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn calls(&self) -> &[String] {
        &self.calls
    }

    /// Quick pre-check: a text that never mentions the flag cannot change.
    pub fn mentioned_in(&self, text: &str) -> bool {
        self.mention.is_match(text)
    }

    /// First `if (T)` / `else if (T)` / `if (T && ...)` condition on the
    /// line that is live code, not commented out or quoted.
    pub fn find_opener(&self, line: &str) -> Option<Opener> {
        self.opener
            .captures_iter(line)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                Some(Opener {
                    start: whole.start(),
                    chained: caps.get(1).is_some(),
                })
            })
            .find(|opener| is_code(line, opener.start))
    }

    pub fn has_call(&self, text: &str) -> bool {
        self.call.is_match(text)
    }

    /// `if (T) print(...);` on a single line, without braces and with
    /// nothing after the `;`.
    pub fn is_guarded_call(&self, line: &str) -> bool {
        if line.contains('{') {
            return false;
        }
        let Some(m) = self.guard.find(line) else {
            return false;
        };
        closing_semicolon(&[line], m.end() - 1).is_some()
    }

    /// A line holding nothing but one `print(...);` statement whose
    /// arguments mention the flag.
    pub fn is_stray_call(&self, line: &str) -> bool {
        self.stray_call_len(&[line]).is_some()
    }

    /// Number of lines taken by a lone `print(...);` statement starting on
    /// `lines[0]` whose arguments mention the flag. The arguments may span
    /// several lines.
    pub fn stray_call_len<S: AsRef<str>>(&self, lines: &[S]) -> Option<usize> {
        let first = lines.first()?.as_ref();
        // `m` ends just past the opening parenthesis.
        let m = self.stray.find(first)?;
        let (len, args) = closing_semicolon(lines, m.end() - 1)?;
        self.mention.is_match(&args).then_some(len)
    }
}

/// Follow the parenthesis at byte `open` of `lines[0]` to its match, across
/// lines if needed. Succeeds only when the statement ends right there with
/// `;`, returning the number of lines used and the argument text.
fn closing_semicolon<S: AsRef<str>>(lines: &[S], open: usize) -> Option<(usize, String)> {
    let mut parens = DepthScanner::new(PARENS);
    let mut args = String::new();

    for (n, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        let from = if n == 0 { open } else { 0 };
        let segment = &line[from..];

        match parens.feed(segment) {
            Scan::Closed(at) => {
                args.push_str(&segment[..at]);
                let rest = segment[at..].trim();
                return (rest == ";").then(|| (n + 1, args));
            }
            Scan::Open => {
                args.push_str(segment);
                args.push('\n');
            }
            Scan::Unopened => return None,
        }
    }
    None
}

fn invalid(err: regex::Error) -> StripError {
    StripError::InvalidTrigger(err.to_string())
}
