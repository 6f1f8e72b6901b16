use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::StripError;
use crate::report::StripReport;
use crate::scanner::{remove_blocks, remove_stray_calls, Document, Trigger};

#[derive(Debug, Clone, Copy, Default)]
pub struct StripOptions {
    /// Build the report but leave the file untouched.
    pub dry_run: bool,
}

/// Output of a pure text transformation.
#[derive(Debug, Clone)]
pub struct Stripped {
    pub text: String,
    pub report: StripReport,
}

/// Strip debug blocks, guarded calls and stray diagnostic statements from
/// `text`.
///
/// Text that never mentions the trigger identifier is returned unchanged.
pub fn strip_text(text: &str, trigger: &Trigger) -> Stripped {
    let document = Document::parse(text);
    let lines_before = document.len();

    if !trigger.mentioned_in(text) {
        return Stripped {
            text: text.to_string(),
            report: StripReport {
                lines_before,
                lines_after: lines_before,
                ..StripReport::default()
            },
        };
    }

    let outcome = remove_blocks(document, trigger);
    let (document, stray_removed) = remove_stray_calls(outcome.document, trigger);
    let rendered = document.render();

    let report = StripReport {
        lines_before,
        lines_after: document.len(),
        blocks: outcome.removed,
        guards_removed: outcome.guards_removed,
        stray_removed,
        kept: outcome.kept,
        unterminated: outcome.unterminated,
        changed: rendered != text,
        ..StripReport::default()
    };

    Stripped {
        text: rendered,
        report,
    }
}

/// Strip a file in place.
///
/// The new contents are built completely in memory first and then moved
/// over the original through a sibling temporary file, so a failure never
/// leaves a half-written source behind. Unchanged files are not rewritten.
pub fn strip_file(
    path: &Path,
    trigger: &Trigger,
    options: StripOptions,
) -> Result<StripReport, StripError> {
    let original = fs::read_to_string(path).map_err(|source| StripError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let Stripped { text, mut report } = strip_text(&original, trigger);
    report.path = Some(path.to_path_buf());

    info!(
        path = %path.display(),
        blocks = report.blocks_removed(),
        guards = report.guards_removed,
        stray = report.stray_removed,
        "scanned"
    );

    if !report.changed {
        debug!(path = %path.display(), "nothing to remove");
        return Ok(report);
    }
    if options.dry_run {
        debug!(path = %path.display(), "dry run, not writing");
        return Ok(report);
    }

    replace_contents(path, &text)?;
    report.written = true;
    Ok(report)
}

fn replace_contents(path: &Path, contents: &str) -> Result<(), StripError> {
    let tmp = temp_sibling(path);
    let write_err = |source| StripError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Err(source) = fs::write(&tmp, contents) {
        let _ = fs::remove_file(&tmp);
        return Err(write_err(source));
    }
    copy_permissions(path, &tmp);
    fs::rename(&tmp, path).map_err(|source| {
        let _ = fs::remove_file(&tmp);
        write_err(source)
    })
}

/// Keep the original mode on the replacement. A failure is logged, not
/// fatal: the new contents are still correct.
fn copy_permissions(from: &Path, to: &Path) {
    let result = fs::metadata(from).and_then(|meta| fs::set_permissions(to, meta.permissions()));
    if let Err(err) = result {
        warn!(
            path = %from.display(),
            error = %err,
            "could not carry file permissions over to the rewritten file"
        );
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.debug-strip.tmp", name))
}
