//! Parser for `rsync --itemize-changes` output.
//!
//! Each change line starts with an 11-character `YXcstpoguax` code:
//! `>f+++++++++ lib/app.jar` is a new file, `>f.st...... bin/riepete` an
//! updated one and `*deleting   old.jar` a removal. Other lines (file list
//! headers, transfer statistics) are ignored.

use std::path::PathBuf;

use crate::domain::entities::SyncReport;

/// Build a change report from itemized rsync output.
pub fn parse_itemized(output: &str, dry_run: bool) -> SyncReport {
    let mut report = SyncReport {
        dry_run,
        ..SyncReport::default()
    };

    for line in output.lines() {
        let Some((code, path)) = split_line(line) else {
            continue;
        };

        if code.starts_with("*deleting") {
            report.deleted.push(clean_path(path));
            continue;
        }

        let mut flags = code.chars();
        let (Some(update), Some(kind)) = (flags.next(), flags.next()) else {
            continue;
        };
        if kind == 'd' {
            continue;
        }

        let attrs: String = flags.collect();
        if update == '.' && attrs.chars().all(|c| c == '.' || c == ' ') {
            report.unchanged += 1;
        } else if attrs.starts_with("+++") {
            report.created.push(clean_path(path));
        } else {
            report.updated.push(clean_path(path));
        }
    }

    report
}

fn split_line(line: &str) -> Option<(&str, &str)> {
    let first = line.chars().next()?;
    if !matches!(first, '<' | '>' | 'c' | 'h' | '.' | '*') {
        return None;
    }
    if line.len() < 13 || !line.is_char_boundary(11) {
        return None;
    }

    let (code, rest) = line.split_at(11);
    if !code.is_ascii() {
        return None;
    }
    let path = rest.strip_prefix(' ')?;
    if path.is_empty() {
        return None;
    }
    Some((code.trim_end(), path))
}

fn clean_path(path: &str) -> PathBuf {
    // symlinks are listed as `link -> target`
    let path = path.split(" -> ").next().unwrap_or(path);
    PathBuf::from(path.trim_end_matches('/'))
}
