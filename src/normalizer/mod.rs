//! Canonical form of the list: lowercase, trimmed, deduplicated, sorted

use crate::domain::list::write_list;
use crate::domain::violations::BurnerResult;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// What a normalization pass did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeSummary {
    /// Lines in the input
    pub lines_before: usize,
    /// Entries in the output
    pub entries_after: usize,
    /// Whether the output differs from the input
    pub changed: bool,
}

/// Normalize list content. Domain syntax is not checked here.
pub fn normalize(content: &str) -> String {
    let entries: BTreeSet<String> = content
        .lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|line| !line.is_empty())
        .collect();

    entries
        .into_iter()
        .collect::<Vec<_>>()
        .join("\n")
        .trim_end()
        .to_string()
}

/// Normalize a list file in place. With `dry_run` the file is left untouched.
pub fn normalize_file<P: AsRef<Path>>(path: P, dry_run: bool) -> BurnerResult<NormalizeSummary> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let normalized = normalize(&content);

    let summary = NormalizeSummary {
        lines_before: content.lines().count(),
        entries_after: normalized.lines().count(),
        changed: normalized != content,
    };

    if summary.changed && !dry_run {
        write_list(path, &normalized)?;
    }

    tracing::debug!(
        "Normalized {}: {} lines -> {} entries",
        path.display(),
        summary.lines_before,
        summary.entries_after
    );

    Ok(summary)
}
