use crate::stamp::TARGET_EXTENSION;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub scanned_files: usize,
    pub jpg_files: usize,
    pub skipped_non_jpg: usize,
    pub skipped_hidden: usize,
    pub unreadable_entries: usize,
}

/// Collects every `*.jpg` (any case) under `root`, sorted, before anything is
/// renamed, so the caller works on a fixed snapshot.
///
/// Only an unreadable `root` is an error. Anything below it that cannot be
/// read is logged, counted in `unreadable_entries` and left out.
pub fn collect_jpg_files(
    root: &Path,
    recursive: bool,
    include_hidden: bool,
    stats: &mut ScanStats,
) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();

    if recursive {
        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || include_hidden
                    || !(entry.file_type().is_dir() && is_hidden(entry.path()))
            });
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() > 0 => {
                    warn!(
                        path = %err.path().unwrap_or(root).display(),
                        error = %err,
                        "skipping unreadable entry"
                    );
                    stats.unreadable_entries += 1;
                    continue;
                }
                Err(err) => {
                    return Err(err)
                        .with_context(|| format!("directory walk failed: {}", root.display()))
                }
            };
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            record(path, include_hidden, stats, &mut out);
        }
    } else {
        for entry in fs::read_dir(root)
            .with_context(|| format!("could not read directory: {}", root.display()))?
        {
            let entry =
                entry.with_context(|| format!("could not read entry in: {}", root.display()))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            record(&path, include_hidden, stats, &mut out);
        }
        out.sort();
    }

    Ok(out)
}

fn record(path: &Path, include_hidden: bool, stats: &mut ScanStats, out: &mut Vec<PathBuf>) {
    stats.scanned_files += 1;
    if is_hidden(path) && !include_hidden {
        stats.skipped_hidden += 1;
        return;
    }
    if is_jpg(path) {
        stats.jpg_files += 1;
        out.push(path.to_path_buf());
    } else {
        stats.skipped_non_jpg += 1;
    }
}

fn is_jpg(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(TARGET_EXTENSION))
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}
