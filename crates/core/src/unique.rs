use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const FIRST_SUFFIX: u32 = 2;
pub const LAST_SUFFIX: u32 = 99;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UniqueNameError {
    #[error(
        "no free name from _{} to _{} for {}",
        FIRST_SUFFIX,
        LAST_SUFFIX,
        .target.display()
    )]
    Exhausted { target: PathBuf },
}

/// Inserts `_<n>` before the extension of `target`, trying n = 2..=99 in order,
/// and returns the first candidate with no filesystem entry.
///
/// `source` is the file about to be renamed. Unlike a plain first-free-slot
/// search, a candidate equal to `source` is returned even though it exists, so
/// an already disambiguated `T_2.jpg` resolves back to itself instead of
/// moving to `T_3.jpg` (and back again on the next run). With `source = None`
/// only slots with no filesystem entry are returned.
///
/// The existence check is point-in-time only.
pub fn make_unique_name(target: &Path, source: Option<&Path>) -> Result<PathBuf, UniqueNameError> {
    let parent = target.parent().unwrap_or_else(|| Path::new(""));
    let stem = target
        .file_stem()
        .map(|v| v.to_string_lossy().to_string())
        .unwrap_or_default();
    let extension = target
        .extension()
        .map(|v| format!(".{}", v.to_string_lossy()))
        .unwrap_or_default();

    for n in FIRST_SUFFIX..=LAST_SUFFIX {
        let candidate = parent.join(format!("{stem}_{n}{extension}"));
        if source == Some(candidate.as_path()) || !is_occupied(&candidate) {
            return Ok(candidate);
        }
    }

    Err(UniqueNameError::Exhausted {
        target: target.to_path_buf(),
    })
}

/// True when anything, including a dangling symlink, sits at `path`.
pub(crate) fn is_occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}
