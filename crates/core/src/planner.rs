use crate::exif_reader::find_exif_datetime;
use crate::stamp::make_filename_from_datetime;
use crate::unique::{is_occupied, make_unique_name};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameOptions {
    pub root: PathBuf,
    pub recursive: bool,
    pub include_hidden: bool,
    pub verbose: bool,
    pub dry_run: bool,
    pub quiet: bool,
}

impl Default for RenameOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            recursive: false,
            include_hidden: false,
            verbose: false,
            dry_run: false,
            quiet: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NoTimestamp,
    InvalidTimestamp { raw: String, detail: String },
    AlreadyNamed,
    NoUniqueName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RenameOutcome {
    Renamed { from: PathBuf, to: PathBuf },
    Suppressed { from: PathBuf, to: PathBuf },
    Skipped { path: PathBuf, reason: SkipReason },
    Failed { from: PathBuf, to: PathBuf, error: String },
}

impl RenameOutcome {
    /// The console line for this outcome, if `options` allow it to be shown.
    ///
    /// Quiet mode hides missing and invalid timestamps only; a name that cannot
    /// be made unique and a failed rename are always reported.
    pub fn console_message(&self, options: &RenameOptions) -> Option<String> {
        match self {
            Self::Renamed { from, to } | Self::Suppressed { from, to } => options
                .verbose
                .then(|| format!("{} --> {}", from.display(), to.display())),
            Self::Skipped { path, reason } => match reason {
                SkipReason::NoTimestamp => (!options.quiet)
                    .then(|| format!("Can't retrieve DateTime from {}", path.display())),
                SkipReason::InvalidTimestamp { raw, .. } => (!options.quiet).then(|| {
                    format!("Invalid DateTime attribute in {} ({})", path.display(), raw)
                }),
                SkipReason::AlreadyNamed => None,
                SkipReason::NoUniqueName => Some(format!(
                    "Can't make unique file name for {}",
                    path.display()
                )),
            },
            Self::Failed { from, to, error } => Some(format!(
                "Can't rename {} --> {}: {}",
                from.display(),
                to.display(),
                error
            )),
        }
    }

    pub fn source_path(&self) -> &Path {
        match self {
            Self::Renamed { from, .. } | Self::Suppressed { from, .. } | Self::Failed { from, .. } => {
                from
            }
            Self::Skipped { path, .. } => path,
        }
    }
}

/// Renames `dir/file_name` after the EXIF `DateTime` it carries.
///
/// Each file is handled on its own: a rename that fails at the filesystem
/// level becomes [`RenameOutcome::Failed`] instead of aborting the caller.
pub fn rename_image(
    dir: &Path,
    file_name: impl AsRef<Path>,
    options: &RenameOptions,
) -> RenameOutcome {
    let source = dir.join(file_name);
    let target = match plan_target(dir, &source) {
        Ok(target) => target,
        Err(reason) => {
            debug!(path = %source.display(), ?reason, "skipped");
            return RenameOutcome::Skipped {
                path: source,
                reason,
            };
        }
    };

    if options.dry_run {
        info!(from = %source.display(), to = %target.display(), "dry-run, rename suppressed");
        return RenameOutcome::Suppressed {
            from: source,
            to: target,
        };
    }

    commit_rename(source, target)
}

/// Works out where `source` should go without touching the filesystem.
pub fn plan_target(dir: &Path, source: &Path) -> Result<PathBuf, SkipReason> {
    let raw = find_exif_datetime(source).ok_or(SkipReason::NoTimestamp)?;
    let target = make_filename_from_datetime(dir, &raw).map_err(|err| {
        SkipReason::InvalidTimestamp {
            detail: err.to_string(),
            raw,
        }
    })?;

    if target == source {
        return Err(SkipReason::AlreadyNamed);
    }
    if !is_occupied(&target) {
        return Ok(target);
    }

    let unique = make_unique_name(&target, Some(source)).map_err(|err| {
        warn!(path = %source.display(), error = %err, "no unique name");
        SkipReason::NoUniqueName
    })?;
    if unique == source {
        return Err(SkipReason::AlreadyNamed);
    }
    Ok(unique)
}

pub fn commit_rename(from: PathBuf, to: PathBuf) -> RenameOutcome {
    match fs::rename(&from, &to) {
        Ok(()) => {
            info!(from = %from.display(), to = %to.display(), "renamed");
            RenameOutcome::Renamed { from, to }
        }
        Err(err) => {
            warn!(from = %from.display(), to = %to.display(), error = %err, "rename failed");
            RenameOutcome::Failed {
                from,
                to,
                error: err.to_string(),
            }
        }
    }
}
