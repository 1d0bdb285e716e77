use crate::planner::{rename_image, RenameOptions, RenameOutcome};
use crate::scan::{collect_jpg_files, ScanStats};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub renamed: usize,
    pub suppressed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchSummary {
    fn record(&mut self, outcome: &RenameOutcome) {
        match outcome {
            RenameOutcome::Renamed { .. } => self.renamed += 1,
            RenameOutcome::Suppressed { .. } => self.suppressed += 1,
            RenameOutcome::Skipped { .. } => self.skipped += 1,
            RenameOutcome::Failed { .. } => self.failed += 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub root: PathBuf,
    pub dry_run: bool,
    pub outcomes: Vec<RenameOutcome>,
    pub stats: ScanStats,
    pub summary: BatchSummary,
}

impl BatchReport {
    pub fn failures(&self) -> impl Iterator<Item = &RenameOutcome> {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome, RenameOutcome::Failed { .. }))
    }
}

pub fn run_batch(options: &RenameOptions) -> Result<BatchReport> {
    run_batch_with(options, |_| {})
}

/// Renames every candidate under `options.root`, one file at a time.
///
/// `on_outcome` sees each result as soon as it is known. Only a scan failure
/// is returned as an error; per-file problems end up in the report.
pub fn run_batch_with<F>(options: &RenameOptions, mut on_outcome: F) -> Result<BatchReport>
where
    F: FnMut(&RenameOutcome),
{
    if !options.root.is_dir() {
        anyhow::bail!("directory does not exist: {}", options.root.display());
    }

    let mut stats = ScanStats::default();
    let files = collect_jpg_files(
        &options.root,
        options.recursive,
        options.include_hidden,
        &mut stats,
    )?;
    info!(root = %options.root.display(), candidates = files.len(), "scan finished");

    let mut summary = BatchSummary::default();
    let mut outcomes = Vec::with_capacity(files.len());
    for path in files {
        let (Some(dir), Some(file_name)) = (path.parent(), path.file_name()) else {
            continue;
        };
        let outcome = rename_image(dir, file_name, options);
        summary.record(&outcome);
        on_outcome(&outcome);
        outcomes.push(outcome);
    }

    info!(
        renamed = summary.renamed,
        suppressed = summary.suppressed,
        skipped = summary.skipped,
        failed = summary.failed,
        "batch finished"
    );

    Ok(BatchReport {
        root: options.root.clone(),
        dry_run: options.dry_run,
        outcomes,
        stats,
        summary,
    })
}
