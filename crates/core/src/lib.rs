mod batch;
mod config;
mod exif_reader;
mod planner;
mod scan;
mod stamp;
mod unique;

#[cfg(test)]
mod test_support;

pub use batch::{run_batch, run_batch_with, BatchReport, BatchSummary};
pub use config::{app_paths, init_config, load_config, save_config, AppConfig, AppPaths};
pub use exif_reader::{find_exif_datetime, read_exif_datetime};
pub use planner::{
    commit_rename, plan_target, rename_image, RenameOptions, RenameOutcome, SkipReason,
};
pub use scan::{collect_jpg_files, ScanStats};
pub use stamp::{make_filename_from_datetime, CaptureStamp, StampError, TARGET_EXTENSION};
pub use unique::{make_unique_name, UniqueNameError, FIRST_SUFFIX, LAST_SUFFIX};
