use crate::engine::TMP_MARKER;
use std::path::Path;
use std::time::{Duration, SystemTime};
use tracing::{error, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Temp files younger than this may still belong to a write in progress.
const STALE_AFTER: Duration = Duration::from_secs(300);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PurgeReport {
    pub removed: usize,
    pub failed: usize,
}

/// Removes temp files left below `root` by writes that never reached their rename.
///
/// Namespace directories are kept even when empty, a static file server may be pointed at them.
pub(crate) async fn purge_tmp(root: &Path) -> PurgeReport {
    let root = root.to_path_buf();
    let now = SystemTime::now();

    match tokio::task::spawn_blocking(move || remove_stale(&root, now, STALE_AFTER)).await {
        Ok(report) => {
            if report != PurgeReport::default() {
                info!(removed = report.removed, failed = report.failed, "Purged interrupted writes");
            }
            report
        },
        Err(e) => {
            error!(error = %e, "Temp file cleanup task panicked");
            PurgeReport::default()
        },
    }
}

fn remove_stale(root: &Path, now: SystemTime, threshold: Duration) -> PurgeReport {
    let mut report = PurgeReport::default();

    for entry in WalkDir::new(root).into_iter().flatten() {
        if !is_tmp(&entry) || !is_stale(&entry, now, threshold) {
            continue;
        }
        match std::fs::remove_file(entry.path()) {
            Ok(()) => report.removed += 1,
            Err(e) => {
                warn!(path = %entry.path().display(), error = %e, "Temp file removal failed");
                report.failed += 1;
            },
        }
    }

    report
}

fn is_tmp(entry: &DirEntry) -> bool {
    entry.file_type().is_file()
        && entry.file_name().to_str().is_some_and(|name| name.contains(TMP_MARKER))
}

fn is_stale(entry: &DirEntry, now: SystemTime, threshold: Duration) -> bool {
    entry
        .metadata()
        .ok()
        .and_then(|m| m.modified().ok())
        .and_then(|modified| now.duration_since(modified).ok())
        .is_none_or(|age| age > threshold)
}
