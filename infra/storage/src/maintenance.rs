use std::path::Path;
use std::time::{Duration, SystemTime};
use tracing::{info, warn};
use walkdir::{DirEntry, WalkDir};

/// Marker embedded in the names of in-flight writes.
pub(crate) const TMP_MARKER: &str = ".orctmp.";

pub(crate) async fn purge_tmp(root: &Path, stale_after: Duration) {
    let root = root.to_path_buf();

    match tokio::task::spawn_blocking(move || sweep(&root, SystemTime::now(), stale_after)).await {
        Ok(0) => {},
        Ok(removed) => info!(removed, "Removed abandoned temp files"),
        Err(err) => warn!(error = %err, "Temp file sweep did not finish"),
    }
}

fn sweep(root: &Path, now: SystemTime, stale_after: Duration) -> usize {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| is_tmp(entry) && is_stale(entry, now, stale_after))
        .filter(|entry| match std::fs::remove_file(entry.path()) {
            Ok(()) => true,
            Err(err) => {
                warn!(path = %entry.path().display(), error = %err, "Failed to remove temp file");
                false
            },
        })
        .count()
}

fn is_tmp(entry: &DirEntry) -> bool {
    entry.file_type().is_file() && entry.file_name().to_str().is_some_and(|n| n.contains(TMP_MARKER))
}

fn is_stale(entry: &DirEntry, now: SystemTime, stale_after: Duration) -> bool {
    entry
        .metadata()
        .ok()
        .and_then(|meta| meta.modified().ok())
        .and_then(|modified| now.duration_since(modified).ok())
        .is_none_or(|age| age >= stale_after)
}
