/// Turning dropped or picked paths into file candidates
///
/// No filtering happens here: every regular file becomes a candidate and
/// the selection manager decides what to keep.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::state::data::FileCandidate;

/// Build a candidate from a path, reading its size from disk.
/// Returns None for directories and unreadable entries.
pub fn candidate_from_path(path: &Path) -> Option<FileCandidate> {
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) => {
            tracing::warn!("⚠️  Cannot read {}: {}", path.display(), e);
            return None;
        }
    };

    if !metadata.is_file() {
        return None;
    }

    let name = path.file_name()?.to_string_lossy().to_string();
    Some(FileCandidate::new(name, metadata.len(), path))
}

/// Candidates for a list of picked/dropped paths, in the given order
pub fn candidates_from_paths(paths: &[PathBuf]) -> Vec<FileCandidate> {
    paths
        .iter()
        .filter_map(|path| candidate_from_path(path))
        .collect()
}

/// Every regular file below `folder`, recursively, in file-name order
pub fn scan_folder(folder: &Path) -> Vec<FileCandidate> {
    tracing::info!("🔍 Scanning folder: {}", folder.display());

    let candidates: Vec<FileCandidate> = WalkDir::new(folder)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| candidate_from_path(entry.path()))
        .collect();

    tracing::info!("Found {} file(s) in {}", candidates.len(), folder.display());
    candidates
}

/// `scan_folder` on the blocking pool, so a large tree never stalls the UI
pub async fn scan_folder_async(folder: PathBuf) -> Vec<FileCandidate> {
    match tokio::task::spawn_blocking(move || scan_folder(&folder)).await {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!("❌ Folder scan aborted: {}", e);
            Vec::new()
        }
    }
}
