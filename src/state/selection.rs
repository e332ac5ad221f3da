/// Selection manager
///
/// Owns the ordered, deduplicated list of images chosen for submission.
/// Candidates go through [`classify`] first; rejected ones are dropped
/// without any user-visible signal (only a debug log line).

use super::data::{FileCandidate, SelectedFile};

/// Image extensions accepted by the backend (compared lower-cased)
pub const ACCEPTED_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "bmp", "tiff", "tif"];

/// Why a candidate was not admitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    UnsupportedExtension,
    /// Same (name, size) pair already selected
    Duplicate,
}

/// Admission decision for a single candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Accept,
    Reject(RejectReason),
}

/// Summary of one `add_files` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddSummary {
    pub added: usize,
    pub unsupported: usize,
    pub duplicates: usize,
}

/// One line of the visible file list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRow {
    /// Current position, bound to the row's remove control
    pub index: usize,
    pub name: String,
    pub size_label: String,
}

/// Extension of a filename: text after the last '.', lower-cased.
/// A name without any '.' yields the whole name.
pub fn extension_of(name: &str) -> String {
    name.rsplit('.').next().unwrap_or(name).to_lowercase()
}

/// Decide whether a candidate may join the selection.
///
/// Extension matching is case-insensitive, the duplicate check compares
/// names literally, so "photo.JPG" and "photo.jpg" are distinct files.
pub fn classify(candidate: &FileCandidate, selected: &[SelectedFile]) -> Admission {
    let extension = extension_of(&candidate.name);
    if !ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
        return Admission::Reject(RejectReason::UnsupportedExtension);
    }

    if selected
        .iter()
        .any(|file| file.same_identity(&candidate.name, candidate.size))
    {
        return Admission::Reject(RejectReason::Duplicate);
    }

    Admission::Accept
}

/// Human-readable file size: "512 B", "1.5 KB", "3.2 MB"
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;

    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}

/// The in-memory selection set
#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    files: Vec<SelectedFile>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit every acceptable candidate, in order
    pub fn add_files<I>(&mut self, candidates: I) -> AddSummary
    where
        I: IntoIterator<Item = FileCandidate>,
    {
        let mut summary = AddSummary::default();

        for candidate in candidates {
            match classify(&candidate, &self.files) {
                Admission::Accept => {
                    tracing::debug!(name = %candidate.name, size = candidate.size, "file selected");
                    self.files.push(candidate.into());
                    summary.added += 1;
                }
                Admission::Reject(reason) => {
                    tracing::debug!(name = %candidate.name, ?reason, "file ignored");
                    match reason {
                        RejectReason::UnsupportedExtension => summary.unsupported += 1,
                        RejectReason::Duplicate => summary.duplicates += 1,
                    }
                }
            }
        }

        summary
    }

    /// Remove the entry at `index`; returns false when out of range
    pub fn remove_file(&mut self, index: usize) -> bool {
        if index >= self.files.len() {
            tracing::warn!(index, len = self.files.len(), "remove_file: index out of range");
            return false;
        }

        let removed = self.files.remove(index);
        tracing::debug!(name = %removed.name, "file removed");
        true
    }

    /// Drop the whole selection
    pub fn reset(&mut self) {
        self.files.clear();
    }

    #[cfg(test)]
    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Submit is available exactly when something is selected
    pub fn is_submit_enabled(&self) -> bool {
        !self.is_empty()
    }

    /// Owned copy handed to a submission
    pub fn snapshot(&self) -> Vec<SelectedFile> {
        self.files.clone()
    }

    /// View model for the file list
    pub fn rows(&self) -> Vec<FileRow> {
        self.files
            .iter()
            .enumerate()
            .map(|(index, file)| FileRow {
                index,
                name: file.name.clone(),
                size_label: format_file_size(file.size),
            })
            .collect()
    }
}
