/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the selection/submission core, the API layer and the UI layer.

use std::path::PathBuf;

/// Fallback name for a downloaded transcript when the server suggests none
pub const DEFAULT_TRANSCRIPT_NAME: &str = "transcripcion.txt";

/// A file offered by the user (drop or picker) that has not been admitted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    /// Filename only (e.g., "scan_001.png")
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// Full path the content will be read from at submission
    pub path: PathBuf,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, size: u64, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            size,
            path: path.into(),
        }
    }
}

/// A file admitted into the selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Filename only, compared literally for duplicate detection
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// Full path to the image on disk
    pub path: PathBuf,
}

impl SelectedFile {
    /// Duplicate identity: the (name, size) pair, not the content
    pub fn same_identity(&self, name: &str, size: u64) -> bool {
        self.name == name && self.size == size
    }
}

impl From<FileCandidate> for SelectedFile {
    fn from(candidate: FileCandidate) -> Self {
        Self {
            name: candidate.name,
            size: candidate.size,
            path: candidate.path,
        }
    }
}

/// Transcript returned by a successful submission
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    pub text: String,
    /// Server-suggested filename for the download
    pub filename: Option<String>,
    pub files_processed: Option<u32>,
}

impl Transcript {
    /// Name used for the downloaded text file
    pub fn download_name(&self) -> &str {
        match self.filename.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => DEFAULT_TRANSCRIPT_NAME,
        }
    }
}

/// Transient result of one submission
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    Success(Transcript),
    Failure { message: String },
}

impl RequestOutcome {
    #[cfg(test)]
    pub fn success(text: impl Into<String>, filename: Option<String>) -> Self {
        Self::Success(Transcript {
            text: text.into(),
            filename,
            files_processed: None,
        })
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }
}
