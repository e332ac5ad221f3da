/// Submission controller
///
/// Owns the selection and drives the view state through one
/// submit/response cycle:
///
/// ```text
/// Selecting --submit--> Loading --success--> Result --new_process--> Selecting
///                               \--failure--> Error  --retry-------> Selecting
/// ```
///
/// The controller never performs I/O. `submit` hands back a
/// [`SubmissionRequest`] snapshot; whoever runs the request reports the
/// outcome through `complete`.

use super::data::{FileCandidate, RequestOutcome, SelectedFile, Transcript};
use super::options::ProcessingOptions;
use super::selection::{AddSummary, FileRow, SelectionManager};

/// Current view phase
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// Idle (nothing selected) or preview (files listed)
    Selecting,
    /// Request in flight
    Loading,
    Result(Transcript),
    Error(String),
}

/// Everything a request needs, detached from the live selection
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRequest {
    pub files: Vec<SelectedFile>,
    pub options: ProcessingOptions,
}

/// Which panels are visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panels {
    pub preview: bool,
    pub loading: bool,
    pub result: bool,
    pub error: bool,
    pub submit_enabled: bool,
}

#[derive(Debug, Clone)]
pub struct SubmissionController {
    selection: SelectionManager,
    phase: Phase,
    /// Selection edited while an outcome is on screen
    preview_reopened: bool,
}

impl Default for SubmissionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionController {
    pub fn new() -> Self {
        Self {
            selection: SelectionManager::new(),
            phase: Phase::Selecting,
            preview_reopened: false,
        }
    }

    #[cfg(test)]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    #[cfg(test)]
    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// Add candidates; ignored while a request is in flight
    pub fn add_files(&mut self, candidates: Vec<FileCandidate>) -> AddSummary {
        if self.is_loading() {
            tracing::debug!(count = candidates.len(), "selection locked while loading");
            return AddSummary::default();
        }

        let summary = self.selection.add_files(candidates);
        self.touch_selection();
        summary
    }

    /// Remove the row at `index`; ignored while a request is in flight
    pub fn remove_file(&mut self, index: usize) -> bool {
        if self.is_loading() {
            return false;
        }

        let removed = self.selection.remove_file(index);
        if removed {
            self.touch_selection();
        }
        removed
    }

    fn touch_selection(&mut self) {
        if matches!(self.phase, Phase::Result(_) | Phase::Error(_)) {
            self.preview_reopened = true;
        }
    }

    /// Start a submission.
    ///
    /// Returns `None` when nothing is selected or a request is already running.
    pub fn submit(&mut self, options: ProcessingOptions) -> Option<SubmissionRequest> {
        if self.is_loading() || !self.selection.is_submit_enabled() {
            return None;
        }

        let request = SubmissionRequest {
            files: self.selection.snapshot(),
            options,
        };

        tracing::info!(
            files = request.files.len(),
            profile = %request.options.profile,
            language = %request.options.language,
            "submitting files"
        );

        self.phase = Phase::Loading;
        self.preview_reopened = false;
        Some(request)
    }

    /// Report the outcome of the in-flight request.
    ///
    /// Returns false (and changes nothing) when no request is in flight.
    pub fn complete(&mut self, outcome: RequestOutcome) -> bool {
        if !self.is_loading() {
            tracing::warn!("completion received outside of loading, ignoring");
            return false;
        }

        self.phase = match outcome {
            RequestOutcome::Success(transcript) => {
                tracing::info!(chars = transcript.text.len(), "transcription received");
                Phase::Result(transcript)
            }
            RequestOutcome::Failure { message } => {
                tracing::warn!(%message, "submission failed");
                Phase::Error(message)
            }
        };
        true
    }

    /// Leave the result view and start over with an empty selection
    pub fn new_process(&mut self) -> bool {
        if !matches!(self.phase, Phase::Result(_)) {
            return false;
        }

        self.selection.reset();
        self.phase = Phase::Selecting;
        self.preview_reopened = false;
        true
    }

    /// Leave the error view, keeping the selection
    pub fn retry(&mut self) -> bool {
        if !matches!(self.phase, Phase::Error(_)) {
            return false;
        }

        self.phase = Phase::Selecting;
        self.preview_reopened = false;
        true
    }

    /// Displayed transcript, if any
    pub fn transcript(&self) -> Option<&Transcript> {
        match &self.phase {
            Phase::Result(transcript) => Some(transcript),
            _ => None,
        }
    }

    /// Displayed error message, if any
    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            Phase::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn rows(&self) -> Vec<FileRow> {
        self.selection.rows()
    }

    pub fn panels(&self) -> Panels {
        let has_files = !self.selection.is_empty();
        let preview = match self.phase {
            Phase::Selecting => has_files,
            Phase::Loading => false,
            Phase::Result(_) | Phase::Error(_) => has_files && self.preview_reopened,
        };

        Panels {
            preview,
            loading: self.phase == Phase::Loading,
            result: matches!(self.phase, Phase::Result(_)),
            error: matches!(self.phase, Phase::Error(_)),
            submit_enabled: self.selection.is_submit_enabled(),
        }
    }
}
