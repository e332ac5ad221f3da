/// State management module
///
/// This module handles all client-side state, including:
/// - Shared data structures (data.rs)
/// - Processing options sent with each upload (options.rs)
/// - The deduplicated file selection (selection.rs)
/// - The submit/response view state machine (submission.rs)

pub mod data;
pub mod options;
pub mod selection;
pub mod submission;
