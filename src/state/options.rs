/// Processing options sent alongside the uploaded images
///
/// The backend reads two free-form fields from the multipart body.
/// No validation happens on the client: whatever the controls hold
/// at submit time is sent as-is.

use serde::{Deserialize, Serialize};

/// Profile used when neither the config nor the backend provide one
pub const DEFAULT_PROFILE: &str = "HISTORICOS";

/// Language used when the config provides none
pub const DEFAULT_LANGUAGE: &str = "es";

/// Profiles known to ship with the backend, used until `/profiles` answers
pub const BUILTIN_PROFILES: [&str; 2] = ["HISTORICOS", "ALTA_CALIDAD"];

/// The two option fields of a submission
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ProcessingOptions {
    /// Processing profile name
    /// - "HISTORICOS" = aggressive preprocessing for old paper
    /// - "ALTA_CALIDAD" = minimal preprocessing for clean scans
    pub profile: String,

    /// OCR / spell-check language code (e.g., "es", "en")
    pub language: String,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            profile: DEFAULT_PROFILE.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl ProcessingOptions {
    #[cfg(test)]
    pub fn new(profile: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
            language: language.into(),
        }
    }
}
