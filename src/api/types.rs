/// Wire types for the OCR backend's JSON replies

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::state::data::Transcript;

/// Body of a successful `POST /process`
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessResponse {
    pub text: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub files_processed: Option<u32>,
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

impl From<ProcessResponse> for Transcript {
    fn from(response: ProcessResponse) -> Self {
        Self {
            text: response.text,
            filename: response.filename.filter(|name| !name.is_empty()),
            files_processed: response.files_processed,
        }
    }
}

/// Body of `GET /health`
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    /// Server local time, ISO 8601 without offset
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// One entry of `GET /profiles`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProfileInfo {
    pub name: String,
    pub language: String,
    pub confidence_threshold: f32,
    pub spell_check_enabled: bool,
}

impl ProfileInfo {
    /// One-line summary shown under the profile picker
    pub fn describe(&self) -> String {
        format!(
            "{}: idioma {}, confianza mínima {:.2}, corrección ortográfica {}",
            self.name,
            self.language,
            self.confidence_threshold,
            if self.spell_check_enabled { "sí" } else { "no" }
        )
    }
}
