use std::path::PathBuf;
use thiserror::Error;

/// Shown when the backend answered but reported no usable message
pub const PROCESSING_FAILED: &str = "Error al procesar los archivos";

/// Shown when the backend could not be reached or its reply was unreadable
pub const CONNECTION_FAILED: &str =
    "No se pudo conectar con el servidor. Asegúrate de que el backend esté ejecutándose.";

/// Errors raised while talking to the OCR backend
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection refused, DNS failure, timeout, interrupted body...
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body is not the JSON we expect
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Backend answered with a non-success status
    #[error("server returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Server { status: u16, message: Option<String> },

    /// A selected image could not be read from disk
    #[error("failed to read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    /// Message displayed in the error panel
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Transport(_) | ApiError::Decode(_) => CONNECTION_FAILED.to_string(),
            ApiError::Server {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            ApiError::Server { .. } => PROCESSING_FAILED.to_string(),
            ApiError::ReadFile { path, .. } => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| path.display().to_string());
                format!("No se pudo leer el archivo {}", name)
            }
        }
    }
}
