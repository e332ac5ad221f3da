/// Transcript download
///
/// Writes the displayed transcript to a plain-text file. The file name is
/// `Transcript::download_name`: the server's suggestion, or a fixed default.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Write `text` as UTF-8 to `path`. The file handle is closed on return.
pub async fn save_transcript(path: PathBuf, text: String) -> Result<PathBuf, ExportError> {
    tokio::fs::write(&path, text.as_bytes())
        .await
        .map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;

    tracing::info!("💾 Transcript saved to {}", path.display());
    Ok(path)
}
