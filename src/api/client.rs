/// HTTP client for the OCR backend
///
/// One `POST /process` per submission: every selected image goes under the
/// repeated `files` field, followed by the `profile` and `language` text
/// fields. The whole response is awaited before anything is reported back.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::multipart::{Form, Part};

use super::error::ApiError;
use super::types::{HealthStatus, ProcessResponse, ProfileInfo};
use crate::state::data::{RequestOutcome, Transcript};
use crate::state::selection::extension_of;
use crate::state::submission::SubmissionRequest;

/// Cheap to clone: the underlying connection pool is shared
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for `base_url`.
    ///
    /// Without a timeout a request that never answers keeps the UI loading.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.into(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Upload the request's files and return the transcript
    pub async fn process(&self, request: &SubmissionRequest) -> Result<Transcript, ApiError> {
        let form = build_form(request).await?;

        let response = self
            .http
            .post(self.endpoint("process"))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        let value: serde_json::Value = serde_json::from_slice(&body)?;
        let message = value
            .get("error")
            .and_then(|error| error.as_str())
            .map(str::to_string);

        // A 2xx reply carrying `error` but no `text` is still a server failure
        if status.is_success() && (value.get("text").is_some() || message.is_none()) {
            let parsed: ProcessResponse = serde_json::from_value(value)?;
            tracing::info!(
                files_processed = ?parsed.files_processed,
                profile = ?parsed.profile,
                language = ?parsed.language,
                "✅ /process succeeded"
            );
            Ok(parsed.into())
        } else {
            Err(ApiError::Server {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Run a submission and fold any failure into a displayable outcome
    pub async fn submit(self, request: SubmissionRequest) -> RequestOutcome {
        match self.process(&request).await {
            Ok(transcript) => RequestOutcome::Success(transcript),
            Err(err) => {
                tracing::error!("❌ /process failed: {}", err);
                RequestOutcome::Failure {
                    message: err.user_message(),
                }
            }
        }
    }

    /// `GET /health`
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        let health = self
            .http
            .get(self.endpoint("health"))
            .send()
            .await?
            .error_for_status()?
            .json::<HealthStatus>()
            .await?;
        Ok(health)
    }

    /// `GET /profiles`, sorted by profile name
    pub async fn profiles(&self) -> Result<Vec<ProfileInfo>, ApiError> {
        let profiles = self
            .http
            .get(self.endpoint("profiles"))
            .send()
            .await?
            .error_for_status()?
            .json::<BTreeMap<String, ProfileInfo>>()
            .await?;
        Ok(profiles.into_values().collect())
    }
}

/// Content type announced for an image part
fn mime_for(name: &str) -> Option<&'static str> {
    match extension_of(name).as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "bmp" => Some("image/bmp"),
        "tif" | "tiff" => Some("image/tiff"),
        _ => None,
    }
}

async fn build_form(request: &SubmissionRequest) -> Result<Form, ApiError> {
    let mut form = Form::new();

    for file in &request.files {
        let bytes = tokio::fs::read(&file.path)
            .await
            .map_err(|source| ApiError::ReadFile {
                path: file.path.clone(),
                source,
            })?;

        let mut part = Part::bytes(bytes).file_name(file.name.clone());
        if let Some(mime) = mime_for(&file.name) {
            part = part.mime_str(mime)?;
        }
        form = form.part("files", part);
    }

    Ok(form
        .text("profile", request.options.profile.clone())
        .text("language", request.options.language.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::{CONNECTION_FAILED, PROCESSING_FAILED};
    use crate::state::data::FileCandidate;
    use crate::state::options::ProcessingOptions;
    use crate::state::submission::{Phase, SubmissionController};
    use axum::extract::Multipart;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::path::Path;

    async fn spawn_stub(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    /// Answers "hola" only for two files with profile=default, language=es
    async fn process_handler(mut multipart: Multipart) -> (StatusCode, Json<Value>) {
        let mut files = Vec::new();
        let mut profile = None;
        let mut language = None;

        while let Some(field) = multipart.next_field().await.unwrap() {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "files" => {
                    let filename = field.file_name().unwrap_or_default().to_string();
                    let content_type = field.content_type().unwrap_or_default().to_string();
                    let data = field.bytes().await.unwrap();
                    files.push((filename, content_type, data.len()));
                }
                "profile" => profile = Some(field.text().await.unwrap()),
                "language" => language = Some(field.text().await.unwrap()),
                _ => {}
            }
        }

        let expected_files = vec![
            ("page1.png".to_string(), "image/png".to_string(), 4),
            ("page2.JPG".to_string(), "image/jpeg".to_string(), 6),
        ];
        if files == expected_files
            && profile.as_deref() == Some("default")
            && language.as_deref() == Some("es")
        {
            (
                StatusCode::OK,
                Json(json!({"text": "hola", "filename": "out.txt", "files_processed": 2})),
            )
        } else {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": format!("unexpected upload: {:?} {:?} {:?}", files, profile, language)})),
            )
        }
    }

    fn write_fixtures(dir: &Path) -> Vec<FileCandidate> {
        let first = dir.join("page1.png");
        let second = dir.join("page2.JPG");
        std::fs::write(&first, b"\x89PNG").unwrap();
        std::fs::write(&second, b"\xFF\xD8jpeg").unwrap();
        vec![
            FileCandidate::new("page1.png", 4, first),
            FileCandidate::new("page2.JPG", 6, second),
        ]
    }

    fn single_file_request(dir: &Path) -> SubmissionRequest {
        let path = dir.join("scan.png");
        std::fs::write(&path, b"data").unwrap();
        SubmissionRequest {
            files: vec![FileCandidate::new("scan.png", 4, path).into()],
            options: ProcessingOptions::default(),
        }
    }

    #[test]
    fn test_mime_for() {
        assert_eq!(mime_for("a.JPEG"), Some("image/jpeg"));
        assert_eq!(mime_for("a.tif"), Some("image/tiff"));
        assert_eq!(mime_for("a.gif"), None);
    }

    #[test]
    fn test_endpoint_joins_trailing_slash() {
        let client = ApiClient::new("http://localhost:5000/", None).unwrap();
        assert_eq!(client.endpoint("process"), "http://localhost:5000/process");
    }

    #[tokio::test]
    async fn test_submit_success_reaches_result() {
        let dir = tempfile::tempdir().unwrap();
        let base = spawn_stub(Router::new().route("/process", post(process_handler))).await;
        let client = ApiClient::new(base, None).unwrap();

        let mut controller = SubmissionController::new();
        controller.add_files(write_fixtures(dir.path()));
        let request = controller
            .submit(ProcessingOptions::new("default", "es"))
            .expect("submit enabled");

        let outcome = client.submit(request).await;
        assert!(controller.complete(outcome));

        let transcript = controller.transcript().expect("result phase");
        assert_eq!(transcript.text, "hola");
        assert_eq!(transcript.download_name(), "out.txt");
        assert_eq!(transcript.files_processed, Some(2));
    }

    #[tokio::test]
    async fn test_server_error_message_is_shown() {
        let dir = tempfile::tempdir().unwrap();
        let app = Router::new().route(
            "/process",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "bad scan"})),
                )
            }),
        );
        let client = ApiClient::new(spawn_stub(app).await, None).unwrap();

        let mut controller = SubmissionController::new();
        controller.add_files(write_fixtures(dir.path()));
        let request = controller.submit(ProcessingOptions::default()).unwrap();
        controller.complete(client.submit(request).await);

        assert_eq!(controller.phase(), &Phase::Error("bad scan".into()));
    }

    #[tokio::test]
    async fn test_server_error_without_message() {
        let dir = tempfile::tempdir().unwrap();
        let app = Router::new().route(
            "/process",
            post(|| async { (StatusCode::BAD_REQUEST, Json(json!({}))) }),
        );
        let client = ApiClient::new(spawn_stub(app).await, None).unwrap();

        let err = client
            .process(&single_file_request(dir.path()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Server { status: 400, message: None }));
        assert_eq!(err.user_message(), PROCESSING_FAILED);
    }

    #[tokio::test]
    async fn test_error_payload_on_success_status_is_shown() {
        let dir = tempfile::tempdir().unwrap();
        let app = Router::new().route(
            "/process",
            post(|| async { (StatusCode::OK, Json(json!({"error": "quota exceeded"}))) }),
        );
        let client = ApiClient::new(spawn_stub(app).await, None).unwrap();

        let mut controller = SubmissionController::new();
        controller.add_files(write_fixtures(dir.path()));
        let request = controller.submit(ProcessingOptions::default()).unwrap();
        controller.complete(client.submit(request).await);

        assert_eq!(controller.phase(), &Phase::Error("quota exceeded".into()));
    }

    #[tokio::test]
    async fn test_success_without_text_uses_connection_message() {
        let dir = tempfile::tempdir().unwrap();
        let app = Router::new().route(
            "/process",
            post(|| async { (StatusCode::OK, Json(json!({"filename": "out.txt"}))) }),
        );
        let client = ApiClient::new(spawn_stub(app).await, None).unwrap();

        let err = client
            .process(&single_file_request(dir.path()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
        assert_eq!(err.user_message(), CONNECTION_FAILED);
    }

    #[tokio::test]
    async fn test_unparseable_body_uses_connection_message() {
        let dir = tempfile::tempdir().unwrap();
        let app = Router::new().route(
            "/process",
            post(|| async { (StatusCode::OK, "<html>proxy error</html>") }),
        );
        let client = ApiClient::new(spawn_stub(app).await, None).unwrap();

        let outcome = client.submit(single_file_request(dir.path())).await;
        assert_eq!(outcome, RequestOutcome::failure(CONNECTION_FAILED));
    }

    #[tokio::test]
    async fn test_unreachable_server_reaches_error() {
        let dir = tempfile::tempdir().unwrap();
        // Grab a free port, then close it so nothing is listening
        let addr = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let client = ApiClient::new(format!("http://{}", addr), None).unwrap();

        let mut controller = SubmissionController::new();
        controller.add_files(write_fixtures(dir.path()));
        let request = controller.submit(ProcessingOptions::default()).unwrap();
        controller.complete(client.submit(request).await);

        assert_eq!(controller.error_message(), Some(CONNECTION_FAILED));

        let before = controller.selection().snapshot();
        assert!(controller.retry());
        assert!(controller.panels().preview);
        assert_eq!(controller.selection().snapshot(), before);
    }

    #[tokio::test]
    async fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let client = ApiClient::new("http://127.0.0.1:9", None).unwrap();
        let request = SubmissionRequest {
            files: vec![FileCandidate::new("gone.png", 1, dir.path().join("gone.png")).into()],
            options: ProcessingOptions::default(),
        };

        let err = client.process(&request).await.unwrap_err();
        assert!(matches!(err, ApiError::ReadFile { .. }));
    }

    #[tokio::test]
    async fn test_health_and_profiles() {
        let app = Router::new()
            .route(
                "/health",
                get(|| async {
                    Json(json!({
                        "status": "ok",
                        "message": "Servidor OCR funcionando correctamente",
                        "timestamp": "2024-05-01T12:30:00.123456"
                    }))
                }),
            )
            .route(
                "/profiles",
                get(|| async {
                    Json(json!({
                        "HISTORICOS": {"name": "HISTORICOS", "language": "es",
                                       "confidence_threshold": 0.5, "spell_check_enabled": false},
                        "ALTA_CALIDAD": {"name": "ALTA_CALIDAD", "language": "en",
                                         "confidence_threshold": 0.75, "spell_check_enabled": false}
                    }))
                }),
            );
        let client = ApiClient::new(spawn_stub(app).await, None).unwrap();

        let health = client.health().await.unwrap();
        assert!(health.is_ok());

        let names: Vec<_> = client
            .profiles()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["ALTA_CALIDAD", "HISTORICOS"]);
    }

    #[tokio::test]
    async fn test_timeout_is_transport_failure() {
        let dir = tempfile::tempdir().unwrap();
        let app = Router::new().route(
            "/process",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({"text": "too late"}))
            }),
        );
        let client = ApiClient::new(spawn_stub(app).await, Some(Duration::from_millis(200))).unwrap();

        let err = client
            .process(&single_file_request(dir.path()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert_eq!(err.user_message(), CONNECTION_FAILED);
    }
}
