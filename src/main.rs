use iced::widget::{column, container, scrollable, text, Column};
use iced::{event, window, Alignment, Element, Event, Length, Subscription, Task, Theme};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod export;
mod import;
mod state;
mod ui;

use api::error::CONNECTION_FAILED;
use api::types::{HealthStatus, ProfileInfo};
use api::ApiClient;
use config::AppConfig;
use state::data::{FileCandidate, RequestOutcome};
use state::options::{ProcessingOptions, BUILTIN_PROFILES};
use state::selection::ACCEPTED_EXTENSIONS;
use state::submission::SubmissionController;

/// Main application state
struct OcrTranscriptor {
    config: AppConfig,
    /// None when the HTTP client could not be built
    client: Option<ApiClient>,
    /// Selection + submit/response state machine
    controller: SubmissionController,
    /// Current values of the profile/language pickers
    options: ProcessingOptions,
    profiles: Vec<String>,
    /// Profile details reported by the backend
    profile_details: Vec<ProfileInfo>,
    languages: Vec<String>,
    /// Files are being dragged over the window
    drag_over: bool,
    /// Status line (backend health, last export)
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    PickFiles,
    PickFolder,
    FileHovered,
    FilesHoveredLeft,
    FileDropped(PathBuf),
    FolderScanned(Vec<FileCandidate>),
    RemoveFile(usize),
    ProfileSelected(String),
    LanguageSelected(String),
    Submit,
    SubmissionFinished(RequestOutcome),
    CopyText,
    CopyConfirmed,
    DownloadText,
    DownloadFinished(Result<PathBuf, String>),
    NewProcess,
    Retry,
    HealthChecked(Result<HealthStatus, String>),
    ProfilesLoaded(Result<Vec<ProfileInfo>, String>),
}

impl OcrTranscriptor {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let config = config::load();

        let client = match ApiClient::new(config.api_url.clone(), config.request_timeout()) {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::error!("Failed to build HTTP client: {}", e);
                None
            }
        };

        let startup = match &client {
            Some(client) => {
                let health_client = client.clone();
                let profiles_client = client.clone();
                Task::batch([
                    Task::perform(
                        async move { health_client.health().await.map_err(|e| e.to_string()) },
                        Message::HealthChecked,
                    ),
                    Task::perform(
                        async move { profiles_client.profiles().await.map_err(|e| e.to_string()) },
                        Message::ProfilesLoaded,
                    ),
                ])
            }
            None => Task::none(),
        };

        tracing::info!("📄 OCR Transcriptor started, backend: {}", config.api_url);

        let app = OcrTranscriptor {
            options: config.defaults.clone(),
            profiles: BUILTIN_PROFILES.iter().map(|p| p.to_string()).collect(),
            profile_details: Vec::new(),
            languages: config.languages.clone(),
            status: format!("Conectando con {}...", config.api_url),
            config,
            client,
            controller: SubmissionController::new(),
            drag_over: false,
        };

        (app, startup)
    }

    fn add_candidates(&mut self, candidates: Vec<FileCandidate>) {
        let summary = self.controller.add_files(candidates);
        if summary.added > 0 || summary.unsupported > 0 || summary.duplicates > 0 {
            tracing::debug!(
                added = summary.added,
                unsupported = summary.unsupported,
                duplicates = summary.duplicates,
                "selection updated"
            );
        }
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickFiles => {
                if self.controller.is_loading() {
                    return Task::none();
                }

                let files = FileDialog::new()
                    .set_title("Seleccionar imágenes")
                    .add_filter("Imágenes", &ACCEPTED_EXTENSIONS)
                    .pick_files();

                if let Some(paths) = files {
                    self.add_candidates(import::candidates_from_paths(&paths));
                }
                Task::none()
            }
            Message::PickFolder => {
                if self.controller.is_loading() {
                    return Task::none();
                }

                let folder = FileDialog::new()
                    .set_title("Seleccionar carpeta con imágenes")
                    .pick_folder();

                match folder {
                    Some(folder) => {
                        self.status = format!("Buscando imágenes en {}...", folder.display());
                        Task::perform(import::scan_folder_async(folder), Message::FolderScanned)
                    }
                    None => Task::none(),
                }
            }
            Message::FileHovered => {
                self.drag_over = !self.controller.is_loading();
                Task::none()
            }
            Message::FilesHoveredLeft => {
                self.drag_over = false;
                Task::none()
            }
            Message::FileDropped(path) => {
                self.drag_over = false;
                if self.controller.is_loading() {
                    return Task::none();
                }

                if path.is_dir() {
                    self.status = format!("Buscando imágenes en {}...", path.display());
                    Task::perform(import::scan_folder_async(path), Message::FolderScanned)
                } else {
                    self.add_candidates(import::candidates_from_paths(&[path]));
                    Task::none()
                }
            }
            Message::FolderScanned(candidates) => {
                self.status = format!("📂 {} archivo(s) encontrados", candidates.len());
                self.add_candidates(candidates);
                Task::none()
            }
            Message::RemoveFile(index) => {
                self.controller.remove_file(index);
                Task::none()
            }
            Message::ProfileSelected(profile) => {
                self.options.profile = profile;
                Task::none()
            }
            Message::LanguageSelected(language) => {
                self.options.language = language;
                Task::none()
            }
            Message::Submit => {
                let Some(request) = self.controller.submit(self.options.clone()) else {
                    return Task::none();
                };

                match &self.client {
                    Some(client) => {
                        Task::perform(client.clone().submit(request), Message::SubmissionFinished)
                    }
                    None => Task::done(Message::SubmissionFinished(RequestOutcome::failure(
                        CONNECTION_FAILED,
                    ))),
                }
            }
            Message::SubmissionFinished(outcome) => {
                self.controller.complete(outcome);
                Task::none()
            }
            Message::CopyText => match self.controller.transcript() {
                Some(transcript) => iced::clipboard::write::<Message>(transcript.text.clone())
                    .chain(Task::done(Message::CopyConfirmed)),
                None => Task::none(),
            },
            Message::CopyConfirmed => {
                // Blocks until the user acknowledges
                let _ = MessageDialog::new()
                    .set_level(MessageLevel::Info)
                    .set_title("OCR Transcriptor")
                    .set_description("✅ Texto copiado al portapapeles")
                    .set_buttons(MessageButtons::Ok)
                    .show();
                Task::none()
            }
            Message::DownloadText => {
                let Some(transcript) = self.controller.transcript() else {
                    return Task::none();
                };

                let mut dialog = FileDialog::new()
                    .set_title("Guardar transcripción")
                    .set_file_name(transcript.download_name())
                    .add_filter("Texto", &["txt"]);
                if let Some(dir) = self.config.download_dir() {
                    dialog = dialog.set_directory(dir);
                }

                match dialog.save_file() {
                    Some(path) => {
                        let text = transcript.text.clone();
                        Task::perform(
                            async move {
                                export::save_transcript(path, text)
                                    .await
                                    .map_err(|e| e.to_string())
                            },
                            Message::DownloadFinished,
                        )
                    }
                    None => Task::none(),
                }
            }
            Message::DownloadFinished(result) => {
                match result {
                    Ok(path) => self.status = format!("💾 Guardado en {}", path.display()),
                    Err(e) => {
                        tracing::error!("Export failed: {}", e);
                        self.status = format!("⚠️  No se pudo guardar: {}", e);
                    }
                }
                Task::none()
            }
            Message::NewProcess => {
                self.controller.new_process();
                self.drag_over = false;
                Task::none()
            }
            Message::Retry => {
                self.controller.retry();
                Task::none()
            }
            Message::HealthChecked(result) => {
                self.status = match result {
                    Ok(health) if health.is_ok() => match health.timestamp {
                        Some(timestamp) => format!(
                            "✅ Servidor en línea ({})",
                            timestamp.format("%d/%m/%Y %H:%M:%S")
                        ),
                        None => "✅ Servidor en línea".to_string(),
                    },
                    Ok(health) => format!(
                        "⚠️  Servidor respondió: {}",
                        health.message.unwrap_or(health.status)
                    ),
                    Err(e) => {
                        tracing::warn!("Health check failed: {}", e);
                        format!("⚠️  Servidor no disponible ({})", self.config.api_url)
                    }
                };
                Task::none()
            }
            Message::ProfilesLoaded(result) => {
                match result {
                    Ok(profiles) if !profiles.is_empty() => {
                        self.profiles = profiles.iter().map(|p| p.name.clone()).collect();
                        self.profile_details = profiles;
                        tracing::info!("Profiles available: {:?}", self.profiles);
                    }
                    Ok(_) => {}
                    Err(e) => tracing::debug!("Using built-in profiles: {}", e),
                }
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let panels = self.controller.panels();

        let mut content: Column<Message> = column![
            text("OCR Transcriptor").size(36),
            ui::panels::drop_zone(self.drag_over, !panels.loading),
            ui::panels::options_row(&self.options, &self.profiles, &self.languages),
        ]
        .spacing(20)
        .padding(30);

        if let Some(profile) = self
            .profile_details
            .iter()
            .find(|p| p.name == self.options.profile)
        {
            content = content.push(text(profile.describe()).size(14));
        }

        if panels.preview {
            content = content.push(ui::panels::preview_panel(
                self.controller.rows(),
                panels.submit_enabled,
            ));
        }
        if panels.loading {
            content = content.push(ui::panels::loading_panel());
        }
        if panels.result {
            if let Some(transcript) = self.controller.transcript() {
                content = content.push(ui::panels::result_panel(transcript));
            }
        }
        if panels.error {
            if let Some(message) = self.controller.error_message() {
                content = content.push(ui::panels::error_panel(message));
            }
        }

        content = content.push(text(&self.status).size(14));

        container(scrollable(content.align_x(Alignment::Center)))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .into()
    }

    /// Window events: file drag & drop
    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::FileHovered(_)) => Some(Message::FileHovered),
            Event::Window(window::Event::FilesHoveredLeft) => Some(Message::FilesHoveredLeft),
            Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    iced::application(
        "OCR Transcriptor",
        OcrTranscriptor::update,
        OcrTranscriptor::view,
    )
    .theme(OcrTranscriptor::theme)
    .subscription(OcrTranscriptor::subscription)
    .centered()
    .run_with(OcrTranscriptor::new)
}
