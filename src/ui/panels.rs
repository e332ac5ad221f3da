/// View helpers for the four panels (drop zone + preview, loading,
/// result, error). Each takes plain view-model data and returns an
/// element; visibility is decided by the caller from `Panels`.

use iced::widget::{button, column, container, pick_list, row, scrollable, text, Column};
use iced::{Alignment, Element, Length};

use crate::state::data::Transcript;
use crate::state::options::ProcessingOptions;
use crate::state::selection::FileRow;
use crate::Message;

/// Drop target plus the two pickers
pub fn drop_zone<'a>(drag_over: bool, enabled: bool) -> Element<'a, Message> {
    let hint = if drag_over {
        "Suelta las imágenes aquí"
    } else {
        "Arrastra imágenes aquí (JPG, PNG, BMP, TIFF)"
    };

    let pickers = row![
        button("Seleccionar archivos")
            .on_press_maybe(enabled.then_some(Message::PickFiles))
            .padding(10),
        button("Agregar carpeta")
            .on_press_maybe(enabled.then_some(Message::PickFolder))
            .padding(10),
    ]
    .spacing(10);

    let content = column![text(hint).size(18), pickers]
        .spacing(15)
        .align_x(Alignment::Center);

    container(content)
        .padding(30)
        .width(Length::Fill)
        .center_x(Length::Fill)
        .style(if drag_over {
            container::rounded_box
        } else {
            container::bordered_box
        })
        .into()
}

/// Profile and language pickers
pub fn options_row<'a>(
    options: &'a ProcessingOptions,
    profiles: &'a [String],
    languages: &'a [String],
) -> Element<'a, Message> {
    row![
        text("Perfil:"),
        pick_list(profiles, Some(&options.profile), Message::ProfileSelected),
        text("Idioma:"),
        pick_list(languages, Some(&options.language), Message::LanguageSelected),
    ]
    .spacing(10)
    .align_y(Alignment::Center)
    .into()
}

/// Selected files with their remove buttons, and the submit button
pub fn preview_panel<'a>(rows: Vec<FileRow>, submit_enabled: bool) -> Element<'a, Message> {
    let list = Column::with_children(rows.into_iter().map(|file_row| {
        row![
            text(format!("📄 {} ({})", file_row.name, file_row.size_label)).width(Length::Fill),
            button("✕").on_press(Message::RemoveFile(file_row.index)),
        ]
        .spacing(10)
        .align_y(Alignment::Center)
        .into()
    }))
    .spacing(5);

    column![
        text("Archivos seleccionados").size(20),
        scrollable(list).height(Length::Fixed(180.0)),
        button("Procesar documentos")
            .on_press_maybe(submit_enabled.then_some(Message::Submit))
            .padding(10),
    ]
    .spacing(10)
    .into()
}

pub fn loading_panel<'a>() -> Element<'a, Message> {
    column![
        text("⏳ Procesando documentos...").size(20),
        text("Esto puede tardar varios minutos según la cantidad de imágenes."),
    ]
    .spacing(10)
    .align_x(Alignment::Center)
    .into()
}

/// Transcript with copy / download / new-process actions
pub fn result_panel(transcript: &Transcript) -> Element<'_, Message> {
    let heading = match transcript.files_processed {
        Some(count) => format!("✅ Transcripción completada ({} archivo(s))", count),
        None => "✅ Transcripción completada".to_string(),
    };

    column![
        text(heading).size(20),
        container(scrollable(text(&transcript.text)).height(Length::Fixed(300.0)))
            .padding(10)
            .width(Length::Fill)
            .style(container::bordered_box),
        row![
            button("Copiar texto").on_press(Message::CopyText).padding(10),
            button(text(format!("Descargar {}", transcript.download_name())))
                .on_press(Message::DownloadText)
                .padding(10),
            button("Nuevo proceso").on_press(Message::NewProcess).padding(10),
        ]
        .spacing(10),
    ]
    .spacing(10)
    .into()
}

pub fn error_panel(message: &str) -> Element<'_, Message> {
    column![
        text("❌ Error").size(20),
        text(message),
        button("Reintentar").on_press(Message::Retry).padding(10),
    ]
    .spacing(10)
    .into()
}
