// src/handlers/upload.rs

use std::path::Path;

use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, State},
    response::IntoResponse,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    config::MAX_UPLOAD_BYTES,
    error::AppError,
    models::{
        quiz::QuizDocument,
        upload::{ConversionResponse, ParseTextRequest},
    },
    services::{converter, spreadsheet, text_parser},
    state::AppState,
};

const DEFAULT_EXCEL_TITLE: &str = "Uploaded Quiz";
const DEFAULT_TEXT_TITLE: &str = "Text Quiz";

/// Converts an uploaded Excel workbook into a quiz.
///
/// * Expects multipart fields `file` (required) and `title` (optional).
/// * Publishes the result when a remote store is configured.
/// * A failed publish still returns the converted quiz with `saved: false`.
pub async fn upload_excel(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut file: Option<(Option<String>, Bytes)> = None;
    let mut title: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().map(str::to_string);
                file = Some((file_name, field.bytes().await?));
            }
            Some("title") => title = Some(field.text().await?),
            _ => {}
        }
    }

    let (file_name, data) = file.ok_or(AppError::BadRequest("No file uploaded".to_string()))?;

    if data.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".to_string()));
    }
    if data.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::PayloadTooLarge("File exceeds the 10 MiB upload limit".to_string()));
    }

    let title = resolve_title(title.as_deref(), file_name.as_deref());

    // Workbook parsing is CPU-bound; keep it off the async workers.
    let rows = tokio::task::spawn_blocking(move || spreadsheet::read_rows(&data))
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))??;

    let quiz = converter::rows_to_quiz(&rows, &title, Utc::now().date_naive());
    tracing::info!(
        title = %title,
        rows = rows.len(),
        questions = quiz.total_questions(),
        "Converted spreadsheet"
    );

    Ok(Json(publish_if_configured(&state, quiz, &title).await))
}

/// Converts a plain-text quiz pack (ROUND / PLAYER / QUESTION / ANS layout).
pub async fn parse_text(
    State(state): State<AppState>,
    Json(payload): Json<ParseTextRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let today = Utc::now().date_naive();
    let title = payload
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_TEXT_TITLE)
        .to_string();
    let source = payload
        .source
        .unwrap_or_else(|| format!("text_upload_{}", today.format("%Y-%m-%d")));

    let quiz = text_parser::parse_text_quiz(&payload.text, &title, &source, today);
    if quiz.total_questions() == 0 {
        return Err(AppError::BadRequest("No questions found in text".to_string()));
    }

    tracing::info!(
        title = %title,
        rounds = quiz.metadata.rounds,
        questions = quiz.total_questions(),
        "Parsed text quiz"
    );

    Ok(Json(publish_if_configured(&state, quiz, &title).await))
}

/// Publishes the quiz when possible and builds the response either way.
async fn publish_if_configured(
    state: &AppState,
    quiz: QuizDocument,
    title: &str,
) -> ConversionResponse {
    let Some(publisher) = &state.publisher else {
        return ConversionResponse {
            success: true,
            quiz,
            saved: false,
            quiz_path: None,
            message: "Quiz converted. Publishing is not configured; download the JSON to keep it."
                .to_string(),
        };
    };

    match publisher.publish(&quiz, title).await {
        Ok(outcome) => ConversionResponse {
            success: true,
            quiz,
            saved: true,
            message: format!("Quiz saved as {}", outcome.url),
            quiz_path: Some(outcome.path),
        },
        Err(e) => {
            tracing::error!(title, error = %e, "Failed to publish quiz");
            ConversionResponse {
                success: true,
                quiz,
                saved: false,
                quiz_path: None,
                message: "Quiz parsed but not saved to the repository".to_string(),
            }
        }
    }
}

/// Explicit title, else the uploaded file's stem, else a default.
fn resolve_title(title: Option<&str>, file_name: Option<&str>) -> String {
    title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .or_else(|| {
            file_name
                .and_then(|name| Path::new(name).file_stem())
                .and_then(|stem| stem.to_str())
                .map(str::trim)
                .filter(|stem| !stem.is_empty())
        })
        .unwrap_or(DEFAULT_EXCEL_TITLE)
        .to_string()
}
