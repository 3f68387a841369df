// src/models/upload.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::quiz::QuizDocument;

/// Response body for a successful conversion, whether or not it was published.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResponse {
    pub success: bool,
    pub quiz: QuizDocument,
    pub saved: bool,
    pub quiz_path: Option<String>,
    pub message: String,
}

/// DTO for converting a plain-text quiz pack.
#[derive(Debug, Deserialize, Validate)]
pub struct ParseTextRequest {
    #[validate(length(min = 1, max = 1048576, message = "Text must not be empty or longer than 1048576 characters."))]
    pub text: String,
    #[validate(length(max = 200, message = "Title must be at most 200 characters."))]
    pub title: Option<String>,
    #[validate(length(max = 200))]
    pub source: Option<String>,
}
