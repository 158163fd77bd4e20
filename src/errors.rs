use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Unsupported file type or no file uploaded.")]
    UnsupportedFileType(String),

    #[error("Unsupported file type or no file uploaded.")]
    NoFileUploaded,

    #[error("Uploaded file exceeds the {0} byte limit.")]
    UploadTooLarge(usize),

    #[error("Failed to extract text from file: {0}")]
    ExtractionFailed(String),

    #[error("Error: GROQ_API_KEY environment variable not set.")]
    MissingApiKey,

    #[error("Failed to generate quiz: {0}")]
    CompletionFailed(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    fn error_code(&self) -> &'static str {
        match self {
            AppError::UnsupportedFileType(_) => "UNSUPPORTED_FILE_TYPE",
            AppError::NoFileUploaded => "NO_FILE_UPLOADED",
            AppError::UploadTooLarge(_) => "UPLOAD_TOO_LARGE",
            AppError::ExtractionFailed(_) => "EXTRACTION_FAILED",
            AppError::MissingApiKey => "MISSING_API_KEY",
            AppError::CompletionFailed(_) => "COMPLETION_FAILED",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Upload pipeline failures are reported to the browser as plain text.
    fn is_plain_text(&self) -> bool {
        matches!(
            self,
            AppError::UnsupportedFileType(_)
                | AppError::NoFileUploaded
                | AppError::UploadTooLarge(_)
                | AppError::ExtractionFailed(_)
                | AppError::MissingApiKey
                | AppError::CompletionFailed(_)
        )
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
    pub status: u16,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::UnsupportedFileType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::NoFileUploaded => StatusCode::BAD_REQUEST,
            AppError::UploadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::ExtractionFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::MissingApiKey => StatusCode::SERVICE_UNAVAILABLE,
            AppError::CompletionFailed(_) => StatusCode::BAD_GATEWAY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.is_plain_text() {
            return HttpResponse::build(self.status_code())
                .content_type("text/plain; charset=utf-8")
                .body(self.to_string());
        }

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.error_code(),
            status: self.status_code().as_u16(),
        })
    }
}

impl From<actix_multipart::MultipartError> for AppError {
    fn from(err: actix_multipart::MultipartError) -> Self {
        AppError::ValidationError(format!("Malformed multipart upload: {}", err))
    }
}

impl From<async_openai::error::OpenAIError> for AppError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        AppError::CompletionFailed(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
