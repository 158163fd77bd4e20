use actix_multipart::Multipart;
use actix_web::{get, post, web, HttpResponse};
use futures::TryStreamExt;
use uuid::Uuid;

use crate::{
    app_state::AppState,
    documents::{is_allowed_file, UploadedDocument},
    errors::{AppError, AppResult},
    middleware::SessionId,
    models::dto::response::QuizDto,
    services::http_helpers::{found, success_json},
};

const UPLOAD_FIELD: &str = "file";

#[post("/upload")]
async fn upload(
    state: web::Data<AppState>,
    session: SessionId,
    mut payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let document = read_upload(&mut payload, state.config.max_upload_bytes).await?;
    let quiz = state.quiz_service.generate_quiz(session.0, document).await?;
    Ok(found(format!("/quiz?id={}", quiz.id)))
}

/// Questions of the session's most recent quiz, as a bare JSON array.
#[get("/quiz_data")]
async fn current_quiz_data(
    state: web::Data<AppState>,
    session: SessionId,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.current_quiz(&session.0).await?;
    Ok(success_json(quiz.questions))
}

#[get("/api/quizzes/{id}")]
async fn get_quiz(
    state: web::Data<AppState>,
    session: SessionId,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz(&session.0, &id).await?;
    Ok(success_json(QuizDto::from(quiz)))
}

/// Reads the `file` field, rejecting disallowed names before any content is read.
async fn read_upload(payload: &mut Multipart, max_bytes: usize) -> AppResult<UploadedDocument> {
    while let Some(mut field) = payload.try_next().await? {
        let filename = match field.content_disposition() {
            Some(disposition) if disposition.get_name() == Some(UPLOAD_FIELD) => {
                disposition.get_filename().unwrap_or_default().to_string()
            }
            _ => continue,
        };

        if filename.is_empty() {
            return Err(AppError::NoFileUploaded);
        }
        if !is_allowed_file(&filename) {
            log::info!("Rejected upload with unsupported filename {}", filename);
            return Err(AppError::UnsupportedFileType(filename));
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            if bytes.len() + chunk.len() > max_bytes {
                return Err(AppError::UploadTooLarge(max_bytes));
            }
            bytes.extend_from_slice(&chunk);
        }

        return Ok(UploadedDocument::new(filename, bytes));
    }

    Err(AppError::NoFileUploaded)
}
