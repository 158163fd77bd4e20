use actix_web::{get, web, HttpResponse};

use crate::{app_state::AppState, errors::AppError, services::http_helpers::html_page};

#[get("/")]
async fn index_page(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    html_page(&state.config.templates_dir, "index.html").await
}

/// The quiz view; it fetches its questions from `/quiz_data` or `/api/quizzes/{id}`.
#[get("/quiz")]
async fn quiz_page(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    html_page(&state.config.templates_dir, "quiz.html").await
}

#[get("/leaderboard.html")]
async fn leaderboard_page(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    html_page(&state.config.templates_dir, "leaderboard.html").await
}
