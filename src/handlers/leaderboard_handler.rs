use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::SessionId,
    models::dto::response::MessageResponse,
};

#[post("/leaderboard")]
async fn save_results(
    state: web::Data<AppState>,
    session: SessionId,
    result: web::Json<serde_json::Value>,
) -> Result<HttpResponse, AppError> {
    state
        .leaderboard_service
        .save_result(session.0, result.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Result saved successfully")))
}

#[get("/get_results")]
async fn get_results(
    state: web::Data<AppState>,
    session: SessionId,
) -> Result<HttpResponse, AppError> {
    let result = state.leaderboard_service.get_result(&session.0).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[post("/update_leaderboard")]
async fn update_leaderboard(
    state: web::Data<AppState>,
    entry: web::Json<serde_json::Value>,
) -> HttpResponse {
    state.leaderboard_service.update_leaderboard(&entry);
    HttpResponse::Ok().json(MessageResponse::new("Leaderboard updated successfully"))
}
