use std::path::Path;

use actix_web::{http::header, HttpResponse};

use crate::errors::{AppError, AppResult};

/// Creates a redirect to `location` (302, as browsers expect after a form post)
pub fn found(location: impl AsRef<str>) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location.as_ref()))
        .finish()
}

/// Creates a success JSON response
pub fn success_json<T: serde::Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(data)
}

/// Serves an HTML page from the templates directory
pub async fn html_page(templates_dir: &str, name: &str) -> AppResult<HttpResponse> {
    let path = Path::new(templates_dir).join(name);
    let html = tokio::fs::read_to_string(&path).await.map_err(|e| {
        log::warn!("Failed to read page {}: {}", path.display(), e);
        AppError::NotFound(format!("Page '{}' not found", name))
    })?;

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}
