use actix_web::{web, HttpRequest, HttpResponse};
use askama::Template;

use crate::config::Settings;
use crate::errors::{AppError, render};
use crate::middleware::new_request_id;
use crate::templates_structs::{ErrorTemplate, NotFoundTemplate, PageContext};

/// GET /Home/Error
pub async fn error(settings: web::Data<Settings>) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&settings, "Error");
    render(ErrorTemplate { ctx, request_id: Some(new_request_id()) })
}

/// Fallback for unrouted paths that are not static files either.
pub async fn not_found(
    req: HttpRequest,
    settings: web::Data<Settings>,
) -> Result<HttpResponse, AppError> {
    log::debug!("No route or file for {}", req.path());
    let ctx = PageContext::build(&settings, "Not Found");
    let html = NotFoundTemplate { ctx, path: req.path().to_string() }.render()?;
    Ok(HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(html))
}
