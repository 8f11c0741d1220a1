use actix_web::{
    Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::uri::{PathAndQuery, Uri},
    middleware::Next,
    web,
};
use askama::Template;
use rand::Rng;

use crate::config::Settings;
use crate::routes;
use crate::templates_structs::{DeveloperErrorTemplate, ErrorTemplate, PageContext};

/// Random 16-hex-digit id quoted on the error page and in the log.
pub fn new_request_id() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 8] = rng.random();
    hex::encode(bytes)
}

/// Middleware function that rewrites `/home/about` style paths to the
/// registered `/Home/About` before routing. Static file paths keep their case.
pub async fn canonical_route(
    mut req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    if let Some(path) = routes::canonical_path(req.path()) {
        let target = match req.query_string() {
            "" => path,
            query => format!("{path}?{query}"),
        };
        let rewritten = target.parse::<PathAndQuery>().ok().and_then(|pq| {
            let mut parts = req.head().uri.clone().into_parts();
            parts.path_and_query = Some(pq);
            Uri::from_parts(parts).ok()
        });
        match rewritten {
            Some(uri) => {
                log::debug!("Routing {} as {}", req.path(), uri.path());
                req.match_info_mut().get_mut().update(&uri);
                req.head_mut().uri = uri;
            }
            None => log::warn!("Cannot rewrite {} as {target}", req.path()),
        }
    }
    next.call(req).await
}

/// Middleware function that replaces server error responses with an error page:
/// the full error text in Development, the generic Error view otherwise.
pub async fn exception_page(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let res = next.call(req).await?;
    if !res.status().is_server_error() {
        return Ok(res.map_into_left_body());
    }

    let settings = res
        .request()
        .app_data::<web::Data<Settings>>()
        .map(|s| s.get_ref().clone())
        .unwrap_or_default();
    let status = res.status();
    let method = res.request().method().to_string();
    let path = res.request().path().to_string();
    let detail = match res.response().error() {
        Some(e) => e.to_string(),
        None => status.to_string(),
    };
    let (req, _) = res.into_parts();

    let ctx = PageContext::build(&settings, "Error");
    let page = if settings.environment.is_development() {
        DeveloperErrorTemplate { ctx, status: status.as_u16(), method, path, detail }.render()
    } else {
        let request_id = new_request_id();
        log::error!("{method} {path} failed with {status} (request id {request_id})");
        ErrorTemplate { ctx, request_id: Some(request_id) }.render()
    };

    let response = match page {
        Ok(html) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(html),
        Err(e) => {
            log::error!("Failed to render error page: {e}");
            HttpResponse::build(status).body("Internal Server Error")
        }
    };
    Ok(ServiceResponse::new(req, response).map_into_right_body())
}
