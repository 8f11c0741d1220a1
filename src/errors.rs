use actix_web::{HttpResponse, ResponseError};
use askama::Template;
use std::fmt;

use crate::binding::BindingError;

#[derive(Debug)]
pub enum AppError {
    Template(askama::Error),
    Form(serde_urlencoded::de::Error),
    Binding(BindingError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Template(e) => write!(f, "Template error: {e}"),
            AppError::Form(e) => write!(f, "Malformed form data: {e}"),
            AppError::Binding(e) => write!(f, "Binding error: {e}"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Form(_) => {
                log::warn!("{self}");
                HttpResponse::BadRequest().body(self.to_string())
            }
            _ => {
                log::error!("{self}");
                HttpResponse::InternalServerError().body("Internal Server Error")
            }
        }
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Template(e)
    }
}

impl From<serde_urlencoded::de::Error> for AppError {
    fn from(e: serde_urlencoded::de::Error) -> Self {
        AppError::Form(e)
    }
}

impl From<BindingError> for AppError {
    fn from(e: BindingError) -> Self {
        AppError::Binding(e)
    }
}

/// Render a template into a `200 OK` HTML response.
pub fn render(tmpl: impl Template) -> Result<HttpResponse, AppError> {
    let html = tmpl.render()?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}
