use askama::Template;

use super::PageContext;

#[derive(Template)]
#[template(path = "home/error.html")]
pub struct ErrorTemplate {
    pub ctx: PageContext,
    pub request_id: Option<String>,
}

/// Shown instead of [`ErrorTemplate`] in the Development environment.
#[derive(Template)]
#[template(path = "errors/developer.html")]
pub struct DeveloperErrorTemplate {
    pub ctx: PageContext,
    pub status: u16,
    pub method: String,
    pub path: String,
    pub detail: String,
}

#[derive(Template)]
#[template(path = "errors/404.html")]
pub struct NotFoundTemplate {
    pub ctx: PageContext,
    pub path: String,
}
