use std::path::Path;

use actix_web::web;

use crate::handlers::{error_handlers, home_handlers};

pub const CONTROLLER: &str = "Home";

/// Actions under `/Home`, spelled as registered.
pub const HOME_ACTIONS: [&str; 6] = ["Index", "About", "Contact", "Error", "Create", "Edit"];

/// Registered spelling of a `/home/about/…` style path.
///
/// Only the controller and action segments are folded; anything after them,
/// and every non-Home path, is left alone. Returns `None` when there is
/// nothing to change.
pub fn canonical_path(path: &str) -> Option<String> {
    let mut segments = path.strip_prefix('/')?.splitn(3, '/');
    if !segments.next()?.eq_ignore_ascii_case(CONTROLLER) {
        return None;
    }

    let mut canonical = format!("/{CONTROLLER}");
    if let Some(action) = segments.next() {
        let action = HOME_ACTIONS.iter().find(|a| a.eq_ignore_ascii_case(action))?;
        canonical.push('/');
        canonical.push_str(action);
        if let Some(id) = segments.next() {
            canonical.push('/');
            canonical.push_str(id);
        }
    }
    (canonical != path).then_some(canonical)
}

/// Registers the Home controller and static files.
///
/// Every action also answers with a trailing `/{id}` segment, which is ignored.
/// Case and trailing slashes are folded before routing, see
/// [`crate::middleware::canonical_route`].
/// Paths that match no route are looked up under `web_root`, and whatever is
/// still left gets the 404 page.
pub fn configure(cfg: &mut web::ServiceConfig, web_root: &Path) {
    cfg.route("/", web::get().to(home_handlers::index))
        .service(
            web::scope("/Home")
                .route("", web::get().to(home_handlers::index))
                .service(web::resource(["/Index", "/Index/{id}"]).route(web::get().to(home_handlers::index)))
                .service(web::resource(["/About", "/About/{id}"]).route(web::get().to(home_handlers::about)))
                .service(web::resource(["/Contact", "/Contact/{id}"]).route(web::get().to(home_handlers::contact)))
                .service(web::resource(["/Error", "/Error/{id}"]).route(web::get().to(error_handlers::error)))
                .service(
                    web::resource(["/Create", "/Create/{id}"])
                        .route(web::get().to(home_handlers::create_form))
                        .route(web::post().to(home_handlers::create)),
                )
                .service(
                    web::resource(["/Edit", "/Edit/{id}"])
                        .route(web::get().to(home_handlers::edit_form))
                        .route(web::post().to(home_handlers::edit)),
                ),
        );

    // Static files (must be registered last: a "/" mount shadows later services)
    if web_root.is_dir() {
        cfg.service(
            actix_files::Files::new("/", web_root)
                .default_handler(web::to(error_handlers::not_found)),
        );
    } else {
        log::warn!("Web root {} is not a directory; static files disabled", web_root.display());
        cfg.default_service(web::to(error_handlers::not_found));
    }
}
