//! Shared test infrastructure for the HTTP-level tests.
//!
//! - `settings()` - settings for a given environment name
//! - `form_body()` - url-encode form pairs
//! - `init_app!` - the application service, wired like `main`
#![allow(dead_code)]

use std::path::PathBuf;

use fieldname::config::{Environment, Settings};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
pub const DEVELOPMENT: &str = "Development";
pub const PRODUCTION: &str = "Production";

// ============================================================================
// SETUP
// ============================================================================

pub fn settings(environment: &str) -> Settings {
    Settings {
        environment: Environment::new(environment),
        ..Settings::default()
    }
}

/// The repository's own static files.
pub fn web_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("wwwroot")
}

pub fn form_body(pairs: &[(&str, &str)]) -> String {
    serde_urlencoded::to_string(pairs).expect("Failed to encode form")
}

/// Build the app service. Extra `.route(...)` calls can be passed in and are
/// registered ahead of the application routes. Needs `#[macro_use] mod common;`.
macro_rules! init_app {
    ($settings:expr) => {
        init_app!($settings, |app| app)
    };
    ($settings:expr, |$app:ident| $extra:expr) => {{
        let settings = actix_web::web::Data::new($settings);
        let registry = actix_web::web::Data::new(fieldname::binding::BinderRegistry::with_defaults());
        let web_root = common::web_root();
        let $app = actix_web::App::new()
            .wrap(actix_web::middleware::from_fn(fieldname::middleware::canonical_route))
            .wrap(actix_web::middleware::from_fn(fieldname::middleware::exception_page))
            .wrap(actix_web::middleware::NormalizePath::trim())
            .app_data(settings)
            .app_data(registry);
        actix_web::test::init_service(
            $extra.configure(|cfg| fieldname::routes::configure(cfg, &web_root)),
        )
        .await
    }};
}
