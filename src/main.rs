use actix_web::{App, HttpServer, middleware, web};

use fieldname::binding::BinderRegistry;
use fieldname::config::{LoggingSettings, Settings};
use fieldname::{middleware as app_middleware, routes};

fn init_logging(settings: &LoggingSettings) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(settings.level.as_str()))
        .init();
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let content_root = std::env::current_dir()?;
    let settings = Settings::load(&content_root)
        .map_err(|e| std::io::Error::other(format!("Failed to load settings: {e}")))?;

    init_logging(&settings.logging);
    log::info!("Environment: {}", settings.environment);

    let (host, port) = settings.bind_address();
    let workers = settings.server.workers;
    let web_root = content_root.join(&settings.web_root);
    let settings = web::Data::new(settings);
    let registry = web::Data::new(BinderRegistry::with_defaults());

    log::info!("Starting server at http://{host}:{port}");

    let mut server = HttpServer::new(move || {
        let web_root = web_root.clone();
        App::new()
            .wrap(middleware::from_fn(app_middleware::canonical_route))
            .wrap(middleware::from_fn(app_middleware::exception_page))
            .wrap(middleware::NormalizePath::trim())
            .wrap(middleware::Logger::default())
            .app_data(settings.clone())
            .app_data(registry.clone())
            .configure(|cfg| routes::configure(cfg, &web_root))
    });
    if let Some(workers) = workers {
        server = server.workers(workers);
    }

    server.bind((host.as_str(), port))?.run().await
}
