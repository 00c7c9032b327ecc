//! Server assembly: configuration, logging, application state and the HTTP
//! server for a given registry catalog.

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use swagger_actix::{MetricsMiddleware, SwaggerState};
use swagger_config::{Config, CorsConfig};
use swagger_observability::Metrics;
use swagger_registry::RegistryCatalog;

fn io_error(e: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(e.to_string())
}

/// CORS policy for the documentation routes; restrictive unless origins are configured.
pub fn cors(config: &CorsConfig) -> Cors {
    if config.allowed_origins.iter().any(|o| o == "*") {
        return Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET"])
            .max_age(3600);
    }

    config
        .allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET"])
        .max_age(3600)
}

/// Load configuration and serve documentation for the registries in `catalog`.
pub async fn run(catalog: RegistryCatalog) -> std::io::Result<()> {
    if let Err(e) = swagger_observability::init_telemetry("resource_swagger") {
        eprintln!("Failed to initialize telemetry: {}", e);
    }

    let config = Config::default();
    run_with_config(catalog, config).await
}

/// Serve documentation for `catalog` with an explicit configuration.
pub async fn run_with_config(catalog: RegistryCatalog, config: Config) -> std::io::Result<()> {
    config.validate_settings().map_err(io_error)?;

    let state = SwaggerState::from_config(Arc::new(catalog), &config.swagger).map_err(io_error)?;

    // Fail fast: resolve every configured registry once before accepting traffic.
    let registries = state.loader.load().map_err(io_error)?;
    tracing::info!(
        registries = registries.len(),
        mount_path = %state.settings.mount_path,
        "API registries resolved"
    );

    let metrics = Metrics::new().map_err(io_error)?;
    let mount_path = state.settings.mount_path.clone();
    let cors_config = config.cors.clone();

    let state = web::Data::new(state);
    let metrics_data = web::Data::new(metrics.clone());

    let bind_addr = (config.server.host.clone(), config.server.port);
    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        "starting documentation server"
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(metrics_data.clone())
            .wrap(cors(&cors_config))
            .wrap(MetricsMiddleware::new(metrics.clone()))
            .wrap(TracingLogger::default())
            .configure(swagger_actix::configure(mount_path.clone()))
    })
    .bind(bind_addr)?
    .run()
    .await
}
