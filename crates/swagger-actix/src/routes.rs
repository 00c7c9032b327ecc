use actix_web::web;

use crate::handlers;

/// Register the documentation views under `mount_path` (empty for the root),
/// plus `/health` and `/metrics` at the root.
///
/// Expects `web::Data<SwaggerState>` and `web::Data<Metrics>` as app data.
pub fn configure(mount_path: String) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        // Operational routes first: an empty mount scope matches every path.
        cfg.route("/health", web::get().to(handlers::health))
            .route("/metrics", web::get().to(handlers::system_metrics))
            .service(
                web::scope(&mount_path)
                    .route("/", web::get().to(handlers::index))
                    .route("/resources/", web::get().to(handlers::resources))
                    .route(
                        "/{registry}/{resource}/",
                        web::get().to(handlers::resource_schema),
                    ),
            );
    }
}
