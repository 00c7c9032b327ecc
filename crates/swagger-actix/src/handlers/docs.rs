use actix_web::{web, HttpRequest, HttpResponse};

use swagger_core::SwaggerError;
use swagger_observability::Metrics;

use crate::{SwaggerState, ViewContext};

/// Absolute root URL of the incoming request, e.g. `http://localhost:8000/`.
fn absolute_root(req: &HttpRequest) -> String {
    let info = req.connection_info();
    format!("{}://{}/", info.scheme(), info.host())
}

/// Swagger UI shell.
///
/// Registries are resolved here too so misconfiguration surfaces on the first
/// page load rather than inside the UI.
pub async fn index(
    req: HttpRequest,
    state: web::Data<SwaggerState>,
) -> Result<HttpResponse, SwaggerError> {
    state.loader.load()?;

    let mut context = ViewContext::new(
        "index",
        ViewContext::params_from_query(req.query_string()),
    );
    state.index_context(&mut context);
    let html = state.render_index(&context)?;

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}

/// OpenAPI 3.0.1 document of every configured registry.
pub async fn resources(
    req: HttpRequest,
    state: web::Data<SwaggerState>,
    metrics: web::Data<Metrics>,
) -> Result<HttpResponse, SwaggerError> {
    let registries = state.loader.load()?;
    let aggregate = state.builder.collect(&registries)?;
    metrics.record_document(aggregate.resources);

    let document = state.builder.render(aggregate, &absolute_root(&req))?;

    let mut context = ViewContext::new(
        "resources",
        ViewContext::params_from_query(req.query_string()),
    );
    context.extend(document);
    Ok(context.render_json())
}

/// Swagger 1.1 listing of a single resource.
pub async fn resource_schema(
    req: HttpRequest,
    path: web::Path<(String, String)>,
    state: web::Data<SwaggerState>,
    metrics: web::Data<Metrics>,
) -> Result<HttpResponse, SwaggerError> {
    let (registry_name, resource_name) = path.into_inner();

    let registry = state.loader.load_named(&registry_name).map_err(|e| {
        if e.is_not_found() {
            tracing::info!(registry = %registry_name, "unknown API registry requested");
            metrics.record_lookup_failure("registry");
        }
        e
    })?;

    let root = absolute_root(&req);
    let listing = state
        .builder
        .build_resource_schema(registry.as_ref(), &resource_name, root.trim_end_matches('/'))
        .map_err(|e| {
            if e.is_not_found() {
                tracing::info!(
                    registry = %registry_name,
                    resource = %resource_name,
                    "unknown resource requested"
                );
                metrics.record_lookup_failure("resource");
            }
            e
        })?;

    let mut context = ViewContext::new(
        "resource_schema",
        ViewContext::params_from_query(req.query_string()),
    );
    context.extend(listing);
    Ok(context.render_json())
}
