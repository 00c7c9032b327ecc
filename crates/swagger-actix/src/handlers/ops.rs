use actix_web::{web, HttpResponse, Result};

use swagger_observability::Metrics;

/// Health check endpoint
pub async fn health() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "resource_swagger",
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}

/// Prometheus metrics
pub async fn system_metrics(metrics: web::Data<Metrics>) -> Result<HttpResponse> {
    let buffer = swagger_observability::encode_prometheus_text(&metrics.registry)
        .map_err(actix_web::error::ErrorInternalServerError)?;

    Ok(HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(buffer))
}
