use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpRequest,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::time::Instant;

use swagger_observability::Metrics;

/// Route label of requests no registered route matched.
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// Route pattern of the request, e.g. `/{registry}/{resource}/`.
///
/// Raw paths would give one label value per registry / resource pair.
fn route_label(req: &HttpRequest) -> String {
    req.match_pattern()
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string())
}

/// Wraps the app to record every request into [`Metrics`].
pub struct MetricsMiddleware {
    metrics: Metrics,
}

impl MetricsMiddleware {
    pub fn new(metrics: Metrics) -> Self {
        Self { metrics }
    }
}

impl<S, B> Transform<S, ServiceRequest> for MetricsMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestMetrics<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestMetrics {
            inner: Rc::new(service),
            metrics: self.metrics.clone(),
        }))
    }
}

pub struct RequestMetrics<S> {
    inner: Rc<S>,
    metrics: Metrics,
}

impl<S, B> Service<ServiceRequest> for RequestMetrics<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(inner);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let started = Instant::now();
        let method = req.method().as_str().to_string();
        let inner = Rc::clone(&self.inner);
        let metrics = self.metrics.clone();

        Box::pin(async move {
            let res = inner.call(req).await?;

            metrics.observe_request(
                &method,
                &route_label(res.request()),
                res.status().as_u16(),
                started.elapsed(),
            );

            Ok(res)
        })
    }
}
