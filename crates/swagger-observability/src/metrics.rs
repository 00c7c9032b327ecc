use std::time::Duration;

use prometheus::{
    Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry,
};

const ROUTE_LABELS: [&str; 3] = ["method", "route", "status"];

/// Prometheus metrics for the documentation service.
///
/// Cloning is cheap; all clones record into the same registry.
#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_request_duration_seconds: Histogram,
    pub http_requests_total_by_route: IntCounterVec,
    pub http_request_duration_seconds_by_route: HistogramVec,
    pub documents_generated_total: IntCounter,
    pub resources_mapped_total: IntCounter,
    /// Failed registry / resource lookups, labelled by `kind`.
    pub lookup_failures_total: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total number of HTTP requests")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let http_requests_total_by_route = IntCounterVec::new(
            Opts::new(
                "http_requests_by_route_total",
                "HTTP requests by method, route and status",
            ),
            &ROUTE_LABELS,
        )?;
        let http_request_duration_seconds_by_route = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_by_route_seconds",
                "HTTP request latency by method, route and status",
            ),
            &ROUTE_LABELS,
        )?;
        let documents_generated_total = IntCounter::new(
            "swagger_documents_generated_total",
            "OpenAPI documents generated",
        )?;
        let resources_mapped_total = IntCounter::new(
            "swagger_resources_mapped_total",
            "Resources mapped into generated documents",
        )?;
        let lookup_failures_total = IntCounterVec::new(
            Opts::new(
                "swagger_lookup_failures_total",
                "Failed registry and resource lookups",
            ),
            &["kind"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_total_by_route.clone()))?;
        registry.register(Box::new(http_request_duration_seconds_by_route.clone()))?;
        registry.register(Box::new(documents_generated_total.clone()))?;
        registry.register(Box::new(resources_mapped_total.clone()))?;
        registry.register(Box::new(lookup_failures_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_total_by_route,
            http_request_duration_seconds_by_route,
            documents_generated_total,
            resources_mapped_total,
            lookup_failures_total,
        })
    }

    /// Record one finished HTTP request under its route pattern.
    pub fn observe_request(&self, method: &str, route: &str, status: u16, elapsed: Duration) {
        let seconds = elapsed.as_secs_f64();
        let status = status.to_string();
        let labels = [method, route, status.as_str()];

        self.http_requests_total.inc();
        self.http_request_duration_seconds.observe(seconds);
        self.http_requests_total_by_route
            .with_label_values(&labels)
            .inc();
        self.http_request_duration_seconds_by_route
            .with_label_values(&labels)
            .observe(seconds);
    }

    pub fn record_document(&self, resources: usize) {
        self.documents_generated_total.inc();
        self.resources_mapped_total.inc_by(resources as u64);
    }

    pub fn record_lookup_failure(&self, kind: &str) {
        self.lookup_failures_total.with_label_values(&[kind]).inc();
    }
}
