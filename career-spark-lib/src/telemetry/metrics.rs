use opentelemetry::global;
use opentelemetry::metrics::{Counter, Gauge, Histogram, Meter, UpDownCounter};
use opentelemetry::KeyValue;
use opentelemetry_sdk::metrics::SdkMeterProvider;
use prometheus::Registry;
use std::sync::Arc;

pub mod labels {
    pub const ROUTE: &str = "route";
    pub const ROLE: &str = "role";
    pub const REASON: &str = "reason";
    pub const STATUS_CODE: &str = "status_code";
    pub const METHOD: &str = "method";
    pub const VERSION: &str = "version";
}

pub mod values {
    pub const REASON_UNAUTHENTICATED: &str = "unauthenticated";
    pub const REASON_FORBIDDEN: &str = "forbidden";
}

#[derive(Clone)]
pub struct Metrics {
    pub connections_total: Counter<u64>,
    pub connections_active: UpDownCounter<i64>,

    pub requests_total: Counter<u64>,
    pub requests_duration_seconds: Histogram<f64>,

    // Gate metrics
    pub auth_failures_total: Counter<u64>,
    pub rate_limit_allowed_total: Counter<u64>,
    pub rate_limit_rejected_total: Counter<u64>,

    pub keys_issued_total: Counter<u64>,

    pub build_info: Gauge<u64>,
}

impl Metrics {
    fn new(meter: Meter) -> Self {
        Self {
            connections_total: meter
                .u64_counter("career_spark_connections_total")
                .with_description("Total number of connections accepted")
                .build(),
            connections_active: meter
                .i64_up_down_counter("career_spark_connections_active")
                .with_description("Number of active connections")
                .build(),

            requests_total: meter
                .u64_counter("career_spark_requests_total")
                .with_description("Total number of HTTP requests handled")
                .build(),
            requests_duration_seconds: meter
                .f64_histogram("career_spark_request_duration_seconds")
                .with_description("Request handling duration in seconds")
                .with_unit("s")
                .build(),

            auth_failures_total: meter
                .u64_counter("career_spark_auth_failures_total")
                .with_description("Requests rejected by the key validator")
                .build(),
            rate_limit_allowed_total: meter
                .u64_counter("career_spark_rate_limit_allowed_total")
                .with_description("Requests admitted by the rate limiter")
                .build(),
            rate_limit_rejected_total: meter
                .u64_counter("career_spark_rate_limit_rejected_total")
                .with_description("Requests rejected by the rate limiter")
                .build(),

            keys_issued_total: meter
                .u64_counter("career_spark_keys_issued_total")
                .with_description("API keys issued through the admin endpoint")
                .build(),

            build_info: meter
                .u64_gauge("career_spark_build_info")
                .with_description("Build information")
                .build(),
        }
    }

    fn set_build_info(&self) {
        self.build_info
            .record(1, &[KeyValue::new(labels::VERSION, env!("CARGO_PKG_VERSION"))]);
    }

    pub fn record_auth_failure(&self, reason: &str, route: &str) {
        self.auth_failures_total.add(
            1,
            &[
                KeyValue::new(labels::REASON, reason.to_string()),
                KeyValue::new(labels::ROUTE, route.to_string()),
            ],
        );
    }

    pub fn record_rate_limit_allowed(&self, route: &str, role: &str) {
        self.rate_limit_allowed_total.add(
            1,
            &[
                KeyValue::new(labels::ROUTE, route.to_string()),
                KeyValue::new(labels::ROLE, role.to_string()),
            ],
        );
    }

    pub fn record_rate_limit_rejection(&self, route: &str, role: &str) {
        self.rate_limit_rejected_total.add(
            1,
            &[
                KeyValue::new(labels::ROUTE, route.to_string()),
                KeyValue::new(labels::ROLE, role.to_string()),
            ],
        );
    }

    pub fn record_key_issued(&self, role: &str) {
        self.keys_issued_total
            .add(1, &[KeyValue::new(labels::ROLE, role.to_string())]);
    }

    pub fn record_request(&self, method: &str, status_code: u16, route: &str) {
        self.requests_total.add(
            1,
            &[
                KeyValue::new(labels::METHOD, method.to_string()),
                KeyValue::new(labels::STATUS_CODE, status_code.to_string()),
                KeyValue::new(labels::ROUTE, route.to_string()),
            ],
        );
    }

    pub fn record_request_duration(
        &self,
        duration: f64,
        method: &str,
        status_code: u16,
        route: &str,
    ) {
        self.requests_duration_seconds.record(
            duration,
            &[
                KeyValue::new(labels::METHOD, method.to_string()),
                KeyValue::new(labels::STATUS_CODE, status_code.to_string()),
                KeyValue::new(labels::ROUTE, route.to_string()),
            ],
        );
    }
}

pub fn init_metrics() -> Result<(Arc<Metrics>, Registry), Box<dyn std::error::Error + Send + Sync>>
{
    let registry = Registry::default();

    let exporter = opentelemetry_prometheus::exporter()
        .with_registry(registry.clone())
        .build()?;

    let meter_provider = SdkMeterProvider::builder().with_reader(exporter).build();

    global::set_meter_provider(meter_provider);

    let meter = global::meter("career-spark");
    let metrics = Arc::new(Metrics::new(meter));

    metrics.set_build_info();

    Ok((metrics, registry))
}
