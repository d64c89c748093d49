use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};

// ============================================================================
// Metrics Module - Prometheus metrics for the client
// ============================================================================
//
// Provides metrics for:
// - Backend requests (count by endpoint/method/status, latency)
// - Read retry attempts and outcomes
// - Checkout outcomes
// - Cart events applied to the session
//
// `render` produces the text exposition format for dumping on exit.
// ============================================================================

/// Central metrics registry for one client instance
pub struct ClientMetrics {
    registry: Registry,

    // Request Metrics
    pub api_requests_total: IntCounterVec,
    pub api_request_duration: HistogramVec,

    // Retry Metrics
    pub retry_attempts_total: IntCounterVec,
    pub retry_success: IntCounterVec,
    pub retry_failure: IntCounterVec,

    // Flow Metrics
    pub checkout_total: IntCounterVec,
    pub cart_events_total: IntCounterVec,
}

impl ClientMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        // Request Metrics
        let api_requests_total = IntCounterVec::new(
            Opts::new("api_requests_total", "Total backend requests"),
            &["endpoint", "method", "status"],
        )?;
        registry.register(Box::new(api_requests_total.clone()))?;

        let api_request_duration = HistogramVec::new(
            HistogramOpts::new("api_request_duration_seconds", "Backend request duration")
                .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
            &["endpoint"],
        )?;
        registry.register(Box::new(api_request_duration.clone()))?;

        // Retry Metrics
        let retry_attempts_total = IntCounterVec::new(
            Opts::new("retry_attempts_total", "Total retry attempts"),
            &["operation", "attempt"],
        )?;
        registry.register(Box::new(retry_attempts_total.clone()))?;

        let retry_success = IntCounterVec::new(
            Opts::new("retry_success_total", "Operations that succeeded after retrying"),
            &["operation"],
        )?;
        registry.register(Box::new(retry_success.clone()))?;

        let retry_failure = IntCounterVec::new(
            Opts::new("retry_failure_total", "Operations that failed after retrying"),
            &["operation"],
        )?;
        registry.register(Box::new(retry_failure.clone()))?;

        // Flow Metrics
        let checkout_total = IntCounterVec::new(
            Opts::new("checkout_total", "Checkout attempts by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(checkout_total.clone()))?;

        let cart_events_total = IntCounterVec::new(
            Opts::new("cart_events_total", "Cart events applied"),
            &["event_type"],
        )?;
        registry.register(Box::new(cart_events_total.clone()))?;

        Ok(Self {
            registry,
            api_requests_total,
            api_request_duration,
            retry_attempts_total,
            retry_success,
            retry_failure,
            checkout_total,
            cart_events_total,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_request(&self, endpoint: &str, method: &str, status: &str, duration_secs: f64) {
        self.api_requests_total
            .with_label_values(&[endpoint, method, status])
            .inc();
        self.api_request_duration
            .with_label_values(&[endpoint])
            .observe(duration_secs);
    }

    pub fn record_retry_attempt(&self, operation: &str, attempt: u32) {
        let attempt = attempt.to_string();
        self.retry_attempts_total
            .with_label_values(&[operation, attempt.as_str()])
            .inc();
    }

    pub fn record_retry_outcome(&self, operation: &str, success: bool) {
        if success {
            self.retry_success.with_label_values(&[operation]).inc();
        } else {
            self.retry_failure.with_label_values(&[operation]).inc();
        }
    }

    pub fn record_checkout(&self, outcome: &str) {
        self.checkout_total.with_label_values(&[outcome]).inc();
    }

    pub fn record_cart_event(&self, event_type: &str) {
        self.cart_events_total.with_label_values(&[event_type]).inc();
    }

    /// Text exposition of every registered metric
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|error| prometheus::Error::Msg(error.to_string()))
    }
}

impl std::fmt::Debug for ClientMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientMetrics").finish_non_exhaustive()
    }
}
