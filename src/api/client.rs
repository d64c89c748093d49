use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

use super::error::ApiError;
use crate::metrics::ClientMetrics;
use crate::utils::{retry_if, IsTransient, RetryConfig, RetryResult};

// ============================================================================
// REST Client
// ============================================================================
//
// Thin reqwest wrapper shared by every endpoint group. Each request carries
// a request id, the bearer token when one is configured, and is timed and
// counted. Only reads opt into the retry policy.
//
// ============================================================================

pub const TRANSACTION_CLOSED_MESSAGE: &str = "Transaction already closed";

/// Which failed reads get another attempt
#[derive(Debug, Clone, PartialEq)]
pub struct ReadRetryPolicy {
    pub config: RetryConfig,
    /// Server messages (case-insensitive substrings) worth retrying
    pub retryable_messages: Vec<String>,
    /// Also retry timeouts, connect failures and gateway errors
    pub retry_network_errors: bool,
}

impl Default for ReadRetryPolicy {
    fn default() -> Self {
        Self {
            config: RetryConfig::fixed(3, Duration::from_secs(1)),
            retryable_messages: vec![TRANSACTION_CLOSED_MESSAGE.to_string()],
            retry_network_errors: false,
        }
    }
}

impl ReadRetryPolicy {
    pub fn disabled() -> Self {
        Self {
            config: RetryConfig::disabled(),
            retryable_messages: Vec::new(),
            retry_network_errors: false,
        }
    }

    pub fn should_retry(&self, error: &ApiError) -> bool {
        (self.retry_network_errors && error.is_transient())
            || self
                .retryable_messages
                .iter()
                .any(|message| error.message_contains(message))
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: Url,
    pub token: Option<String>,
    pub timeout: Duration,
    pub read_retry: ReadRetryPolicy,
}

impl ApiConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            token: None,
            timeout: Duration::from_secs(30),
            read_retry: ReadRetryPolicy::default(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_read_retry(mut self, read_retry: ReadRetryPolicy) -> Self {
        self.read_retry = read_retry;
        self
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    config: Arc<ApiConfig>,
    metrics: Arc<ClientMetrics>,
}

impl ApiClient {
    pub fn new(config: ApiConfig, metrics: Arc<ClientMetrics>) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("marketplace-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: Arc::new(config),
            metrics,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn metrics(&self) -> &Arc<ClientMetrics> {
        &self.metrics
    }

    /// Base URL plus percent-encoded path segments
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.config.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) fn get(&self, url: Url) -> RequestBuilder {
        self.http.get(url)
    }

    pub(crate) fn post<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> RequestBuilder {
        self.http.post(url).json(body)
    }

    pub(crate) fn patch<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> RequestBuilder {
        self.http.patch(url).json(body)
    }

    /// Send one request and decode a 2xx JSON body
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let request_id = Uuid::new_v4();
        let mut builder = builder
            .header(ACCEPT, "application/json")
            .header("x-request-id", request_id.to_string());
        if let Some(token) = self.config.token.as_deref() {
            builder = builder.bearer_auth(token);
        }

        let request = builder.build()?;
        let method = request.method().clone();

        tracing::debug!(
            endpoint = endpoint,
            method = %method,
            url = %request.url(),
            request_id = %request_id,
            "Sending request"
        );

        let started = Instant::now();
        let response = match self.http.execute(request).await {
            Ok(response) => response,
            Err(error) => {
                self.metrics.record_request(
                    endpoint,
                    method.as_str(),
                    "network_error",
                    started.elapsed().as_secs_f64(),
                );
                tracing::warn!(
                    endpoint = endpoint,
                    request_id = %request_id,
                    error = %error,
                    "Request failed before a response arrived"
                );
                return Err(ApiError::Network(error));
            }
        };

        let status = response.status();
        let body = response.text().await?;
        self.metrics.record_request(
            endpoint,
            method.as_str(),
            status.as_str(),
            started.elapsed().as_secs_f64(),
        );

        if !status.is_success() {
            let error = ApiError::from_response(status.as_u16(), &body);
            tracing::warn!(
                endpoint = endpoint,
                request_id = %request_id,
                status = status.as_u16(),
                error = %error,
                "Backend rejected request"
            );
            return Err(error);
        }

        serde_json::from_str::<T>(&body)
            .map_err(|error| ApiError::InvalidResponse(format!("{endpoint}: {error}")))
    }

    /// GET under the read retry policy
    pub(crate) async fn get_with_retry<T, Q>(
        &self,
        endpoint: &'static str,
        url: Url,
        query: &Q,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let policy = &self.config.read_retry;
        let mut attempts = 0;

        let result = retry_if(
            &policy.config,
            |error: &ApiError| policy.should_retry(error),
            |attempt| {
                attempts = attempt;
                if attempt > 1 {
                    self.metrics.record_retry_attempt(endpoint, attempt);
                }
                self.send(endpoint, self.get(url.clone()).query(query))
            },
        )
        .await;

        if attempts > 1 {
            self.metrics
                .record_retry_outcome(endpoint, matches!(result, RetryResult::Success(_)));
        }
        result.into_result()
    }
}
