#![allow(dead_code)]

use httpmock::MockServer;
use reqwest::Url;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

use marketplace_client::api::{ApiClient, ApiConfig, ReadRetryPolicy};
use marketplace_client::metrics::ClientMetrics;
use marketplace_client::utils::RetryConfig;

pub const TOKEN: &str = "test-token";

/// Default read retry policy with a short delay
pub fn fast_retry() -> ReadRetryPolicy {
    ReadRetryPolicy {
        config: RetryConfig::fixed(3, Duration::from_millis(10)),
        ..ReadRetryPolicy::default()
    }
}

pub fn client(server: &MockServer) -> (ApiClient, Arc<ClientMetrics>) {
    let metrics = Arc::new(ClientMetrics::new().expect("metrics registry"));
    let config = ApiConfig::new(Url::parse(&server.base_url()).expect("mock server url"))
        .with_token(TOKEN)
        .with_read_retry(fast_retry());
    let client = ApiClient::new(config, metrics.clone()).expect("api client");
    (client, metrics)
}

pub fn order_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "orderNumber": format!("ORD-{id}"),
        "status": status,
        "totalAmount": "20.00",
        "createdAt": "2026-01-05T10:00:00Z",
        "lines": [
            { "variantId": "v1", "quantity": 2, "price": "10.00" }
        ]
    })
}

pub fn page_json(data: Vec<Value>, page: u32, limit: u32, total: u64, total_pages: u32) -> Value {
    json!({
        "data": data,
        "meta": { "page": page, "limit": limit, "total": total, "totalPages": total_pages }
    })
}
