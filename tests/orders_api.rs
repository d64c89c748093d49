use httpmock::Method::{GET, PATCH, POST};
use httpmock::MockServer;
use serde_json::json;

use marketplace_client::api::{ApiError, OrderScope, OrdersApi, PageRequest, PagedList};
use marketplace_client::domain::ids::{BusinessId, OrderId, VariantId};
use marketplace_client::domain::order::{
    CreateOrderPayload, OrderLineRequest, OrderStatus, OrderType, StatusUpdate,
};

mod support;

#[tokio::test]
async fn create_order_posts_sale_payload_with_headers() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/orders")
                .header("authorization", "Bearer test-token")
                .header("accept", "application/json")
                .header_exists("x-request-id")
                .json_body(json!({
                    "type": "SALE",
                    "businessId": "b1",
                    "supplierBusinessId": "s1",
                    "lines": [{ "variantId": "v1", "quantity": 2 }]
                }));
            then.status(201).json_body(support::order_json("o1", "PENDING_PAYMENT"));
        })
        .await;

    let (client, metrics) = support::client(&server);
    let payload = CreateOrderPayload {
        order_type: OrderType::Sale,
        business_id: BusinessId::new("b1"),
        supplier_business_id: BusinessId::new("s1"),
        notes: None,
        lines: vec![OrderLineRequest {
            variant_id: VariantId::new("v1"),
            quantity: 2,
        }],
    };

    let order = client.create_order(&payload).await.unwrap();

    mock.assert_async().await;
    assert_eq!(order.id, OrderId::new("o1"));
    assert_eq!(order.status, OrderStatus::PendingPayment);
    assert_eq!(order.total_amount.to_string(), "20.00");
    assert_eq!(
        metrics
            .api_requests_total
            .with_label_values(&["orders.create", "POST", "201"])
            .get(),
        1
    );
}

#[tokio::test]
async fn list_orders_sends_scope_status_and_page() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/orders")
                .query_param("page", "2")
                .query_param("limit", "10")
                .query_param("businessId", "b1")
                .query_param("status", "PENDING");
            then.status(200).json_body(support::page_json(
                vec![support::order_json("o11", "PENDING")],
                2,
                10,
                11,
                2,
            ));
        })
        .await;

    let (client, _) = support::client(&server);
    let page = client
        .list_orders(
            &OrderScope::Business(BusinessId::new("b1")),
            Some(OrderStatus::Pending),
            PageRequest::new(2, 10),
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.meta.total_pages, 2);
    assert_eq!(page.meta.total, 11);
}

#[tokio::test]
async fn load_all_walks_every_page_once() {
    let server = MockServer::start_async().await;
    let first = server
        .mock_async(|when, then| {
            when.method(GET).path("/orders").query_param("page", "1");
            then.status(200).json_body(support::page_json(
                vec![support::order_json("o1", "PAID"), support::order_json("o2", "SHIPPED")],
                1,
                2,
                3,
                2,
            ));
        })
        .await;
    let second = server
        .mock_async(|when, then| {
            when.method(GET).path("/orders").query_param("page", "2");
            then.status(200).json_body(support::page_json(
                vec![support::order_json("o3", "DELIVERED")],
                2,
                2,
                3,
                2,
            ));
        })
        .await;

    let (client, _) = support::client(&server);
    let scope = OrderScope::Mine;
    let mut list = PagedList::new(2);
    let received = list
        .load_all(|request| client.list_orders(&scope, None, request))
        .await
        .unwrap();

    first.assert_hits_async(1).await;
    second.assert_hits_async(1).await;
    assert_eq!(received, 3);
    assert!(!list.has_more());
    let ids: Vec<&str> = list.items().iter().map(|order| order.id.as_str()).collect();
    assert_eq!(ids, vec!["o1", "o2", "o3"]);
}

#[tokio::test]
async fn get_order_retries_closed_transaction_then_gives_up() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/orders/o1");
            then.status(500)
                .json_body(json!({ "statusCode": 500, "message": "Transaction already closed" }));
        })
        .await;

    let (client, metrics) = support::client(&server);
    let error = client.get_order(&OrderId::new("o1")).await.unwrap_err();

    mock.assert_hits_async(3).await;
    assert_eq!(error.user_message(), "Transaction already closed");
    assert_eq!(
        metrics
            .retry_attempts_total
            .with_label_values(&["orders.get", "2"])
            .get(),
        1
    );
    assert_eq!(
        metrics
            .retry_attempts_total
            .with_label_values(&["orders.get", "3"])
            .get(),
        1
    );
    assert_eq!(metrics.retry_failure.with_label_values(&["orders.get"]).get(), 1);
}

#[tokio::test]
async fn get_order_does_not_retry_other_failures() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/orders/missing");
            then.status(404)
                .json_body(json!({ "statusCode": 404, "message": "Order not found", "error": "Not Found" }));
        })
        .await;

    let (client, metrics) = support::client(&server);
    let error = client.get_order(&OrderId::new("missing")).await.unwrap_err();

    mock.assert_hits_async(1).await;
    assert!(matches!(error, ApiError::Api { status: 404, .. }));
    assert_eq!(error.user_message(), "Order not found");
    assert_eq!(metrics.retry_failure.with_label_values(&["orders.get"]).get(), 0);
}

#[tokio::test]
async fn writes_are_never_retried() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(PATCH).path("/orders/o1/status");
            then.status(500).json_body(json!({ "message": "Transaction already closed" }));
        })
        .await;

    let (client, _) = support::client(&server);
    let result = client
        .update_status(&OrderId::new("o1"), &StatusUpdate::cancel(None))
        .await;

    assert!(result.is_err());
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn cancel_sends_status_and_reason() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(PATCH)
                .path("/orders/o1/status")
                .json_body(json!({ "status": "CANCELLED", "reason": "Out of stock" }));
            then.status(200).json_body(support::order_json("o1", "CANCELLED"));
        })
        .await;

    let (client, _) = support::client(&server);
    let order = client
        .update_status(
            &OrderId::new("o1"),
            &StatusUpdate::cancel(Some("Out of stock".to_string())),
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(order.status, OrderStatus::Cancelled);
    assert!(order.status.is_terminal());
}

#[tokio::test]
async fn unknown_status_renders_as_neutral_badge() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/orders/o9");
            then.status(200).json_body(support::order_json("o9", "ON_HOLD"));
        })
        .await;

    let (client, _) = support::client(&server);
    let order = client.get_order(&OrderId::new("o9")).await.unwrap();

    assert_eq!(order.status, OrderStatus::Unknown);
    assert_eq!(order.status.badge().label, "Unknown");
    assert!(!order.status.is_terminal());
}

#[tokio::test]
async fn unreadable_success_body_is_invalid_response() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/orders/o1");
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let (client, _) = support::client(&server);
    let error = client.get_order(&OrderId::new("o1")).await.unwrap_err();

    assert!(matches!(error, ApiError::InvalidResponse(_)));
    assert_eq!(error.user_message(), marketplace_client::api::GENERIC_ERROR_MESSAGE);
}
