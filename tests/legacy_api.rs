//! Wire-level tests for the legacy (pre-v0.22) REST strategy.

use chrono::{TimeZone, Utc};
use memos_client::{FetchOutcome, MemoFilter, MemosClientFactory, MemosConfig, MemosError, User};
use std::collections::HashMap;
use std::sync::Arc;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn factory_for(server: &MockServer) -> MemosClientFactory {
    // Empty version tag selects the oldest full-scan REST strategy.
    MemosClientFactory::new(MemosConfig::new(server.uri(), "test-token", "")).unwrap()
}

fn memo_json(content: &str, created_ts: i64) -> serde_json::Value {
    serde_json::json!({
        "content": content,
        "createdTs": created_ts,
        "updatedTs": created_ts,
        "resourceList": []
    })
}

#[tokio::test]
async fn full_scan_pages_by_offset_until_exhausted() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/memo"))
        .and(query_param("limit", "2"))
        .and(query_param("offset", "0"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            memo_json("newest", 1_700_000_200),
            memo_json("middle", 1_700_000_100),
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/memo"))
        .and(query_param("offset", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([memo_json("oldest", 1_700_000_000)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let paginator = factory_for(&server).create_memos_paginator(None, None);

    let first = paginator.list_memos(2, "", &User::default()).await.unwrap();
    assert_eq!(first.memos.len(), 2);
    assert_eq!(first.next_page_token, "2");

    let second = paginator
        .list_memos(2, &first.next_page_token, &User::default())
        .await
        .unwrap();
    assert_eq!(second.memos.len(), 1);
    assert_eq!(second.memos[0].content, "oldest");
    // Short page: the scan is exhausted.
    assert!(second.next_page_token.is_empty());
}

#[tokio::test]
async fn rejecting_filter_terminates_within_one_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/memo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            memo_json("a", 1_700_000_200),
            memo_json("b", 1_700_000_100),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let filter: MemoFilter = Arc::new(|_date: &str, _collected: &HashMap<String, String>| false);
    let paginator = factory_for(&server).create_memos_paginator(None, Some(filter));

    let page = paginator.list_memos(2, "", &User::default()).await.unwrap();
    assert!(page.memos.is_empty());
    assert!(page.next_page_token.is_empty());
}

#[tokio::test]
async fn scan_stops_at_the_last_time_floor() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/memo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            memo_json("recent", 1_700_000_200),
            memo_json("too-old", 1_600_000_000),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let floor = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let paginator = factory_for(&server).create_memos_paginator(Some(floor), None);

    let page = paginator.list_memos(2, "", &User::default()).await.unwrap();
    assert_eq!(page.memos.len(), 1);
    assert_eq!(page.memos[0].content, "recent");
    assert!(page.next_page_token.is_empty());
}

#[tokio::test]
async fn memo_listing_failure_propagates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/memo"))
        .respond_with(ResponseTemplate::new(500).set_body_string("db down"))
        .mount(&server)
        .await;

    let paginator = factory_for(&server).create_memos_paginator(None, None);
    let err = paginator
        .list_memos(10, "", &User::default())
        .await
        .unwrap_err();
    assert!(matches!(err, MemosError::Server { status: 500, .. }));
}

#[tokio::test]
async fn error_envelope_in_memo_listing_propagates() {
    let server = MockServer::start().await;

    // Legacy servers report failures as a JSON object where an array is
    // expected, still with HTTP 200.
    Mock::given(method("GET"))
        .and(path("/api/v1/memo"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"message": "invalid token"})),
        )
        .mount(&server)
        .await;

    let paginator = factory_for(&server).create_memos_paginator(None, None);
    let err = paginator
        .list_memos(10, "", &User::default())
        .await
        .unwrap_err();
    assert!(matches!(err, MemosError::InvalidResponse(msg) if msg == "invalid token"));
}

#[tokio::test]
async fn missing_resource_endpoint_is_unavailable_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/resource"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = factory_for(&server).create_resource_fetcher();
    assert!(fetcher.list_resources().await.is_unavailable());
}

#[tokio::test]
async fn broken_resource_endpoint_is_failed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/resource"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let fetcher = factory_for(&server).create_resource_fetcher();
    assert!(fetcher.list_resources().await.is_failed());
}

#[tokio::test]
async fn legacy_strategy_uses_rest_endpoints_only() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/resource"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 7, "filename": "pic.png", "externalLink": "", "type": "image/png"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/o/r/7/pic.png"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"png-bytes".to_vec(), "image/png"))
        .mount(&server)
        .await;

    let fetcher = factory_for(&server).create_resource_fetcher();

    let resources = fetcher.list_resources().await.fetched().unwrap();
    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0].name, "7");

    let data = fetcher.fetch_resource(&resources[0]).await.fetched().unwrap();
    assert_eq!(data, b"png-bytes");

    // No gRPC channel, no Connect calls: plain REST paths only.
    for request in server.received_requests().await.unwrap() {
        assert!(
            !request.url.path().contains("memos.api."),
            "unexpected RPC-style request to {}",
            request.url.path()
        );
    }
}
