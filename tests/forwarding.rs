//! End-to-end forwarding tests against mock backends.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use pocketbase_gateway::config::ForwardMode;

mod common;

/// First line of the request the echo backend received.
fn request_line(echoed: &str) -> &str {
    echoed.lines().next().unwrap_or_default()
}

#[tokio::test]
async fn test_expand_injected_when_absent() {
    let backend = common::start_echo_backend().await;
    let gateway = common::spawn_gateway(backend, ForwardMode::ExpandInjecting).await;

    let res = common::client()
        .get(gateway.url("/api/items"))
        .send()
        .await
        .expect("gateway unreachable");

    assert_eq!(res.status(), 200);
    let echoed = res.text().await.unwrap();
    assert_eq!(
        request_line(&echoed),
        "GET /api/items?expand=cards(collection) HTTP/1.1"
    );
}

#[tokio::test]
async fn test_expand_appended_to_existing_query() {
    let backend = common::start_echo_backend().await;
    let gateway = common::spawn_gateway(backend, ForwardMode::ExpandInjecting).await;

    let res = common::client()
        .get(gateway.url("/api/collections/items/records?sort=-created"))
        .send()
        .await
        .unwrap();

    let echoed = res.text().await.unwrap();
    assert_eq!(
        request_line(&echoed),
        "GET /api/collections/items/records?sort=-created&expand=cards(collection) HTTP/1.1"
    );
}

#[tokio::test]
async fn test_callers_expand_is_merged_once() {
    let backend = common::start_echo_backend().await;
    let gateway = common::spawn_gateway(backend, ForwardMode::ExpandInjecting).await;
    let client = common::client();

    let echoed = client
        .get(gateway.url("/api/items?expand=author&page=2"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(
        request_line(&echoed),
        "GET /api/items?expand=author,cards(collection)&page=2 HTTP/1.1"
    );

    let echoed = client
        .get(gateway.url("/api/items?expand=author,cards(collection)"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(
        request_line(&echoed),
        "GET /api/items?expand=author,cards(collection) HTTP/1.1"
    );
}

#[tokio::test]
async fn test_pass_through_forwards_verbatim() {
    let backend = common::start_echo_backend().await;
    let gateway = common::spawn_gateway(backend, ForwardMode::PassThrough).await;
    let client = common::client();

    let echoed = client
        .get(gateway.url("/api?x=1"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(request_line(&echoed), "GET /api?x=1 HTTP/1.1");

    let echoed = client
        .get(gateway.url("/api/items?expand=author"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(request_line(&echoed), "GET /api/items?expand=author HTTP/1.1");
}

#[tokio::test]
async fn test_method_headers_and_body_forwarded() {
    let backend = common::start_echo_backend().await;
    let gateway = common::spawn_gateway(backend, ForwardMode::ExpandInjecting).await;

    let payload = r#"{"title":"hello"}"#;
    let res = common::client()
        .post(gateway.url("/api/collections/items/records"))
        .header("Authorization", "Bearer test-token")
        .header("Content-Type", "application/json")
        .body(payload)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["x-backend"], "echo");

    let echoed = res.text().await.unwrap();
    assert_eq!(
        request_line(&echoed),
        "POST /api/collections/items/records?expand=cards(collection) HTTP/1.1"
    );
    let lowered = echoed.to_ascii_lowercase();
    assert!(lowered.contains("authorization: bearer test-token"));
    assert!(lowered.contains("content-type: application/json"));
    let host = echoed
        .lines()
        .find_map(|line| line.strip_prefix("host: "))
        .expect("host header forwarded");
    assert_eq!(host, backend.to_string());
    assert!(echoed.ends_with(payload));
}

#[tokio::test]
async fn test_backend_error_status_passed_through() {
    let backend = common::start_programmable_backend(|| async {
        (500, r#"{"code":500,"message":"boom","data":{}}"#.to_string())
    })
    .await;
    let gateway = common::spawn_gateway(backend, ForwardMode::ExpandInjecting).await;

    let res = common::client()
        .get(gateway.url("/api/items"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 500);
    assert_eq!(
        res.text().await.unwrap(),
        r#"{"code":500,"message":"boom","data":{}}"#
    );
}

#[tokio::test]
async fn test_unreachable_backend_returns_bad_gateway() {
    let backend = common::closed_port().await;
    let gateway = common::spawn_gateway(backend, ForwardMode::PassThrough).await;

    let res = common::client()
        .get(gateway.url("/api/items"))
        .send()
        .await
        .expect("gateway should answer even when the backend is down");

    assert_eq!(res.status(), 502);
    let body: serde_json::Value = serde_json::from_str(&res.text().await.unwrap()).unwrap();
    assert_eq!(body["code"], 502);
}

#[tokio::test]
async fn test_paths_outside_prefix_are_not_forwarded() {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();
    let backend = common::start_programmable_backend(move || {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            (200, "ok".to_string())
        }
    })
    .await;
    let gateway = common::spawn_gateway(backend, ForwardMode::ExpandInjecting).await;
    let client = common::client();

    for path in ["/", "/_/", "/apiary", "/static/app.js"] {
        let res = client.get(gateway.url(path)).send().await.unwrap();
        assert_eq!(res.status(), 404, "path {path}");
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let res = client.get(gateway.url("/api/health")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
