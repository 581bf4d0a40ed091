//! Integration tests for the gateway's forwarding behavior.

use serde_json::json;
use sosign_gateway::config::GatewayConfig;
use sosign_gateway::http::HttpServer;
use sosign_gateway::lifecycle::Shutdown;

mod common;

/// Spawn a gateway on an ephemeral port, pointed at the given upstream.
async fn spawn_gateway(upstream_base: &str) -> (String, Shutdown) {
    let mut config = GatewayConfig::default();
    config.upstream.base_url = upstream_base.to_string();
    config.observability.metrics_enabled = false;

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let rx = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (format!("http://{}", addr), shutdown)
}

fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

#[tokio::test]
async fn missing_authorization_is_rejected_without_upstream_call() {
    let upstream = common::start_mock_upstream(200, json!({ "success": true })).await;
    let (gateway, shutdown) = spawn_gateway(&upstream.base_url()).await;

    let res = client()
        .post(format!("{}/api/comments", gateway))
        .json(&json!({ "petitionId": "p1", "content": "great cause" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 401);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Authorization token required");
    assert_eq!(upstream.hits(), 0, "upstream must not be contacted");

    // Like and reply enforce the same boundary.
    let res = client()
        .put(format!("{}/api/comments/c1/like", gateway))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 401);
    assert_eq!(upstream.hits(), 0);

    shutdown.trigger();
}

#[tokio::test]
async fn missing_required_field_is_rejected_without_upstream_call() {
    let upstream = common::start_mock_upstream(200, json!({ "success": true })).await;
    let (gateway, shutdown) = spawn_gateway(&upstream.base_url()).await;

    let res = client()
        .post(format!("{}/api/comments", gateway))
        .header("Authorization", "Bearer token")
        .json(&json!({ "petitionId": "p1" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "content is required");

    let res = client()
        .post(format!("{}/api/comments/c1/reply", gateway))
        .header("Authorization", "Bearer token")
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "content is required");

    assert_eq!(upstream.hits(), 0, "validation failures must stay local");

    shutdown.trigger();
}

#[tokio::test]
async fn upstream_error_status_and_message_are_relayed() {
    let upstream = common::start_mock_upstream(404, json!({ "message": "Not found" })).await;
    let (gateway, shutdown) = spawn_gateway(&upstream.base_url()).await;

    let res = client()
        .put(format!("{}/api/comments/c404/like", gateway))
        .header("Authorization", "Bearer token")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 404);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "success": false, "message": "Not found" }));

    shutdown.trigger();
}

#[tokio::test]
async fn unreachable_upstream_is_a_generic_500() {
    // Nothing listens on port 9; the forward step fails immediately.
    let (gateway, shutdown) = spawn_gateway("http://127.0.0.1:9").await;

    let res = client()
        .get(format!("{}/api/download-requests/check/p1", gateway))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 500);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "success": false, "message": "Internal server error" }),
        "raw error detail must never reach the caller"
    );

    shutdown.trigger();
}

#[tokio::test]
async fn download_relay_forces_attachment_with_pretty_body() {
    let payload = json!({
        "petition": { "id": "abc123", "title": "Save the wetlands" },
        "signatures": [ { "name": "A", "signedAt": "2024-03-01" } ],
    });
    let upstream = common::start_mock_upstream(200, payload.clone()).await;
    let (gateway, shutdown) = spawn_gateway(&upstream.base_url()).await;

    let res = client()
        .get(format!("{}/api/download-requests/download/abc123", gateway))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(
        res.headers().get("content-disposition").unwrap(),
        "attachment; filename=\"petition-abc123-data.json\""
    );
    assert_eq!(
        res.headers().get("content-type").unwrap(),
        "application/json"
    );

    let body = res.text().await.unwrap();
    assert_eq!(body, serde_json::to_string_pretty(&payload).unwrap());

    shutdown.trigger();
}

#[tokio::test]
async fn successful_relay_round_trips_body_and_whitelists_fields() {
    let upstream_body = json!({
        "success": true,
        "comment": { "id": "c9", "content": "hello", "likes": 0 },
    });
    let upstream = common::start_mock_upstream(201, upstream_body.clone()).await;
    let (gateway, shutdown) = spawn_gateway(&upstream.base_url()).await;

    let res = client()
        .post(format!("{}/api/comments", gateway))
        .header("Authorization", "Bearer tok123")
        .json(&json!({
            "petitionId": "p1",
            "content": "hello",
            "isAdmin": true,
        }))
        .send()
        .await
        .unwrap();

    // Status and body relayed unchanged, including the non-200 success code.
    assert_eq!(res.status(), 201);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, upstream_body);

    let seen = upstream.last_request().unwrap();
    assert_eq!(seen.method, "POST");
    assert_eq!(seen.path, "/api/comments");
    assert_eq!(seen.authorization.as_deref(), Some("Bearer tok123"));
    assert_eq!(
        seen.body.unwrap(),
        json!({ "petitionId": "p1", "content": "hello" }),
        "only whitelisted fields may be forwarded"
    );

    shutdown.trigger();
}

#[tokio::test]
async fn pagination_defaults_are_forwarded_explicitly() {
    let upstream = common::start_mock_upstream(200, json!({ "comments": [] })).await;
    let (gateway, shutdown) = spawn_gateway(&upstream.base_url()).await;

    let res = client()
        .get(format!("{}/api/comments/petition/xyz", gateway))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let seen = upstream.last_request().unwrap();
    assert_eq!(seen.path, "/api/comments/petition/xyz");
    assert_eq!(seen.query.as_deref(), Some("page=1&limit=10"));

    // Caller-supplied values pass through untouched.
    let res = client()
        .get(format!(
            "{}/api/comments/petition/xyz?page=3&limit=5&search=river",
            gateway
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let seen = upstream.last_request().unwrap();
    assert_eq!(seen.query.as_deref(), Some("page=3&limit=5&search=river"));

    shutdown.trigger();
}

#[tokio::test]
async fn request_id_is_echoed_on_every_response() {
    let upstream = common::start_mock_upstream(200, json!({ "hidden": false })).await;
    let (gateway, shutdown) = spawn_gateway(&upstream.base_url()).await;

    // Generated when the caller sends none.
    let res = client()
        .get(format!("{}/api/hide-requests/check/p1", gateway))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let generated = res
        .headers()
        .get("x-request-id")
        .expect("relayed response must carry a request id");
    assert!(!generated.to_str().unwrap().is_empty());

    // Preserved verbatim when the caller supplies one, including on errors.
    let res = client()
        .post(format!("{}/api/comments", gateway))
        .header("x-request-id", "trace-me-123")
        .json(&json!({ "petitionId": "p1", "content": "hi" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 401);
    assert_eq!(res.headers().get("x-request-id").unwrap(), "trace-me-123");

    shutdown.trigger();
}

#[tokio::test]
async fn optional_auth_endpoints_forward_anonymously() {
    let upstream = common::start_mock_upstream(200, json!({ "hidden": false })).await;
    let (gateway, shutdown) = spawn_gateway(&upstream.base_url()).await;

    let res = client()
        .get(format!("{}/api/hide-requests/check/p1", gateway))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(upstream.hits(), 1);
    let seen = upstream.last_request().unwrap();
    assert_eq!(seen.path, "/api/hide-requests/check/p1");
    assert!(seen.authorization.is_none());

    // With a credential present it is forwarded verbatim.
    let res = client()
        .post(format!("{}/api/hide-requests", gateway))
        .header("Authorization", "Bearer opaque-thing")
        .json(&json!({ "petitionId": "p1", "reason": "duplicate" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let seen = upstream.last_request().unwrap();
    assert_eq!(seen.authorization.as_deref(), Some("Bearer opaque-thing"));
    assert_eq!(
        seen.body.unwrap(),
        json!({ "petitionId": "p1", "reason": "duplicate" })
    );

    shutdown.trigger();
}
