use claude_usage_tracker::session_usage::SessionUsagePoller;

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn poller_for(server: &MockServer) -> SessionUsagePoller {
    SessionUsagePoller::with_endpoint(&format!("{}/api/oauth/usage", server.uri()))
}

#[tokio::test]
async fn poll_decodes_full_snapshot() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/oauth/usage"))
        .and(header("authorization", "Bearer test-bearer-token"))
        .and(header("anthropic-beta", "oauth-2025-04-20"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "five_hour": { "utilization": 42.0, "resets_at": "2025-03-05T18:00:00Z" },
            "seven_day": { "utilization": 73.5, "resets_at": "2025-03-09T00:00:00Z" },
            "seven_day_sonnet": { "utilization": 12.0, "resets_at": null },
            "extra_usage": {
                "is_enabled": true,
                "used_credits": 1234,
                "monthly_limit": 5000,
                "utilization": 24.7
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let snapshot = poller_for(&server).poll("test-bearer-token").await.unwrap();

    let five_hour = snapshot.five_hour.unwrap();
    assert_eq!(five_hour.utilization, 42.0);
    assert_eq!(five_hour.resets_at.as_deref(), Some("2025-03-05T18:00:00Z"));

    let sonnet = snapshot.seven_day_sonnet.unwrap();
    assert!(sonnet.resets_at.is_none());

    let extra = snapshot.extra_usage.unwrap();
    assert!(extra.is_enabled);
    assert_eq!(extra.used_credits, 1234);
    assert_eq!(extra.monthly_limit, 5000);
}

#[tokio::test]
async fn poll_handles_partial_snapshot() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/oauth/usage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "five_hour": { "utilization": 5.0 }
        })))
        .mount(&server)
        .await;

    let snapshot = poller_for(&server).poll("t").await.unwrap();
    assert!(snapshot.five_hour.is_some());
    assert!(snapshot.seven_day.is_none());
    assert!(snapshot.seven_day_sonnet.is_none());
    assert!(snapshot.extra_usage.is_none());
}

#[tokio::test]
async fn poll_yields_none_on_auth_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/oauth/usage"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    assert!(poller_for(&server).poll("expired").await.is_none());
}

#[tokio::test]
async fn poll_yields_none_on_undecodable_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/oauth/usage"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    assert!(poller_for(&server).poll("t").await.is_none());
}
