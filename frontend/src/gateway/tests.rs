use super::*;
use crate::web::http::tests::MockHttpClient;
use crate::web::storage::tests::MockTokenStore;
use rollbook_shared::LoginRequest;
use rollbook_shared::protocol::ListStudentsRequest;
use serde_json::json;
use std::cell::Cell;

// =========================================================
// 辅助类型与函数
// =========================================================

/// 记录会话失效事件次数的 Mock
#[derive(Default)]
pub struct MockSessionEvents {
    pub expired: Cell<usize>,
}

impl SessionEvents for MockSessionEvents {
    fn session_expired(&self) {
        self.expired.set(self.expired.get() + 1);
    }
}

const BASE: &str = "http://api.test";

fn gateway(
    client: MockHttpClient,
    tokens: MockTokenStore,
) -> ApiGateway<MockHttpClient, MockTokenStore, MockSessionEvents> {
    ApiGateway::new(BASE, client, tokens, MockSessionEvents::default())
}

// =========================================================
// 令牌注入测试
// =========================================================

#[tokio::test]
async fn test_bearer_header_attached_when_token_present() {
    let client = MockHttpClient::new();
    client.mock_response("http://api.test/students", 200, json!([]));
    let gw = gateway(client, MockTokenStore::with_token("tok123"));

    let resp = gw.dispatch(&ListStudentsRequest).await.unwrap();

    assert_eq!(resp.status, 200);
    let requests = gw.client.requests.borrow();
    assert_eq!(
        requests[0].2.get("Authorization").map(String::as_str),
        Some("Bearer tok123")
    );
}

#[tokio::test]
async fn test_public_endpoint_sends_without_token() {
    let client = MockHttpClient::new();
    client.mock_response(
        "http://api.test/auth/login",
        200,
        json!({"success": true}),
    );
    let gw = gateway(client, MockTokenStore::new());

    let credentials = LoginRequest {
        email: "sam@example.com".to_string(),
        password: "secret1".to_string(),
    };
    let resp = gw.dispatch(&credentials).await.unwrap();

    assert_eq!(resp.status, 200);
    let requests = gw.client.requests.borrow();
    // 公开端点不带 Authorization 头
    assert!(!requests[0].2.contains_key("Authorization"));
    // JSON 请求体带 Content-Type
    assert_eq!(
        requests[0].2.get("Content-Type").map(String::as_str),
        Some("application/json")
    );
    assert!(requests[0].3.as_deref().unwrap().contains("sam@example.com"));
    // 没有触发会话事件
    assert_eq!(gw.events.expired.get(), 0);
}

// =========================================================
// 快速失败测试
// =========================================================

#[tokio::test]
async fn test_missing_token_rejects_before_sending() {
    let gw = gateway(MockHttpClient::new(), MockTokenStore::new());

    let err = gw.dispatch(&ListStudentsRequest).await.unwrap_err();

    // 没有发出任何网络请求
    assert!(gw.client.requests.borrow().is_empty());
    assert!(err.is_unauthorized());
    assert_eq!(gw.events.expired.get(), 1);
}

// =========================================================
// 401 / 403 拦截测试
// =========================================================

#[tokio::test]
async fn test_unauthorized_clears_token_and_notifies() {
    let client = MockHttpClient::new();
    client.mock_response(
        "http://api.test/students",
        401,
        json!({"success": false, "message": "token expired"}),
    );
    let gw = gateway(client, MockTokenStore::with_token("stale"));

    let err = gw.dispatch(&ListStudentsRequest).await.unwrap_err();

    assert!(err.is_unauthorized());
    // 令牌已被清除
    assert!(gw.tokens.load().is_none());
    assert_eq!(gw.events.expired.get(), 1);
}

#[tokio::test]
async fn test_forbidden_keeps_session_intact() {
    let client = MockHttpClient::new();
    client.mock_response(
        "http://api.test/students",
        403,
        json!({"success": false, "message": "admins only"}),
    );
    let gw = gateway(client, MockTokenStore::with_token("tok123"));

    let err = gw.dispatch(&ListStudentsRequest).await.unwrap_err();

    // 403 保留令牌，不触发会话失效
    assert_eq!(gw.tokens.load().as_deref(), Some("tok123"));
    assert_eq!(gw.events.expired.get(), 0);
    match err {
        ApiError::Authorization { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "admins only");
        }
        other => panic!("expected Authorization error, got {}", other),
    }
}

#[tokio::test]
async fn test_other_statuses_pass_through() {
    let client = MockHttpClient::new();
    client.mock_response(
        "http://api.test/students",
        500,
        json!({"message": "boom"}),
    );
    let gw = gateway(client, MockTokenStore::with_token("tok123"));

    let resp = gw.dispatch(&ListStudentsRequest).await.unwrap();

    // 非 401/403 的失败状态原样返回，由调用方决定呈现方式
    assert_eq!(resp.status, 500);
    assert!(!resp.ok());
    assert_eq!(gw.tokens.load().as_deref(), Some("tok123"));
}

#[tokio::test]
async fn test_unauthorized_on_public_endpoint_is_not_intercepted() {
    let client = MockHttpClient::new();
    client.mock_response(
        "http://api.test/auth/login",
        401,
        json!({"success": false, "message": "Invalid credentials"}),
    );
    let gw = gateway(client, MockTokenStore::with_token("tok123"));

    let credentials = LoginRequest {
        email: "sam@example.com".to_string(),
        password: "wrong".to_string(),
    };
    let resp = gw.dispatch(&credentials).await.unwrap();

    // 登录失败不算会话失效：令牌保留，响应原样返回
    assert_eq!(resp.status, 401);
    assert_eq!(gw.tokens.load().as_deref(), Some("tok123"));
    assert_eq!(gw.events.expired.get(), 0);
}

// =========================================================
// URL 拼接测试
// =========================================================

#[tokio::test]
async fn test_base_url_trailing_slash_is_normalized() {
    let client = MockHttpClient::new();
    client.mock_response("http://api.test/students", 200, json!([]));
    let gw = ApiGateway::new(
        "http://api.test/",
        client,
        MockTokenStore::with_token("tok123"),
        MockSessionEvents::default(),
    );

    let resp = gw.dispatch(&ListStudentsRequest).await.unwrap();

    assert_eq!(resp.status, 200);
    assert_eq!(gw.client.request_count("http://api.test/students", "Get"), 1);
}
