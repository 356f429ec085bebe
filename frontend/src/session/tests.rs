use super::*;
use crate::gateway::ApiGateway;
use crate::gateway::tests::MockSessionEvents;
use crate::web::http::tests::{FailingHttpClient, MockHttpClient};
use crate::web::storage::tests::MockTokenStore;
use serde_json::json;

// =========================================================
// 辅助函数
// =========================================================

const BASE: &str = "http://api.test";

type TestApi = RollBookApi<MockHttpClient, MockTokenStore, MockSessionEvents>;

fn make_api(client: MockHttpClient, tokens: MockTokenStore) -> TestApi {
    RollBookApi::new(ApiGateway::new(
        BASE,
        client,
        tokens,
        MockSessionEvents::default(),
    ))
}

fn user_json() -> serde_json::Value {
    json!({"_id": "u1", "name": "Sam Lee", "email": "sam@example.com", "role": "admin"})
}

// =========================================================
// 初始状态测试
// =========================================================

#[test]
fn test_session_starts_loading_and_anonymous() {
    let state = SessionState::default();

    assert!(state.is_loading);
    assert!(!state.is_authenticated());
}

// =========================================================
// restore_session 测试
// =========================================================

#[tokio::test]
async fn test_restore_without_token_makes_no_request() {
    let api = make_api(MockHttpClient::new(), MockTokenStore::new());

    let user = restore_session(&api).await;

    assert!(user.is_none());
    // 匿名启动不应产生任何网络流量
    assert!(api.gateway.client.requests.borrow().is_empty());
}

#[tokio::test]
async fn test_restore_with_valid_token_loads_user() {
    let client = MockHttpClient::new();
    client.mock_response(
        "http://api.test/auth/me",
        200,
        json!({"success": true, "data": user_json()}),
    );
    let api = make_api(client, MockTokenStore::with_token("tok1"));

    let user = restore_session(&api).await.unwrap();

    assert_eq!(user.id, "u1");
    assert_eq!(user.name, "Sam Lee");
    assert_eq!(user.email, "sam@example.com");
    assert_eq!(user.role, "admin");
    // 令牌仍然保留
    assert_eq!(api.token_store().load().as_deref(), Some("tok1"));
}

#[tokio::test]
async fn test_restore_clears_rejected_token() {
    let client = MockHttpClient::new();
    client.mock_response(
        "http://api.test/auth/me",
        401,
        json!({"success": false, "message": "token expired"}),
    );
    let api = make_api(client, MockTokenStore::with_token("stale"));

    let user = restore_session(&api).await;

    assert!(user.is_none());
    assert!(api.token_store().load().is_none());
}

#[tokio::test]
async fn test_restore_clears_token_when_network_is_down() {
    let api = RollBookApi::new(ApiGateway::new(
        BASE,
        FailingHttpClient,
        MockTokenStore::with_token("tok1"),
        MockSessionEvents::default(),
    ));

    let user = restore_session(&api).await;

    // 无法确认的令牌同样回到匿名状态
    assert!(user.is_none());
    assert!(api.token_store().load().is_none());
}

// =========================================================
// authenticate / clear_session 测试
// =========================================================

#[tokio::test]
async fn test_authenticate_persists_token_and_returns_user() {
    let client = MockHttpClient::new();
    client.mock_response(
        "http://api.test/auth/login",
        200,
        json!({
            "success": true,
            "data": {
                "token": "fresh-token",
                "_id": "u1",
                "name": "Sam Lee",
                "email": "sam@example.com",
                "role": "admin",
            }
        }),
    );
    let api = make_api(client, MockTokenStore::new());

    let credentials = LoginRequest {
        email: "sam@example.com".to_string(),
        password: "secret1".to_string(),
    };
    let user = authenticate(&api, &credentials).await.unwrap();

    assert_eq!(user.name, "Sam Lee");
    assert_eq!(api.token_store().load().as_deref(), Some("fresh-token"));
}

#[tokio::test]
async fn test_failed_authentication_leaves_no_token() {
    let client = MockHttpClient::new();
    client.mock_response(
        "http://api.test/auth/login",
        401,
        json!({"success": false, "message": "Invalid credentials"}),
    );
    let api = make_api(client, MockTokenStore::new());

    let credentials = LoginRequest {
        email: "sam@example.com".to_string(),
        password: "wrong".to_string(),
    };
    let err = authenticate(&api, &credentials).await.unwrap_err();

    assert_eq!(err.user_message(), "Invalid credentials");
    assert!(api.token_store().load().is_none());
}

#[tokio::test]
async fn test_clear_session_removes_token() {
    let api = make_api(MockHttpClient::new(), MockTokenStore::with_token("tok1"));

    clear_session(&api);

    assert!(api.token_store().load().is_none());
}

#[tokio::test]
async fn test_register_account_passes_failure_through() {
    let client = MockHttpClient::new();
    client.mock_response(
        "http://api.test/auth/register",
        400,
        json!({"success": false, "message": "Email already registered"}),
    );
    let api = make_api(client, MockTokenStore::new());

    let request = RegisterRequest {
        name: "Sam".to_string(),
        email: "sam@example.com".to_string(),
        password: "secret1".to_string(),
        role: "staff".to_string(),
    };
    let err = register_account(&api, &request).await.unwrap_err();

    assert_eq!(err.user_message(), "Email already registered");
}
