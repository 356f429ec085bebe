use super::*;
use crate::gateway::tests::MockSessionEvents;
use crate::web::http::tests::MockHttpClient;
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

fn student_json(id: &str, name: &str, course: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "name": name,
        "email": format!("{}@example.com", id),
        "course": course,
        "age": 20,
    })
}

// =========================================================
// 登录 / 注册测试
// =========================================================

#[tokio::test]
async fn test_login_returns_session_data() {
    let client = MockHttpClient::new();
    client.mock_response(
        "http://api.test/auth/login",
        200,
        json!({
            "success": true,
            "data": {
                "token": "fresh-token",
                "_id": "u1",
                "name": "Sam",
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
    let session = api.login(&credentials).await.unwrap();

    assert_eq!(session.token, "fresh-token");
    assert_eq!(session.user().name, "Sam");
    // 登录本身不写令牌，持久化由会话层完成
    assert!(api.token_store().load().is_none());
}

#[tokio::test]
async fn test_login_failure_surfaces_server_message() {
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
    let err = api.login(&credentials).await.unwrap_err();

    match err {
        ApiError::Authentication(message) => assert_eq!(message, "Invalid credentials"),
        other => panic!("expected Authentication error, got {}", other),
    }
    // 凭据被拒不触发会话失效流程
    assert_eq!(api.gateway.events.expired.get(), 0);
}

#[tokio::test]
async fn test_login_envelope_without_data_is_authentication_error() {
    let client = MockHttpClient::new();
    client.mock_response("http://api.test/auth/login", 200, json!({"success": true}));
    let api = make_api(client, MockTokenStore::new());

    let credentials = LoginRequest {
        email: "sam@example.com".to_string(),
        password: "secret1".to_string(),
    };
    let err = api.login(&credentials).await.unwrap_err();

    assert!(matches!(err, ApiError::Authentication(_)));
}

#[tokio::test]
async fn test_register_maps_rejection_to_authentication() {
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
    let err = api.register(&request).await.unwrap_err();

    match err {
        ApiError::Authentication(message) => assert_eq!(message, "Email already registered"),
        other => panic!("expected Authentication error, got {}", other),
    }
}

#[tokio::test]
async fn test_who_am_i_unwraps_envelope() {
    let client = MockHttpClient::new();
    client.mock_response(
        "http://api.test/auth/me",
        200,
        json!({
            "success": true,
            "data": {"_id": "u1", "name": "Sam", "email": "sam@example.com", "role": "admin"}
        }),
    );
    let api = make_api(client, MockTokenStore::with_token("tok1"));

    let user = api.who_am_i().await.unwrap();

    assert_eq!(user.id, "u1");
    assert_eq!(user.email, "sam@example.com");
}

// =========================================================
// 学生列表测试
// =========================================================

#[tokio::test]
async fn test_list_students_accepts_bare_array() {
    let client = MockHttpClient::new();
    client.mock_response(
        "http://api.test/students",
        200,
        json!([student_json("1", "Ann", "Math"), student_json("2", "Bo", "Art")]),
    );
    let api = make_api(client, MockTokenStore::with_token("tok1"));

    let students = api.list_students().await.unwrap();

    assert_eq!(students.len(), 2);
    assert_eq!(students[0].name, "Ann");
}

#[tokio::test]
async fn test_list_students_accepts_envelope() {
    let client = MockHttpClient::new();
    client.mock_response(
        "http://api.test/students",
        200,
        json!({"success": true, "data": [student_json("1", "Ann", "Math")]}),
    );
    let api = make_api(client, MockTokenStore::with_token("tok1"));

    let students = api.list_students().await.unwrap();

    assert_eq!(students.len(), 1);
}

#[tokio::test]
async fn test_list_students_maps_server_error() {
    let client = MockHttpClient::new();
    client.mock_response(
        "http://api.test/students",
        500,
        json!({"message": "database unavailable"}),
    );
    let api = make_api(client, MockTokenStore::with_token("tok1"));

    let err = api.list_students().await.unwrap_err();

    match err {
        ApiError::Request { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "database unavailable");
        }
        other => panic!("expected Request error, got {}", other),
    }
}

// =========================================================
// 学生增删改测试
// =========================================================

#[tokio::test]
async fn test_create_student_posts_json_body() {
    let client = MockHttpClient::new();
    client.mock_response(
        "http://api.test/students",
        201,
        json!({"success": true, "message": "Student added"}),
    );
    let api = make_api(client, MockTokenStore::with_token("tok1"));

    let request = CreateStudentRequest {
        name: "Ann".to_string(),
        email: "ann@example.com".to_string(),
        course: "Math".to_string(),
        age: 20,
    };
    api.create_student(&request).await.unwrap();

    let requests = api.gateway.client.requests.borrow();
    assert_eq!(requests[0].1, "Post");
    let body: serde_json::Value = serde_json::from_str(requests[0].3.as_ref().unwrap()).unwrap();
    assert_eq!(body["name"], "Ann");
    assert_eq!(body["age"], 20);
}

#[tokio::test]
async fn test_update_student_sends_only_changed_fields() {
    let client = MockHttpClient::new();
    client.mock_response(
        "http://api.test/students/42",
        200,
        json!({"success": true}),
    );
    let api = make_api(client, MockTokenStore::with_token("tok1"));

    let request = UpdateStudentRequest {
        id: "42".to_string(),
        patch: rollbook_shared::StudentPatch {
            course: Some("Art".to_string()),
            ..Default::default()
        },
    };
    api.update_student(&request).await.unwrap();

    let requests = api.gateway.client.requests.borrow();
    assert_eq!(requests[0].1, "Put");
    // 差量请求体：只有改动的字段
    assert_eq!(requests[0].3.as_deref(), Some(r#"{"course":"Art"}"#));
}

#[tokio::test]
async fn test_delete_then_reload_request_sequence() {
    let client = MockHttpClient::new();
    client.mock_response(
        "http://api.test/students/42",
        200,
        json!({"success": true, "message": "Student removed"}),
    );
    client.mock_response(
        "http://api.test/students",
        200,
        json!([student_json("1", "Ann", "Math")]),
    );
    let api = make_api(client, MockTokenStore::with_token("tok1"));

    // 删除流程：确认后 DELETE，成功后重新拉取完整列表
    api.delete_student("42").await.unwrap();
    let students = api.list_students().await.unwrap();

    let requests = api.gateway.client.requests.borrow();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].0, "http://api.test/students/42");
    assert_eq!(requests[0].1, "Delete");
    assert_eq!(requests[1].0, "http://api.test/students");
    assert_eq!(requests[1].1, "Get");
    assert_eq!(students.len(), 1);
}

#[tokio::test]
async fn test_delete_failure_is_reported() {
    let client = MockHttpClient::new();
    client.mock_response(
        "http://api.test/students/42",
        404,
        json!({"success": false, "message": "Student not found"}),
    );
    let api = make_api(client, MockTokenStore::with_token("tok1"));

    let err = api.delete_student("42").await.unwrap_err();

    match err {
        ApiError::Request { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Student not found");
        }
        other => panic!("expected Request error, got {}", other),
    }
}
