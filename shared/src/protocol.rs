//! API 端点协议
//!
//! 每个端点实现 `ApiRequest`，由前端网关统一派发。
//! 浏览器端只需要反序列化响应；请求体通过 `body()` 构造，
//! 因此不要求请求类型自身可反序列化。

use crate::{
    ApiEnvelope, AuthSession, CreateStudentRequest, LoginRequest, Payload, RegisterRequest,
    SessionUser, StudentPatch, StudentRecord,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest {
    /// The response type returned by this request.
    type Response: DeserializeOwned;

    /// The HTTP method.
    const METHOD: HttpMethod;

    /// 该端点是否要求携带 Bearer 令牌
    const REQUIRES_AUTH: bool;

    /// The URL path (relative to the API base).
    fn path(&self) -> String;

    /// JSON 请求体（GET / DELETE 为 None）
    fn body(&self) -> Option<serde_json::Value> {
        None
    }
}

// =========================================================
// Auth Endpoints
// =========================================================

impl ApiRequest for LoginRequest {
    type Response = ApiEnvelope<AuthSession>;
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = false;

    fn path(&self) -> String {
        "/auth/login".to_string()
    }

    fn body(&self) -> Option<serde_json::Value> {
        serde_json::to_value(self).ok()
    }
}

impl ApiRequest for RegisterRequest {
    type Response = ApiEnvelope<serde_json::Value>;
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = false;

    fn path(&self) -> String {
        "/auth/register".to_string()
    }

    fn body(&self) -> Option<serde_json::Value> {
        serde_json::to_value(self).ok()
    }
}

/// Fetch the user behind the current token
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WhoAmIRequest;

impl ApiRequest for WhoAmIRequest {
    type Response = ApiEnvelope<SessionUser>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const REQUIRES_AUTH: bool = true;

    fn path(&self) -> String {
        "/auth/me".to_string()
    }
}

// =========================================================
// Student Endpoints
// =========================================================

/// List all students
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ListStudentsRequest;

impl ApiRequest for ListStudentsRequest {
    type Response = Payload<Vec<StudentRecord>>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const REQUIRES_AUTH: bool = true;

    fn path(&self) -> String {
        "/students".to_string()
    }
}

/// Fetch a single student by id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetStudentRequest {
    pub id: String,
}

impl ApiRequest for GetStudentRequest {
    type Response = Payload<StudentRecord>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const REQUIRES_AUTH: bool = true;

    fn path(&self) -> String {
        format!("/students/{}", self.id)
    }
}

impl ApiRequest for CreateStudentRequest {
    type Response = Payload<StudentRecord>;
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = true;

    fn path(&self) -> String {
        "/students".to_string()
    }

    fn body(&self) -> Option<serde_json::Value> {
        serde_json::to_value(self).ok()
    }
}

/// Update a student (partial body, untouched fields omitted)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStudentRequest {
    pub id: String,
    #[serde(flatten)]
    pub patch: StudentPatch,
}

impl ApiRequest for UpdateStudentRequest {
    type Response = Payload<StudentRecord>;
    const METHOD: HttpMethod = HttpMethod::Put;
    const REQUIRES_AUTH: bool = true;

    fn path(&self) -> String {
        format!("/students/{}", self.id)
    }

    fn body(&self) -> Option<serde_json::Value> {
        serde_json::to_value(&self.patch).ok()
    }
}

/// Delete a student
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteStudentRequest {
    pub id: String,
}

impl ApiRequest for DeleteStudentRequest {
    type Response = (); // 2xx 即视为成功，忽略响应体
    const METHOD: HttpMethod = HttpMethod::Delete;
    const REQUIRES_AUTH: bool = true;

    fn path(&self) -> String {
        format!("/students/{}", self.id)
    }
}
