//! HTTP 传输层
//!
//! 在 `gloo-net` 之上提供统一的请求抽象。
//! 网关与 API 层只依赖 `HttpClient` trait，
//! 测试中注入 `MockHttpClient` 即可在原生环境下驱动完整流程。

use rollbook_shared::protocol::HttpMethod;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

// =========================================================
// 错误类型
// =========================================================

/// 传输层错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpError {
    /// 请求构建失败
    RequestBuildFailed(String),
    /// 网络请求失败
    NetworkError(String),
    /// 响应解析失败
    ResponseParseFailed(String),
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::RequestBuildFailed(e) => write!(f, "请求构建失败: {}", e),
            HttpError::NetworkError(e) => write!(f, "网络请求失败: {}", e),
            HttpError::ResponseParseFailed(e) => write!(f, "响应解析失败: {}", e),
        }
    }
}

impl std::error::Error for HttpError {}

// =========================================================
// 请求 / 响应模型
// =========================================================

/// HTTP 请求
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body.to_string());
        self
    }
}

/// HTTP 响应
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// 是否为 2xx
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 将响应体解析为 JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, HttpError> {
        serde_json::from_str(&self.body).map_err(|e| HttpError::ResponseParseFailed(e.to_string()))
    }
}

// =========================================================
// 客户端抽象
// =========================================================

/// HTTP 客户端 trait
///
/// `?Send` 因为浏览器环境下的 Future 不是 Send 的。
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError>;
}

// =========================================================
// 实现层: 浏览器 fetch 客户端
// =========================================================

/// 基于 gloo-net 的浏览器客户端
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchHttpClient;

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        use gloo_net::http::Request;

        let mut builder = match req.method {
            HttpMethod::Get => Request::get(&req.url),
            HttpMethod::Post => Request::post(&req.url),
            HttpMethod::Put => Request::put(&req.url),
            HttpMethod::Delete => Request::delete(&req.url),
        };

        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        let request = match req.body {
            Some(body) => builder
                .body(body)
                .map_err(|e| HttpError::RequestBuildFailed(e.to_string()))?,
            None => builder
                .build()
                .map_err(|e| HttpError::RequestBuildFailed(e.to_string()))?,
        };

        let response = request
            .send()
            .await
            .map_err(|e| HttpError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| HttpError::ResponseParseFailed(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================
