//! API 网关
//!
//! 所有发往远端 API 的请求都经由此层：
//! - 需要认证的端点自动附加 `Authorization: Bearer <token>`
//! - 无令牌时直接拒绝（不发出网络请求）并触发会话失效事件
//! - 拦截 401（清除令牌并触发会话失效）与 403（仅上报，不动会话）
//!
//! 其余状态码原样交给调用方处理。

use crate::error::{ApiError, ApiResult};
use crate::web::http::{HttpClient, HttpRequest, HttpResponse};
use crate::web::storage::TokenStore;
use rollbook_shared::protocol::{ApiRequest, HttpMethod};
use rollbook_shared::{HEADER_AUTHORIZATION, TOKEN_SCHEME};

// =========================================================
// 日志宏（浏览器 console / 原生 stderr）
// =========================================================

#[cfg(target_arch = "wasm32")]
macro_rules! log_warn {
    ($($t:tt)*) => (web_sys::console::warn_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_warn {
    ($($t:tt)*) => (eprintln!($($t)*))
}

// =========================================================
// 会话事件
// =========================================================

/// 网关向会话层上报的事件
///
/// 网关自身不持有任何界面状态；401 与缺失令牌
/// 都通过该回调通知会话层清理状态。
pub trait SessionEvents {
    /// 会话已失效（令牌缺失或被服务端拒绝）
    fn session_expired(&self);
}

// =========================================================
// 网关实现
// =========================================================

/// API 网关
#[derive(Clone)]
pub struct ApiGateway<C: HttpClient, T: TokenStore, E: SessionEvents> {
    base_url: String,
    pub client: C,
    pub tokens: T,
    pub events: E,
}

impl<C: HttpClient, T: TokenStore, E: SessionEvents> ApiGateway<C, T, E> {
    pub fn new(base_url: &str, client: C, tokens: T, events: E) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            tokens,
            events,
        }
    }

    /// 拼接完整 URL
    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// **核心方法：派发一个协议请求**
    ///
    /// 返回的响应已经过 401/403 拦截；
    /// 其他非 2xx 状态由调用方决定如何呈现。
    pub async fn dispatch<R: ApiRequest>(&self, request: &R) -> ApiResult<HttpResponse> {
        let token = self.tokens.load();

        // 需要认证的端点：无令牌直接拒绝，不发出网络请求
        if R::REQUIRES_AUTH && token.is_none() {
            self.events.session_expired();
            return Err(ApiError::session_expired());
        }

        let mut req = HttpRequest::new(&self.url(&request.path()), R::METHOD);
        if R::REQUIRES_AUTH {
            if let Some(token) = &token {
                req = req.with_header(
                    HEADER_AUTHORIZATION,
                    &format!("{} {}", TOKEN_SCHEME, token),
                );
            }
        }
        if let Some(body) = request.body() {
            req = req
                .with_header("Content-Type", "application/json")
                .with_body(body);
        }

        let resp = self.client.send(req).await?;

        match resp.status {
            // 会话失效：清除本地令牌并通知会话层
            // （登录等公开端点的 401 不在此列，交由调用方呈现）
            401 if R::REQUIRES_AUTH => {
                self.tokens.clear();
                self.events.session_expired();
                Err(ApiError::session_expired())
            }
            // 权限不足：仅上报，会话保持有效
            403 if R::REQUIRES_AUTH => {
                log_warn!(
                    "[Gateway] Permission denied: {} {}",
                    method_name(R::METHOD),
                    request.path()
                );
                let message = extract_message(&resp)
                    .unwrap_or_else(|| "You do not have permission to do that".to_string());
                Err(ApiError::forbidden(message))
            }
            _ => Ok(resp),
        }
    }
}

/// 从响应体中提取信封的 `message` 字段
pub fn extract_message(resp: &HttpResponse) -> Option<String> {
    resp.json::<serde_json::Value>()
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
}

fn method_name(method: HttpMethod) -> &'static str {
    match method {
        HttpMethod::Get => "GET",
        HttpMethod::Post => "POST",
        HttpMethod::Put => "PUT",
        HttpMethod::Delete => "DELETE",
    }
}

#[cfg(test)]
pub mod tests;
