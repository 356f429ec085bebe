//! 前端错误类型
//!
//! 对远端 API 交互中的失败分类：
//! - `Authentication`: 凭据被拒或认证响应异常（表单保持打开并展示消息）
//! - `Authorization`: 401 会话失效 / 403 权限不足
//! - `Request`: 其他非 2xx 响应
//! - `Transport`: 网络层失败（请求未发出或未完成）

use crate::web::http::HttpError;
use std::fmt;

// =========================================================
// 核心错误类型
// =========================================================

#[derive(Debug)]
pub enum ApiError {
    /// 凭据校验失败或认证响应不可用
    Authentication(String),
    /// 401 / 403
    Authorization { status: u16, message: String },
    /// 其他非 2xx 响应
    Request { status: u16, message: String },
    /// 传输层错误
    Transport(HttpError),
}

impl ApiError {
    // --- 便捷构造 ---

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    /// 会话失效（缺失令牌或令牌被拒）
    pub fn session_expired() -> Self {
        Self::Authorization {
            status: 401,
            message: "Session expired, please sign in again".to_string(),
        }
    }

    /// 权限不足（会话仍然有效）
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Authorization {
            status: 403,
            message: message.into(),
        }
    }

    pub fn request(status: u16, message: impl Into<String>) -> Self {
        Self::Request {
            status,
            message: message.into(),
        }
    }

    // --- 访问器 ---

    /// 是否为会话失效（调用方可据此跳过重复的清理）
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Authorization { status: 401, .. })
    }

    /// 展示给用户的消息
    pub fn user_message(&self) -> String {
        match self {
            Self::Authentication(message) => message.clone(),
            Self::Authorization { message, .. } => message.clone(),
            Self::Request { status, message } => format!("{} (HTTP {})", message, status),
            Self::Transport(e) => e.to_string(),
        }
    }
}

// =========================================================
// Display & Error trait 实现
// =========================================================

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authentication(message) => write!(f, "[AUTHENTICATION] {}", message),
            Self::Authorization { status, message } => {
                write!(f, "[AUTHORIZATION {}] {}", status, message)
            }
            Self::Request { status, message } => write!(f, "[REQUEST {}] {}", status, message),
            Self::Transport(e) => write!(f, "[TRANSPORT] {}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<HttpError> for ApiError {
    fn from(e: HttpError) -> Self {
        Self::Transport(e)
    }
}

/// 统一的 Result 类型
pub type ApiResult<T> = std::result::Result<T, ApiError>;
