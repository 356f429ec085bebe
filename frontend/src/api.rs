//! 远端 API 客户端
//!
//! 每个端点一个方法，统一经网关派发。
//! 非 2xx 状态在此映射为 `ApiError::Request`，
//! 信封中的服务端消息优先于状态码兜底文案。

use crate::error::{ApiError, ApiResult};
use crate::gateway::{ApiGateway, SessionEvents, extract_message};
use crate::session::AppSessionEvents;
use crate::web::http::{FetchHttpClient, HttpClient, HttpResponse};
use crate::web::storage::{BrowserTokenStore, TokenStore};
use rollbook_shared::protocol::{
    ApiRequest, DeleteStudentRequest, GetStudentRequest, ListStudentsRequest,
    UpdateStudentRequest, WhoAmIRequest,
};
use rollbook_shared::{
    ApiEnvelope, AuthSession, CreateStudentRequest, LoginRequest, Payload, RegisterRequest,
    SessionUser, StudentRecord,
};

/// RollBook API 客户端
#[derive(Clone)]
pub struct RollBookApi<C: HttpClient, T: TokenStore, E: SessionEvents> {
    pub gateway: ApiGateway<C, T, E>,
}

/// 浏览器环境下的 API 客户端
pub type WebApi = RollBookApi<FetchHttpClient, BrowserTokenStore, AppSessionEvents>;

impl WebApi {
    /// 构建浏览器环境客户端
    pub fn browser(base_url: &str, events: AppSessionEvents) -> Self {
        Self::new(ApiGateway::new(
            base_url,
            FetchHttpClient,
            BrowserTokenStore,
            events,
        ))
    }
}

impl<C: HttpClient, T: TokenStore, E: SessionEvents> RollBookApi<C, T, E> {
    pub fn new(gateway: ApiGateway<C, T, E>) -> Self {
        Self { gateway }
    }

    /// 令牌存储（会话层负责写入与清除）
    pub fn token_store(&self) -> &T {
        &self.gateway.tokens
    }

    /// 派发请求并确保 2xx
    async fn checked<R: ApiRequest>(&self, request: &R) -> ApiResult<HttpResponse> {
        let resp = self.gateway.dispatch(request).await?;
        if !resp.ok() {
            let message = extract_message(&resp)
                .unwrap_or_else(|| format!("Request failed with status {}", resp.status));
            return Err(ApiError::request(resp.status, message));
        }
        Ok(resp)
    }

    // =========================================================
    // 认证端点
    // =========================================================

    /// 登录；成功返回令牌与用户信息（令牌由会话层持久化）
    ///
    /// 凭据被拒（含公开端点的 401）与信封异常都映射为
    /// `Authentication`，网络错误原样传播。
    pub async fn login(&self, credentials: &LoginRequest) -> ApiResult<AuthSession> {
        let resp = match self.checked(credentials).await {
            Ok(resp) => resp,
            Err(ApiError::Request { message, .. }) => {
                return Err(ApiError::authentication(message));
            }
            Err(e) => return Err(e),
        };

        let envelope: ApiEnvelope<AuthSession> = resp
            .json()
            .map_err(|_| ApiError::authentication("Malformed login response"))?;
        envelope
            .into_data("Login failed")
            .map_err(ApiError::authentication)
    }

    /// 注册新账号（成功后仍需登录）
    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<()> {
        let resp = match self.checked(request).await {
            Ok(resp) => resp,
            Err(ApiError::Request { message, .. }) => {
                return Err(ApiError::authentication(message));
            }
            Err(e) => return Err(e),
        };

        let envelope: ApiEnvelope<serde_json::Value> = resp.json()?;
        envelope
            .into_ack("Registration failed")
            .map_err(ApiError::authentication)
    }

    /// 查询当前令牌对应的用户
    pub async fn who_am_i(&self) -> ApiResult<SessionUser> {
        let resp = self.checked(&WhoAmIRequest).await?;
        let envelope: ApiEnvelope<SessionUser> = resp.json()?;
        envelope
            .into_data("Could not load current user")
            .map_err(ApiError::authentication)
    }

    // =========================================================
    // 学生端点
    // =========================================================

    /// 获取学生列表
    pub async fn list_students(&self) -> ApiResult<Vec<StudentRecord>> {
        let resp = self.checked(&ListStudentsRequest).await?;
        let payload: Payload<Vec<StudentRecord>> = resp.json()?;
        payload
            .into_data("Could not load students")
            .map_err(|m| ApiError::request(resp.status, m))
    }

    /// 按 id 获取单个学生
    pub async fn get_student(&self, id: &str) -> ApiResult<StudentRecord> {
        let request = GetStudentRequest { id: id.to_string() };
        let resp = self.checked(&request).await?;
        let payload: Payload<StudentRecord> = resp.json()?;
        payload
            .into_data("Student not found")
            .map_err(|m| ApiError::request(resp.status, m))
    }

    /// 新增学生；成功后由调用方自行刷新列表
    pub async fn create_student(&self, request: &CreateStudentRequest) -> ApiResult<()> {
        let resp = self.checked(request).await?;
        let payload: Payload<StudentRecord> = resp.json()?;
        payload
            .into_ack("Could not create student")
            .map_err(|m| ApiError::request(resp.status, m))
    }

    /// 编辑学生（差量提交）
    pub async fn update_student(&self, request: &UpdateStudentRequest) -> ApiResult<()> {
        let resp = self.checked(request).await?;
        let payload: Payload<StudentRecord> = resp.json()?;
        payload
            .into_ack("Could not update student")
            .map_err(|m| ApiError::request(resp.status, m))
    }

    /// 删除学生；2xx 即视为成功，忽略响应体
    pub async fn delete_student(&self, id: &str) -> ApiResult<()> {
        let request = DeleteStudentRequest { id: id.to_string() };
        self.checked(&request).await?;
        Ok(())
    }
}

// =========================================================
// Leptos 集成
// =========================================================

/// 从 Context 获取 API 客户端
pub fn use_api() -> WebApi {
    leptos::prelude::use_context::<WebApi>()
        .expect("WebApi not found in context. Ensure App provides it.")
}

#[cfg(test)]
mod tests;
