//! 会话状态管理
//!
//! 管理当前登录用户与启动恢复进度。与路由系统解耦：
//! 路由守卫只通过注入的 `SessionGate` 信号读取会话快照。
//!
//! 纯异步流程（恢复 / 登录 / 注册 / 登出）与 Leptos 粘合层分离，
//! 前者不持有任何信号，可在原生测试中直接驱动。

use crate::api::{RollBookApi, WebApi};
use crate::error::ApiResult;
use crate::gateway::SessionEvents;
use crate::web::http::HttpClient;
use crate::web::route::SessionGate;
use crate::web::storage::TokenStore;
use leptos::prelude::*;
use leptos::task::spawn_local;
use rollbook_shared::{LoginRequest, RegisterRequest, SessionUser};

// =========================================================
// 会话状态
// =========================================================

/// 会话状态
#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    /// 当前登录用户（None 表示未认证）
    pub user: Option<SessionUser>,
    /// 启动恢复是否仍在进行
    pub is_loading: bool,
}

impl Default for SessionState {
    /// 启动即进入恢复中状态，守卫在此期间保持占位
    fn default() -> Self {
        Self {
            user: None,
            is_loading: true,
        }
    }
}

impl SessionState {
    /// 是否已认证（由用户是否存在推导，不单独存布尔值）
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// 会话上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub state: ReadSignal<SessionState>,
    pub set_state: WriteSignal<SessionState>,
}

impl SessionContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(SessionState::default());
        Self { state, set_state }
    }

    /// 守卫快照信号（注入路由服务用）
    pub fn gate_signal(&self) -> Signal<SessionGate> {
        let state = self.state;
        Signal::derive(move || {
            state.with(|s| SessionGate {
                is_loading: s.is_loading,
                is_authenticated: s.is_authenticated(),
            })
        })
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取会话上下文
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>()
        .expect("SessionContext not found in context. Ensure App provides it.")
}

// =========================================================
// 纯流程层（可在原生测试中驱动）
// =========================================================

/// 启动时恢复会话
///
/// 无令牌直接返回 None，不发出网络请求；
/// 令牌校验失败（过期、非法、网络错误）时静默清除令牌。
pub async fn restore_session<C, T, E>(api: &RollBookApi<C, T, E>) -> Option<SessionUser>
where
    C: HttpClient,
    T: TokenStore,
    E: SessionEvents,
{
    api.token_store().load()?;

    match api.who_am_i().await {
        Ok(user) => Some(user),
        Err(_) => {
            // 无法恢复的令牌一律清除，回到匿名状态
            api.token_store().clear();
            None
        }
    }
}

/// 登录：校验凭据、持久化令牌并返回用户
pub async fn authenticate<C, T, E>(
    api: &RollBookApi<C, T, E>,
    credentials: &LoginRequest,
) -> ApiResult<SessionUser>
where
    C: HttpClient,
    T: TokenStore,
    E: SessionEvents,
{
    let session = api.login(credentials).await?;
    api.token_store().save(&session.token);
    Ok(session.user())
}

/// 注册新账号（成功后用户仍需自行登录）
pub async fn register_account<C, T, E>(
    api: &RollBookApi<C, T, E>,
    request: &RegisterRequest,
) -> ApiResult<()>
where
    C: HttpClient,
    T: TokenStore,
    E: SessionEvents,
{
    api.register(request).await
}

/// 登出：清除令牌（导航由调用方或路由服务处理）
pub fn clear_session<C, T, E>(api: &RollBookApi<C, T, E>)
where
    C: HttpClient,
    T: TokenStore,
    E: SessionEvents,
{
    api.token_store().clear();
}

// =========================================================
// Leptos 粘合层
// =========================================================

/// 初始化会话：根据持久化令牌恢复登录状态
pub fn init_session(ctx: SessionContext, api: WebApi) {
    spawn_local(async move {
        let user = restore_session(&api).await;
        ctx.set_state.set(SessionState {
            user,
            is_loading: false,
        });
    });
}

/// 登录并写入会话状态
///
/// 注意：不需要手动导航，路由服务会监听会话变化并自动重定向。
pub async fn login(ctx: SessionContext, api: &WebApi, credentials: &LoginRequest) -> ApiResult<()> {
    let user = authenticate(api, credentials).await?;
    ctx.set_state.set(SessionState {
        user: Some(user),
        is_loading: false,
    });
    Ok(())
}

/// 登出并清空会话状态
pub fn logout(ctx: SessionContext, api: &WebApi) {
    clear_session(api);
    ctx.set_state.set(SessionState {
        user: None,
        is_loading: false,
    });
}

// =========================================================
// 网关事件桥接
// =========================================================

/// 网关会话事件的浏览器实现
///
/// 401 或缺失令牌时清空会话状态；
/// 路由服务随即把受保护页面重定向到登录页（携带回跳参数）。
#[derive(Clone, Copy)]
pub struct AppSessionEvents {
    set_state: WriteSignal<SessionState>,
}

impl AppSessionEvents {
    pub fn new(ctx: &SessionContext) -> Self {
        Self {
            set_state: ctx.set_state,
        }
    }
}

impl SessionEvents for AppSessionEvents {
    fn session_expired(&self) {
        self.set_state.try_set(SessionState {
            user: None,
            is_loading: false,
        });
    }
}

#[cfg(test)]
mod tests;
