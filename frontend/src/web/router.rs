//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 守卫 -> 处理 -> 加载"的导航流程。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::{
    AppRoute, GuardDecision, GuardVerdict, SessionGate, from_param, guard_route,
    login_path_with_from,
};

// =========================================================
// History API 封装
// =========================================================

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 获取当前查询串（登录页回跳参数用）
fn current_query() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

/// 推送历史状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换历史状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

// =========================================================
// 路由服务
// =========================================================

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 会话快照以信号的形式注入，路由层不直接依赖会话模块。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    /// 会话快照（注入的信号，实现解耦）
    gate: Signal<SessionGate>,
}

impl RouterService {
    /// 创建路由服务（从当前浏览器地址初始化）
    fn new(gate: Signal<SessionGate>) -> Self {
        let initial_route = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            gate,
        }
    }

    /// 当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 会话快照信号
    pub fn gate(&self) -> Signal<SessionGate> {
        self.gate
    }

    /// **核心方法：导航到指定路径**
    pub fn navigate(&self, path: &str) {
        self.apply_navigation(path, true);
    }

    /// 执行导航
    ///
    /// * `use_push` - true 使用 pushState，false 使用 replaceState
    fn apply_navigation(&self, path: &str, use_push: bool) {
        let target_route = AppRoute::from_path(path);
        let gate = self.gate.get_untracked();

        // --- Step 1: 守卫判定 ---
        if let GuardVerdict::Decided(GuardDecision::RedirectToLogin { from }) =
            guard_route(&target_route, gate)
        {
            web_sys::console::log_1(&"[Router] Access denied. Redirecting to login.".into());
            let login_path = login_path_with_from(&from);
            if use_push {
                push_history_state(&login_path);
            } else {
                replace_history_state(&login_path);
            }
            self.set_route.set(AppRoute::Login);
            return;
        }

        // 已认证用户访问登录/注册页时直接送往控制台
        if target_route.should_redirect_when_authenticated()
            && !gate.is_loading
            && gate.is_authenticated
        {
            web_sys::console::log_1(
                &"[Router] Already authenticated. Redirecting to dashboard.".into(),
            );
            let redirect = AppRoute::auth_success_redirect();
            if use_push {
                push_history_state(&redirect.to_path());
            } else {
                replace_history_state(&redirect.to_path());
            }
            self.set_route.set(redirect);
            return;
        }

        // --- Step 2: 加载页面 (更新状态) ---
        // 原样推入请求的路径，保留查询串（例如登录页的回跳参数）
        if use_push {
            push_history_state(path);
        } else {
            replace_history_state(path);
        }
        self.set_route.set(target_route);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let gate = self.gate;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target_route = AppRoute::from_path(&current_path());

            // 历史记录导航同样要过守卫
            if let GuardVerdict::Decided(GuardDecision::RedirectToLogin { from }) =
                guard_route(&target_route, gate.get_untracked())
            {
                replace_history_state(&login_path_with_from(&from));
                set_route.set(AppRoute::Login);
            } else {
                set_route.set(target_route);
            }
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器在整个应用生命周期内存活
        closure.forget();
    }

    /// 会话状态变化时的自动重定向
    ///
    /// - 会话恢复完成且未认证：受保护页面重定向到登录页（携带回跳参数）
    /// - 登录成功：离开登录/注册页，优先返回被拦截的原始页面
    fn setup_session_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let gate = self.gate;

        Effect::new(move |_| {
            let gate = gate.get();
            // 恢复期间不做任何跳转（守卫处于 Checking）
            if gate.is_loading {
                return;
            }

            let route = current_route.get_untracked();

            if gate.is_authenticated {
                if route.should_redirect_when_authenticated() {
                    let target = from_param(&current_query())
                        .unwrap_or_else(|| AppRoute::auth_success_redirect().to_path());
                    web_sys::console::log_1(
                        &format!("[Router] Session active. Redirecting to {}", target).into(),
                    );
                    push_history_state(&target);
                    set_route.set(AppRoute::from_path(&target));
                }
            } else if let GuardVerdict::Decided(GuardDecision::RedirectToLogin { from }) =
                guard_route(&route, gate)
            {
                web_sys::console::log_1(&"[Router] Session ended. Redirecting to login.".into());
                replace_history_state(&login_path_with_from(&from));
                set_route.set(AppRoute::Login);
            }
        });
    }
}

// =========================================================
// Context 集成
// =========================================================

/// 创建路由服务、挂载监听器并注入 Context
fn provide_router(gate: Signal<SessionGate>) -> RouterService {
    let router = RouterService::new(gate);

    router.init_popstate_listener();
    router.setup_session_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 会话快照信号
    gate: Signal<SessionGate>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(gate);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件；
/// 受保护路由在会话恢复完成前渲染占位动画。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        match guard_route(&current, router.gate().get()) {
            GuardVerdict::Public | GuardVerdict::Decided(GuardDecision::Render) => matcher(current),
            // Checking 或等待重定向生效期间显示占位动画
            _ => view! {
                <div class="flex items-center justify-center min-h-screen bg-base-200">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            }
            .into_any(),
        }
    }
}
