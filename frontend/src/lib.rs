//! RollBook 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `gateway` / `api`: 请求网关与学生档案 API 客户端
//! - `session`: 会话状态管理
//! - `components`: UI 组件层

mod api;
mod components {
    pub mod dashboard;
    pub mod home;
    mod icons;
    pub mod login;
    pub mod placeholder;
    pub mod register;
    pub mod student_form;
    pub mod students;
}
mod config;
mod error;
mod gateway;
mod notify;
mod session;

use leptos::prelude::*;

// 浏览器环境封装模块
// 路由、存储与 HTTP 的浏览器侧实现都集中在此，
// 其余模块只面向其中的 trait 与纯逻辑类型。
pub(crate) mod web {
    pub mod http;
    pub mod route;
    pub mod router;
    pub mod storage;
}

use crate::api::WebApi;
use crate::components::dashboard::{DashboardShell, OverviewPage};
use crate::components::home::HomePage;
use crate::components::login::LoginPage;
use crate::components::placeholder::PlaceholderPage;
use crate::components::register::RegisterPage;
use crate::components::student_form::StudentFormPage;
use crate::components::students::StudentsPage;
use crate::config::AppConfig;
use crate::notify::{NoticeHost, NotifyContext};
use crate::session::{AppSessionEvents, SessionContext, init_session};
use crate::web::route::AppRoute;
use crate::web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件；
/// 受保护页面统一包在控制台骨架里。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Dashboard => view! {
            <DashboardShell>
                <OverviewPage />
            </DashboardShell>
        }
        .into_any(),
        AppRoute::Students => view! {
            <DashboardShell>
                <StudentsPage />
            </DashboardShell>
        }
        .into_any(),
        AppRoute::StudentAdd => view! {
            <DashboardShell>
                <StudentFormPage />
            </DashboardShell>
        }
        .into_any(),
        AppRoute::StudentEdit(id) => view! {
            <DashboardShell>
                <StudentFormPage student_id=id />
            </DashboardShell>
        }
        .into_any(),
        AppRoute::Courses => view! {
            <DashboardShell>
                <PlaceholderPage title="课程" />
            </DashboardShell>
        }
        .into_any(),
        AppRoute::Reports => view! {
            <DashboardShell>
                <PlaceholderPage title="报表" />
            </DashboardShell>
        }
        .into_any(),
        AppRoute::Settings => view! {
            <DashboardShell>
                <PlaceholderPage title="设置" />
            </DashboardShell>
        }
        .into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"页面未找到"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建会话与通知上下文
    let session_ctx = SessionContext::new();
    provide_context(session_ctx);
    let notify_ctx = NotifyContext::new();
    provide_context(notify_ctx);

    // 2. 构建 API 客户端（服务地址来自编译期配置）
    let config = AppConfig::load();
    let api = WebApi::browser(&config.api_base_url, AppSessionEvents::new(&session_ctx));
    provide_context(api.clone());

    // 3. 从持久化令牌恢复会话
    init_session(session_ctx, api);

    // 4. 会话快照信号注入路由服务，实现守卫（解耦）
    let gate = session_ctx.gate_signal();

    view! {
        <NoticeHost />
        <Router gate=gate>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
