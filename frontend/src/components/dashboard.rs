//! 控制台骨架与总览页

use crate::api::use_api;
use crate::components::icons::*;
use crate::session::{self, use_session};
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 受保护页面的公共骨架：顶栏 + 侧边导航 + 内容区
#[component]
pub fn DashboardShell(children: Children) -> impl IntoView {
    let session_ctx = use_session();
    let router = use_router();
    let api = use_api();

    let user_name = move || {
        session_ctx.state.with(|s| {
            s.user
                .as_ref()
                .map(|u| u.name.clone())
                .unwrap_or_default()
        })
    };

    let on_logout = move |_| {
        session::logout(session_ctx, &api);
        router.navigate(&AppRoute::Login.to_path());
    };

    // 侧边栏高亮：编辑/新增学生同属学生管理
    let at_overview = move || matches!(router.current_route().get(), AppRoute::Dashboard);
    let at_students = move || {
        matches!(
            router.current_route().get(),
            AppRoute::Students | AppRoute::StudentAdd | AppRoute::StudentEdit(_)
        )
    };
    let at_courses = move || matches!(router.current_route().get(), AppRoute::Courses);
    let at_reports = move || matches!(router.current_route().get(), AppRoute::Reports);
    let at_settings = move || matches!(router.current_route().get(), AppRoute::Settings);

    view! {
        <div class="min-h-screen bg-base-200 font-sans">
            <div class="navbar bg-base-100 shadow-md px-4">
                <div class="flex-1 gap-2">
                    <GraduationCap attr:class="text-primary h-6 w-6" />
                    <a
                        class="btn btn-ghost text-xl"
                        on:click=move |_| router.navigate(&AppRoute::Dashboard.to_path())
                    >
                        "RollBook 管理台"
                    </a>
                </div>
                <div class="flex-none gap-2">
                    <span class="badge badge-neutral hidden md:inline-flex">{user_name}</span>
                    <button on:click=on_logout class="btn btn-outline btn-error btn-sm gap-2">
                        <LogOut attr:class="h-4 w-4" /> "退出登录"
                    </button>
                </div>
            </div>

            <div class="max-w-7xl mx-auto flex items-start gap-6 p-4 md:p-8">
                <aside class="hidden lg:block w-56 shrink-0">
                    <ul class="menu bg-base-100 rounded-box shadow-xl w-full gap-1">
                        <li>
                            <a
                                class:active=at_overview
                                on:click=move |_| router.navigate(&AppRoute::Dashboard.to_path())
                            >
                                <LayoutDashboard attr:class="h-4 w-4" /> "总览"
                            </a>
                        </li>
                        <li>
                            <a
                                class:active=at_students
                                on:click=move |_| router.navigate(&AppRoute::Students.to_path())
                            >
                                <Users attr:class="h-4 w-4" /> "学生管理"
                            </a>
                        </li>
                        <li>
                            <a
                                class:active=at_courses
                                on:click=move |_| router.navigate(&AppRoute::Courses.to_path())
                            >
                                <BookOpen attr:class="h-4 w-4" /> "课程"
                            </a>
                        </li>
                        <li>
                            <a
                                class:active=at_reports
                                on:click=move |_| router.navigate(&AppRoute::Reports.to_path())
                            >
                                <BarChart3 attr:class="h-4 w-4" /> "报表"
                            </a>
                        </li>
                        <li>
                            <a
                                class:active=at_settings
                                on:click=move |_| router.navigate(&AppRoute::Settings.to_path())
                            >
                                <Settings attr:class="h-4 w-4" /> "设置"
                            </a>
                        </li>
                    </ul>
                </aside>

                <main class="flex-1 min-w-0 space-y-6">{children()}</main>
            </div>
        </div>
    }
}

/// 控制台总览页
#[component]
pub fn OverviewPage() -> impl IntoView {
    let router = use_router();
    let api = use_api();

    // None 表示仍在加载；统计失败时保持占位，不打断页面
    let (student_count, set_student_count) = signal(Option::<usize>::None);

    spawn_local(async move {
        if let Ok(list) = api.list_students().await {
            set_student_count.try_set(Some(list.len()));
        }
    });

    view! {
        <div class="space-y-6">
            <div>
                <h2 class="text-2xl font-bold">"总览"</h2>
                <p class="text-base-content/70 text-sm">"学生档案系统运行概况。"</p>
            </div>

            <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                <div class="stat">
                    <div class="stat-figure text-primary">
                        <Users attr:class="inline-block w-8 h-8" />
                    </div>
                    <div class="stat-title">"在册学生"</div>
                    <div class="stat-value text-primary">
                        {move || match student_count.get() {
                            Some(count) => count.to_string().into_any(),
                            None => view! { <span class="loading loading-dots loading-md"></span> }
                                .into_any(),
                        }}
                    </div>
                </div>

                <div class="stat">
                    <div class="stat-figure text-success">
                        <svg xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24" class="inline-block w-8 h-8 stroke-current"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M9 12l2 2 4-4m6 2a9 9 0 11-18 0 9 9 0 0118 0z"></path></svg>
                    </div>
                    <div class="stat-title">"系统状态"</div>
                    <div class="stat-value text-success">"运行中"</div>
                </div>

                <div class="stat">
                    <div class="stat-title">"数据来源"</div>
                    <div class="stat-value text-secondary text-2xl">"远端 API"</div>
                    <div class="stat-desc">"所有变更实时同步"</div>
                </div>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h3 class="card-title">"快捷入口"</h3>
                    <p class="text-base-content/70 text-sm">"常用操作。"</p>
                    <div class="card-actions mt-2">
                        <button
                            class="btn btn-primary gap-2"
                            on:click=move |_| router.navigate(&AppRoute::Students.to_path())
                        >
                            <Users attr:class="h-4 w-4" /> "学生管理"
                        </button>
                        <button
                            class="btn btn-outline gap-2"
                            on:click=move |_| router.navigate(&AppRoute::StudentAdd.to_path())
                        >
                            <Plus attr:class="h-4 w-4" /> "添加学生"
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
