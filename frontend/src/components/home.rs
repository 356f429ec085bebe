//! 落地页（无需登录）

use crate::components::icons::GraduationCap;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    let router = use_router();

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content text-center">
                <div class="max-w-md">
                    <div class="flex justify-center mb-6">
                        <GraduationCap attr:class="h-16 w-16 text-primary" />
                    </div>
                    <h1 class="text-5xl font-bold">"RollBook"</h1>
                    <p class="py-6 text-base-content/70">
                        "学生信息管理控制台。维护学生档案、课程归属与登记记录，"
                        "登录后即可开始管理。"
                    </p>
                    <div class="flex justify-center gap-4">
                        <button
                            class="btn btn-primary"
                            on:click=move |_| router.navigate(&AppRoute::Login.to_path())
                        >
                            "登录"
                        </button>
                        <button
                            class="btn btn-outline"
                            on:click=move |_| router.navigate(&AppRoute::Register.to_path())
                        >
                            "注册账号"
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
