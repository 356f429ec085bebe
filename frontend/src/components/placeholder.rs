//! 尚未开放模块的占位页

use leptos::prelude::*;

#[component]
pub fn PlaceholderPage(
    /// 模块标题
    title: &'static str,
) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body items-center text-center py-16">
                <h2 class="card-title text-2xl">{title}</h2>
                <p class="text-base-content/60">"该模块正在建设中，敬请期待。"</p>
            </div>
        </div>
    }
}
