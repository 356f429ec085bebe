//! 全局通知
//!
//! 顶部浮动的成功/错误提示，展示一段时间后自动消失。
//! 新通知直接覆盖旧通知。

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

/// 自动消失时间（毫秒）
const DISMISS_AFTER_MS: u32 = 3_000;

/// 一条通知
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub message: String,
    pub is_error: bool,
}

/// 通知上下文
#[derive(Clone, Copy)]
pub struct NotifyContext {
    current: ReadSignal<Option<Notice>>,
    set_current: WriteSignal<Option<Notice>>,
}

impl NotifyContext {
    pub fn new() -> Self {
        let (current, set_current) = signal(None);
        Self {
            current,
            set_current,
        }
    }

    /// 推送成功提示
    pub fn success(&self, message: impl Into<String>) {
        self.push(message.into(), false);
    }

    /// 推送错误提示
    pub fn error(&self, message: impl Into<String>) {
        self.push(message.into(), true);
    }

    fn push(&self, message: String, is_error: bool) {
        self.set_current.set(Some(Notice { message, is_error }));

        // 到时自动清除；期间若有新通知，内容已被覆盖，
        // 旧定时器只是让展示提前结束
        let set_current = self.set_current;
        Timeout::new(DISMISS_AFTER_MS, move || {
            set_current.try_set(None);
        })
        .forget();
    }
}

impl Default for NotifyContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取通知上下文
pub fn use_notify() -> NotifyContext {
    use_context::<NotifyContext>()
        .expect("NotifyContext not found in context. Ensure App provides it.")
}

/// 通知宿主组件（挂在 App 根部）
#[component]
pub fn NoticeHost() -> impl IntoView {
    let notify = use_notify();
    let current = notify.current;

    view! {
        <Show when=move || current.get().is_some()>
            <div class="toast toast-top toast-end z-50">
                <div class=move || {
                    if current.get().map(|n| n.is_error).unwrap_or(false) {
                        "alert alert-error shadow-lg"
                    } else {
                        "alert alert-success shadow-lg"
                    }
                }>
                    <span>{move || current.get().map(|n| n.message).unwrap_or_default()}</span>
                </div>
            </div>
        </Show>
    }
}
