//! 学生表单页（新增 / 编辑共用）

use crate::api::use_api;
use crate::notify::use_notify;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use rollbook_shared::StudentRecord;
use rollbook_shared::protocol::UpdateStudentRequest;

mod form_state;

use form_state::StudentFormState;

#[component]
pub fn StudentFormPage(
    /// 编辑模式下的学生 ID；None 表示新增
    #[prop(optional)]
    student_id: Option<String>,
) -> impl IntoView {
    let router = use_router();
    let notify = use_notify();
    let api = use_api();

    let form = StudentFormState::new();
    let is_edit = student_id.is_some();

    // 编辑模式：先拉取原始档案，提交时只下发变化的字段
    let (original, set_original) = signal(Option::<StudentRecord>::None);
    let (loading_record, set_loading_record) = signal(is_edit);
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    if let Some(id) = student_id {
        let api = api.clone();
        spawn_local(async move {
            match api.get_student(&id).await {
                Ok(record) => {
                    form.fill_from(&record);
                    set_original.try_set(Some(record));
                }
                Err(e) => {
                    set_error_msg.try_set(Some(e.user_message()));
                }
            }
            set_loading_record.try_set(false);
        });
    }

    let on_submit = {
        let api = api.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            // 字段校验不通过时不发起任何请求
            if !form.validate() {
                return;
            }
            set_error_msg.set(None);
            set_is_submitting.set(true);

            let api = api.clone();
            spawn_local(async move {
                let result = if let Some(record) = original.get_untracked() {
                    let patch = form.to_patch(&record);
                    if patch.is_empty() {
                        notify.success("没有需要保存的变更");
                        set_is_submitting.try_set(false);
                        router.navigate(&AppRoute::Students.to_path());
                        return;
                    }
                    let request = UpdateStudentRequest {
                        id: record.id.clone(),
                        patch,
                    };
                    api.update_student(&request).await
                } else {
                    api.create_student(&form.to_create_request()).await
                };

                match result {
                    Ok(()) => {
                        notify.success(if is_edit { "学生档案已更新" } else { "学生已添加" });
                        router.navigate(&AppRoute::Students.to_path());
                    }
                    Err(e) => {
                        // 保持表单内容，允许修正后重试
                        set_error_msg.try_set(Some(e.user_message()));
                    }
                }
                set_is_submitting.try_set(false);
            });
        }
    };

    let submit_disabled = move || {
        is_submitting.get() || loading_record.get() || (is_edit && original.get().is_none())
    };

    view! {
        <div class="space-y-6 max-w-2xl">
            <div>
                <h2 class="text-2xl font-bold">
                    {if is_edit { "编辑学生" } else { "添加学生" }}
                </h2>
                <p class="text-base-content/70 text-sm">
                    {if is_edit { "修改学生档案，仅变化的字段会被保存。" } else { "登记一名新学生。" }}
                </p>
            </div>

            <Show
                when=move || !loading_record.get()
                fallback=|| view! {
                    <div class="flex items-center justify-center py-16">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                }
            >
                <div class="card bg-base-100 shadow-xl">
                    <form class="card-body space-y-2" on:submit=on_submit.clone() novalidate>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <svg xmlns="http://www.w3.org/2000/svg" class="stroke-current shrink-0 h-6 w-6" fill="none" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M10 14l2-2m0 0l2-2m-2 2l-2-2m2 2l2 2m7-2a9 9 0 11-18 0 9 9 0 0118 0z" /></svg>
                                <span>{move || error_msg.get().unwrap()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="name">
                                <span class="label-text">"姓名"</span>
                            </label>
                            <input
                                id="name"
                                type="text"
                                placeholder="张三"
                                on:input=move |ev| form.name.set(event_target_value(&ev))
                                prop:value=form.name
                                class="input input-bordered w-full"
                                class:input-error=move || form.error_for("name").is_some()
                            />
                            <p class="text-error text-xs mt-1">{move || form.error_for("name")}</p>
                        </div>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"邮箱"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="zhang@school.edu"
                                on:input=move |ev| form.email.set(event_target_value(&ev))
                                prop:value=form.email
                                class="input input-bordered w-full"
                                class:input-error=move || form.error_for("email").is_some()
                            />
                            <p class="text-error text-xs mt-1">{move || form.error_for("email")}</p>
                        </div>

                        <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                            <div class="form-control">
                                <label class="label" for="course">
                                    <span class="label-text">"课程"</span>
                                </label>
                                <input
                                    id="course"
                                    type="text"
                                    placeholder="数学"
                                    on:input=move |ev| form.course.set(event_target_value(&ev))
                                    prop:value=form.course
                                    class="input input-bordered w-full"
                                    class:input-error=move || form.error_for("course").is_some()
                                />
                                <p class="text-error text-xs mt-1">{move || form.error_for("course")}</p>
                            </div>
                            <div class="form-control">
                                <label class="label" for="age">
                                    <span class="label-text">"年龄"</span>
                                </label>
                                <input
                                    id="age"
                                    type="number"
                                    min="1"
                                    max="120"
                                    placeholder="18"
                                    on:input=move |ev| form.age.set(event_target_value(&ev))
                                    prop:value=form.age
                                    class="input input-bordered w-full"
                                    class:input-error=move || form.error_for("age").is_some()
                                />
                                <p class="text-error text-xs mt-1">{move || form.error_for("age")}</p>
                            </div>
                        </div>

                        <div class="card-actions justify-end mt-4">
                            <button
                                type="button"
                                class="btn btn-ghost"
                                on:click=move |_| router.navigate(&AppRoute::Students.to_path())
                            >
                                "取消"
                            </button>
                            <button type="submit" class="btn btn-primary" disabled=submit_disabled>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "保存中..." }.into_any()
                                } else if is_edit {
                                    "保存修改".into_any()
                                } else {
                                    "添加学生".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </Show>
        </div>
    }
}
