//! 学生列表页：搜索过滤、手动刷新、删除确认

use crate::api::use_api;
use crate::components::icons::*;
use crate::notify::use_notify;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use rollbook_shared::StudentRecord;
use rollbook_shared::filter::filter_students;

mod fetch_gate;

use fetch_gate::FetchGate;

#[component]
pub fn StudentsPage() -> impl IntoView {
    let router = use_router();
    let notify = use_notify();
    let api = use_api();

    let (students, set_students) = signal(Vec::<StudentRecord>::new());
    let (loading, set_loading) = signal(true);
    let (search_term, set_search_term) = signal(String::new());
    // 待确认删除的学生 (id, 姓名)
    let (pending_delete, set_pending_delete) = signal(Option::<(String, String)>::None);
    let (deleting, set_deleting) = signal(false);

    let gate = FetchGate::new();

    let load_students = {
        let gate = gate.clone();
        let api = api.clone();
        move || {
            let seq = gate.issue();
            let gate = gate.clone();
            let api = api.clone();
            set_loading.set(true);
            spawn_local(async move {
                let result = api.list_students().await;
                // 迟到的旧响应直接丢弃，不覆盖更新的数据
                if !gate.admit(seq) {
                    return;
                }
                match result {
                    Ok(list) => {
                        set_students.try_set(list);
                    }
                    Err(e) => {
                        set_students.try_set(Vec::new());
                        notify.error(format!("加载学生列表失败: {}", e.user_message()));
                    }
                }
                set_loading.try_set(false);
            });
        }
    };

    // 初始加载
    load_students();

    let refresh = load_students.clone();
    let reload_after_delete = load_students.clone();

    let confirm_delete = {
        let api = api.clone();
        move |_| {
            let Some((id, _)) = pending_delete.get_untracked() else {
                return;
            };
            set_deleting.set(true);
            let api = api.clone();
            let reload = reload_after_delete.clone();
            spawn_local(async move {
                match api.delete_student(&id).await {
                    Ok(()) => {
                        notify.success("学生已删除");
                        // 不在本地移除行，重新拉取列表，远端是唯一事实来源
                        reload();
                    }
                    Err(e) => {
                        notify.error(format!("删除学生失败: {}", e.user_message()));
                    }
                }
                set_deleting.try_set(false);
                set_pending_delete.try_set(None);
            });
        }
    };

    // 过滤后的可见列表（姓名或课程包含搜索词，不区分大小写）
    let filtered =
        move || students.with(|list| search_term.with(|term| filter_students(list, term)));
    let total = move || students.with(|list| list.len());
    let visible = move || filtered().len();

    // 确认对话框随待删除项的有无开合
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();
    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if pending_delete.get().is_some() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    view! {
        <div class="space-y-6">
            <div class="flex flex-col md:flex-row md:items-center md:justify-between gap-4">
                <div>
                    <h2 class="text-2xl font-bold">"学生管理"</h2>
                    <p class="text-base-content/70 text-sm">
                        {move || format!("共 {} 名学生，当前显示 {} 名", total(), visible())}
                    </p>
                </div>
                <button
                    class="btn btn-primary gap-2"
                    on:click=move |_| router.navigate(&AppRoute::StudentAdd.to_path())
                >
                    <Plus attr:class="h-4 w-4" /> "添加学生"
                </button>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <div class="flex flex-col md:flex-row md:items-center gap-4 p-6 pb-2">
                        <label class="input input-bordered flex items-center gap-2 w-full md:w-72">
                            <Search attr:class="h-4 w-4 opacity-50" />
                            <input
                                type="text"
                                class="grow"
                                placeholder="按姓名或课程搜索..."
                                on:input=move |ev| set_search_term.set(event_target_value(&ev))
                                prop:value=search_term
                            />
                        </label>
                        <div class="md:ml-auto">
                            <button
                                on:click=move |_| refresh()
                                disabled=move || loading.get()
                                class="btn btn-ghost btn-circle"
                            >
                                <RefreshCw attr:class=move || if loading.get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                            </button>
                        </div>
                    </div>

                    <div class="overflow-x-auto w-full">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"姓名"</th>
                                    <th>"邮箱"</th>
                                    <th>"课程"</th>
                                    <th>"年龄"</th>
                                    <th class="hidden md:table-cell">"登记日期"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || loading.get() && total() == 0>
                                    <tr>
                                        <td colspan="6" class="text-center py-8 text-base-content/50">
                                            <span class="loading loading-spinner loading-md"></span> " 加载中..."
                                        </td>
                                    </tr>
                                </Show>
                                <Show when=move || !loading.get() && total() == 0>
                                    <tr>
                                        <td colspan="6" class="text-center py-8 text-base-content/50">
                                            "暂无学生档案。点击“添加学生”开始。"
                                        </td>
                                    </tr>
                                </Show>
                                <Show when={move || total() > 0 && visible() == 0}>
                                    <tr>
                                        <td colspan="6" class="text-center py-8 text-base-content/50">
                                            "没有匹配的学生。"
                                        </td>
                                    </tr>
                                </Show>
                                <For
                                    each=filtered
                                    key=|s| s.id.clone()
                                    children=move |student| {
                                        let edit_id = student.id.clone();
                                        let delete_target = (student.id.clone(), student.name.clone());
                                        view! {
                                            <tr>
                                                <td>
                                                    <div class="font-bold">{student.name.clone()}</div>
                                                </td>
                                                <td class="font-mono text-sm opacity-70">{student.email.clone()}</td>
                                                <td>
                                                    <div class="badge badge-accent badge-outline">
                                                        {student.course.clone()}
                                                    </div>
                                                </td>
                                                <td>{student.age}</td>
                                                <td class="hidden md:table-cell text-sm opacity-70">
                                                    {student.enrolled_date().unwrap_or_else(|| "-".to_string())}
                                                </td>
                                                <td>
                                                    <div class="dropdown dropdown-end">
                                                        <div tabindex="0" role="button" class="btn btn-ghost btn-sm btn-square">
                                                            <MoreHorizontal attr:class="h-4 w-4" />
                                                        </div>
                                                        <ul tabindex="0" class="dropdown-content z-[1] menu p-2 shadow bg-base-200 rounded-box w-40">
                                                            <li>
                                                                <a on:click=move |_| {
                                                                    router.navigate(&AppRoute::StudentEdit(edit_id.clone()).to_path())
                                                                }>
                                                                    <Pencil attr:class="h-4 w-4" /> "编辑"
                                                                </a>
                                                            </li>
                                                            <li>
                                                                <a
                                                                    class="text-error hover:bg-error/10"
                                                                    on:click=move |_| set_pending_delete.set(Some(delete_target.clone()))
                                                                >
                                                                    <Trash2 attr:class="h-4 w-4" /> "删除"
                                                                </a>
                                                            </li>
                                                        </ul>
                                                    </div>
                                                </td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    </div>
                </div>
            </div>

            // 删除确认对话框
            <dialog class="modal" node_ref=dialog_ref on:close=move |_| set_pending_delete.set(None)>
                <div class="modal-box">
                    <h3 class="font-bold text-lg">"删除学生"</h3>
                    <p class="py-4">
                        {move || {
                            pending_delete
                                .get()
                                .map(|(_, name)| format!("确定要删除「{}」的档案吗？此操作不可恢复。", name))
                                .unwrap_or_default()
                        }}
                    </p>
                    <div class="modal-action">
                        <button
                            type="button"
                            class="btn btn-ghost"
                            disabled=move || deleting.get()
                            on:click=move |_| set_pending_delete.set(None)
                        >
                            "取消"
                        </button>
                        <button
                            type="button"
                            class="btn btn-error"
                            disabled=move || deleting.get()
                            on:click=confirm_delete
                        >
                            {move || if deleting.get() {
                                view! { <span class="loading loading-spinner"></span> "删除中..." }.into_any()
                            } else {
                                "确认删除".into_any()
                            }}
                        </button>
                    </div>
                </div>
                <form method="dialog" class="modal-backdrop">
                    <button>"close"</button>
                </form>
            </dialog>
        </div>
    }
}
