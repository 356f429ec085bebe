use crate::api::use_api;
use crate::components::icons::GraduationCap;
use crate::session::{self, use_session};
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use rollbook_shared::LoginRequest;

#[component]
pub fn LoginPage() -> impl IntoView {
    let session_ctx = use_session();
    let router = use_router();
    let api = use_api();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // While the stored token is still being verified we show a spinner;
    // if it turns out valid the router redirects away from this page.
    let is_loading = move || session_ctx.state.get().is_loading;

    view! {
        <Show when=move || !is_loading() fallback=|| view! { <div class="flex items-center justify-center min-h-screen"><span class="loading loading-spinner loading-lg text-primary"></span></div> }>
            {
                let api = api.clone();
                let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
                    ev.prevent_default();
                    if email.get().is_empty() || password.get().is_empty() {
                        set_error_msg.set(Some("Please fill in all fields".to_string()));
                        return;
                    }

                    set_is_submitting.set(true);
                    set_error_msg.set(None);

                    let api = api.clone();
                    spawn_local(async move {
                        let credentials = LoginRequest {
                            email: email.get_untracked().trim().to_string(),
                            password: password.get_untracked(),
                        };
                        // 登录成功后不在此处跳转：路由层监听会话状态，
                        // 并按 ?from= 参数回到登录前的页面。
                        if let Err(e) = session::login(session_ctx, &api, &credentials).await {
                            set_error_msg.try_set(Some(e.user_message()));
                        }
                        set_is_submitting.try_set(false);
                    });
                };

                view! {
                    <div class="hero min-h-screen bg-base-200">
                        <div class="hero-content flex-col w-full max-w-md">
                            <div class="text-center mb-4">
                                <div class="flex flex-col items-center gap-2">
                                    <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                                        <GraduationCap attr:class="h-8 w-8" />
                                    </div>
                                    <h1 class="text-3xl font-bold">"RollBook"</h1>
                                    <p class="text-base-content/70">
                                        "Sign in to manage student records"
                                    </p>
                                </div>
                            </div>

                            <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                                <form class="card-body" on:submit=on_submit>
                                    <Show when=move || error_msg.get().is_some()>
                                        <div role="alert" class="alert alert-error text-sm py-2">
                                            <svg xmlns="http://www.w3.org/2000/svg" class="stroke-current shrink-0 h-6 w-6" fill="none" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M10 14l2-2m0 0l2-2m-2 2l-2-2m2 2l2 2m7-2a9 9 0 11-18 0 9 9 0 0118 0z" /></svg>
                                            <span>{move || error_msg.get().unwrap()}</span>
                                        </div>
                                    </Show>

                                    <div class="form-control">
                                        <label class="label" for="email">
                                            <span class="label-text">"Email"</span>
                                        </label>
                                        <input
                                            id="email"
                                            type="email"
                                            placeholder="you@school.edu"
                                            on:input=move |ev| set_email.set(event_target_value(&ev))
                                            prop:value=email
                                            class="input input-bordered"
                                            required
                                        />
                                    </div>
                                    <div class="form-control">
                                        <label class="label" for="password">
                                            <span class="label-text">"Password"</span>
                                        </label>
                                        <input
                                            id="password"
                                            type="password"
                                            placeholder="••••••••"
                                            on:input=move |ev| set_password.set(event_target_value(&ev))
                                            prop:value=password
                                            class="input input-bordered"
                                            required
                                        />
                                    </div>
                                    <div class="form-control mt-6">
                                        <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                            {move || if is_submitting.get() {
                                                view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                            } else {
                                                "Sign in".into_any()
                                            }}
                                        </button>
                                    </div>
                                    <p class="text-center text-sm text-base-content/70 mt-2">
                                        "No account yet? "
                                        <a
                                            class="link link-primary"
                                            on:click=move |_| router.navigate(&AppRoute::Register.to_path())
                                        >
                                            "Register"
                                        </a>
                                    </p>
                                </form>
                            </div>
                        </div>
                    </div>
                }
            }
        </Show>
    }
}
