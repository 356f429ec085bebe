use crate::api::use_api;
use crate::components::icons::GraduationCap;
use crate::notify::use_notify;
use crate::session::{self, use_session};
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use rollbook_shared::RegisterRequest;
use rollbook_shared::validate::{FieldError, validate_registration};

/// 自助注册的账号统一为普通职员，管理员由后台提升
const DEFAULT_ROLE: &str = "staff";

#[component]
pub fn RegisterPage() -> impl IntoView {
    let session_ctx = use_session();
    let router = use_router();
    let notify = use_notify();
    let api = use_api();

    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (errors, set_errors) = signal(Vec::<FieldError>::new());

    let error_for = move |field: &'static str| {
        errors.with(|errs| {
            errs.iter()
                .find(|e| e.field == field)
                .map(|e| e.message.clone())
        })
    };

    let is_loading = move || session_ctx.state.get().is_loading;

    view! {
        <Show when=move || !is_loading() fallback=|| view! { <div class="flex items-center justify-center min-h-screen"><span class="loading loading-spinner loading-lg text-primary"></span></div> }>
            {
                let api = api.clone();
                let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
                    ev.prevent_default();

                    // All checks run locally first; nothing is sent while
                    // the form is invalid (including a password mismatch).
                    let field_errors = validate_registration(
                        name.get().trim(),
                        email.get().trim(),
                        &password.get(),
                        &confirm.get(),
                    );
                    if !field_errors.is_empty() {
                        set_errors.set(field_errors);
                        return;
                    }
                    set_errors.set(Vec::new());
                    set_error_msg.set(None);
                    set_is_submitting.set(true);

                    let api = api.clone();
                    spawn_local(async move {
                        let request = RegisterRequest {
                            name: name.get_untracked().trim().to_string(),
                            email: email.get_untracked().trim().to_string(),
                            password: password.get_untracked(),
                            role: DEFAULT_ROLE.to_string(),
                        };
                        match session::register_account(&api, &request).await {
                            Ok(()) => {
                                notify.success("Account created. Please sign in.");
                                router.navigate(&AppRoute::Login.to_path());
                            }
                            Err(e) => {
                                set_error_msg.try_set(Some(e.user_message()));
                            }
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
                                    <h1 class="text-3xl font-bold">"Create account"</h1>
                                    <p class="text-base-content/70">
                                        "Register to access the RollBook console"
                                    </p>
                                </div>
                            </div>

                            <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                                <form class="card-body" on:submit=on_submit novalidate>
                                    <Show when=move || error_msg.get().is_some()>
                                        <div role="alert" class="alert alert-error text-sm py-2">
                                            <svg xmlns="http://www.w3.org/2000/svg" class="stroke-current shrink-0 h-6 w-6" fill="none" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M10 14l2-2m0 0l2-2m-2 2l-2-2m2 2l2 2m7-2a9 9 0 11-18 0 9 9 0 0118 0z" /></svg>
                                            <span>{move || error_msg.get().unwrap()}</span>
                                        </div>
                                    </Show>

                                    <div class="form-control">
                                        <label class="label" for="name">
                                            <span class="label-text">"Name"</span>
                                        </label>
                                        <input
                                            id="name"
                                            type="text"
                                            placeholder="Jane Doe"
                                            on:input=move |ev| set_name.set(event_target_value(&ev))
                                            prop:value=name
                                            class="input input-bordered"
                                            class:input-error=move || error_for("name").is_some()
                                        />
                                        <p class="text-error text-xs mt-1">{move || error_for("name")}</p>
                                    </div>
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
                                            class:input-error=move || error_for("email").is_some()
                                        />
                                        <p class="text-error text-xs mt-1">{move || error_for("email")}</p>
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
                                            class:input-error=move || error_for("password").is_some()
                                        />
                                        <p class="text-error text-xs mt-1">{move || error_for("password")}</p>
                                    </div>
                                    <div class="form-control">
                                        <label class="label" for="confirm_password">
                                            <span class="label-text">"Confirm password"</span>
                                        </label>
                                        <input
                                            id="confirm_password"
                                            type="password"
                                            placeholder="••••••••"
                                            on:input=move |ev| set_confirm.set(event_target_value(&ev))
                                            prop:value=confirm
                                            class="input input-bordered"
                                            class:input-error=move || error_for("confirm_password").is_some()
                                        />
                                        <p class="text-error text-xs mt-1">{move || error_for("confirm_password")}</p>
                                    </div>
                                    <div class="form-control mt-6">
                                        <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                            {move || if is_submitting.get() {
                                                view! { <span class="loading loading-spinner"></span> "Creating..." }.into_any()
                                            } else {
                                                "Create account".into_any()
                                            }}
                                        </button>
                                    </div>
                                    <p class="text-center text-sm text-base-content/70 mt-2">
                                        "Already registered? "
                                        <a
                                            class="link link-primary"
                                            on:click=move |_| router.navigate(&AppRoute::Login.to_path())
                                        >
                                            "Sign in"
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
