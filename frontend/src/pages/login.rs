use leptos::*;
use leptos_router::use_query_map;

use crate::state::auth::use_auth;

/// Where to land after a successful login. Only same-app paths are
/// honored; anything else falls back to home.
fn post_login_destination(redirect: Option<&str>) -> String {
    match redirect {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path.to_string(),
        _ => "/".to_string(),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let query = use_query_map();
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let auth = auth.clone();
        let destination = post_login_destination(
            query.with_untracked(|q| q.get("redirect").cloned()).as_deref(),
        );
        set_submitting.set(true);
        set_error.set(None);
        spawn_local(async move {
            let result = auth
                .login(&email.get_untracked(), &password.get_untracked())
                .await;
            set_submitting.set(false);
            match result {
                Ok(()) => {
                    if let Some(win) = web_sys::window() {
                        let _ = win.location().set_href(&destination);
                    }
                }
                Err(err) => set_error.set(Some(err.message().to_string())),
            }
        });
    };

    view! {
        <div class="min-h-screen bg-surface flex items-center justify-center px-4">
            <div class="w-full max-w-sm bg-surface-elevated rounded-2xl border border-border shadow-sm p-8">
                <h1 class="text-xl font-semibold text-fg text-center">"ログイン"</h1>
                <form class="mt-6 space-y-4" on:submit=on_submit>
                    <input
                        type="email"
                        class="w-full rounded-md border border-border px-3 py-2 text-sm"
                        placeholder="メールアドレス"
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                        prop:value=email
                    />
                    <input
                        type="password"
                        class="w-full rounded-md border border-border px-3 py-2 text-sm"
                        placeholder="パスワード"
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                        prop:value=password
                    />
                    <Show when=move || error.get().is_some()>
                        <p class="text-sm text-status-error-text">
                            {move || error.get().unwrap_or_default()}
                        </p>
                    </Show>
                    <button
                        type="submit"
                        class="w-full py-2 rounded-md text-sm bg-action-primary-bg text-text-inverse disabled:opacity-50"
                        disabled=move || submitting.get()
                    >
                        "ログイン"
                    </button>
                </form>
                <p class="mt-4 text-center text-sm text-fg-muted">
                    "アカウントをお持ちでない方は "
                    <a href="/signup" class="text-action-primary-bg hover:underline">"新規登録"</a>
                </p>
            </div>
        </div>
    }
}
