use leptos::*;

use crate::state::auth::use_auth;

/// Inline login prompt shown over the current page when a gated action
/// needs a session. A successful login lets the facade resume the
/// queued action; dismissing abandons it.
#[component]
pub fn LoginModal() -> impl IntoView {
    let auth = use_auth();
    let visible = auth.login_modal_visible();
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = {
        let auth = auth.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            if submitting.get_untracked() {
                return;
            }
            let auth = auth.clone();
            set_submitting.set(true);
            set_error.set(None);
            spawn_local(async move {
                let result = auth
                    .login(&email.get_untracked(), &password.get_untracked())
                    .await;
                set_submitting.set(false);
                if let Err(err) = result {
                    set_error.set(Some(err.message().to_string()));
                }
                // on success the facade closes the prompt itself
            });
        }
    };
    let on_close = {
        let auth = auth.clone();
        move |_| auth.close_login_modal()
    };

    view! {
        <Show when=move || visible.get()>
            <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/40">
                <div class="bg-surface-elevated rounded-2xl shadow-xl w-full max-w-sm p-6">
                    <h2 class="text-lg font-semibold text-fg">"ログインが必要です"</h2>
                    <p class="mt-1 text-sm text-fg-muted">
                        "続行するにはログインしてください"
                    </p>
                    <form class="mt-4 space-y-3" on:submit=on_submit.clone()>
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
                        <div class="flex justify-end gap-2 pt-2">
                            <button
                                type="button"
                                class="px-4 py-2 rounded-md text-sm text-fg-muted hover:bg-surface-muted"
                                on:click=on_close.clone()
                            >
                                "キャンセル"
                            </button>
                            <button
                                type="submit"
                                class="px-4 py-2 rounded-md text-sm bg-action-primary-bg text-text-inverse disabled:opacity-50"
                                disabled=move || submitting.get()
                            >
                                "ログイン"
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </Show>
    }
}
