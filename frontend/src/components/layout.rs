use leptos::*;

use crate::{
    api::Topic,
    state::auth::use_auth,
};

#[component]
pub fn Header(#[prop(optional_no_strip)] topic: Option<Topic>) -> impl IntoView {
    let auth = use_auth();
    let user = auth.user();
    let logout_auth = auth.clone();
    let on_logout = move |_| {
        let auth = logout_auth.clone();
        spawn_local(async move {
            if auth.logout().await.is_ok() {
                if let Some(win) = web_sys::window() {
                    let _ = win.location().set_href("/");
                }
            }
        });
    };

    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-5xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <div class="flex items-center gap-4">
                        <a href="/" class="text-xl font-semibold text-fg">"knowme"</a>
                        {topic.map(|topic| view! {
                            <span class="hidden sm:inline text-sm text-fg-muted px-3 py-1 rounded-full bg-surface-muted">
                                {"今週のテーマ: "}{topic.title}
                            </span>
                        })}
                    </div>
                    <nav class="flex items-center space-x-3">
                        <a href="/articles/new" class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium">
                            "記事を書く"
                        </a>
                        <Show
                            when=move || user.get().is_some()
                            fallback=|| view! {
                                <a href="/login" class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium">
                                    "ログイン"
                                </a>
                                <a href="/signup" class="bg-action-primary-bg text-text-inverse px-3 py-2 rounded-md text-sm font-medium">
                                    "新規登録"
                                </a>
                            }
                        >
                            <span class="text-sm text-fg">
                                {move || user.get().map(|u| u.username).unwrap_or_default()}
                            </span>
                            <button
                                class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium"
                                on:click=on_logout.clone()
                            >
                                "ログアウト"
                            </button>
                        </Show>
                    </nav>
                </div>
            </div>
        </header>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center py-12">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}

#[component]
pub fn ErrorMessage(message: String) -> impl IntoView {
    view! {
        <div class="rounded-md bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 text-sm">
            {message}
        </div>
    }
}
