use leptos::*;

use crate::{
    api::Article,
    state::auth::{pending_action, use_auth},
};

/// Like / MVP buttons. Both are gated: an anonymous click queues the
/// reaction as a pending action and opens the login prompt, so the
/// reaction lands right after a successful login without another click.
#[component]
pub fn LikeMvpButtonBar(article: RwSignal<Article>) -> impl IntoView {
    let auth = use_auth();
    let (message, set_message) = create_signal(None::<String>);

    let run_like = {
        let api = auth.api().clone();
        move || {
            let api = api.clone();
            async move {
                let id = article.get_untracked().id;
                match api.add_like(id).await {
                    Ok(updated) => article.set(updated),
                    Err(err) => set_message.set(Some(err.message().to_string())),
                }
            }
        }
    };
    let run_mvp = {
        let api = auth.api().clone();
        move || {
            let api = api.clone();
            async move {
                let id = article.get_untracked().id;
                match api.add_mvp(id).await {
                    Ok(updated) => article.set(updated),
                    // the MVP cap message comes from the server verbatim
                    Err(err) => set_message.set(Some(err.message().to_string())),
                }
            }
        }
    };

    let on_like = {
        let auth = auth.clone();
        let run_like = run_like.clone();
        move |_| {
            if auth.current_user().is_some() {
                spawn_local(run_like());
            } else {
                auth.set_pending_action(Some(pending_action(run_like.clone())));
                auth.open_login_modal();
            }
        }
    };
    let on_mvp = {
        let auth = auth.clone();
        let run_mvp = run_mvp.clone();
        move |_| {
            if auth.current_user().is_some() {
                spawn_local(run_mvp());
            } else {
                auth.set_pending_action(Some(pending_action(run_mvp.clone())));
                auth.open_login_modal();
            }
        }
    };

    view! {
        <div class="flex items-center gap-3">
            <button
                class="flex items-center gap-1 px-4 py-2 rounded-full border border-border text-sm text-fg-muted hover:text-fg hover:bg-surface-muted"
                on:click=on_like
            >
                <span>"いいね"</span>
                <span class="font-semibold">{move || article.get().like_count}</span>
            </button>
            <button
                class="flex items-center gap-1 px-4 py-2 rounded-full border border-border text-sm text-fg-muted hover:text-fg hover:bg-surface-muted"
                on:click=on_mvp
            >
                <span>"MVP"</span>
                <span class="font-semibold">{move || article.get().stock_count}</span>
            </button>
            <Show when=move || message.get().is_some()>
                <span class="text-sm text-status-error-text">
                    {move || message.get().unwrap_or_default()}
                </span>
            </Show>
        </div>
    }
}
