use leptos::*;

use crate::{
    api::CreateArticleRequest,
    components::{editor::Editor, layout::Header, login_modal::LoginModal},
    state::auth::use_auth,
};

#[component]
pub fn ArticleNewPage() -> impl IntoView {
    let auth = use_auth();
    let api = auth.api().clone();
    let title = create_rw_signal(String::new());
    let body = create_rw_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let title_value = title.get_untracked();
        let body_value = body.get_untracked();
        if title_value.trim().is_empty() || body_value.trim().is_empty() {
            set_error.set(Some("タイトルと本文を入力してください".to_string()));
            return;
        }

        let api = api.clone();
        set_submitting.set(true);
        set_error.set(None);
        spawn_local(async move {
            let result = api
                .create_article(&CreateArticleRequest {
                    title: title_value,
                    body: body_value,
                })
                .await;
            set_submitting.set(false);
            match result {
                Ok(article) => {
                    if let Some(win) = web_sys::window() {
                        let _ = win
                            .location()
                            .set_href(&format!("/articles/{}", article.id));
                    }
                }
                Err(err) => set_error.set(Some(err.message().to_string())),
            }
        });
    };

    view! {
        <div class="min-h-screen bg-surface">
            <Header/>
            <main class="max-w-3xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                <h1 class="text-xl font-semibold text-fg mb-6">"記事を書く"</h1>
                <form class="space-y-4" on:submit=on_submit>
                    <input
                        type="text"
                        class="w-full rounded-xl border border-border bg-surface-elevated px-4 py-3 text-lg font-semibold"
                        placeholder="タイトル"
                        on:input=move |ev| title.set(event_target_value(&ev))
                        prop:value=move || title.get()
                    />
                    <Editor body/>
                    <Show when=move || error.get().is_some()>
                        <p class="text-sm text-status-error-text">
                            {move || error.get().unwrap_or_default()}
                        </p>
                    </Show>
                    <div class="flex justify-end">
                        <button
                            type="submit"
                            class="px-6 py-2 rounded-md text-sm bg-action-primary-bg text-text-inverse disabled:opacity-50"
                            disabled=move || submitting.get()
                        >
                            "投稿する"
                        </button>
                    </div>
                </form>
            </main>
            <LoginModal/>
        </div>
    }
}
