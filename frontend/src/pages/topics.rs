use leptos::*;

use crate::{
    api::CreateTopicRequest,
    components::{
        layout::{Header, LoadingSpinner},
        login_modal::LoginModal,
    },
    state::auth::use_auth,
};

/// Discussion-theme page: everyone sees the current topic, admins set
/// the next one.
#[component]
pub fn TopicsPage() -> impl IntoView {
    let auth = use_auth();
    let api = auth.api().clone();
    let user = auth.user();
    let is_admin = create_memo(move |_| {
        user.get().map(|u| u.is_admin()).unwrap_or(false)
    });

    let topic = create_resource(
        || (),
        {
            let api = api.clone();
            move |_| {
                let api = api.clone();
                async move { api.fetch_topic().await.ok() }
            }
        },
    );

    let title = create_rw_signal(String::new());
    let description = create_rw_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);

    let on_submit = {
        let api = api.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let title_value = title.get_untracked();
            let description_value = description.get_untracked();
            if title_value.trim().is_empty() {
                set_error.set(Some("タイトルを入力してください".to_string()));
                return;
            }
            let api = api.clone();
            set_error.set(None);
            spawn_local(async move {
                match api
                    .create_topic(&CreateTopicRequest {
                        title: title_value,
                        description: description_value,
                    })
                    .await
                {
                    Ok(_) => {
                        title.set(String::new());
                        description.set(String::new());
                        topic.refetch();
                    }
                    Err(err) => set_error.set(Some(err.message().to_string())),
                }
            });
        }
    };

    view! {
        <div class="min-h-screen bg-surface">
            <Header/>
            <main class="max-w-3xl mx-auto px-4 sm:px-6 lg:px-8 py-8 space-y-8">
                <section>
                    <h1 class="text-xl font-semibold text-fg mb-4">"今週のトークテーマ"</h1>
                    {move || match topic.get() {
                        None => view! { <LoadingSpinner/> }.into_view(),
                        Some(Some(topic)) => view! {
                            <div class="bg-surface-elevated rounded-xl border border-border p-6">
                                <h2 class="text-lg font-bold text-fg">{topic.title}</h2>
                                <p class="mt-2 text-sm text-fg-muted">{topic.description}</p>
                            </div>
                        }
                        .into_view(),
                        Some(None) => view! {
                            <p class="text-fg-muted">"トークテーマはまだ設定されていません"</p>
                        }
                        .into_view(),
                    }}
                </section>
                <Show when=move || is_admin.get()>
                    <section class="bg-surface-elevated rounded-xl border border-border p-6">
                        <h2 class="text-lg font-semibold text-fg mb-4">"テーマを設定する"</h2>
                        <form class="space-y-3" on:submit=on_submit.clone()>
                            <input
                                type="text"
                                class="w-full rounded-md border border-border px-3 py-2 text-sm"
                                placeholder="タイトル"
                                on:input=move |ev| title.set(event_target_value(&ev))
                                prop:value=move || title.get()
                            />
                            <textarea
                                class="w-full rounded-md border border-border px-3 py-2 text-sm min-h-[6rem]"
                                placeholder="説明"
                                on:input=move |ev| description.set(event_target_value(&ev))
                                prop:value=move || description.get()
                            ></textarea>
                            <Show when=move || error.get().is_some()>
                                <p class="text-sm text-status-error-text">
                                    {move || error.get().unwrap_or_default()}
                                </p>
                            </Show>
                            <div class="flex justify-end">
                                <button
                                    type="submit"
                                    class="px-4 py-2 rounded-md text-sm bg-action-primary-bg text-text-inverse"
                                >
                                    "作成"
                                </button>
                            </div>
                        </form>
                    </section>
                </Show>
            </main>
            <LoginModal/>
        </div>
    }
}
