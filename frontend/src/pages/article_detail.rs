use leptos::*;
use leptos_router::use_params_map;

use crate::{
    api::{ApiError, Article},
    components::{
        layout::{ErrorMessage, Header, LoadingSpinner},
        login_modal::LoginModal,
        reactions::LikeMvpButtonBar,
    },
    state::auth::use_auth,
    utils::date::format_created_date,
};

#[component]
pub fn ArticleDetailPage() -> impl IntoView {
    let auth = use_auth();
    let api = auth.api().clone();
    let params = use_params_map();
    let article_id = create_memo(move |_| {
        params.with(|p| p.get("id").and_then(|raw| raw.parse::<i64>().ok()))
    });

    let article = create_resource(
        move || article_id.get(),
        {
            let api = api.clone();
            move |id| {
                let api = api.clone();
                async move {
                    match id {
                        Some(id) => api.fetch_article(id).await,
                        None => Err(ApiError::NotFound("記事が見つかりませんでした。".to_string())),
                    }
                }
            }
        },
    );

    view! {
        <div class="min-h-screen bg-surface">
            <Header/>
            <main class="max-w-3xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                {move || match article.get() {
                    None => view! { <LoadingSpinner/> }.into_view(),
                    Some(Ok(article)) => view! { <ArticleView article/> }.into_view(),
                    Some(Err(err)) => {
                        view! { <ErrorMessage message=err.message().to_string()/> }.into_view()
                    }
                }}
            </main>
            <LoginModal/>
        </div>
    }
}

#[component]
fn ArticleView(article: Article) -> impl IntoView {
    let article = create_rw_signal(article);
    view! {
        <article class="bg-surface-elevated rounded-xl border border-border shadow-sm p-6">
            <h1 class="text-2xl font-bold text-fg">{move || article.get().title}</h1>
            <p class="mt-2 text-sm text-fg-muted">
                {move || format_created_date(&article.get().created_at)}
            </p>
            <div
                class="prose mt-6 text-fg"
                inner_html=move || article.get().body
            ></div>
            <div class="mt-8 pt-4 border-t border-border">
                <LikeMvpButtonBar article/>
            </div>
        </article>
    }
}
