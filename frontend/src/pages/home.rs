use leptos::*;

use crate::{
    components::{
        articles::ArticleList,
        layout::{ErrorMessage, Header, LoadingSpinner},
        login_modal::LoginModal,
    },
    state::auth::use_auth,
};

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let api = auth.api().clone();

    let articles = create_resource(
        || (),
        {
            let api = api.clone();
            move |_| {
                let api = api.clone();
                async move { api.fetch_articles().await }
            }
        },
    );
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

    view! {
        <div class="min-h-screen bg-surface">
            {move || {
                let topic = topic.get().flatten();
                view! { <Header topic/> }
            }}
            <main class="max-w-5xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                {move || match articles.get() {
                    None => view! { <LoadingSpinner/> }.into_view(),
                    Some(Ok(articles)) => view! { <ArticleList articles/> }.into_view(),
                    Some(Err(err)) => {
                        view! { <ErrorMessage message=err.message().to_string()/> }.into_view()
                    }
                }}
            </main>
            <LoginModal/>
        </div>
    }
}
