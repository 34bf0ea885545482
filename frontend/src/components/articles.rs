use leptos::*;

use crate::{api::Article, utils::date::format_created_date};

const EXCERPT_LENGTH: usize = 80;

/// Plain-text preview of a rich-text body: tags stripped, truncated on
/// a character boundary.
fn excerpt(body: &str, max_chars: usize) -> String {
    let mut text = String::new();
    let mut in_tag = false;
    for ch in body.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    let trimmed = text.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(max_chars).collect();
    format!("{}…", cut)
}

#[component]
pub fn ArticleList(articles: Vec<Article>) -> impl IntoView {
    view! {
        <Show
            when={
                let is_empty = articles.is_empty();
                move || !is_empty
            }
            fallback=|| view! {
                <p class="text-center text-fg-muted py-12">"まだ記事がありません"</p>
            }
        >
            <ul class="space-y-4">
                {articles
                    .clone()
                    .into_iter()
                    .map(|article| view! { <ArticleCard article/> })
                    .collect_view()}
            </ul>
        </Show>
    }
}

#[component]
pub fn ArticleCard(article: Article) -> impl IntoView {
    let href = format!("/articles/{}", article.id);
    view! {
        <li class="bg-surface-elevated rounded-xl border border-border shadow-sm hover:shadow-md transition-shadow">
            <a href=href class="block p-5">
                <h2 class="text-lg font-semibold text-fg">{article.title.clone()}</h2>
                <p class="mt-1 text-sm text-fg-muted">{excerpt(&article.body, EXCERPT_LENGTH)}</p>
                <div class="mt-3 flex items-center gap-4 text-xs text-fg-muted">
                    <span>{format_created_date(&article.created_at)}</span>
                    <span>{"いいね "}{article.like_count}</span>
                    <span>{"MVP "}{article.stock_count}</span>
                </div>
            </a>
        </li>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_strips_tags() {
        assert_eq!(excerpt("<p>濃厚<b>スープ</b>の話</p>", 80), "濃厚スープの話");
    }

    #[test]
    fn excerpt_truncates_on_char_boundary() {
        let body = "あ".repeat(100);
        let preview = excerpt(&body, 10);
        assert_eq!(preview.chars().count(), 11); // 10 chars + ellipsis
        assert!(preview.ends_with('…'));
    }

    #[test]
    fn excerpt_keeps_short_bodies_untouched() {
        assert_eq!(excerpt("短い", 80), "短い");
    }
}
