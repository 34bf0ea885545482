use leptos::*;

/// Body editor for new articles. The document is plain markup handed to
/// the API as-is; formatting stays the author's responsibility.
#[component]
pub fn Editor(body: RwSignal<String>) -> impl IntoView {
    let char_count = move || body.get().chars().count();

    view! {
        <div class="rounded-xl border border-border bg-surface-elevated">
            <textarea
                class="w-full min-h-[20rem] rounded-t-xl p-4 text-sm text-fg focus:outline-none resize-y"
                placeholder="本文を書く…"
                on:input=move |ev| body.set(event_target_value(&ev))
                prop:value=move || body.get()
            ></textarea>
            <div class="flex justify-end px-4 py-2 border-t border-border text-xs text-fg-muted">
                {char_count}{" 文字"}
            </div>
        </div>
    }
}
