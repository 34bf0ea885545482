mod api;
mod components;
pub mod config;
mod pages;
pub mod router;
mod state;
pub mod utils;

#[cfg(test)]
pub mod test_support;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    use web_sys::console;

    console_error_panic_hook::set_once();
    console::log_1(&"Starting knowme frontend (wasm)".into());

    // Resolve the runtime config before the first page fetch.
    leptos::spawn_local(async move {
        config::init().await;
        console::log_1(&"Runtime config initialized".into());
        router::mount_app();
    });
}
