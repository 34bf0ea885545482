#[cfg(target_arch = "wasm32")]
fn main() {
    use web_sys::console;

    console_error_panic_hook::set_once();
    console::log_1(&"Starting knowme frontend".into());

    leptos::spawn_local(async move {
        knowme_frontend::config::init().await;
        knowme_frontend::router::mount_app();
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    // The frontend is a browser bundle; there is nothing to run on the
    // host. Build the wasm target instead.
    eprintln!("knowme-frontend targets wasm32; build it with trunk");
}
