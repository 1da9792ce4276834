use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen_futures::spawn_local;
use web_sys::console;

pub mod api;
mod components;
pub mod config;
mod pages;
pub mod router;
pub mod state;
#[cfg(test)]
mod test_support;
pub mod utils;

/// Installs logging, starts the runtime config load and mounts the app.
#[wasm_bindgen]
pub fn run() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        console::warn_1(&format!("logger already initialized: {}", err).into());
    }
    console::log_1(&"Starting Sensor Dashboard Frontend (wasm)".into());

    // The session store reads the refresh interval when it mounts.
    spawn_local(async move {
        config::init().await;
        log::info!("runtime config initialized");
        router::mount_app();
    });
}
