mod app;
mod components;
mod pages;
mod services;

use app::App;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Паники в консоль браузера
    console_error_panic_hook::set_once();

    #[cfg(debug_assertions)]
    console_log::init_with_level(log::Level::Debug).unwrap_or_else(|e| {
        web_sys::console::log_1(&format!("Failed to init logger: {}", e).into());
    });

    services::apply_theme();
    log::info!("Admin console starting, API at {}", services::api_base_url());

    yew::Renderer::<App>::new().render();

    Ok(())
}
