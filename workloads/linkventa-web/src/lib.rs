//! LinkVenta storefront widget.
//!
//! Client-side rendered Leptos app with two faces, chosen once from the query
//! string:
//! - seller dashboard: stats, add-product form, listing with share links
//! - buyer checkout: one product and a button into the messaging app

mod config;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod backend;
#[cfg(target_arch = "wasm32")]
mod shell;

pub use config::{load_config, session_logger, EMBEDDED_CONFIG};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    use linkventa_core::{BrowserShell, StoreConfig};

    console_error_panic_hook::set_once();

    let loaded = load_config();
    let level = loaded
        .as_ref()
        .map(|c| c.logging.level)
        .unwrap_or(StoreConfig::default().logging.level);
    let _ = console_log::init_with_level(level.as_log_level());

    let config = loaded.unwrap_or_else(|e| {
        log::error!("embedded config rejected, using defaults: {}", e);
        StoreConfig::default()
    });
    let search = shell::WebShell.location().search;

    leptos::mount::mount_to_body(move || {
        use app::App;
        use leptos::prelude::*;
        view! { <App config=config search=search/> }
    });
}
