//! [`BrowserShell`] over the real `window`.

use linkventa_core::{BrowserShell, PageLocation};
use wasm_bindgen_futures::{spawn_local, JsFuture};

/// Browser capabilities of the current page.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebShell;

impl BrowserShell for WebShell {
    fn location(&self) -> PageLocation {
        let Some(location) = web_sys::window().map(|w| w.location()) else {
            return PageLocation::default();
        };

        PageLocation {
            origin: location.origin().unwrap_or_default(),
            path: location.pathname().unwrap_or_default(),
            search: location.search().unwrap_or_default(),
        }
    }

    fn write_clipboard(&self, text: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };

        let promise = window.navigator().clipboard().write_text(text);
        spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::warn!("clipboard write rejected: {:?}", e);
            }
        });
    }

    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    fn navigate(&self, url: &str) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(url) {
                log::error!("navigation failed: {:?}", e);
            }
        }
    }
}
