//! Clipboard and messaging handoff actions.
//!
//! Browser side effects go through [`BrowserShell`] so the actions can run
//! against a recording fake in tests.

use crate::catalog::Product;
use crate::config::StoreConfig;
use crate::ids::ProductId;
use crate::links::{checkout_url, share_link};

/// Where the page was loaded from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLocation {
    /// Scheme, host and port, e.g. `https://linkventa.com`.
    pub origin: String,
    /// Path without query, e.g. `/`.
    pub path: String,
    /// Raw query string including the leading `?`, or empty.
    pub search: String,
}

/// Browser capabilities used by the handoff actions.
pub trait BrowserShell {
    /// Current page location.
    fn location(&self) -> PageLocation;

    /// Write text to the clipboard. Failures are not reported.
    fn write_clipboard(&self, text: &str);

    /// Show a blocking confirmation message.
    fn alert(&self, message: &str);

    /// Leave the page for `url`.
    fn navigate(&self, url: &str);
}

/// Copy the share link for `id` and confirm with the configured notice.
///
/// Returns the link that was written.
pub fn copy_link<S: BrowserShell + ?Sized>(shell: &S, config: &StoreConfig, id: &ProductId) -> String {
    let location = shell.location();
    let link = share_link(&location.origin, &location.path, id);
    shell.write_clipboard(&link);
    shell.alert(&config.share_notice);
    link
}

/// Send the buyer to the messaging app with the purchase message.
///
/// Returns the deep link, or `None` when no product is loaded.
pub fn finalize_checkout<S: BrowserShell + ?Sized>(
    shell: &S,
    config: &StoreConfig,
    product: Option<&Product>,
) -> Option<String> {
    let url = checkout_url(product?, config);
    shell.navigate(&url);
    Some(url)
}
