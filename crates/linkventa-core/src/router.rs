//! Seller/buyer mode selection.
//!
//! The mode is decided once from the page's query string and never changes
//! for the lifetime of the page.

use crate::ids::ProductId;

/// Query parameter that carries the product id in a share link.
pub const VENDER_PARAM: &str = "vender";

/// Render mode for the page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Catalog management: list, add, copy links.
    #[default]
    Seller,
    /// One-product checkout reached through a share link.
    Buyer(ProductId),
}

impl ViewMode {
    /// Pick the mode from a `location.search` string (with or without `?`).
    pub fn from_query(search: &str) -> Self {
        match query_param(search, VENDER_PARAM) {
            Some(id) if !id.is_empty() => ViewMode::Buyer(ProductId::new(id)),
            _ => ViewMode::Seller,
        }
    }

    /// Short name used in log entries.
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Seller => "seller",
            ViewMode::Buyer(_) => "buyer",
        }
    }
}

/// First value of `key` in a form-urlencoded query string.
pub fn query_param(search: &str, key: &str) -> Option<String> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .find_map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (form_decode(k) == key).then(|| form_decode(v))
        })
}

/// Decode `+` as space and `%XX` escapes; malformed escapes pass through.
fn form_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
