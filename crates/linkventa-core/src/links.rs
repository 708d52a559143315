//! Share links and the messaging checkout deep link.

use crate::catalog::Product;
use crate::config::StoreConfig;
use crate::ids::ProductId;
use crate::router::VENDER_PARAM;

/// Base of the messaging deep link.
pub const WHATSAPP_BASE: &str = "https://wa.me";

/// Per-product link a seller hands out: `<origin><path>?vender=<id>`.
pub fn share_link(origin: &str, path: &str, id: &ProductId) -> String {
    format!(
        "{}{}?{}={}",
        origin,
        path,
        VENDER_PARAM,
        encode_uri_component(id.as_str())
    )
}

/// Pre-filled purchase message sent to the seller.
pub fn checkout_message(product: &Product, config: &StoreConfig) -> String {
    format!(
        "\u{a1}Hola! \u{1f44b} Me interesa comprar: {} ({}) en {}",
        product.nombre,
        product.price_label(config.currency),
        config.site_domain
    )
}

/// Messaging deep link carrying the encoded purchase message.
pub fn checkout_url(product: &Product, config: &StoreConfig) -> String {
    format!(
        "{}/{}?text={}",
        WHATSAPP_BASE,
        config.whatsapp_seller,
        encode_uri_component(&checkout_message(product, config))
    )
}

/// Percent-encode everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`,
/// matching JavaScript's `encodeURIComponent`.
pub fn encode_uri_component(s: &str) -> String {
    let mut result = String::with_capacity(s.len() * 3);
    for byte in s.bytes() {
        match byte {
            b'a'..=b'z'
            | b'A'..=b'Z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => result.push(byte as char),
            _ => result.push_str(&format!("%{:02X}", byte)),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(nombre: &str, precio: f64) -> Product {
        Product {
            id: ProductId::new("42"),
            nombre: nombre.to_string(),
            precio,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_share_link() {
        let link = share_link("https://linkventa.com", "/tienda", &ProductId::new("42"));
        assert_eq!(link, "https://linkventa.com/tienda?vender=42");
    }

    #[test]
    fn test_share_link_ends_with_param() {
        let id = ProductId::new("5f1c0e2a-aaaa-4bbb-8ccc-123456789abc");
        let link = share_link("http://localhost:8080", "/", &id);
        assert!(link.ends_with("?vender=5f1c0e2a-aaaa-4bbb-8ccc-123456789abc"));
    }

    #[test]
    fn test_share_link_encodes_id() {
        let link = share_link("https://x.io", "/", &ProductId::new("a b&c"));
        assert_eq!(link, "https://x.io/?vender=a%20b%26c");
    }

    #[test]
    fn test_encode_uri_component() {
        assert_eq!(encode_uri_component("abc-_.!~*'()"), "abc-_.!~*'()");
        assert_eq!(encode_uri_component("a b"), "a%20b");
        assert_eq!(encode_uri_component("\u{20ac}"), "%E2%82%AC");
        assert_eq!(encode_uri_component("?&=/#+"), "%3F%26%3D%2F%23%2B");
    }

    #[test]
    fn test_checkout_message() {
        let config = StoreConfig::default();
        let msg = checkout_message(&product("Taza azul", 4.5), &config);
        assert_eq!(
            msg,
            "\u{a1}Hola! \u{1f44b} Me interesa comprar: Taza azul (4.5\u{20ac}) en linkventa.com"
        );
    }

    #[test]
    fn test_checkout_url_contains_encoded_name_and_price() {
        let config = StoreConfig::default();
        let url = checkout_url(&product("Taza azul", 4.5), &config);
        assert!(url.starts_with("https://wa.me/34623946626?text="));
        assert!(url.contains("Taza%20azul"));
        assert!(url.contains("(4.5%E2%82%AC)"));
    }
}
