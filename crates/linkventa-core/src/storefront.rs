//! Page state for one session.

use crate::catalog::{CatalogStats, Product, ProductForm};
use crate::money::Currency;
use crate::router::ViewMode;

/// Everything the page renders from.
///
/// The mode is fixed at construction. Seller sessions fill `products`,
/// buyer sessions fill `buyer_product`; neither touches the other.
#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontState {
    mode: ViewMode,
    /// Gates rendering until the first fetch resolves.
    pub loading: bool,
    /// Seller listing, newest first.
    pub products: Vec<Product>,
    /// Product behind a buyer link, if it exists.
    pub buyer_product: Option<Product>,
    /// Seller form input.
    pub form: ProductForm,
}

impl StorefrontState {
    pub fn new(mode: ViewMode) -> Self {
        Self {
            mode,
            loading: true,
            products: Vec::new(),
            buyer_product: None,
            form: ProductForm::default(),
        }
    }

    /// State for a page loaded with the given `location.search`.
    pub fn from_query(search: &str) -> Self {
        Self::new(ViewMode::from_query(search))
    }

    pub fn mode(&self) -> &ViewMode {
        &self.mode
    }

    /// Replace the listing with a fresh fetch result.
    pub fn show_products(&mut self, products: Vec<Product>) {
        self.products = products;
        self.loading = false;
    }

    /// Record the single-product lookup. A miss keeps the buyer state empty.
    pub fn show_buyer_product(&mut self, product: Option<Product>) {
        if product.is_some() {
            self.buyer_product = product;
        }
        self.loading = false;
    }

    pub fn stats(&self, currency: Currency) -> CatalogStats {
        CatalogStats::from_products(&self.products, currency)
    }

    /// Buyer card title; empty when nothing was found.
    pub fn buyer_name(&self) -> &str {
        self.buyer_product
            .as_ref()
            .map(|p| p.nombre.as_str())
            .unwrap_or_default()
    }

    /// Buyer card price; empty when nothing was found.
    pub fn buyer_price_label(&self, currency: Currency) -> String {
        self.buyer_product
            .as_ref()
            .map(|p| p.price_label(currency))
            .unwrap_or_default()
    }
}

impl Default for StorefrontState {
    fn default() -> Self {
        Self::new(ViewMode::Seller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;
    use chrono::Utc;

    fn product(id: &str, precio: f64) -> Product {
        Product {
            id: ProductId::new(id),
            nombre: format!("Producto {}", id),
            precio,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_new_state_is_loading() {
        let state = StorefrontState::from_query("");
        assert!(state.loading);
        assert_eq!(state.mode(), &ViewMode::Seller);
        assert!(state.products.is_empty());
        assert!(state.form.is_empty());
    }

    #[test]
    fn test_show_products_replaces_list() {
        let mut state = StorefrontState::default();
        state.show_products(vec![product("1", 1.0)]);
        state.show_products(vec![product("2", 2.0), product("1", 1.0)]);
        assert!(!state.loading);
        assert_eq!(state.products.len(), 2);
        assert_eq!(state.stats(Currency::EUR).portfolio_label(), "3.00\u{20ac}");
    }

    #[test]
    fn test_buyer_miss_renders_empty_fields() {
        let mut state = StorefrontState::from_query("?vender=nope");
        state.show_buyer_product(None);
        assert!(!state.loading);
        assert_eq!(state.buyer_name(), "");
        assert_eq!(state.buyer_price_label(Currency::EUR), "");
    }

    #[test]
    fn test_buyer_hit() {
        let mut state = StorefrontState::from_query("?vender=3");
        state.show_buyer_product(Some(product("3", 9.5)));
        assert_eq!(state.buyer_name(), "Producto 3");
        assert_eq!(state.buyer_price_label(Currency::EUR), "9.5\u{20ac}");
    }
}
