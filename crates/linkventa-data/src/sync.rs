//! Keeps the page state in step with the product store.
//!
//! Every operation is fire-and-forget from the page's point of view: store
//! failures are logged and turned into an empty list or a missing product,
//! never surfaced to the user and never retried.

use std::cell::RefCell;

use linkventa_core::{CoreError, Product, ProductId, StorefrontState, StructuredLogger, ViewMode};

use crate::ProductStore;

/// Live page state shared with the UI.
///
/// [`DataSync`] reads and writes it between awaits, never across one, so
/// edits made while a request is pending are kept.
pub trait PageState {
    fn read<R>(&self, f: impl FnOnce(&StorefrontState) -> R) -> R;

    fn update(&self, f: impl FnOnce(&mut StorefrontState));
}

impl PageState for RefCell<StorefrontState> {
    fn read<R>(&self, f: impl FnOnce(&StorefrontState) -> R) -> R {
        f(&self.borrow())
    }

    fn update(&self, f: impl FnOnce(&mut StorefrontState)) {
        f(&mut self.borrow_mut())
    }
}

/// Drives [`StorefrontState`] from a [`ProductStore`].
pub struct DataSync<S> {
    store: S,
    logger: StructuredLogger,
}

impl<S: ProductStore> DataSync<S> {
    pub fn new(store: S, logger: StructuredLogger) -> Self {
        Self { store, logger }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn logger(&self) -> &StructuredLogger {
        &self.logger
    }

    /// One product by id; `None` on no match or on failure.
    pub async fn fetch_one(&self, id: &ProductId) -> Option<Product> {
        match self.store.fetch_one(id).await {
            Ok(Some(product)) => Some(product),
            Ok(None) => {
                self.logger
                    .info_builder("product not found")
                    .field("id", id.as_str())
                    .emit();
                None
            }
            Err(e) => {
                self.logger
                    .warn_builder("fetch_one failed")
                    .field("id", id.as_str())
                    .field("error", e.to_string())
                    .emit();
                None
            }
        }
    }

    /// Full listing, newest first; empty on failure.
    pub async fn fetch_all(&self) -> Vec<Product> {
        match self.store.fetch_all().await {
            Ok(products) => {
                self.logger
                    .debug_builder("products loaded")
                    .field_i64("count", products.len() as i64)
                    .emit();
                products
            }
            Err(e) => {
                self.logger
                    .warn_builder("fetch_all failed")
                    .field("error", e.to_string())
                    .emit();
                Vec::new()
            }
        }
    }

    /// Startup fetch for the page's mode.
    pub async fn load<P: PageState>(&self, page: &P) {
        match page.read(|s| s.mode().clone()) {
            ViewMode::Buyer(id) => {
                let product = self.fetch_one(&id).await;
                page.update(|s| s.show_buyer_product(product));
            }
            ViewMode::Seller => self.refresh(page).await,
        }
    }

    /// Re-fetch the listing into the page.
    pub async fn refresh<P: PageState>(&self, page: &P) {
        page.update(|s| s.loading = true);
        let products = self.fetch_all().await;
        page.update(|s| s.show_products(products));
    }

    /// Validate the form, insert, clear the form and re-fetch the listing.
    ///
    /// Invalid input returns the validation error without touching the store.
    /// Once the insert has been attempted the clear and re-fetch always run,
    /// whatever its outcome. The form is cleared before the re-fetch starts.
    pub async fn submit<P: PageState>(&self, page: &P) -> Result<(), CoreError> {
        let draft = page.read(|s| s.form.validate())?;

        match self.store.insert(&draft).await {
            Ok(()) => self
                .logger
                .info_builder("product added")
                .field("nombre", draft.nombre.as_str())
                .field_f64("precio", draft.precio)
                .emit(),
            Err(e) => self
                .logger
                .warn_builder("insert failed")
                .field("nombre", draft.nombre.as_str())
                .field("error", e.to_string())
                .emit(),
        }

        page.update(|s| s.form.clear());
        self.refresh(page).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FetchError, InMemoryStore};
    use async_trait::async_trait;
    use linkventa_core::{LogLevel, NewProduct, ProductForm, SessionId};

    fn quiet_logger() -> StructuredLogger {
        StructuredLogger::new(SessionId::new("test")).with_min_level(LogLevel::Error)
    }

    fn sync(store: InMemoryStore) -> DataSync<InMemoryStore> {
        DataSync::new(store, quiet_logger())
    }

    fn page(search: &str) -> RefCell<StorefrontState> {
        RefCell::new(StorefrontState::from_query(search))
    }

    fn draft(nombre: &str, precio: f64) -> NewProduct {
        NewProduct {
            nombre: nombre.into(),
            precio,
        }
    }

    /// Store whose listing request lets the user type while it is pending.
    struct TypingDuringListing<'a> {
        inner: InMemoryStore,
        page: &'a RefCell<StorefrontState>,
        typed: ProductForm,
        /// `(loading, form)` as seen when each listing request went out.
        seen: RefCell<Vec<(bool, ProductForm)>>,
    }

    impl<'a> TypingDuringListing<'a> {
        fn new(page: &'a RefCell<StorefrontState>, typed: ProductForm) -> Self {
            Self {
                inner: InMemoryStore::new(),
                page,
                typed,
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl<'a> ProductStore for TypingDuringListing<'a> {
        async fn fetch_one(&self, id: &ProductId) -> Result<Option<Product>, FetchError> {
            self.inner.fetch_one(id).await
        }

        async fn fetch_all(&self) -> Result<Vec<Product>, FetchError> {
            let observed = self.page.read(|s| (s.loading, s.form.clone()));
            self.seen.borrow_mut().push(observed);
            self.page.update(|s| s.form = self.typed.clone());
            self.inner.fetch_all().await
        }

        async fn insert(&self, product: &NewProduct) -> Result<(), FetchError> {
            self.inner.insert(product).await
        }
    }

    #[tokio::test]
    async fn test_seller_mode_issues_one_list_fetch() {
        let sync = sync(InMemoryStore::with_products([draft("a", 1.0), draft("b", 2.0)]));
        let page = page("");

        sync.load(&page).await;

        assert_eq!(sync.store().fetch_all_calls(), 1);
        assert_eq!(sync.store().fetch_one_calls(), 0);
        let state = page.borrow();
        assert!(!state.loading);
        assert_eq!(state.products.len(), 2);
        assert_eq!(state.products[0].nombre, "b");
        assert!(state.buyer_product.is_none());
    }

    #[tokio::test]
    async fn test_buyer_mode_issues_one_single_fetch() {
        let sync = sync(InMemoryStore::with_products([draft("a", 1.0), draft("b", 2.0)]));
        let page = page("?vender=1");

        sync.load(&page).await;

        assert_eq!(sync.store().fetch_one_calls(), 1);
        assert_eq!(sync.store().fetch_all_calls(), 0);
        let state = page.borrow();
        assert!(!state.loading);
        assert_eq!(state.buyer_name(), "a");
        assert!(state.products.is_empty());
    }

    #[tokio::test]
    async fn test_buyer_mode_unknown_id_renders_empty() {
        let sync = sync(InMemoryStore::with_products([draft("a", 1.0)]));
        let page = page("?vender=does-not-exist");

        sync.load(&page).await;

        let state = page.borrow();
        assert!(!state.loading);
        assert!(state.buyer_product.is_none());
        assert_eq!(state.buyer_name(), "");
    }

    #[tokio::test]
    async fn test_submit_refetches_and_clears_form() {
        let sync = sync(InMemoryStore::new());
        let page = page("");
        sync.load(&page).await;
        let before = sync.store().fetch_all_calls();

        page.update(|s| s.form = ProductForm::new("Taza", "4.50"));
        sync.submit(&page).await.unwrap();

        assert_eq!(sync.store().insert_calls(), 1);
        assert_eq!(sync.store().fetch_all_calls(), before + 1);
        let state = page.borrow();
        assert!(state.form.is_empty());
        assert_eq!(state.products.len(), 1);
        assert_eq!(state.products[0].nombre, "Taza");
    }

    #[tokio::test]
    async fn test_submit_invalid_form_skips_store() {
        let sync = sync(InMemoryStore::new());
        let page = page("");
        page.update(|s| s.form = ProductForm::new("Taza", "cuatro"));

        let err = sync.submit(&page).await.unwrap_err();

        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(sync.store().insert_calls(), 0);
        assert_eq!(sync.store().fetch_all_calls(), 0);
        assert_eq!(page.borrow().form, ProductForm::new("Taza", "cuatro"));
    }

    #[tokio::test]
    async fn test_failed_insert_still_clears_and_refetches() {
        let sync = sync(InMemoryStore::with_products([draft("a", 1.0)]));
        let page = page("");
        sync.load(&page).await;
        sync.store().set_failing(true);

        page.update(|s| s.form = ProductForm::new("Taza", "4"));
        sync.submit(&page).await.unwrap();

        assert_eq!(sync.store().insert_calls(), 1);
        assert_eq!(sync.store().fetch_all_calls(), 2);
        let state = page.borrow();
        assert!(state.form.is_empty());
        assert!(state.products.is_empty());
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_failing_store_yields_empty_state() {
        let store = InMemoryStore::with_products([draft("a", 1.0)]);
        store.set_failing(true);
        let sync = sync(store);

        let seller = page("");
        sync.load(&seller).await;
        assert!(!seller.borrow().loading);
        assert!(seller.borrow().products.is_empty());

        let buyer = page("?vender=1");
        sync.load(&buyer).await;
        assert!(!buyer.borrow().loading);
        assert!(buyer.borrow().buyer_product.is_none());
    }

    #[tokio::test]
    async fn test_input_typed_during_startup_listing_is_kept() {
        let page = page("");
        let typed = ProductForm::new("Taza", "4");
        let sync = DataSync::new(TypingDuringListing::new(&page, typed.clone()), quiet_logger());

        sync.load(&page).await;

        let seen = sync.store().seen.borrow();
        assert_eq!(seen.as_slice(), [(true, ProductForm::default())]);
        let state = page.borrow();
        assert!(!state.loading);
        assert_eq!(state.form, typed);
    }

    #[tokio::test]
    async fn test_submit_clears_form_and_shows_loading_before_refetch() {
        let page = page("");
        let typed = ProductForm::new("Vela", "");
        let sync = DataSync::new(TypingDuringListing::new(&page, typed.clone()), quiet_logger());
        page.update(|s| {
            s.loading = false;
            s.form = ProductForm::new("Taza", "4.50");
        });

        sync.submit(&page).await.unwrap();

        let seen = sync.store().seen.borrow();
        assert_eq!(seen.as_slice(), [(true, ProductForm::default())]);
        let state = page.borrow();
        assert!(!state.loading);
        assert_eq!(state.products.len(), 1);
        assert_eq!(state.products[0].nombre, "Taza");
        assert_eq!(state.form, typed);
    }

    #[tokio::test]
    async fn test_listing_keeps_rows_with_odd_prices() {
        use crate::{RecordingTransport, RestStore};
        use linkventa_core::{BackendConfig, Currency};

        let body = r#"[
            {"id":2,"nombre":"Vela","precio":null,"created_at":"2025-03-02T12:00:00+00:00"},
            {"id":1,"nombre":"Taza","precio":4.5,"created_at":"2025-03-01T12:00:00+00:00"}
        ]"#;
        let backend = BackendConfig {
            url: "https://abc.supabase.co".into(),
            anon_key: "anon".into(),
            table: "productos".into(),
        };
        let store = RestStore::new(RecordingTransport::new().respond(200, body), &backend);
        let sync = DataSync::new(store, quiet_logger());
        let page = page("");

        sync.load(&page).await;

        let state = page.borrow();
        assert_eq!(state.products.len(), 2);
        assert_eq!(state.products[0].precio, 0.0);
        assert_eq!(state.stats(Currency::EUR).portfolio_label(), "4.50\u{20ac}");
    }
}
