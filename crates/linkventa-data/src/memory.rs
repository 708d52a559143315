//! In-memory product store (for development and testing).
//!
//! Runs the widget without a backend and counts calls per operation so tests
//! can assert how many round trips a flow issued.

use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use linkventa_core::{NewProduct, Product, ProductId};

use crate::{FetchError, ProductStore};

/// Single-threaded store holding products in insertion order.
#[derive(Debug)]
pub struct InMemoryStore {
    products: RefCell<Vec<Product>>,
    next_id: Cell<u64>,
    clock: Cell<DateTime<Utc>>,
    failing: Cell<bool>,
    fetch_one_calls: Cell<usize>,
    fetch_all_calls: Cell<usize>,
    insert_calls: Cell<usize>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            products: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
            clock: Cell::new(Utc::now()),
            failing: Cell::new(false),
            fetch_one_calls: Cell::new(0),
            fetch_all_calls: Cell::new(0),
            insert_calls: Cell::new(0),
        }
    }

    /// Store pre-populated with the given drafts, oldest first.
    pub fn with_products(drafts: impl IntoIterator<Item = NewProduct>) -> Self {
        let store = Self::new();
        for draft in drafts {
            store.push(draft);
        }
        store
    }

    /// Make every following call fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    pub fn fetch_one_calls(&self) -> usize {
        self.fetch_one_calls.get()
    }

    pub fn fetch_all_calls(&self) -> usize {
        self.fetch_all_calls.get()
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.get()
    }

    fn push(&self, draft: NewProduct) -> ProductId {
        let id = ProductId::new(self.next_id.get().to_string());
        self.next_id.set(self.next_id.get() + 1);

        // Strictly increasing timestamps keep the recency order stable.
        let created_at = self.clock.get() + Duration::milliseconds(1);
        self.clock.set(created_at);

        self.products.borrow_mut().push(Product {
            id: id.clone(),
            nombre: draft.nombre,
            precio: draft.precio,
            created_at,
        });
        id
    }

    fn check(&self) -> Result<(), FetchError> {
        if self.failing.get() {
            return Err(FetchError::RequestError("in-memory store set to fail".into()));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl ProductStore for InMemoryStore {
    async fn fetch_one(&self, id: &ProductId) -> Result<Option<Product>, FetchError> {
        self.fetch_one_calls.set(self.fetch_one_calls.get() + 1);
        self.check()?;
        Ok(self
            .products
            .borrow()
            .iter()
            .find(|p| &p.id == id)
            .cloned())
    }

    async fn fetch_all(&self) -> Result<Vec<Product>, FetchError> {
        self.fetch_all_calls.set(self.fetch_all_calls.get() + 1);
        self.check()?;
        let mut products = self.products.borrow().clone();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(products)
    }

    async fn insert(&self, product: &NewProduct) -> Result<(), FetchError> {
        self.insert_calls.set(self.insert_calls.get() + 1);
        self.check()?;
        self.push(product.clone());
        Ok(())
    }
}
