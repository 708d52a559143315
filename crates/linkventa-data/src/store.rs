//! Product store abstraction and its PostgREST implementation.

use async_trait::async_trait;
use linkventa_core::links::encode_uri_component;
use linkventa_core::{BackendConfig, NewProduct, Product, ProductId};

use crate::{FetchClient, FetchError, Transport};

/// `Accept` value that makes PostgREST return one object instead of an array.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Status PostgREST uses when a single-object request matches zero (or many) rows.
const SINGLE_OBJECT_VIOLATION: u16 = 406;

/// Read/insert access to the products collection.
#[async_trait(?Send)]
pub trait ProductStore {
    /// Exactly one product by id; `None` when nothing matches.
    async fn fetch_one(&self, id: &ProductId) -> Result<Option<Product>, FetchError>;

    /// Every product, newest first.
    async fn fetch_all(&self) -> Result<Vec<Product>, FetchError>;

    /// Insert a product; the backend assigns `id` and `created_at`.
    async fn insert(&self, product: &NewProduct) -> Result<(), FetchError>;
}

#[async_trait(?Send)]
impl<S: ProductStore + ?Sized> ProductStore for Box<S> {
    async fn fetch_one(&self, id: &ProductId) -> Result<Option<Product>, FetchError> {
        (**self).fetch_one(id).await
    }

    async fn fetch_all(&self) -> Result<Vec<Product>, FetchError> {
        (**self).fetch_all().await
    }

    async fn insert(&self, product: &NewProduct) -> Result<(), FetchError> {
        (**self).insert(product).await
    }
}

/// Store backed by a PostgREST endpoint (`{url}/rest/v1/{table}`).
pub struct RestStore<T> {
    client: FetchClient<T>,
    path: String,
}

impl<T: Transport> RestStore<T> {
    pub fn new(transport: T, backend: &BackendConfig) -> Self {
        let client = FetchClient::new(transport)
            .with_base_url(backend.url.clone())
            .with_default_header("apikey", backend.anon_key.clone())
            .with_default_header("Authorization", format!("Bearer {}", backend.anon_key));

        Self {
            client,
            path: format!("/rest/v1/{}", backend.table),
        }
    }

    pub fn transport(&self) -> &T {
        self.client.transport()
    }
}

#[async_trait(?Send)]
impl<T: Transport> ProductStore for RestStore<T> {
    async fn fetch_one(&self, id: &ProductId) -> Result<Option<Product>, FetchError> {
        let filter = format!("eq.{}", encode_uri_component(id.as_str()));
        let response = self
            .client
            .get(self.path.as_str())
            .query("select", "*")
            .query("id", &filter)
            .accept(SINGLE_OBJECT)
            .send()
            .await?;

        if response.status == SINGLE_OBJECT_VIOLATION {
            return Ok(None);
        }

        let response = response.error_for_status()?;
        if response.is_empty_body() {
            return Ok(None);
        }
        Ok(Some(response.json()?))
    }

    async fn fetch_all(&self) -> Result<Vec<Product>, FetchError> {
        self.client
            .get(self.path.as_str())
            .query("select", "*")
            .query("order", "created_at.desc")
            .send()
            .await?
            .error_for_status()?
            .json()
    }

    async fn insert(&self, product: &NewProduct) -> Result<(), FetchError> {
        self.client
            .post(self.path.as_str())
            .header("Prefer", "return=minimal")
            .json(&[product])?
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
