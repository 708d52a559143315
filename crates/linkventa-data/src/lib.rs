//! Data layer for LinkVenta.
//!
//! A small REST client ([`FetchClient`]) over a pluggable [`Transport`], the
//! [`ProductStore`] abstraction with a PostgREST implementation and an
//! in-memory one, and [`DataSync`], which drives the page state from a store.
//!
//! # Example
//!
//! ```rust,ignore
//! use linkventa_core::prelude::*;
//! use linkventa_data::{BrowserTransport, DataSync, RestStore};
//!
//! let config = StoreConfig::default();
//! let store = RestStore::new(BrowserTransport, &config.backend);
//! let sync = DataSync::new(store, logger);
//!
//! let page = RefCell::new(StorefrontState::from_query("?vender=42"));
//! sync.load(&page).await;
//! ```

mod error;
mod memory;
mod request;
mod response;
mod store;
mod sync;
mod transport;

pub use error::FetchError;
pub use memory::InMemoryStore;
pub use request::{Method, RequestBuilder};
pub use response::Response;
pub use store::{ProductStore, RestStore};
pub use sync::{DataSync, PageState};
#[cfg(target_arch = "wasm32")]
pub use transport::BrowserTransport;
pub use transport::{RecordingTransport, Transport};

use std::collections::BTreeMap;

/// HTTP client bound to a transport.
pub struct FetchClient<T> {
    transport: T,
    base_url: Option<String>,
    default_headers: BTreeMap<String, String>,
}

impl<T: Transport> FetchClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            base_url: None,
            default_headers: BTreeMap::new(),
        }
    }

    /// Prepend `base_url` to every relative request path.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a header included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder<'_, T> {
        self.request(Method::Get, url)
    }

    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder<'_, T> {
        self.request(Method::Post, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder<'_, T> {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                format!("{}{}", base.trim_end_matches('/'), url)
            }
            _ => url,
        };

        let mut builder = RequestBuilder::new(method, full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            client: self,
            builder,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder<'a, T> {
    client: &'a FetchClient<T>,
    builder: RequestBuilder,
}

impl<'a, T: Transport> ClientRequestBuilder<'a, T> {
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Append an already-encoded query pair.
    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.builder = self.builder.query(key, value);
        self
    }

    pub fn accept(mut self, content_type: impl Into<String>) -> Self {
        self.builder = self.builder.accept(content_type);
        self
    }

    /// Set the request body as JSON.
    pub fn json<S: serde::Serialize>(mut self, value: &S) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Send through the client's transport.
    pub async fn send(self) -> Result<Response, FetchError> {
        self.client.transport.send(self.builder).await
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        DataSync, FetchClient, FetchError, InMemoryStore, Method, PageState, ProductStore,
        Response, RestStore, Transport,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_client_applies_base_url_and_default_headers() {
        let client = FetchClient::new(RecordingTransport::new())
            .with_base_url("https://abc.supabase.co/")
            .with_default_header("apikey", "k");

        client.get("/rest/v1/productos").send().await.unwrap();
        client.get("https://other.io/x").send().await.unwrap();

        let requests = client.transport().requests();
        assert_eq!(requests[0].url, "https://abc.supabase.co/rest/v1/productos");
        assert_eq!(requests[0].headers.get("apikey").map(String::as_str), Some("k"));
        assert_eq!(requests[1].url, "https://other.io/x");
    }
}
