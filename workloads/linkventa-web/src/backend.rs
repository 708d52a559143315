//! Store selection.

use linkventa_core::StoreConfig;
use linkventa_data::{BrowserTransport, InMemoryStore, ProductStore, RestStore};

/// PostgREST store when a backend URL is configured, in-memory otherwise.
pub fn build_store(config: &StoreConfig) -> Box<dyn ProductStore> {
    if config.backend.is_remote() {
        Box::new(RestStore::new(BrowserTransport, &config.backend))
    } else {
        log::info!("no backend url configured, using in-memory store");
        Box::new(InMemoryStore::new())
    }
}
