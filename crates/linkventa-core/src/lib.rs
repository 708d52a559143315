//! Domain types and logic for the LinkVenta storefront widget.
//!
//! This crate holds everything that does not touch the browser:
//!
//! - **Catalog**: products, prices, portfolio stats
//! - **Routing**: seller/buyer mode selection from the query string
//! - **Links**: share links and the messaging checkout deep link
//! - **Handoff**: clipboard/alert/navigation actions behind [`BrowserShell`]
//! - **Config** and **logging** shared by the data layer and the web app
//!
//! # Example
//!
//! ```rust
//! use linkventa_core::prelude::*;
//!
//! let mode = ViewMode::from_query("?vender=42");
//! assert_eq!(mode, ViewMode::Buyer(ProductId::new("42")));
//!
//! let config = StoreConfig::default();
//! let link = share_link("https://shop.example", "/", &ProductId::new("42"));
//! assert_eq!(link, "https://shop.example/?vender=42");
//! assert!(config.whatsapp_seller.chars().all(|c| c.is_ascii_digit()));
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod handoff;
pub mod ids;
pub mod links;
pub mod logging;
pub mod money;
pub mod router;
pub mod storefront;

pub use catalog::{CatalogStats, NewProduct, Product, ProductForm};
pub use config::{BackendConfig, LoggingConfig, StoreConfig};
pub use error::CoreError;
pub use handoff::{copy_link, finalize_checkout, BrowserShell, PageLocation};
pub use ids::{ProductId, SessionId};
pub use links::{checkout_message, checkout_url, encode_uri_component, share_link};
pub use logging::{LogFormat, LogLevel, StructuredLogger};
pub use money::{Currency, Money};
pub use router::{query_param, ViewMode, VENDER_PARAM};
pub use storefront::StorefrontState;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::catalog::{CatalogStats, NewProduct, Product, ProductForm};
    pub use crate::config::{BackendConfig, LoggingConfig, StoreConfig};
    pub use crate::error::CoreError;
    pub use crate::handoff::{copy_link, finalize_checkout, BrowserShell, PageLocation};
    pub use crate::ids::{ProductId, SessionId};
    pub use crate::links::{checkout_message, checkout_url, share_link};
    pub use crate::logging::{LogFormat, LogLevel, StructuredLogger};
    pub use crate::money::{Currency, Money};
    pub use crate::router::ViewMode;
    pub use crate::storefront::StorefrontState;
}
