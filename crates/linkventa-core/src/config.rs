//! Store configuration.
//!
//! The web app embeds a TOML document at build time; every key has a default
//! so an empty document yields a working (in-memory) storefront.

use crate::error::CoreError;
use crate::logging::{LogFormat, LogLevel};
use crate::money::Currency;
use serde::{Deserialize, Serialize};

/// Storefront branding, seller contact and backend settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Name shown in the page title.
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Banner image shown at the top of both views.
    #[serde(default = "default_logo_url")]
    pub logo_url: String,

    /// Accent color for the primary buttons.
    #[serde(default = "default_primary_color")]
    pub primary_color: String,

    /// Seller's messaging number, digits only with country code.
    #[serde(default = "default_whatsapp_seller")]
    pub whatsapp_seller: String,

    /// Currency used to label prices.
    #[serde(default)]
    pub currency: Currency,

    /// Site name quoted in the purchase message.
    #[serde(default = "default_site_domain")]
    pub site_domain: String,

    /// Alert shown after a share link is copied.
    #[serde(default = "default_share_notice")]
    pub share_notice: String,

    /// Backend connection.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_app_name() -> String {
    "LinkVenta".to_string()
}

fn default_logo_url() -> String {
    "https://i.ibb.co/LD9zfYv5/logo.png".to_string()
}

fn default_primary_color() -> String {
    "#10B981".to_string()
}

fn default_whatsapp_seller() -> String {
    "34623946626".to_string()
}

fn default_site_domain() -> String {
    "linkventa.com".to_string()
}

fn default_share_notice() -> String {
    "\u{2705} \u{a1}Enlace copiado! Ya puedes usarlo en linkventa.com".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            logo_url: default_logo_url(),
            primary_color: default_primary_color(),
            whatsapp_seller: default_whatsapp_seller(),
            currency: Currency::default(),
            site_domain: default_site_domain(),
            share_notice: default_share_notice(),
            backend: BackendConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl StoreConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, CoreError> {
        let config: StoreConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values the widget cannot work without.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.whatsapp_seller.is_empty()
            || !self.whatsapp_seller.chars().all(|c| c.is_ascii_digit())
        {
            return Err(CoreError::Config(format!(
                "whatsapp_seller must be digits only, got {:?}",
                self.whatsapp_seller
            )));
        }
        if self.primary_color.trim().is_empty() {
            return Err(CoreError::Config("primary_color must not be empty".into()));
        }
        self.backend.validate()
    }
}

/// Managed backend (PostgREST) connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`. Empty selects the in-memory store.
    #[serde(default)]
    pub url: String,

    /// Public (anon) API key.
    #[serde(default)]
    pub anon_key: String,

    /// Collection holding the products.
    #[serde(default = "default_table")]
    pub table: String,
}

fn default_table() -> String {
    "productos".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            table: default_table(),
        }
    }
}

impl BackendConfig {
    /// Whether a remote backend is configured.
    pub fn is_remote(&self) -> bool {
        !self.url.trim().is_empty()
    }

    fn validate(&self) -> Result<(), CoreError> {
        if self.table.trim().is_empty() {
            return Err(CoreError::Config("backend.table must not be empty".into()));
        }
        if self.is_remote() {
            if !(self.url.starts_with("https://") || self.url.starts_with("http://")) {
                return Err(CoreError::Config(format!(
                    "backend.url must be an http(s) URL, got {:?}",
                    self.url
                )));
            }
            if self.anon_key.trim().is_empty() {
                return Err(CoreError::Config(
                    "backend.anon_key is required when backend.url is set".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Logging settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: LogLevel,

    #[serde(default = "default_format")]
    pub format: LogFormat,
}

fn default_level() -> LogLevel {
    LogLevel::Info
}

fn default_format() -> LogFormat {
    LogFormat::Human
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}
