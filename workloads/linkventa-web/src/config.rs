//! Embedded store configuration.

use linkventa_core::{CoreError, StoreConfig, StructuredLogger, SessionId, ViewMode};

/// The `linkventa.toml` shipped inside the bundle.
pub const EMBEDDED_CONFIG: &str = include_str!("../linkventa.toml");

/// Parse and validate the embedded configuration.
pub fn load_config() -> Result<StoreConfig, CoreError> {
    StoreConfig::from_toml_str(EMBEDDED_CONFIG)
}

/// Logger for one page load, tagged with the render mode.
pub fn session_logger(config: &StoreConfig, mode: &ViewMode) -> StructuredLogger {
    StructuredLogger::new(SessionId::generate())
        .with_view(mode.as_str())
        .with_min_level(config.logging.level)
        .with_format(config.logging.format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkventa_core::{Currency, LogLevel, ProductId};

    #[test]
    fn test_embedded_config_is_valid() {
        let config = load_config().unwrap();
        assert_eq!(config.app_name, "LinkVenta");
        assert_eq!(config.whatsapp_seller, "34623946626");
        assert_eq!(config.currency, Currency::EUR);
        assert_eq!(config.backend.table, "productos");
    }

    #[test]
    fn test_embedded_config_matches_defaults() {
        assert_eq!(load_config().unwrap(), StoreConfig::default());
    }

    #[test]
    fn test_session_logger_tags_view() {
        let config = StoreConfig::default();
        let logger = session_logger(&config, &ViewMode::Buyer(ProductId::new("7")));
        let entry = logger.info_builder("loaded").build().unwrap();
        assert_eq!(entry.view.as_deref(), Some("buyer"));
        assert!(logger.entry(LogLevel::Debug, "quiet", Default::default()).is_none());
    }
}
