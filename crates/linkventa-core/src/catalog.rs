//! Product types and catalog stats.

use crate::error::CoreError;
use crate::ids::ProductId;
use crate::money::{js_number, Currency, Money};
use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A product row from the `productos` collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Backend-assigned identifier.
    pub id: ProductId,
    /// Product name.
    pub nombre: String,
    /// Price as entered by the seller. Missing, null or non-numeric values read as zero.
    #[serde(default, deserialize_with = "lenient_price")]
    pub precio: f64,
    /// Backend-assigned creation time.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Price followed or preceded by the currency symbol, e.g. "12.5€".
    ///
    /// The amount is printed like a JavaScript number, so whole prices render
    /// without decimals.
    pub fn price_label(&self, currency: Currency) -> String {
        currency.with_symbol(&js_number(self.precio))
    }
}

/// Reads a price column the way the page coerces it: numbers as-is, numeric
/// strings parsed, anything else zero.
fn lenient_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    struct PriceVisitor;

    impl<'de> Visitor<'de> for PriceVisitor {
        type Value = f64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a price")
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<f64, E> {
            Ok(if value.is_finite() { value } else { 0.0 })
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<f64, E> {
            Ok(value as f64)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<f64, E> {
            Ok(value as f64)
        }

        fn visit_bool<E: de::Error>(self, value: bool) -> Result<f64, E> {
            Ok(if value { 1.0 } else { 0.0 })
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<f64, E> {
            let parsed = value.trim().parse::<f64>().unwrap_or(0.0);
            self.visit_f64(parsed)
        }

        fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
            Ok(0.0)
        }

        fn visit_none<E: de::Error>(self) -> Result<f64, E> {
            Ok(0.0)
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<f64, D::Error> {
            deserializer.deserialize_any(self)
        }

        fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<f64, A::Error> {
            while seq.next_element::<de::IgnoredAny>()?.is_some() {}
            Ok(0.0)
        }

        fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<f64, A::Error> {
            while map.next_entry::<de::IgnoredAny, de::IgnoredAny>()?.is_some() {}
            Ok(0.0)
        }
    }

    deserializer.deserialize_any(PriceVisitor)
}

/// Insert payload for a new product. `id` and `created_at` come from the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    pub nombre: String,
    pub precio: f64,
}

/// Raw seller form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductForm {
    pub nombre: String,
    pub precio: String,
}

impl ProductForm {
    pub fn new(nombre: impl Into<String>, precio: impl Into<String>) -> Self {
        Self {
            nombre: nombre.into(),
            precio: precio.into(),
        }
    }

    /// Apply the form constraints: a non-blank name and a numeric price.
    ///
    /// The name is trimmed before it is checked and before it is stored, so a
    /// whitespace-only name is rejected.
    pub fn validate(&self) -> Result<NewProduct, CoreError> {
        let nombre = self.nombre.trim();
        if nombre.is_empty() {
            return Err(CoreError::Validation("product name is required".into()));
        }

        let raw = self.precio.trim();
        if raw.is_empty() {
            return Err(CoreError::Validation("price is required".into()));
        }
        let precio: f64 = raw
            .parse()
            .map_err(|_| CoreError::Validation(format!("price is not a number: {}", raw)))?;
        if !precio.is_finite() {
            return Err(CoreError::Validation(format!("price is not a number: {}", raw)));
        }

        Ok(NewProduct {
            nombre: nombre.to_string(),
            precio,
        })
    }

    /// Reset both fields to empty.
    pub fn clear(&mut self) {
        self.nombre.clear();
        self.precio.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.nombre.is_empty() && self.precio.is_empty()
    }
}

/// Figures shown above the seller form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogStats {
    /// Number of listed products.
    pub count: usize,
    /// Sum of all prices.
    pub portfolio_value: Money,
}

impl CatalogStats {
    pub fn from_products(products: &[Product], currency: Currency) -> Self {
        Self {
            count: products.len(),
            portfolio_value: Money::sum_decimals(products.iter().map(|p| p.precio), currency),
        }
    }

    /// Portfolio value with two decimals and the currency symbol.
    pub fn portfolio_label(&self) -> String {
        self.portfolio_value.display()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn product(id: &str, nombre: &str, precio: f64) -> Product {
        Product {
            id: ProductId::new(id),
            nombre: nombre.to_string(),
            precio,
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_product_deserializes_backend_row() {
        let json = r#"{
            "id": 7,
            "nombre": "Camiseta",
            "precio": 19.9,
            "created_at": "2025-03-01T12:00:00.123456+00:00"
        }"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.id, ProductId::new("7"));
        assert_eq!(p.nombre, "Camiseta");
        assert!((p.precio - 19.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_product_tolerates_odd_prices() {
        let price = |precio: &str| {
            let row = format!(
                r#"{{"id":1,"nombre":"x","precio":{},"created_at":"2025-03-01T12:00:00+00:00"}}"#,
                precio
            );
            serde_json::from_str::<Product>(&row).unwrap().precio
        };

        assert_eq!(price("null"), 0.0);
        assert_eq!(price(r#""7.25""#), 7.25);
        assert_eq!(price(r#"" 3 ""#), 3.0);
        assert_eq!(price(r#""gratis""#), 0.0);
        assert_eq!(price("12"), 12.0);

        let missing = r#"{"id":1,"nombre":"x","created_at":"2025-03-01T12:00:00+00:00"}"#;
        assert_eq!(serde_json::from_str::<Product>(missing).unwrap().precio, 0.0);
    }

    #[test]
    fn test_price_label_extreme_magnitudes() {
        assert_eq!(product("1", "a", 1e-7).price_label(Currency::EUR), "1e-7\u{20ac}");
        assert_eq!(product("1", "a", 1e21).price_label(Currency::USD), "$1e+21");
    }

    #[test]
    fn test_stats_count_null_price_rows_as_zero() {
        let json = r#"[
            {"id":1,"nombre":"a","precio":4.5,"created_at":"2025-03-01T12:00:00+00:00"},
            {"id":2,"nombre":"b","precio":null,"created_at":"2025-03-01T12:00:00+00:00"}
        ]"#;
        let products: Vec<Product> = serde_json::from_str(json).unwrap();
        let stats = CatalogStats::from_products(&products, Currency::EUR);
        assert_eq!(stats.count, 2);
        assert_eq!(stats.portfolio_label(), "4.50\u{20ac}");
    }

    #[test]
    fn test_price_label_shortest_form() {
        assert_eq!(product("1", "a", 12.5).price_label(Currency::EUR), "12.5\u{20ac}");
        assert_eq!(product("1", "a", 10.0).price_label(Currency::EUR), "10\u{20ac}");
        assert_eq!(product("1", "a", 3.25).price_label(Currency::USD), "$3.25");
    }

    #[test]
    fn test_form_validate_ok() {
        let form = ProductForm::new("  Taza  ", "4.50");
        let draft = form.validate().unwrap();
        assert_eq!(draft.nombre, "Taza");
        assert!((draft.precio - 4.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_form_validate_rejects_blank_name() {
        let err = ProductForm::new("   ", "3").validate().unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_form_validate_rejects_bad_price() {
        assert!(ProductForm::new("Taza", "").validate().is_err());
        assert!(ProductForm::new("Taza", "abc").validate().is_err());
        assert!(ProductForm::new("Taza", "NaN").validate().is_err());
        assert!(ProductForm::new("Taza", "inf").validate().is_err());
    }

    #[test]
    fn test_form_clear() {
        let mut form = ProductForm::new("Taza", "4");
        form.clear();
        assert!(form.is_empty());
    }

    #[test]
    fn test_stats() {
        let products = vec![product("1", "a", 10.0), product("2", "b", 32.5)];
        let stats = CatalogStats::from_products(&products, Currency::EUR);
        assert_eq!(stats.count, 2);
        assert_eq!(stats.portfolio_label(), "42.50\u{20ac}");
    }

    #[test]
    fn test_stats_empty_catalog() {
        let stats = CatalogStats::from_products(&[], Currency::EUR);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.portfolio_label(), "0.00\u{20ac}");
    }

    #[test]
    fn test_stats_ignore_non_finite_prices() {
        let products = vec![product("1", "a", f64::NAN), product("2", "b", 5.0)];
        let stats = CatalogStats::from_products(&products, Currency::EUR);
        assert_eq!(stats.portfolio_label(), "5.00\u{20ac}");
    }
}
