//! Dialect definitions loaded from TOML

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::dialect::{Dialect, DialectDelta, Product};
use crate::error::{DialectError, Result};

/// A built-in product plus local overrides.
///
/// ```toml
/// product = "sqlserver"
///
/// [overrides]
/// keywords = ["rowguid"]
/// in_expression_count_limit = 1000
///
/// [[overrides.column_types]]
/// type_code = "varchar"
/// max_length = 8000
/// pattern = "varchar($l)"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DialectConfig {
    pub product: Product,
    pub overrides: DialectDelta,
}

impl DialectConfig {
    pub fn for_product(product: Product) -> Self {
        Self {
            product,
            overrides: DialectDelta::default(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            warn!(error = %e, "Rejected dialect configuration");
            DialectError::Config(e.to_string())
        })
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| DialectError::Config(e.to_string()))
    }

    /// Build the product's dialect with the overrides applied
    pub fn build(&self) -> Result<Dialect> {
        if !self.overrides.is_empty() {
            debug!(product = %self.product, "Applying dialect overrides");
        }
        self.product.builder().apply(self.overrides.clone()).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeCode;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_config_is_generic() {
        let config = DialectConfig::from_toml_str("").unwrap();
        assert_eq!(config.product, Product::Generic);
        assert_eq!(config.build().unwrap().name(), "generic");
    }

    #[test]
    fn test_overrides_apply_on_top_of_product() {
        let config = DialectConfig::from_toml_str(
            r#"
            product = "mssql"

            [overrides]
            keywords = ["rowguid"]
            in_expression_count_limit = 1000

            [[overrides.column_types]]
            type_code = "varchar"
            max_length = 8000
            pattern = "varchar($l)"

            [[overrides.column_types]]
            type_code = "varchar"
            pattern = "varchar(max)"
            "#,
        )
        .unwrap();
        let dialect = config.build().unwrap();
        assert_eq!(dialect.name(), "sqlserver");
        assert!(dialect.is_keyword("ROWGUID"));
        assert!(dialect.is_keyword("top"));
        assert_eq!(dialect.in_expression_count_limit(), Some(1000));
        assert_eq!(
            dialect
                .column_type_name(TypeCode::Varchar, Some(9000))
                .unwrap(),
            "varchar(max)"
        );
        assert_eq!(
            dialect
                .column_type_name(TypeCode::Varchar, Some(50))
                .unwrap(),
            "varchar(50)"
        );
    }

    #[test]
    fn test_unknown_product() {
        let err = DialectConfig::from_toml_str("product = \"oracle\"").unwrap_err();
        assert_eq!(err.kind(), "config");
    }

    #[test]
    fn test_misspelled_capability() {
        let err = DialectConfig::from_toml_str(
            r#"
            product = "sqlserver"

            [overrides.capabilities]
            suports_limit = true
            "#,
        )
        .unwrap_err();
        assert_eq!(err.kind(), "config");
    }

    #[test]
    fn test_toml_round_trip() {
        let config = DialectConfig::for_product(Product::PostgreSQL);
        let text = config.to_toml_string().unwrap();
        assert_eq!(DialectConfig::from_toml_str(&text).unwrap(), config);
    }
}
