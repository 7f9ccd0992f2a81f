//! Configuration file handling

use miette::{IntoDiagnostic, Result};
use serde::{Deserialize, Serialize};
use sqlvendor_core::{DialectConfig, Product};
use std::path::{Path, PathBuf};

use crate::args::OutputFormat;

/// Contents of sqlvendor.toml
///
/// ```toml
/// format = "json"
///
/// [dialect]
/// product = "sqlserver"
///
/// [dialect.overrides]
/// keywords = ["rowguid"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Product and overrides
    #[serde(default)]
    pub dialect: DialectConfig,

    /// Output format (human, json)
    #[serde(default)]
    pub format: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).into_diagnostic()?;
        let config: Config = toml::from_str(&contents).into_diagnostic()?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Try to find and load sqlvendor.toml in current directory or parent directories
    pub fn find_and_load() -> Result<Option<Self>> {
        let mut current_dir = std::env::current_dir().into_diagnostic()?;

        loop {
            let config_path: PathBuf = current_dir.join("sqlvendor.toml");
            if config_path.exists() {
                return Ok(Some(Self::from_file(&config_path)?));
            }

            if !current_dir.pop() {
                break;
            }
        }

        Ok(None)
    }

    /// Merge CLI arguments into configuration.
    /// CLI arguments take precedence over config file values.
    pub fn merge_with_args(
        mut self,
        dialect: &Option<String>,
        format: &Option<OutputFormat>,
    ) -> Result<Self> {
        if let Some(name) = dialect {
            let product: Product = name.parse().map_err(|e: String| miette::miette!(e))?;
            if product != self.dialect.product && !self.dialect.overrides.is_empty() {
                tracing::warn!(
                    configured = %self.dialect.product,
                    requested = %product,
                    "Applying configured overrides to a different product"
                );
            }
            self.dialect.product = product;
        }

        if let Some(fmt) = format {
            self.format = Some(format!("{:?}", fmt).to_lowercase());
        }

        Ok(self)
    }

    pub fn output_format(&self) -> Result<OutputFormat> {
        match &self.format {
            Some(name) => name.parse().map_err(|e: String| miette::miette!(e)),
            None => Ok(OutputFormat::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_dialect_takes_precedence() {
        let config: Config = toml::from_str(
            r#"
            format = "json"

            [dialect]
            product = "postgresql"
            "#,
        )
        .unwrap();
        let config = config
            .merge_with_args(&Some("mssql".to_string()), &None)
            .unwrap();
        assert_eq!(config.dialect.product, Product::SqlServer);
        assert_eq!(config.output_format().unwrap(), OutputFormat::Json);
    }

    #[test]
    fn test_unknown_dialect_is_rejected() {
        let result = Config::default().merge_with_args(&Some("oracle".to_string()), &None);
        assert!(result.is_err());
    }

    #[test]
    fn test_format_flag_overrides_file() {
        let config = Config {
            format: Some("json".to_string()),
            ..Default::default()
        };
        let config = config
            .merge_with_args(&None, &Some(OutputFormat::Human))
            .unwrap();
        assert_eq!(config.output_format().unwrap(), OutputFormat::Human);
    }
}
