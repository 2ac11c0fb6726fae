//! Configuration module for the fulfillment engine.
//!
//! Loads YAML configuration with environment variable interpolation and
//! validates it before anything is wired.
//!
//! # Usage
//!
//! ```rust,ignore
//! use fulfillment_engine::config::{Config, load_config};
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/config.yaml"))?;
//!
//! println!("HTTP port: {}", config.server.http_port);
//! ```

mod catalog;
mod observability;
mod orders;
mod server;

use std::collections::HashSet;
use std::net::SocketAddr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use catalog::{CatalogConfig, ProductSeed};
pub use observability::{LoggingConfig, MetricsSettings, ObservabilityConfig};
pub use orders::OrdersConfig;
pub use server::ServerConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Order handling configuration.
    #[serde(default)]
    pub orders: OrdersConfig,
    /// Catalog seed data.
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Parsed metrics listen address.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the address does not parse.
    pub fn metrics_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.observability
            .metrics
            .listen_addr
            .parse()
            .map_err(|e| {
                ConfigError::ValidationError(format!(
                    "observability.metrics.listen_addr '{}' is invalid: {e}",
                    self.observability.metrics.listen_addr
                ))
            })
    }
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or("config.yaml");

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map(|m| m.as_str());
        match cap.get(1).map(|m| std::env::var(m.as_str())) {
            Some(Ok(v)) if !v.is_empty() => v,
            _ => default_value.map_or_else(String::new, str::to_string),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let orders = &config.orders;

    if orders.admin_page_limit == 0 || orders.user_page_limit == 0 || orders.max_page_limit == 0 {
        return Err(ConfigError::ValidationError(
            "orders page limits must be positive".to_string(),
        ));
    }

    if orders.admin_page_limit > orders.max_page_limit
        || orders.user_page_limit > orders.max_page_limit
    {
        return Err(ConfigError::ValidationError(format!(
            "orders default page limits must not exceed max_page_limit ({})",
            orders.max_page_limit
        )));
    }

    let valid_formats = ["json", "pretty"];
    if !valid_formats.contains(&config.observability.logging.format.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.format must be one of: {valid_formats:?}"
        )));
    }

    if config.observability.metrics.enabled {
        let metrics = config.metrics_addr()?;
        if metrics.port() == config.server.http_port {
            return Err(ConfigError::ValidationError(
                "metrics listen_addr and http_port must be different".to_string(),
            ));
        }
    }

    let mut seen = HashSet::new();
    for product in &config.catalog.products {
        if !seen.insert(product.id.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "catalog product id '{}' is duplicated",
                product.id
            )));
        }
        if product.price < rust_decimal::Decimal::ZERO {
            return Err(ConfigError::ValidationError(format!(
                "catalog product '{}' has a negative price",
                product.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_fulfillment::{PaymentStatus, TotalsPolicy, TransitionPolicyKind};
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.http_port, 8080);
        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert_eq!(config.orders.admin_page_limit, 50);
        assert_eq!(config.orders.user_page_limit, 10);
        assert_eq!(config.orders.max_page_limit, 200);
        assert_eq!(config.orders.totals_policy, TotalsPolicy::Strict);
        assert_eq!(config.orders.transition_policy, TransitionPolicyKind::Permissive);
        assert_eq!(config.orders.default_payment_status, PaymentStatus::Paid);
        assert!(!config.observability.metrics.enabled);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_empty_config_uses_defaults() {
        let config = load_config_from_string("{}").unwrap();
        assert_eq!(config.server.http_port, 8080);
        assert!(config.catalog.products.is_empty());
    }

    #[test]
    fn test_env_var_with_default_when_missing() {
        let input = "port: ${FULFILLMENT_CONFIG_TEST_NONEXISTENT_VAR:-8081}";
        assert_eq!(interpolate_env_vars(input), "port: 8081");
    }

    #[test]
    #[expect(clippy::literal_string_with_formatting_args)] // ${...} is env var syntax, not format args
    fn test_env_var_with_default_uses_existing() {
        let input = "path: ${PATH:-default}";
        let result = interpolate_env_vars(input);

        assert_ne!(result, "path: default");
        assert!(result.starts_with("path: "));
    }

    #[test]
    fn test_env_var_without_default_becomes_empty() {
        let input = "level: ${FULFILLMENT_CONFIG_TEST_UNLIKELY_TO_EXIST}";
        assert_eq!(interpolate_env_vars(input), "level: ");
    }

    #[test]
    fn test_validation_default_limit_above_max() {
        let yaml = r"
orders:
  admin_page_limit: 500
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for oversized default page limit");
        };
        assert!(err.to_string().contains("max_page_limit"));
    }

    #[test]
    fn test_validation_zero_limit() {
        let yaml = r"
orders:
  user_page_limit: 0
";
        assert!(load_config_from_string(yaml).is_err());
    }

    #[test]
    fn test_validation_metrics_port_clash() {
        let yaml = r#"
server:
  http_port: 9090
observability:
  metrics:
    enabled: true
    listen_addr: "0.0.0.0:9090"
"#;
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for clashing ports");
        };
        assert!(err.to_string().contains("must be different"));
    }

    #[test]
    fn test_validation_duplicate_seed_product() {
        let yaml = r#"
catalog:
  products:
    - { id: "p1", title: "Monitor A", price: 100, stock: 1 }
    - { id: "p1", title: "Monitor B", price: 120, stock: 1 }
"#;
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for duplicate product id");
        };
        assert!(err.to_string().contains("duplicated"));
    }

    #[test]
    fn test_validation_negative_seed_price() {
        let yaml = r#"
catalog:
  products:
    - { id: "p1", title: "Monitor A", price: -1, stock: 1 }
"#;
        assert!(load_config_from_string(yaml).is_err());
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
server:
  http_port: 8088
  bind_address: "127.0.0.1"

orders:
  admin_page_limit: 25
  totals_policy: trusting
  transition_policy: forward_only
  default_country: "Canada"
  default_payment_status: pending

catalog:
  products:
    - id: "p1"
      title: "Monitor A"
      brand: "Acme"
      price: 200
      stock: 5

observability:
  logging:
    level: "debug"
    format: "pretty"
  metrics:
    enabled: true
    listen_addr: "127.0.0.1:9100"
"#;

        let config = load_config_from_string(yaml).unwrap();

        assert_eq!(config.server.http_port, 8088);
        assert_eq!(config.server.bind_address, "127.0.0.1");
        assert_eq!(config.orders.admin_page_limit, 25);
        assert_eq!(config.orders.totals_policy, TotalsPolicy::Trusting);
        assert_eq!(config.orders.transition_policy, TransitionPolicyKind::ForwardOnly);
        assert_eq!(config.orders.assembly_policy().default_country, "Canada");
        assert_eq!(config.orders.default_payment_status, PaymentStatus::Pending);
        assert_eq!(config.catalog.products[0].stock, 5);
        assert_eq!(config.catalog.products[0].price, rust_decimal::Decimal::from(200));
        assert_eq!(config.observability.logging.format, "pretty");
        assert_eq!(config.metrics_addr().unwrap().port(), 9100);
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server:\n  http_port: 8181").unwrap();

        let config = load_config(file.path().to_str()).unwrap();
        assert_eq!(config.server.http_port, 8181);
    }

    #[test]
    fn test_load_config_missing_file() {
        let Err(err) = load_config(Some("/nonexistent/fulfillment.yaml")) else {
            panic!("expected read error");
        };
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }
}
