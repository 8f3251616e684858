//! Application configuration
//!
//! This module provides centralized configuration management using the `config` crate.
//! Configuration can be loaded from environment variables and config files.
//!
//! The pricing section becomes a read-only `PricingPolicy` and `RateTable`
//! at startup.

use config::{Config, ConfigError, Environment, File};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::env;
use tracing::debug;

use crate::models::quote::DECEMBER_RATE_PER_SLOT;
use crate::models::{DiscountTier, PricingPolicy, RateTable, Tarifa};
use crate::money::VAT_RATE;
use crate::AppResult;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
}

/// HTTP server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Comma-separated list of allowed CORS origins
    #[serde(default = "default_cors_origins")]
    pub cors_origins: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_cors_origins() -> String {
    "http://localhost:5173,http://127.0.0.1:5173".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
            cors_origins: default_cors_origins(),
        }
    }
}

/// Pricing rules and rate rows
#[derive(Debug, Deserialize, Clone)]
pub struct PricingConfig {
    /// Weekly December price per slot
    #[serde(default = "default_december_rate")]
    pub december_rate_per_slot: Decimal,

    /// VAT rate
    #[serde(default = "default_vat_rate")]
    pub vat_rate: Decimal,

    /// Duration discount tiers
    #[serde(default = "default_tiers")]
    pub tiers: Vec<DiscountTier>,

    /// Rate rows served by `/tarifas` and used when a quote carries none
    #[serde(default)]
    pub tarifas: Vec<Tarifa>,
}

fn default_december_rate() -> Decimal {
    DECEMBER_RATE_PER_SLOT
}

fn default_vat_rate() -> Decimal {
    VAT_RATE
}

fn default_tiers() -> Vec<DiscountTier> {
    vec![
        DiscountTier::new(26, dec!(0.10)),
        DiscountTier::new(13, dec!(0.035)),
    ]
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            december_rate_per_slot: default_december_rate(),
            vat_rate: default_vat_rate(),
            tiers: default_tiers(),
            tarifas: Vec::new(),
        }
    }
}

impl PricingConfig {
    /// Build the validated policy handed to the calculator
    pub fn policy(&self) -> AppResult<PricingPolicy> {
        let policy = PricingPolicy {
            december_rate_per_slot: self.december_rate_per_slot,
            vat_rate: self.vat_rate,
            tiers: self.tiers.clone(),
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Build the rate table from the configured rows
    pub fn rate_table(&self) -> RateTable {
        RateTable::from_tarifas(&self.tarifas)
    }
}

impl AppConfig {
    /// Load configuration from environment and optional config file
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        debug!(run_mode = %run_mode, "Loading configuration");

        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.workers", num_cpus::get() as i64)?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables with PRISMA_ prefix
            .add_source(
                Environment::with_prefix("PRISMA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Get the server bind address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_default_pricing_config() {
        let config = PricingConfig::default();
        let policy = config.policy().unwrap();
        assert_eq!(policy, PricingPolicy::default());
        assert!(config.rate_table().is_empty());
    }

    #[test]
    fn test_pricing_from_toml() {
        let toml = r#"
            [server]
            port = 9100

            [pricing]
            vat_rate = "0.19"

            [[pricing.tarifas]]
            codigo_tarifa = "T20"
            duracion_seg = 20
            precio_semana = "1000000"
        "#;

        let config: AppConfig = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server_addr(), "0.0.0.0:9100");
        assert_eq!(config.pricing.vat_rate, dec!(0.19));
        assert_eq!(config.pricing.tiers.len(), 2);
        assert_eq!(
            config.pricing.rate_table().weekly_rate(20),
            Some(dec!(1000000))
        );
    }

    #[test]
    fn test_invalid_tier_rejected() {
        let config = PricingConfig {
            tiers: vec![DiscountTier::new(13, dec!(2))],
            ..Default::default()
        };
        assert!(config.policy().is_err());
    }
}
