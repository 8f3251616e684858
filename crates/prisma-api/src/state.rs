//! Shared application state

use prisma_core::config::PricingConfig;
use prisma_core::models::{RateTable, Tarifa};
use prisma_core::AppResult;
use prisma_services::PricingCalculator;

/// Read-only state shared by every worker
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Calculator bound to the configured pricing policy
    pub calculator: PricingCalculator,
    /// Rate table built from the configured rows
    pub rates: RateTable,
    /// Configured rate rows, as served by `/tarifas`
    pub tarifas: Vec<Tarifa>,
}

impl AppState {
    /// Build the state from the pricing section of the configuration
    pub fn from_config(pricing: &PricingConfig) -> AppResult<Self> {
        Ok(Self {
            calculator: PricingCalculator::new(pricing.policy()?),
            rates: pricing.rate_table(),
            tarifas: pricing.tarifas.clone(),
        })
    }
}
