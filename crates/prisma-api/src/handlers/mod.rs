//! HTTP request handlers

pub mod availability;
pub mod health;
pub mod quote;
pub mod rate;

pub use availability::configure as configure_availability;
pub use health::health_check;
pub use quote::configure as configure_quotes;
pub use rate::configure as configure_rates;
