//! API layer for Prisma LED
//!
//! HTTP handlers for quotes, rate listing and screen availability.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod dto;
pub mod handlers;
pub mod state;

use actix_web::web;

pub use dto::ApiResponse;
pub use handlers::{configure_availability, configure_quotes, configure_rates, health_check};
pub use state::AppState;

/// Configure every `/api/v1` route
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check))
            .configure(configure_rates)
            .configure(configure_quotes)
            .configure(configure_availability),
    );
}
