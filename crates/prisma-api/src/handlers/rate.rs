//! Rate handlers

use crate::dto::ApiResponse;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use tracing::{debug, instrument};

/// List the configured rate rows
///
/// GET /api/v1/tarifas
#[instrument(skip(state))]
pub async fn list_tarifas(state: web::Data<AppState>) -> HttpResponse {
    debug!(count = state.tarifas.len(), "Listing rates");
    HttpResponse::Ok().json(ApiResponse::success(&state.tarifas))
}

/// Configure rate routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/tarifas", web::get().to(list_tarifas));
}
