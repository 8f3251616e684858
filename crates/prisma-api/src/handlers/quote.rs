//! Quote handlers
//!
//! Prices a reservation request with the configured policy.

use crate::dto::{ApiResponse, QuoteRequest, QuoteResponse};
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use prisma_core::models::RateTable;
use prisma_core::AppError;
use std::borrow::Cow;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

/// Quote a reservation
///
/// POST /api/v1/cotizaciones
#[instrument(skip(state, req), fields(pantallas = req.pantallas.len(), duracion = req.duracion))]
pub async fn create_quote(
    state: web::Data<AppState>,
    req: web::Json<QuoteRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Quote validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;
    req.check_spot_lengths()?;
    let weeks = req.weeks()?;

    let rates = match &req.tarifas {
        Some(tarifas) => {
            debug!(rows = tarifas.len(), "Using request rates");
            Cow::Owned(RateTable::from_tarifas(tarifas))
        }
        None => Cow::Borrowed(&state.rates),
    };

    let summary = state
        .calculator
        .summarize(&req.pantallas, Some(weeks), &rates, req.fecha_inicio);

    info!(
        total = %summary.total,
        semanas_dic = summary.december_weeks,
        "Quote computed"
    );

    let response = QuoteResponse::new(summary, weeks, req.fecha_inicio);
    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

/// Configure quote routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/cotizaciones", web::post().to(create_quote));
}
