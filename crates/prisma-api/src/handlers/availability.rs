//! Availability handlers
//!
//! Screen availability and pre-reservation checks over an agenda snapshot.

use crate::dto::{
    ApiResponse, AvailabilityRequest, PrereservationCheckRequest, PrereservationCheckResponse,
};
use actix_web::{web, HttpResponse};
use prisma_core::AppError;
use prisma_services::AvailabilityEngine;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

/// Availability of every screen for a period
///
/// POST /api/v1/reservas/disponibilidad
#[instrument(skip(req), fields(fecha_inicio = %req.fecha_inicio, semanas = req.duracion_semanas))]
pub async fn screen_availability(
    req: web::Json<AvailabilityRequest>,
) -> Result<HttpResponse, AppError> {
    if let Err(e) = req.validate() {
        warn!("Availability validation failed: {}", e);
        // Out-of-range durations keep their dedicated error
        if e.field_errors().contains_key("duracion_semanas") {
            return Err(AppError::UnsupportedDuration(req.duracion_semanas));
        }
        return Err(AppError::Validation(e.to_string()));
    }

    let engine = AvailabilityEngine::new(&req.agenda);
    let result = engine.screen_availability(&req.to_query())?;

    debug!(screens = result.len(), "Availability returned");
    Ok(HttpResponse::Ok().json(ApiResponse::success(result)))
}

/// Check that a pre-reservation can take new screens
///
/// POST /api/v1/prereservas/validar
#[instrument(skip(req), fields(id_prereserva = %req.id_prereserva))]
pub async fn validate_prereservation(
    req: web::Json<PrereservationCheckRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Pre-reservation check validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    let engine = AvailabilityEngine::new(&req.agenda);
    engine.validate_prereservation(
        &req.id_prereserva,
        &req.pantallas,
        req.categoria.trim(),
        &req.id_cliente,
    )?;

    info!(id_prereserva = %req.id_prereserva, "Pre-reservation accepted");
    Ok(HttpResponse::Ok().json(ApiResponse::success(PrereservationCheckResponse {
        valida: true,
    })))
}

/// Configure availability routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/reservas/disponibilidad",
        web::post().to(screen_availability),
    )
    .route(
        "/prereservas/validar",
        web::post().to(validate_prereservation),
    );
}
