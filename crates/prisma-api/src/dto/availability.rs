//! Availability DTOs
//!
//! The agenda snapshot travels in the request body.

use chrono::NaiveDate;
use prisma_core::models::{Agenda, BookingDetail};
use prisma_services::AvailabilityQuery;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Screen availability request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AvailabilityRequest {
    /// First day of the requested period
    pub fecha_inicio: NaiveDate,

    /// Duration in weeks
    #[validate(range(min = 1, max = 52, message = "Duration must be between 1 and 52 weeks"))]
    pub duracion_semanas: i64,

    /// Campaign category
    #[validate(length(min = 1, message = "Category is required"))]
    pub categoria: String,

    /// Requesting client
    #[validate(length(min = 1, message = "Client is required"))]
    pub id_cliente: String,

    /// Pre-reservation being edited
    #[serde(default)]
    pub excluir_prereserva_id: Option<String>,

    /// Screens and bookings to evaluate against
    #[serde(default)]
    pub agenda: Agenda,
}

impl AvailabilityRequest {
    /// Query handed to the availability engine
    pub fn to_query(&self) -> AvailabilityQuery {
        AvailabilityQuery {
            fecha_inicio: self.fecha_inicio,
            duracion_semanas: self.duracion_semanas,
            categoria: self.categoria.trim().to_string(),
            id_cliente: self.id_cliente.trim().to_string(),
            excluir_prereserva_id: self.excluir_prereserva_id.clone(),
        }
    }
}

/// Pre-reservation validation request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PrereservationCheckRequest {
    /// Pre-reservation receiving the screens
    #[validate(length(min = 1, message = "Pre-reservation id is required"))]
    pub id_prereserva: String,

    /// Campaign category
    #[validate(length(min = 1, message = "Category is required"))]
    pub categoria: String,

    /// Owning client
    #[serde(default)]
    pub id_cliente: String,

    /// Screens to add
    #[validate(length(min = 1, message = "At least one screen is required"))]
    pub pantallas: Vec<BookingDetail>,

    /// Screens and bookings to evaluate against
    #[serde(default)]
    pub agenda: Agenda,
}

/// Pre-reservation validation result
#[derive(Debug, Clone, Serialize)]
pub struct PrereservationCheckResponse {
    /// Always true; failures are reported as errors
    pub valida: bool,
}
