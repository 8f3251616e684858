//! Booking agenda models
//!
//! Snapshot of screens, rates and existing bookings the availability engine
//! evaluates a request against.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::de::{i64_from_any, id_from_any};
use super::rate::Tarifa;

/// A physical screen mounted on a cylinder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pantalla {
    /// Screen identifier
    #[serde(deserialize_with = "id_from_any")]
    pub id_pantalla: String,

    /// Cylinder hosting the screen
    #[serde(deserialize_with = "i64_from_any")]
    pub cilindro: i64,

    /// Human-readable label
    #[serde(default)]
    pub identificador: String,
}

/// One screen booked under a reservation or pre-reservation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDetail {
    /// Booked screen
    #[serde(deserialize_with = "id_from_any")]
    pub id_pantalla: String,

    /// Rate code, which determines the seconds sold
    #[serde(alias = "cod_tarifas", deserialize_with = "id_from_any")]
    pub codigo_tarifa: String,

    /// Advertiser category of the campaign
    #[serde(default)]
    pub categoria: String,
}

/// A confirmed reservation or a pending pre-reservation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Reservation or pre-reservation identifier
    #[serde(
        alias = "id_reserva",
        alias = "id_prereserva",
        deserialize_with = "id_from_any"
    )]
    pub id: String,

    /// Owning client
    #[serde(default)]
    pub id_cliente: String,

    /// First day on air
    pub fecha_inicio: NaiveDate,

    /// Last day on air
    pub fecha_fin: NaiveDate,

    /// Screens booked
    #[serde(default)]
    pub detalles: Vec<BookingDetail>,
}

impl Booking {
    /// Category of the campaign, taken from its first detail
    pub fn categoria(&self) -> Option<&str> {
        self.detalles.first().map(|d| d.categoria.as_str())
    }

    /// Whether the booking places a spot on `id_pantalla`
    pub fn uses_screen(&self, id_pantalla: &str) -> bool {
        self.detalles.iter().any(|d| d.id_pantalla == id_pantalla)
    }

    /// Whether `id_cliente` owns this booking
    pub fn is_owned_by(&self, id_cliente: &str) -> bool {
        self.id_cliente.trim() == id_cliente.trim()
    }
}

/// Everything the availability engine needs to answer a request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Agenda {
    /// All screens
    #[serde(default)]
    pub pantallas: Vec<Pantalla>,

    /// Rate rows, used to turn rate codes into seconds
    #[serde(default)]
    pub tarifas: Vec<Tarifa>,

    /// Confirmed reservations
    #[serde(default)]
    pub reservas: Vec<Booking>,

    /// Pending pre-reservations
    #[serde(default)]
    pub prereservas: Vec<Booking>,
}

/// Availability state of one screen for the requested period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScreenStatus {
    /// No seconds sold
    #[serde(rename = "disponible")]
    Available,
    /// Some seconds still free
    #[serde(rename = "parcial")]
    Partial,
    /// Fully taken by pre-reservations
    #[serde(rename = "reservado")]
    Reserved,
    /// Fully taken by confirmed reservations
    #[serde(rename = "ocupado")]
    Occupied,
    /// Blocked by another client's campaign of the same category on the cylinder
    #[serde(rename = "restringido")]
    Restricted,
}

impl ScreenStatus {
    /// Whether a new spot can still be placed
    pub fn is_bookable(&self) -> bool {
        matches!(self, ScreenStatus::Available | ScreenStatus::Partial)
    }
}

impl fmt::Display for ScreenStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreenStatus::Available => write!(f, "disponible"),
            ScreenStatus::Partial => write!(f, "parcial"),
            ScreenStatus::Reserved => write!(f, "reservado"),
            ScreenStatus::Occupied => write!(f, "ocupado"),
            ScreenStatus::Restricted => write!(f, "restringido"),
        }
    }
}

/// Availability answer for one screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenAvailability {
    /// Availability state
    #[serde(rename = "estado")]
    pub status: ScreenStatus,

    /// Explanation shown next to the screen
    #[serde(rename = "mensaje")]
    pub message: String,

    /// Cylinder hosting the screen
    pub cilindro: i64,

    /// Human-readable label
    pub identificador: String,

    /// Seconds still free in the loop
    #[serde(rename = "segundos_disponibles")]
    pub available_seconds: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_from_sheet_rows() {
        let booking: Booking = serde_json::from_str(
            r#"{
                "id_prereserva": "a1b2c3d4",
                "id_cliente": "CL-9 ",
                "fecha_inicio": "2025-03-03",
                "fecha_fin": "2025-03-17",
                "detalles": [
                    {"id_pantalla": 4, "cod_tarifas": "T20", "categoria": "bancos"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(booking.id, "a1b2c3d4");
        assert_eq!(booking.categoria(), Some("bancos"));
        assert!(booking.uses_screen("4"));
        assert!(booking.is_owned_by("CL-9"));
        assert!(!booking.is_owned_by("CL-1"));
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&ScreenStatus::Restricted).unwrap();
        assert_eq!(json, r#""restringido""#);
        assert_eq!(ScreenStatus::Occupied.to_string(), "ocupado");
        assert!(ScreenStatus::Partial.is_bookable());
        assert!(!ScreenStatus::Reserved.is_bookable());
    }
}
