//! Screen availability
//!
//! Evaluates a requested period against an agenda of confirmed reservations
//! and pending pre-reservations. Each screen sells at most 60 seconds per
//! loop, and a cylinder cannot carry two clients' campaigns of the same
//! category over overlapping periods.

use chrono::NaiveDate;
use prisma_core::models::rate::SCREEN_CAPACITY_SECONDS;
use prisma_core::models::{
    Agenda, Booking, BookingDetail, RateTable, ReservationWindow, ScreenAvailability, ScreenStatus,
};
use prisma_core::{AppError, AppResult};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, instrument, warn};

/// Whether two inclusive date ranges share at least one day
#[inline]
pub fn dates_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && b_start <= a_end
}

/// Availability request for a period and campaign category
#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityQuery {
    /// First day of the requested period
    pub fecha_inicio: NaiveDate,

    /// Requested duration in weeks (1 to 52)
    pub duracion_semanas: i64,

    /// Campaign category of the requesting client
    pub categoria: String,

    /// Requesting client
    pub id_cliente: String,

    /// Pre-reservation being edited, left out of the occupancy
    #[serde(default)]
    pub excluir_prereserva_id: Option<String>,
}

impl AvailabilityQuery {
    /// Requested reservation window
    pub fn window(&self) -> ReservationWindow {
        ReservationWindow::new(self.fecha_inicio, self.duracion_semanas)
    }
}

/// Read-only view over an agenda
pub struct AvailabilityEngine<'a> {
    agenda: &'a Agenda,
    rates: RateTable,
    cylinders: HashMap<&'a str, i64>,
}

impl<'a> AvailabilityEngine<'a> {
    /// Index the agenda's screens and rate codes
    pub fn new(agenda: &'a Agenda) -> Self {
        let cylinders = agenda
            .pantallas
            .iter()
            .map(|p| (p.id_pantalla.as_str(), p.cilindro))
            .collect();

        Self {
            agenda,
            rates: RateTable::from_tarifas(&agenda.tarifas),
            cylinders,
        }
    }

    /// Seconds sold under a booking detail; unknown codes sell nothing
    fn detail_seconds(&self, detail: &BookingDetail) -> u32 {
        self.rates
            .seconds_for_code(&detail.codigo_tarifa)
            .unwrap_or_else(|| {
                warn!(code = %detail.codigo_tarifa, "Unknown rate code in booking detail");
                0
            })
    }

    /// Seconds already sold per screen by bookings overlapping the period
    pub fn occupied_seconds<'b>(
        &self,
        bookings: impl IntoIterator<Item = &'b Booking>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> HashMap<String, u32> {
        let mut occupied: HashMap<String, u32> = HashMap::new();
        for booking in bookings {
            if !dates_overlap(booking.fecha_inicio, booking.fecha_fin, start, end) {
                continue;
            }
            for detail in &booking.detalles {
                *occupied.entry(detail.id_pantalla.clone()).or_default() +=
                    self.detail_seconds(detail);
            }
        }
        occupied
    }

    fn cylinder_of(&self, id_pantalla: &str) -> Option<i64> {
        self.cylinders.get(id_pantalla).copied()
    }

    fn prereservations<'s>(&'s self, excluded: Option<&'s str>) -> impl Iterator<Item = &'a Booking> + 's {
        self.agenda
            .prereservas
            .iter()
            .filter(move |p| excluded.map_or(true, |id| p.id != id))
    }

    /// Availability of every screen for the requested period
    #[instrument(skip(self, query), fields(fecha_inicio = %query.fecha_inicio, semanas = query.duracion_semanas))]
    pub fn screen_availability(
        &self,
        query: &AvailabilityQuery,
    ) -> AppResult<BTreeMap<String, ScreenAvailability>> {
        let window = query.window();
        window.validate()?;
        let (start, end) = (window.fecha_inicio, window.fecha_fin());
        let excluded = query.excluir_prereserva_id.as_deref();

        let prereservas: Vec<&Booking> = self.prereservations(excluded).collect();

        let mut occupied = self.occupied_seconds(&self.agenda.reservas, start, end);
        for (screen, seconds) in self.occupied_seconds(prereservas.iter().copied(), start, end) {
            *occupied.entry(screen).or_default() += seconds;
        }

        let mut result = BTreeMap::new();
        for pantalla in &self.agenda.pantallas {
            let id = pantalla.id_pantalla.as_str();
            let used = occupied.get(id).copied().unwrap_or(0);
            let available = SCREEN_CAPACITY_SECONDS.saturating_sub(used);

            let pre_periods = active_periods(prereservas.iter().copied(), id, start, end);
            let res_periods = active_periods(&self.agenda.reservas, id, start, end);

            let (mut status, mut message) = if !pre_periods.is_empty() && available == 0 {
                (ScreenStatus::Reserved, active_message(&pre_periods))
            } else if !res_periods.is_empty() {
                let status = if available > 0 {
                    ScreenStatus::Partial
                } else {
                    ScreenStatus::Occupied
                };
                (status, active_message(&res_periods))
            } else if available < SCREEN_CAPACITY_SECONDS {
                (
                    ScreenStatus::Partial,
                    format!("Disponible parcialmente ({} segundos libres)", available),
                )
            } else {
                (
                    ScreenStatus::Available,
                    "Pantalla completamente disponible".to_string(),
                )
            };

            if status.is_bookable()
                && self.category_blocked(
                    self.agenda.reservas.iter().chain(prereservas.iter().copied()),
                    pantalla.cilindro,
                    &query.categoria,
                    &query.id_cliente,
                    start,
                    end,
                )
            {
                status = ScreenStatus::Restricted;
                message = format!(
                    "Conflicto de categoría con otra pauta en cilindro {}",
                    pantalla.cilindro
                );
            }

            result.insert(
                pantalla.id_pantalla.clone(),
                ScreenAvailability {
                    status,
                    message,
                    cilindro: pantalla.cilindro,
                    identificador: pantalla.identificador.clone(),
                    available_seconds: available,
                },
            );
        }

        debug!(screens = result.len(), "Availability computed");
        Ok(result)
    }

    /// Whether another client runs a same-category campaign on the cylinder
    fn category_blocked<'b>(
        &self,
        bookings: impl Iterator<Item = &'b Booking>,
        cilindro: i64,
        categoria: &str,
        id_cliente: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> bool {
        bookings
            .filter(|b| !b.is_owned_by(id_cliente))
            .filter(|b| b.categoria() == Some(categoria))
            .filter(|b| dates_overlap(b.fecha_inicio, b.fecha_fin, start, end))
            .any(|b| {
                b.detalles
                    .iter()
                    .any(|d| self.cylinder_of(&d.id_pantalla) == Some(cilindro))
            })
    }

    /// Check that a pre-reservation can take the candidate screens
    ///
    /// Fails when the pre-reservation does not exist, when a screen would
    /// exceed its 60 seconds, or when another client's campaign of the same
    /// category overlaps on one of the candidate cylinders.
    #[instrument(skip(self, candidates), fields(candidate_count = candidates.len()))]
    pub fn validate_prereservation(
        &self,
        id_prereserva: &str,
        candidates: &[BookingDetail],
        categoria: &str,
        id_cliente: &str,
    ) -> AppResult<()> {
        let current = self
            .agenda
            .prereservas
            .iter()
            .find(|p| p.id == id_prereserva)
            .ok_or_else(|| AppError::PrereservationNotFound(id_prereserva.to_string()))?;
        let (start, end) = (current.fecha_inicio, current.fecha_fin);

        let mut occupied = self.occupied_seconds(&self.agenda.reservas, start, end);
        for (screen, seconds) in
            self.occupied_seconds(self.prereservations(Some(id_prereserva)), start, end)
        {
            *occupied.entry(screen).or_default() += seconds;
        }

        for candidate in candidates {
            let entry = occupied.entry(candidate.id_pantalla.clone()).or_default();
            *entry += self.detail_seconds(candidate);
            if *entry > SCREEN_CAPACITY_SECONDS {
                debug!(screen = %candidate.id_pantalla, seconds = *entry, "Capacity exceeded");
                return Err(AppError::CapacityExceeded {
                    screen: candidate.id_pantalla.clone(),
                    limit: SCREEN_CAPACITY_SECONDS,
                });
            }
        }

        let candidate_cylinders: HashSet<i64> = candidates
            .iter()
            .filter_map(|c| self.cylinder_of(&c.id_pantalla))
            .collect();

        let others = self
            .agenda
            .reservas
            .iter()
            .chain(self.agenda.prereservas.iter())
            .filter(|b| !b.is_owned_by(id_cliente))
            .filter(|b| dates_overlap(b.fecha_inicio, b.fecha_fin, start, end));

        for booking in others {
            for detail in booking.detalles.iter().filter(|d| d.categoria == categoria) {
                if let Some(cilindro) = self
                    .cylinder_of(&detail.id_pantalla)
                    .filter(|c| candidate_cylinders.contains(c))
                {
                    debug!(cilindro, booking = %booking.id, "Category conflict");
                    return Err(AppError::CategoryConflict(cilindro));
                }
            }
        }

        Ok(())
    }
}

/// Periods of bookings that place a spot on the screen during the window
fn active_periods<'b>(
    bookings: impl IntoIterator<Item = &'b Booking>,
    id_pantalla: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<(NaiveDate, NaiveDate)> {
    bookings
        .into_iter()
        .filter(|b| b.uses_screen(id_pantalla))
        .filter(|b| dates_overlap(b.fecha_inicio, b.fecha_fin, start, end))
        .map(|b| (b.fecha_inicio, b.fecha_fin))
        .collect()
}

fn active_message(periods: &[(NaiveDate, NaiveDate)]) -> String {
    let listed: Vec<String> = periods
        .iter()
        .map(|(from, to)| format!("{} a {}", from, to))
        .collect();
    format!("Pauta activa periodo: {}", listed.join(", "))
}
