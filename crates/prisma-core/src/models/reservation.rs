//! Reservation window model
//!
//! A reservation runs for a whole number of weeks from its start date.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AppError;
use crate::AppResult;

/// Longest reservation accepted, in weeks
pub const MAX_RESERVATION_WEEKS: i64 = 52;

/// Unit the customer picked the duration in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Periodo {
    /// Duration given in weeks
    #[default]
    #[serde(alias = "week", alias = "semana")]
    Semanas,
    /// Duration given in months; one month counts as four weeks
    #[serde(alias = "month", alias = "mes")]
    Meses,
}

impl Periodo {
    /// Convert an amount in this unit to weeks
    pub fn to_weeks(self, amount: i64) -> i64 {
        match self {
            Periodo::Semanas => amount,
            Periodo::Meses => amount.saturating_mul(4),
        }
    }
}

impl fmt::Display for Periodo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Periodo::Semanas => write!(f, "semanas"),
            Periodo::Meses => write!(f, "meses"),
        }
    }
}

/// Start date plus duration in weeks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationWindow {
    /// First day on air
    pub fecha_inicio: NaiveDate,

    /// Duration in weeks
    pub duracion: i64,
}

impl ReservationWindow {
    /// Create a window
    pub fn new(fecha_inicio: NaiveDate, duracion: i64) -> Self {
        Self {
            fecha_inicio,
            duracion,
        }
    }

    /// End date: `fecha_inicio + duracion * 7` days
    ///
    /// Non-positive durations end on the start date.
    pub fn fecha_fin(&self) -> NaiveDate {
        let days = u64::try_from(self.duracion.max(0)).unwrap_or(0) * 7;
        self.fecha_inicio
            .checked_add_days(Days::new(days))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Check the duration against the bookable range (1 to 52 weeks)
    pub fn validate(&self) -> AppResult<()> {
        if (1..=MAX_RESERVATION_WEEKS).contains(&self.duracion) {
            Ok(())
        } else {
            Err(AppError::UnsupportedDuration(self.duracion))
        }
    }
}

/// Partition of a reservation's weeks into December and ordinary weeks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DecemberSplit {
    /// Weeks lying entirely in December
    pub december_weeks: u32,

    /// All remaining weeks
    pub regular_weeks: u32,
}

impl DecemberSplit {
    /// Total weeks in the split
    pub fn total(&self) -> u32 {
        self.december_weeks + self.regular_weeks
    }
}
