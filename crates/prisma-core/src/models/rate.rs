//! Rate table model
//!
//! Weekly prices ("tarifas") keyed by spot duration. The table is built once
//! from the rates payload and is read-only for the lifetime of a calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::de::{i64_from_any, id_from_any};

/// Seconds that make up one billing slot (cupo)
pub const SLOT_SECONDS: u32 = 20;

/// Maximum seconds that can be sold on one screen for a given period
pub const SCREEN_CAPACITY_SECONDS: u32 = 60;

/// Rate row as served by the rates endpoint
///
/// `{"codigo_tarifa": "T20", "duracion_seg": 20, "precio_semana": 1000000}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tarifa {
    /// Rate code referenced by reservation details
    #[serde(deserialize_with = "id_from_any")]
    pub codigo_tarifa: String,

    /// Spot duration in seconds
    #[serde(deserialize_with = "i64_from_any")]
    pub duracion_seg: i64,

    /// Ordinary (non-December) weekly price
    pub precio_semana: Decimal,
}

/// Spot lengths sold per loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpotLength {
    /// 20 second spot, one slot
    Short,
    /// 40 second spot, two slots
    Medium,
    /// 60 second spot, the whole loop
    Long,
}

impl SpotLength {
    /// All supported lengths, shortest first
    pub const ALL: [SpotLength; 3] = [SpotLength::Short, SpotLength::Medium, SpotLength::Long];

    /// Parse from a duration in seconds
    pub fn from_seconds(seconds: u32) -> Option<Self> {
        match seconds {
            20 => Some(SpotLength::Short),
            40 => Some(SpotLength::Medium),
            60 => Some(SpotLength::Long),
            _ => None,
        }
    }

    /// Duration in seconds
    pub fn seconds(self) -> u32 {
        match self {
            SpotLength::Short => 20,
            SpotLength::Medium => 40,
            SpotLength::Long => 60,
        }
    }

    /// Billing slots this length occupies
    pub fn slots(self) -> u32 {
        slots_for_seconds(self.seconds())
    }
}

/// Billing slots for a spot duration: `max(1, round(seconds / 20))`
///
/// Zero seconds yields zero slots.
#[inline]
pub fn slots_for_seconds(seconds: u32) -> u32 {
    if seconds == 0 {
        return 0;
    }
    (seconds.saturating_add(SLOT_SECONDS / 2) / SLOT_SECONDS).max(1)
}

/// Weekly price by spot duration, plus the code -> seconds mapping used by
/// reservation details
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateTable {
    weekly: BTreeMap<u32, Decimal>,
    codes: HashMap<String, u32>,
}

impl RateTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from rate rows
    ///
    /// Rows with a negative duration are ignored. Rows without a positive
    /// price still register their code so occupancy can be computed, but add
    /// no weekly price. A later row for the same duration overrides earlier ones.
    ///
    /// A zero-price row is treated as a missing rate on purpose, so screens of
    /// that duration fall back to their own `base` instead of pricing at zero.
    pub fn from_tarifas(tarifas: &[Tarifa]) -> Self {
        let mut table = Self::new();
        for t in tarifas {
            let Ok(seconds) = u32::try_from(t.duracion_seg) else {
                continue;
            };
            if !t.codigo_tarifa.is_empty() {
                table.codes.insert(t.codigo_tarifa.clone(), seconds);
            }
            if seconds > 0 && t.precio_semana > Decimal::ZERO {
                table.weekly.insert(seconds, t.precio_semana);
            }
        }
        table
    }

    /// Add or replace the weekly price for a duration
    pub fn with_rate(mut self, seconds: u32, weekly_price: Decimal) -> Self {
        self.weekly.insert(seconds, weekly_price);
        self
    }

    /// Weekly price for a spot duration
    #[inline]
    pub fn weekly_rate(&self, seconds: u32) -> Option<Decimal> {
        self.weekly.get(&seconds).copied()
    }

    /// Spot seconds sold under a rate code
    #[inline]
    pub fn seconds_for_code(&self, code: &str) -> Option<u32> {
        self.codes.get(code.trim()).copied()
    }

    /// Number of priced durations
    pub fn len(&self) -> usize {
        self.weekly.len()
    }

    /// Whether no duration is priced
    pub fn is_empty(&self) -> bool {
        self.weekly.is_empty()
    }

    /// Priced durations in ascending order
    pub fn iter(&self) -> impl Iterator<Item = (u32, Decimal)> + '_ {
        self.weekly.iter().map(|(s, p)| (*s, *p))
    }
}

impl From<&[Tarifa]> for RateTable {
    fn from(tarifas: &[Tarifa]) -> Self {
        Self::from_tarifas(tarifas)
    }
}
