//! Domain models for Prisma LED
//!
//! This module contains the core domain models shared by the pricing
//! calculator, the availability engine and the HTTP layer.

pub mod agenda;
pub mod de;
pub mod quote;
pub mod rate;
pub mod reservation;
pub mod screen;

pub use agenda::{Agenda, Booking, BookingDetail, Pantalla, ScreenAvailability, ScreenStatus};
pub use quote::{DiscountTier, PricingPolicy, PricingSummary, ScreenQuote};
pub use rate::{RateTable, SpotLength, Tarifa};
pub use reservation::{DecemberSplit, Periodo, ReservationWindow};
pub use screen::ScreenSelection;
