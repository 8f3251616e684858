//! Business logic services for Prisma LED
//!
//! This crate holds the pure calculations behind reservations of spots on
//! the cylinder screens.
//!
//! # Services
//!
//! - `PricingCalculator` - Per-screen and aggregate pricing with December
//!   rates, duration discounts and VAT
//! - `calendar` - December week counting
//! - `AvailabilityEngine` - Screen occupancy, status and pre-reservation checks
//!
//! Nothing here touches shared state: every call takes its inputs by
//! reference and returns a fresh value.

pub mod availability;
pub mod calendar;
pub mod pricing;

pub use availability::{dates_overlap, AvailabilityEngine, AvailabilityQuery};
pub use calendar::{count_december_weeks, december_split};
pub use pricing::{compute_summary, PricingCalculator};
