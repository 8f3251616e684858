//! Prisma LED Core Library
//!
//! This crate provides the foundational types and error handling for the
//! Prisma LED reservation system. It includes:
//!
//! - Domain models (screen selections, rate table, bookings, quotes)
//! - Currency helpers (VAT, COP formatting)
//! - Unified error handling with HTTP response mapping
//! - Application configuration

pub mod config;
pub mod error;
pub mod models;
pub mod money;

pub use config::AppConfig;
pub use error::AppError;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
