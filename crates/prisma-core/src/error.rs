//! Unified error handling for Prisma LED
//!
//! This module provides the error type shared by the availability engine and
//! the HTTP layer, with automatic HTTP response mapping. The pricing
//! calculator is total and never produces one of these.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Main application error type
///
/// All errors in the application should be converted to this type.
/// It implements `ResponseError` for automatic HTTP response generation.
#[derive(Error, Debug)]
pub enum AppError {
    // ==================== Business Logic Errors ====================
    #[error("Pre-reservation not found: {0}")]
    PrereservationNotFound(String),

    #[error("Screen {screen} exceeds the {limit} second limit")]
    CapacityExceeded { screen: String, limit: u32 },

    #[error("Category conflict on cylinder {0}")]
    CategoryConflict(i64),

    #[error("Unsupported reservation duration: {0} weeks")]
    UnsupportedDuration(i64),

    // ==================== Validation Errors ====================
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ==================== Internal Errors ====================
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            AppError::Validation(_)
            | AppError::InvalidInput(_)
            | AppError::UnsupportedDuration(_) => StatusCode::BAD_REQUEST,

            // 404 Not Found
            AppError::PrereservationNotFound(_) => StatusCode::NOT_FOUND,

            // 409 Conflict
            AppError::CapacityExceeded { .. }
            | AppError::CategoryConflict(_) => StatusCode::CONFLICT,

            // 500 Internal Server Error
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::PrereservationNotFound(_) => "prereservation_not_found",
            AppError::CapacityExceeded { .. } => "capacity_exceeded",
            AppError::CategoryConflict(_) => "category_conflict",
            AppError::UnsupportedDuration(_) => "unsupported_duration",
            AppError::Validation(_) => "validation_error",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::Config(_) => "config_error",
            AppError::Serialization(_) => "serialization_error",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        AppError::status_code(self)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = json!({
            "error": self.error_code(),
            "message": self.to_string(),
            "status": status.as_u16(),
        });

        HttpResponse::build(status).json(body)
    }
}

// ==================== From implementations ====================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}
