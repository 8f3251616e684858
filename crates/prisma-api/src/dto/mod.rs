//! Data Transfer Objects (DTOs) for API requests and responses

pub mod availability;
pub mod common;
pub mod quote;

pub use availability::*;
pub use common::*;
pub use quote::*;
