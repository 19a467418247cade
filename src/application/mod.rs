//! Application layer with business logic services.

pub mod reports;
pub mod services;
