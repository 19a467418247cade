//! Utility functions for alias generation and request handling.
//!
//! - [`alias_generator`] - Random short alias generation
//! - [`client_ip`] - Client IP extraction from headers and peer address

pub mod alias_generator;
pub mod client_ip;
