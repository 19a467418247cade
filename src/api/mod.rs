//! HTTP API layer: DTOs, handlers, middleware, and route definitions.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
