//! Domain layer containing business entities and logic.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`click_event`] - Queued click capture model
//! - [`click_worker`] - Asynchronous click processing worker
//!
//! # Click Processing Flow
//!
//! 1. The redirect handler resolves an alias (cache-first, store-fallback)
//! 2. A [`click_event::ClickCapture`] is sent to a bounded channel
//! 3. [`click_worker::run_click_worker`] enriches the event with geolocation
//!    data and persists it via [`repositories::ClickRepository`]
//!
//! The worker never blocks or fails a redirect: geolocation lookups are
//! best-effort and persistence errors are logged, not propagated.

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
