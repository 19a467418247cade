//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; concrete implementations
//! live in `crate::infrastructure::persistence`. Mock implementations are
//! auto-generated via `mockall` for testing.
//!
//! # Available Repositories
//!
//! - [`UrlRepository`] - Short URL mapping storage and lookups
//! - [`ClickRepository`] - Click recording and aggregation queries

pub mod click_repository;
pub mod url_repository;

pub use click_repository::{
    ClickRepository, DateClicks, DeviceGroup, FlatDeviceGroup, FlatOsGroup, OsGroup,
};
pub use url_repository::UrlRepository;

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use url_repository::MockUrlRepository;
