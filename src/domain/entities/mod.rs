//! Core domain entities representing the business data model.
//!
//! - [`ShortUrl`] - An alias-to-long-URL mapping
//! - [`Click`] - A recorded click on a shortened URL
//!
//! Entities follow the "New Type" pattern with separate structs for creation
//! (`NewShortUrl`, `NewClick`).

pub mod click;
pub mod short_url;

pub use click::{Click, NewClick};
pub use short_url::{NewShortUrl, ShortUrl};
