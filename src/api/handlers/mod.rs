//! HTTP request handlers.

pub mod analytics;
pub mod health;
pub mod redirect;
pub mod shorten;

pub use analytics::{alias_analytics_handler, overall_analytics_handler, topic_analytics_handler};
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
