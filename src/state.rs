//! Shared application state injected into all handlers.

use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::{AnalyticsService, IdentityProvider, ShortenerService};
use crate::domain::click_event::ClickCapture;
use crate::infrastructure::cache::CacheService;

/// Application state shared across the router.
///
/// Cloning is cheap: everything inside is an `Arc`, a pool handle, or a
/// channel sender.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub shortener_service: Arc<ShortenerService>,
    pub analytics_service: Arc<AnalyticsService>,
    pub identity: Arc<dyn IdentityProvider>,
    pub cache: Arc<dyn CacheService>,
    pub click_sender: mpsc::Sender<ClickCapture>,
}
