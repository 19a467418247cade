//! PostgreSQL persistence layer.

mod pg_click_repository;
mod pg_url_repository;

pub use pg_click_repository::PgClickRepository;
pub use pg_url_repository::PgUrlRepository;
