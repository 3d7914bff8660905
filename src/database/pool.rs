use crate::config::get_config;
use crate::error::Result;
use sqlx::{postgres::PgPoolOptions, PgPool};

/// Lazy pool: nothing connects until the first query, and a failed attempt
/// is retried on the next acquire.
pub fn create_pool() -> Result<PgPool> {
    let config = get_config();
    let pool = PgPoolOptions::new()
        .max_connections(20)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect_lazy(&config.database_url)?;
    Ok(pool)
}
