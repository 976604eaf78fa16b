pub mod schema;
pub mod repository;
pub mod store;

use std::time::Duration;

use diesel::r2d2::{ConnectionManager, Pool};
use diesel::PgConnection;

pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds the pool without opening a connection up front, so an unreachable
/// database surfaces per checkout instead of at startup.
pub fn build_pool(database_url: &str, connect_timeout: Duration) -> PgPool {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .min_idle(Some(0))
        .connection_timeout(connect_timeout)
        .build_unchecked(manager)
}
