use chrono::Utc;
use interfaces_github_search::models::RepositoryRecord;
use thiserror::Error;

use crate::db::{
    repository::{
        models::StoredRepository,
        queries::{
            get_repository_by_full_name, upsert_repository, GetRepositoryByFullNameError,
            UpsertOutcome, UpsertRepositoryError,
        },
    },
    PgPool,
};

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("GetConnectionFromPool: {source}")]
    GetConnectionFromPool {
        #[from]
        source: r2d2::Error,
    },
    #[error("UpsertRepository: {source}")]
    UpsertRepository {
        #[from]
        source: UpsertRepositoryError,
    },
    #[error("GetRepositoryByFullName: {source}")]
    GetRepositoryByFullName {
        #[from]
        source: GetRepositoryByFullNameError,
    },
}

impl PersistenceError {
    /// True when no connection could be obtained at all, as opposed to a
    /// single statement failing.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, PersistenceError::GetConnectionFromPool { .. })
    }
}

/// Storage for repositories seen by the search endpoint.
///
/// Calls block; run them off the async executor.
pub trait RepositoryStore: Send + Sync {
    fn upsert(&self, record: &RepositoryRecord) -> Result<UpsertOutcome, PersistenceError>;

    fn find_by_full_name(&self, full_name: &str)
        -> Result<Option<StoredRepository>, PersistenceError>;
}

pub struct PgRepositoryStore {
    pool: PgPool,
    echo: bool,
}

impl PgRepositoryStore {
    pub fn new(pool: PgPool, echo: bool) -> Self {
        Self { pool, echo }
    }
}

impl RepositoryStore for PgRepositoryStore {
    fn upsert(&self, record: &RepositoryRecord) -> Result<UpsertOutcome, PersistenceError> {
        let mut conn = self.pool.get()?;
        let outcome = upsert_repository(&mut conn, record, Utc::now(), self.echo)?;
        Ok(outcome)
    }

    fn find_by_full_name(
        &self,
        full_name: &str,
    ) -> Result<Option<StoredRepository>, PersistenceError> {
        let mut conn = self.pool.get()?;
        let row = get_repository_by_full_name(&mut conn, full_name)?;
        Ok(row)
    }
}
